mod trace;

use super::*;
use ndarray::{s, Array2, Array3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SEED: u64 = 0x5eed_c0de;

/// Geometry of the randomized tests: 9x9 -> 3x3 filters -> 7x7 -> 3x3/2 -> 3x3
pub type TestLayer = ConvMaxpoolLayer<9, 3, 4, 3, 2, 7, 3>;

lazy_static! {
    static ref IMAGE: Image<i32, 9> = random_image(&mut StdRng::seed_from_u64(SEED), 0, 255);
    static ref WEIGHTS: KernelWeights<i32, 4, 3> =
        random_weights(&mut StdRng::seed_from_u64(SEED + 1), -4, 4);
    static ref BIASES: KernelBiases<i32, 4> = [-300, 0, 25, -2000];
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn random_image<const N: usize>(rng: &mut StdRng, low: i32, high: i32) -> Image<i32, N> {
    let mut image = [[0; N]; N];
    for px in image.iter_mut().flatten() {
        *px = rng.gen_range(low..=high);
    }
    image
}

pub fn random_weights<const K: usize, const F: usize>(
    rng: &mut StdRng,
    low: i32,
    high: i32,
) -> KernelWeights<i32, K, F> {
    let mut weights = [[[0; F]; F]; K];
    for w in weights.iter_mut().flatten().flatten() {
        *w = rng.gen_range(low..=high);
    }
    weights
}

/// Rectified convolution planes computed with ndarray slicing, independently of the layers.
pub fn reference_planes(image: &Array2<i32>, weights: &Array3<i32>, biases: &[i32]) -> Array3<i32> {
    let (kernels, filter, _) = weights.dim();
    let side = image.nrows() - filter + 1;
    Array3::from_shape_fn((kernels, side, side), |(k, j, i)| {
        let window = image.slice(s![j..j + filter, i..i + filter]);
        let sum = (&window * &weights.slice(s![k, .., ..])).sum();
        (sum + biases[k]).max(0)
    })
}

pub fn reference_max_pool(planes: &Array3<i32>, window: usize, stride: usize) -> Array3<i32> {
    let (kernels, side, _) = planes.dim();
    let out = (side - window) / stride + 1;
    Array3::from_shape_fn((kernels, out, out), |(k, j, i)| {
        planes
            .slice(s![
                k,
                j * stride..j * stride + window,
                i * stride..i * stride + window
            ])
            .iter()
            .cloned()
            .max()
            .unwrap()
    })
}
