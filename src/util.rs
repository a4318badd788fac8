/*
 * Trivial to understand conversions between the fixed-size buffers of the layers and ndarray.
 */
use crate::error::{GeometryError, GeometryResult};
use crate::layers::{Image, KernelWeights, OutputVolume};
use crate::math::Coeff;
use ndarray::{Array2, Array3, ArrayView2, ArrayView3};

fn check_dim(name: &'static str, expected: usize, actual: usize) -> GeometryResult<()> {
    if expected != actual {
        return Err(GeometryError::ExtentMismatch {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Copies a (height, width) array into a fixed-size image.
pub fn image_from_array<T, const N: usize>(array: ArrayView2<T>) -> GeometryResult<Image<T, N>>
where
    T: Coeff,
{
    let (rows, cols) = array.dim();
    check_dim("image rows", N, rows)?;
    check_dim("image columns", N, cols)?;

    let mut image = [[T::zero(); N]; N];
    for ((j, i), &val) in array.indexed_iter() {
        image[j][i] = val;
    }
    Ok(image)
}

/// Copies a (kernels, height, width) array into fixed-size kernel weights.
pub fn weights_from_array<T, const K: usize, const F: usize>(
    array: ArrayView3<T>,
) -> GeometryResult<KernelWeights<T, K, F>>
where
    T: Coeff,
{
    let (kernels, rows, cols) = array.dim();
    check_dim("kernel count", K, kernels)?;
    check_dim("filter rows", F, rows)?;
    check_dim("filter columns", F, cols)?;

    let mut weights = [[[T::zero(); F]; F]; K];
    for ((k, y, x), &val) in array.indexed_iter() {
        weights[k][y][x] = val;
    }
    Ok(weights)
}

/// Copies a square plane into a (height, width) array.
pub fn plane_to_array<T, const N: usize>(plane: &[[T; N]; N]) -> Array2<T>
where
    T: Coeff,
{
    Array2::from_shape_fn((N, N), |(j, i)| plane[j][i])
}

/// Copies an output volume into a (kernels, height, width) array.
pub fn volume_to_array<T, const K: usize, const P: usize>(
    volume: &OutputVolume<T, K, P>,
) -> Array3<T>
where
    T: Coeff,
{
    Array3::from_shape_fn((K, P, P), |(k, j, i)| volume[k][j][i])
}
