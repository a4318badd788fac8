use super::*;
use crate::geometry::assert_max_pool_extents;
use crate::math::{max, Coeff};
use itertools::iproduct;

/// A max-pool over `WINDOW`x`WINDOW` windows advancing by `STRIDE`. Windows overlap when the
/// stride is smaller than the window.
///
/// Pooling starts from zero rather than the lowest value of the coefficient type. This is only
/// correct because the preceding rectified-linear activation leaves no negative values in the
/// plane; an activation that can produce negatives requires a different identity here.
///
/// `POOL_OUT` must equal `(CONV_OUT - WINDOW) / STRIDE + 1`:
///
/// ```
/// let mxp = simple_cnn::MaxpoolLayer::<5, 2, 2, 2>::new();
/// ```
///
/// ```compile_fail
/// let mxp = simple_cnn::MaxpoolLayer::<5, 2, 2, 3>::new();
/// ```
///
/// A window larger than the plane does not compile either:
///
/// ```compile_fail
/// let mxp = simple_cnn::MaxpoolLayer::<2, 3, 1, 0>::new();
/// ```
#[derive(Copy, Clone, Debug)]
pub struct MaxpoolLayer<
    const CONV_OUT: usize,
    const WINDOW: usize,
    const STRIDE: usize,
    const POOL_OUT: usize,
> {
    _geometry: (),
}

impl<const CONV_OUT: usize, const WINDOW: usize, const STRIDE: usize, const POOL_OUT: usize>
    MaxpoolLayer<CONV_OUT, WINDOW, STRIDE, POOL_OUT>
{
    const GEOMETRY_CHECK: () = assert_max_pool_extents(CONV_OUT, WINDOW, STRIDE, POOL_OUT);

    pub fn new() -> Self {
        let () = Self::GEOMETRY_CHECK;
        let layer = MaxpoolLayer { _geometry: () };
        debug!(
            "Create max-pool ({}/{}) with input: {}, output: {}.",
            WINDOW,
            STRIDE,
            layer.num_in(),
            layer.num_out()
        );
        layer
    }

    /// Pools one rectified convolution plane into `out`.
    pub fn max_pool_plane<T>(
        &self,
        plane: &ConvolutionPlane<T, CONV_OUT>,
        out: &mut PooledPlane<T, POOL_OUT>,
    ) where
        T: Coeff,
    {
        for (j, row) in out.iter_mut().enumerate() {
            for (i, best) in row.iter_mut().enumerate() {
                // j * STRIDE + WINDOW - 1 < CONV_OUT
                *best = iproduct!(0..WINDOW, 0..WINDOW)
                    .map(|(y, x)| plane[j * STRIDE + y][i * STRIDE + x])
                    .fold(T::zero(), max);
            }
        }
    }

    /// Pools the plane of kernel `k` into `output[k]`, leaving the other planes untouched.
    pub fn max_pool<T, const KERNELS: usize>(
        &self,
        k: usize,
        plane: &ConvolutionPlane<T, CONV_OUT>,
        output: &mut OutputVolume<T, KERNELS, POOL_OUT>,
    ) where
        T: Coeff,
    {
        self.max_pool_plane(plane, &mut output[k])
    }
}

impl<const CONV_OUT: usize, const WINDOW: usize, const STRIDE: usize, const POOL_OUT: usize> Default
    for MaxpoolLayer<CONV_OUT, WINDOW, STRIDE, POOL_OUT>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const CONV_OUT: usize, const WINDOW: usize, const STRIDE: usize, const POOL_OUT: usize> Layer
    for MaxpoolLayer<CONV_OUT, WINDOW, STRIDE, POOL_OUT>
{
    // Per plane; the layer itself is agnostic of the kernel count
    fn num_in(&self) -> usize {
        CONV_OUT * CONV_OUT
    }
    fn num_out(&self) -> usize {
        POOL_OUT * POOL_OUT
    }
    fn name(&self) -> &'static str {
        "max-pool"
    }
}
