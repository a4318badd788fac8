use super::*;
use crate::geometry::assert_conv_extents;
use crate::math::{relu, Coeff};
use crate::trace::{AccumulationStep, Activation, NoTrace, Trace};
use itertools::iproduct;

/// A convolutional layer with `KERNELS` square filters of side `FILTER`, unit stride and valid
/// padding, followed by a rectified-linear activation.
///
/// `CONV_OUT` must equal `INPUT - FILTER + 1`; this is checked at compile time when the layer is
/// created:
///
/// ```
/// let conv = simple_cnn::ConvLayer::<4, 2, 1, 3>::new();
/// ```
///
/// A convolution output side other than `INPUT - FILTER + 1` does not compile:
///
/// ```compile_fail
/// let conv = simple_cnn::ConvLayer::<4, 2, 1, 4>::new();
/// ```
///
/// Neither does a filter larger than the image:
///
/// ```compile_fail
/// let conv = simple_cnn::ConvLayer::<2, 3, 1, 0>::new();
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ConvLayer<
    const INPUT: usize,
    const FILTER: usize,
    const KERNELS: usize,
    const CONV_OUT: usize,
> {
    _geometry: (),
}

impl<const INPUT: usize, const FILTER: usize, const KERNELS: usize, const CONV_OUT: usize>
    ConvLayer<INPUT, FILTER, KERNELS, CONV_OUT>
{
    const GEOMETRY_CHECK: () = assert_conv_extents(INPUT, FILTER, KERNELS, CONV_OUT);

    pub fn new() -> Self {
        let () = Self::GEOMETRY_CHECK;
        let layer = ConvLayer { _geometry: () };
        debug!(
            "Create conv-layer with input: {}, output: {}, filter-side: {}, kernels: {}.",
            layer.num_in(),
            layer.num_out(),
            FILTER,
            KERNELS
        );
        layer
    }

    /// Gets the number of weights and biases the layer reads
    pub fn num_weights(&self) -> usize {
        KERNELS * (FILTER * FILTER + 1)
    }

    /// Computes the rectified convolution of kernel `k` into `plane`.
    pub fn convolve<T>(
        &self,
        k: usize,
        image: &Image<T, INPUT>,
        weights: &KernelWeights<T, KERNELS, FILTER>,
        biases: &KernelBiases<T, KERNELS>,
        plane: &mut ConvolutionPlane<T, CONV_OUT>,
    ) where
        T: Coeff,
    {
        self.convolve_traced(k, image, weights, biases, plane, &mut NoTrace)
    }

    /// Like `convolve`, reporting every accumulation step and activation to `trace`.
    pub fn convolve_traced<T, R>(
        &self,
        k: usize,
        image: &Image<T, INPUT>,
        weights: &KernelWeights<T, KERNELS, FILTER>,
        biases: &KernelBiases<T, KERNELS>,
        plane: &mut ConvolutionPlane<T, CONV_OUT>,
        trace: &mut R,
    ) where
        T: Coeff,
        R: Trace<T>,
    {
        let filter = &weights[k];
        let bias = biases[k];
        for (j, row) in plane.iter_mut().enumerate() {
            for (i, out) in row.iter_mut().enumerate() {
                let mut sum = T::zero();
                // j + y < CONV_OUT + FILTER - 1 = INPUT
                for (y, x) in iproduct!(0..FILTER, 0..FILTER) {
                    let input = image[j + y][i + x];
                    let weight = filter[y][x];
                    sum += input * weight;
                    trace.accumulate(&AccumulationStep {
                        kernel: k,
                        row: j,
                        col: i,
                        y,
                        x,
                        input,
                        weight,
                        sum,
                    });
                }
                *out = relu(sum + bias);
                trace.activate(&Activation {
                    kernel: k,
                    row: j,
                    col: i,
                    sum,
                    bias,
                    output: *out,
                });
            }
        }
    }
}

impl<const INPUT: usize, const FILTER: usize, const KERNELS: usize, const CONV_OUT: usize> Default
    for ConvLayer<INPUT, FILTER, KERNELS, CONV_OUT>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const INPUT: usize, const FILTER: usize, const KERNELS: usize, const CONV_OUT: usize> Layer
    for ConvLayer<INPUT, FILTER, KERNELS, CONV_OUT>
{
    fn num_in(&self) -> usize {
        INPUT * INPUT
    }
    fn num_out(&self) -> usize {
        KERNELS * CONV_OUT * CONV_OUT
    }
    fn name(&self) -> &'static str {
        "conv"
    }
}
