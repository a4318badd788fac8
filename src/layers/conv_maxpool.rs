use super::*;
use crate::geometry::ConvGeometry;
use crate::math::Coeff;
use crate::trace::{NoTrace, Trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A convolutional layer followed by max-pooling over each of its kernels' output planes.
///
/// All extents are const generic parameters: the image side `INPUT`, the filter side `FILTER`,
/// the kernel count `KERNELS`, the pooling window `WINDOW` and stride `STRIDE`. The derived sides
/// `CONV_OUT` and `POOL_OUT` must match the values [`ConvGeometry`] derives from the primitives;
/// a mismatch fails compilation as soon as the layer is created.
///
/// ```
/// let layer = simple_cnn::ConvMaxpoolLayer::<4, 2, 1, 2, 1, 3, 2>::new();
/// ```
///
/// ```compile_fail
/// let layer = simple_cnn::ConvMaxpoolLayer::<4, 2, 1, 2, 1, 3, 3>::new();
/// ```
///
/// ```compile_fail
/// let layer = simple_cnn::ConvMaxpoolLayer::<4, 5, 1, 1, 1, 0, 0>::new();
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ConvMaxpoolLayer<
    const INPUT: usize,
    const FILTER: usize,
    const KERNELS: usize,
    const WINDOW: usize,
    const STRIDE: usize,
    const CONV_OUT: usize,
    const POOL_OUT: usize,
> {
    conv: ConvLayer<INPUT, FILTER, KERNELS, CONV_OUT>,
    mxp: MaxpoolLayer<CONV_OUT, WINDOW, STRIDE, POOL_OUT>,
}

impl<
        const INPUT: usize,
        const FILTER: usize,
        const KERNELS: usize,
        const WINDOW: usize,
        const STRIDE: usize,
        const CONV_OUT: usize,
        const POOL_OUT: usize,
    > ConvMaxpoolLayer<INPUT, FILTER, KERNELS, WINDOW, STRIDE, CONV_OUT, POOL_OUT>
{
    const GEOMETRY: ConvGeometry = match ConvGeometry::new(INPUT, FILTER, KERNELS, WINDOW, STRIDE)
    {
        Ok(geometry) => match geometry.check_extents(CONV_OUT, POOL_OUT) {
            Ok(()) => geometry,
            Err(_) => panic!("CONV_OUT or POOL_OUT disagrees with the derived output sides"),
        },
        Err(_) => panic!("inconsistent convolution and max-pool geometry"),
    };

    pub fn new() -> Self {
        let geometry = Self::GEOMETRY;
        let layer = ConvMaxpoolLayer {
            conv: ConvLayer::new(),
            mxp: MaxpoolLayer::new(),
        };
        debug!("Create conv-max-pool-layer: {}.", geometry);
        layer
    }

    pub fn geometry(&self) -> ConvGeometry {
        Self::GEOMETRY
    }

    pub fn conv(&self) -> &ConvLayer<INPUT, FILTER, KERNELS, CONV_OUT> {
        &self.conv
    }

    pub fn maxpool(&self) -> &MaxpoolLayer<CONV_OUT, WINDOW, STRIDE, POOL_OUT> {
        &self.mxp
    }

    /// Runs convolution and max-pooling for every kernel, overwriting `output` entirely.
    pub fn convolution_max_pool<T>(
        &self,
        image: &Image<T, INPUT>,
        weights: &KernelWeights<T, KERNELS, FILTER>,
        biases: &KernelBiases<T, KERNELS>,
        output: &mut OutputVolume<T, KERNELS, POOL_OUT>,
    ) where
        T: Coeff,
    {
        self.convolution_max_pool_traced(image, weights, biases, output, &mut NoTrace)
    }

    pub fn convolution_max_pool_traced<T, R>(
        &self,
        image: &Image<T, INPUT>,
        weights: &KernelWeights<T, KERNELS, FILTER>,
        biases: &KernelBiases<T, KERNELS>,
        output: &mut OutputVolume<T, KERNELS, POOL_OUT>,
        trace: &mut R,
    ) where
        T: Coeff,
        R: Trace<T>,
    {
        for k in 0..KERNELS {
            self.process_kernel_traced(k, image, weights, biases, output, trace);
        }
    }

    /// Computes plane `k` of the output volume. Kernels share no state, so they may be processed
    /// in any order.
    pub fn process_kernel<T>(
        &self,
        k: usize,
        image: &Image<T, INPUT>,
        weights: &KernelWeights<T, KERNELS, FILTER>,
        biases: &KernelBiases<T, KERNELS>,
        output: &mut OutputVolume<T, KERNELS, POOL_OUT>,
    ) where
        T: Coeff,
    {
        self.process_kernel_traced(k, image, weights, biases, output, &mut NoTrace)
    }

    pub fn process_kernel_traced<T, R>(
        &self,
        k: usize,
        image: &Image<T, INPUT>,
        weights: &KernelWeights<T, KERNELS, FILTER>,
        biases: &KernelBiases<T, KERNELS>,
        output: &mut OutputVolume<T, KERNELS, POOL_OUT>,
        trace: &mut R,
    ) where
        T: Coeff,
        R: Trace<T>,
    {
        let mut plane: ConvolutionPlane<T, CONV_OUT> = [[T::zero(); CONV_OUT]; CONV_OUT];
        self.conv
            .convolve_traced(k, image, weights, biases, &mut plane, trace);
        self.mxp.max_pool(k, &plane, output);
    }

    /// Like `convolution_max_pool`, with the kernels distributed over the rayon thread pool.
    #[cfg(feature = "parallel")]
    pub fn convolution_max_pool_par<T>(
        &self,
        image: &Image<T, INPUT>,
        weights: &KernelWeights<T, KERNELS, FILTER>,
        biases: &KernelBiases<T, KERNELS>,
        output: &mut OutputVolume<T, KERNELS, POOL_OUT>,
    ) where
        T: Coeff + Send + Sync,
    {
        output.par_iter_mut().enumerate().for_each(|(k, out)| {
            let mut plane: ConvolutionPlane<T, CONV_OUT> = [[T::zero(); CONV_OUT]; CONV_OUT];
            self.conv.convolve(k, image, weights, biases, &mut plane);
            self.mxp.max_pool_plane(&plane, out);
        });
    }
}

impl<
        const INPUT: usize,
        const FILTER: usize,
        const KERNELS: usize,
        const WINDOW: usize,
        const STRIDE: usize,
        const CONV_OUT: usize,
        const POOL_OUT: usize,
    > Default for ConvMaxpoolLayer<INPUT, FILTER, KERNELS, WINDOW, STRIDE, CONV_OUT, POOL_OUT>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<
        const INPUT: usize,
        const FILTER: usize,
        const KERNELS: usize,
        const WINDOW: usize,
        const STRIDE: usize,
        const CONV_OUT: usize,
        const POOL_OUT: usize,
    > Layer for ConvMaxpoolLayer<INPUT, FILTER, KERNELS, WINDOW, STRIDE, CONV_OUT, POOL_OUT>
{
    fn num_in(&self) -> usize {
        INPUT * INPUT
    }
    fn num_out(&self) -> usize {
        KERNELS * POOL_OUT * POOL_OUT
    }
    fn name(&self) -> &'static str {
        "conv-max-pool"
    }
}
