
mod conv;
mod conv_maxpool;
mod maxpool;

pub use self::conv::*;
pub use self::conv_maxpool::*;
pub use self::maxpool::*;

/// An `N`x`N` input image.
pub type Image<T, const N: usize> = [[T; N]; N];
/// One `F`x`F` filter per kernel.
pub type KernelWeights<T, const K: usize, const F: usize> = [[[T; F]; F]; K];
/// One bias per kernel.
pub type KernelBiases<T, const K: usize> = [T; K];
/// The rectified output of one kernel before pooling.
pub type ConvolutionPlane<T, const C: usize> = [[T; C]; C];
/// One pooled plane of the output volume.
pub type PooledPlane<T, const P: usize> = [[T; P]; P];
/// The pooled planes of all kernels.
pub type OutputVolume<T, const K: usize, const P: usize> = [[[T; P]; P]; K];

/// Describes a layer of a convolutive neural network.
pub trait Layer {
    /// Gets the number of elements in the input shape
    fn num_in(&self) -> usize;
    /// Gets the number of elements in the output shape
    fn num_out(&self) -> usize;
    fn name(&self) -> &'static str;
}
