//! A single convolutional layer with rectified-linear activation followed by max-pooling, on
//! fixed-size integer arrays.
//!
//! Every extent is a compile-time constant and every buffer is caller-allocated; a forward pass
//! performs no allocation. The default configuration of the crate is exported as constants and
//! as the [`SimpleCnn`] layer type:
//!
//! ```
//! use simple_cnn::*;
//!
//! let layer = SimpleCnn::new();
//! let image = [[1; INPUT_SIZE]; INPUT_SIZE];
//! let weights = [[[1; CONV_KERNEL_SIZE]; CONV_KERNEL_SIZE]; TOTAL_KERNELS];
//! let biases = [0; TOTAL_KERNELS];
//! let mut output = [[[0; MAX_POOL_OUTPUT_SIZE]; MAX_POOL_OUTPUT_SIZE]; TOTAL_KERNELS];
//!
//! layer.convolution_max_pool(&image, &weights, &biases, &mut output);
//! assert_eq!(output[0][0][0], 25);
//! ```
#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate lazy_static;

pub mod error;
pub mod geometry;
mod layers;
mod math;
pub mod trace;
pub mod util;
#[cfg(test)]
mod tests;

pub use crate::error::*;
pub use crate::geometry::{conv_output_side, max_pool_output_side, ConvGeometry};
pub use crate::layers::*;
pub use crate::math::*;
pub use crate::trace::{LogTrace, NoTrace, Trace};

pub const INPUT_SIZE: usize = 28;
pub const CONV_KERNEL_SIZE: usize = 5;
pub const TOTAL_KERNELS: usize = 6;
pub const CONV_OUTPUT_SIZE: usize = conv_output_side(INPUT_SIZE, CONV_KERNEL_SIZE);
pub const MAX_POOL_WINDOW_SIZE: usize = 2;
pub const MAX_POOL_STRIDE: usize = 2;
pub const MAX_POOL_OUTPUT_SIZE: usize =
    max_pool_output_side(CONV_OUTPUT_SIZE, MAX_POOL_WINDOW_SIZE, MAX_POOL_STRIDE);

const _: () = match ConvGeometry::new(
    INPUT_SIZE,
    CONV_KERNEL_SIZE,
    TOTAL_KERNELS,
    MAX_POOL_WINDOW_SIZE,
    MAX_POOL_STRIDE,
) {
    Ok(_) => (),
    Err(_) => panic!("inconsistent default geometry"),
};

/// The conv-max-pool layer of the default configuration.
pub type SimpleCnn = ConvMaxpoolLayer<
    INPUT_SIZE,
    CONV_KERNEL_SIZE,
    TOTAL_KERNELS,
    MAX_POOL_WINDOW_SIZE,
    MAX_POOL_STRIDE,
    CONV_OUTPUT_SIZE,
    MAX_POOL_OUTPUT_SIZE,
>;
