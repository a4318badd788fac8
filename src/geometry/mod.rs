#[cfg(test)]
mod test;

use crate::error::{GeometryError, GeometryResult};
use std::fmt;

/// Side of the feature map produced by a unit-stride convolution with valid padding.
///
/// Returns zero when the filter does not fit into the input.
pub const fn conv_output_side(input_side: usize, filter_side: usize) -> usize {
    if filter_side == 0 || filter_side > input_side {
        0
    } else {
        input_side - filter_side + 1
    }
}

/// Side of the max-pool output: the number of window positions that stay fully inside the plane.
///
/// Returns zero when the window does not fit or the stride is zero.
pub const fn max_pool_output_side(plane_side: usize, window: usize, stride: usize) -> usize {
    if window == 0 || stride == 0 || window > plane_side {
        0
    } else {
        (plane_side - window) / stride + 1
    }
}

/// A descriptor for the geometry of a convolution followed by max-pooling.
///
/// The convolution and max-pool output sides are never specified by hand; they are derived from
/// the primitive extents by [`ConvGeometry::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConvGeometry {
    input_side: usize,
    filter_side: usize,
    num_kernels: usize,
    pool_window: usize,
    pool_stride: usize,
    conv_output_side: usize,
    pool_output_side: usize,
}

impl ConvGeometry {
    pub const fn new(
        input_side: usize,
        filter_side: usize,
        num_kernels: usize,
        pool_window: usize,
        pool_stride: usize,
    ) -> GeometryResult<ConvGeometry> {
        if input_side == 0 {
            return Err(GeometryError::ZeroExtent { name: "input side" });
        }
        if filter_side == 0 {
            return Err(GeometryError::ZeroExtent {
                name: "filter side",
            });
        }
        if num_kernels == 0 {
            return Err(GeometryError::ZeroExtent {
                name: "kernel count",
            });
        }
        if pool_window == 0 {
            return Err(GeometryError::ZeroExtent {
                name: "max-pool window",
            });
        }
        if pool_stride == 0 {
            return Err(GeometryError::ZeroExtent {
                name: "max-pool stride",
            });
        }
        if filter_side > input_side {
            return Err(GeometryError::FilterExceedsInput {
                filter: filter_side,
                input: input_side,
            });
        }
        let conv_output_side = conv_output_side(input_side, filter_side);
        if pool_window > conv_output_side {
            return Err(GeometryError::WindowExceedsPlane {
                window: pool_window,
                plane: conv_output_side,
            });
        }
        Ok(ConvGeometry {
            input_side,
            filter_side,
            num_kernels,
            pool_window,
            pool_stride,
            conv_output_side,
            pool_output_side: max_pool_output_side(conv_output_side, pool_window, pool_stride),
        })
    }

    /// Verifies that hand-specified derived extents agree with the derived ones.
    pub const fn check_extents(
        &self,
        conv_output_side: usize,
        pool_output_side: usize,
    ) -> GeometryResult<()> {
        if conv_output_side != self.conv_output_side {
            return Err(GeometryError::ExtentMismatch {
                name: "convolution output side",
                expected: self.conv_output_side,
                actual: conv_output_side,
            });
        }
        if pool_output_side != self.pool_output_side {
            return Err(GeometryError::ExtentMismatch {
                name: "max-pool output side",
                expected: self.pool_output_side,
                actual: pool_output_side,
            });
        }
        Ok(())
    }

    pub const fn input_side(&self) -> usize {
        self.input_side
    }
    pub const fn filter_side(&self) -> usize {
        self.filter_side
    }
    pub const fn num_kernels(&self) -> usize {
        self.num_kernels
    }
    pub const fn pool_window(&self) -> usize {
        self.pool_window
    }
    pub const fn pool_stride(&self) -> usize {
        self.pool_stride
    }
    pub const fn conv_output_side(&self) -> usize {
        self.conv_output_side
    }
    pub const fn pool_output_side(&self) -> usize {
        self.pool_output_side
    }

    /// Gets the number of elements in the input image
    pub const fn num_in(&self) -> usize {
        self.input_side * self.input_side
    }
    /// Gets the number of elements in the output volume
    pub const fn num_out(&self) -> usize {
        self.num_kernels * self.pool_output_side * self.pool_output_side
    }
    /// Gets the number of weights and biases
    pub const fn num_weights(&self) -> usize {
        self.num_kernels * (self.filter_side * self.filter_side + 1)
    }
}

impl fmt::Display for ConvGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{0}x{0} -> conv {1}x{1} ({2} kernels) -> {3}x{3} -> max-pool {4}x{4}/{5} -> {6}x{6}",
            self.input_side,
            self.filter_side,
            self.num_kernels,
            self.conv_output_side,
            self.pool_window,
            self.pool_stride,
            self.pool_output_side,
        )
    }
}

/// Compile-time geometry check of a convolution layer. Panics during const evaluation.
pub(crate) const fn assert_conv_extents(
    input_side: usize,
    filter_side: usize,
    num_kernels: usize,
    conv_out: usize,
) {
    assert!(
        input_side > 0 && filter_side > 0 && num_kernels > 0,
        "convolution extents must be greater than zero"
    );
    assert!(filter_side <= input_side, "filter side exceeds input side");
    assert!(
        conv_out == conv_output_side(input_side, filter_side),
        "convolution output side must equal input side - filter side + 1"
    );
}

/// Compile-time geometry check of a max-pool layer. Panics during const evaluation.
pub(crate) const fn assert_max_pool_extents(
    plane_side: usize,
    window: usize,
    stride: usize,
    pool_out: usize,
) {
    assert!(
        plane_side > 0 && window > 0 && stride > 0,
        "max-pool extents must be greater than zero"
    );
    assert!(
        window <= plane_side,
        "max-pool window exceeds convolution output side"
    );
    assert!(
        pool_out == max_pool_output_side(plane_side, window, stride),
        "max-pool output side must equal (plane side - window) / stride + 1"
    );
}
