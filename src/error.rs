//! Errors raised when validating layer geometry.
//!
//! The compute paths themselves cannot fail: all loop bounds are const generic parameters and
//! the geometry of every layer type is checked when the layer is constructed. These errors are
//! what the runtime counterpart of that check, [`ConvGeometry`](crate::geometry::ConvGeometry),
//! reports to an integrator.

use std::error::Error;
use std::fmt::{Display, Formatter, Result};

/// An inconsistent set of convolution and max-pool extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// A primitive extent (image side, filter side, kernel count, window or stride) is zero.
    ZeroExtent { name: &'static str },

    /// The filter does not fit into the image without padding.
    FilterExceedsInput { filter: usize, input: usize },

    /// The pooling window does not fit into the convolution plane.
    WindowExceedsPlane { window: usize, plane: usize },

    /// A hand-specified derived extent disagrees with the one derived from the primitives.
    ExtentMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl Display for GeometryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match *self {
            GeometryError::ZeroExtent { name } => write!(f, "{} must be greater than zero", name),
            GeometryError::FilterExceedsInput { filter, input } => write!(
                f,
                "filter side {} exceeds input side {}",
                filter, input
            ),
            GeometryError::WindowExceedsPlane { window, plane } => write!(
                f,
                "max-pool window {} exceeds convolution output side {}",
                window, plane
            ),
            GeometryError::ExtentMismatch {
                name,
                expected,
                actual,
            } => write!(f, "{} is {}, expected {}", name, actual, expected),
        }
    }
}

impl Error for GeometryError {}

pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
