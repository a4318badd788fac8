
use num_traits::{NumAssign, PrimInt, Signed};
use std::fmt::{Debug, Display};

/// Integral coefficient type of images, weights, biases and feature maps.
pub trait Coeff: PrimInt + Signed + NumAssign + Debug + Display {
    /// Returns the higher value of the two.
    fn generic_max(self, other: Self) -> Self {
        if self > other {
            self
        } else {
            other
        }
    }
}

impl Coeff for i8 {}
impl Coeff for i16 {}
impl Coeff for i32 {}
impl Coeff for i64 {}

/// Returns the larger of two values.
#[inline]
pub fn max<T: Coeff>(a: T, b: T) -> T {
    a.generic_max(b)
}

/// Rectifies negative values to zero.
#[inline]
pub fn relu<T: Coeff>(x: T) -> T {
    max(T::zero(), x)
}

/// Checks whether the worst-case accumulator of a single output position fits into `T`.
///
/// The worst case is `filter_side² * |input| * |weight| + |bias|`, i.e. every product of the
/// filter window at its maximum magnitude with the same sign as the bias. Inputs and weights of
/// magnitudes at or below the given bounds can then never overflow the accumulator.
///
/// For `i32` with 8-bit pixels and a 5x5 filter this amounts to
/// `25 * 255 * |weight| + |bias| <= 2^31 - 1`.
pub fn fits_accumulator<T: Coeff>(
    filter_side: usize,
    max_abs_input: T,
    max_abs_weight: T,
    max_abs_bias: T,
) -> bool {
    let taps = match filter_side
        .checked_mul(filter_side)
        .and_then(T::from)
    {
        Some(taps) => taps,
        None => return false,
    };
    // `abs` of `T::min_value()` is not representable
    let magnitudes = [max_abs_input, max_abs_weight, max_abs_bias];
    if magnitudes.iter().any(|&m| m == T::min_value()) {
        return false;
    }
    let (input, weight, bias) = (max_abs_input.abs(), max_abs_weight.abs(), max_abs_bias.abs());

    input
        .checked_mul(&weight)
        .and_then(|product| product.checked_mul(&taps))
        .and_then(|sum| sum.checked_add(&bias))
        .is_some()
}
