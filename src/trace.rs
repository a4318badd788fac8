//! Observation hooks into the convolution hot loop.
//!
//! The convolution reports every multiply-accumulate step and every activation to a [`Trace`].
//! The default [`NoTrace`] does nothing and compiles away; [`LogTrace`] forwards the events to
//! the `log` facade at trace level.

use crate::math::Coeff;

/// One multiply-accumulate step of the convolution at output position (`row`, `col`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AccumulationStep<T> {
    pub kernel: usize,
    pub row: usize,
    pub col: usize,
    /// Row offset inside the filter
    pub y: usize,
    /// Column offset inside the filter
    pub x: usize,
    pub input: T,
    pub weight: T,
    /// Running sum after this step
    pub sum: T,
}

/// Bias and activation applied to the accumulated sum of one output position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Activation<T> {
    pub kernel: usize,
    pub row: usize,
    pub col: usize,
    pub sum: T,
    pub bias: T,
    pub output: T,
}

/// Receives the events of the convolution hot loop. Both hooks default to no-ops.
pub trait Trace<T> {
    fn accumulate(&mut self, _step: &AccumulationStep<T>) {}
    fn activate(&mut self, _activation: &Activation<T>) {}
}

/// Disabled tracing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoTrace;

impl<T> Trace<T> for NoTrace {}

/// Emits every event as a `trace!` record.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogTrace;

impl<T> Trace<T> for LogTrace
where
    T: Coeff,
{
    fn accumulate(&mut self, s: &AccumulationStep<T>) {
        trace!(
            "input: {}, j: {}, i: {}, k: {}, y: {}, x: {}, weight: {}, sum: {}",
            s.input,
            s.row,
            s.col,
            s.kernel,
            s.y,
            s.x,
            s.weight,
            s.sum
        );
    }

    fn activate(&mut self, a: &Activation<T>) {
        trace!(
            "conv: {}, j: {}, i: {}, k: {}, sum: {}, bias: {}",
            a.output,
            a.row,
            a.col,
            a.kernel,
            a.sum,
            a.bias
        );
    }
}

impl<'a, T, R> Trace<T> for &'a mut R
where
    R: Trace<T> + ?Sized,
{
    fn accumulate(&mut self, step: &AccumulationStep<T>) {
        (**self).accumulate(step)
    }
    fn activate(&mut self, activation: &Activation<T>) {
        (**self).activate(activation)
    }
}
