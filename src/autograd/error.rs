//! Autograd errors.
//!
//! Graph construction is total over IEEE-754 arithmetic except for division by an exact
//! zero, which is reported eagerly at the division site.

use thiserror::Error;

/// Errors produced while building a computation graph.
///
/// # Variants
///
/// - **DivisionByZero**: The divisor's forward value is exactly `0.0` (or `-0.0`).
///   *When*: `/` or [`Scalar::checked_div`](super::Scalar::checked_div) is applied.
///   *Recovery*: Guard the divisor upstream (e.g. add a small epsilon); nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradError {
    /// The right-hand operand of a division has value zero.
    #[error("division by zero (numerator {numerator})")]
    DivisionByZero {
        /// Forward value of the left-hand operand.
        numerator: f64,
    },
}
