//! Autograd: a computation graph of scalar values with reverse-mode differentiation.
//!
//! Every operation on a [`Scalar`] allocates a new node that remembers its operands and
//! the [`Op`] that produced it. [`ScalarNode::backward`] then walks the graph reachable
//! from one output in reverse topological order and accumulates `d(output)/d(node)` into
//! every node's gradient, summing over all paths so that reused values are handled.

mod error;
pub mod impls;
mod op;
#[cfg(test)]
mod tests;

pub use error::GradError;
pub use impls::scalar::Scalar;
pub use op::Op;

/// Trait for raising a node to a fixed power (e.g. `x.pow(2.0)`).
pub trait Pow<Rhs> {
    /// Result of the power operation.
    type Output;

    /// Returns `self^exp` with gradient tracking.
    #[must_use]
    fn pow(self, exp: Rhs) -> Self::Output;
}

/// Trait for the exponential of a node (e.g. `x.exp()`).
pub trait Exp {
    /// Result of the exponential.
    type Output;

    /// Returns `exp(self)` with gradient tracking.
    #[must_use]
    fn exp(self) -> Self::Output;
}

/// Trait for the sine of a node (e.g. `x.sin()`).
pub trait Sin {
    /// Result of the sine.
    type Output;

    /// Returns `sin(self)` with gradient tracking.
    #[must_use]
    fn sin(self) -> Self::Output;
}

/// A differentiable scalar node in the computation graph.
///
/// Use [`ScalarNode::data`] for the forward value and [`ScalarNode::grad`] after
/// [`ScalarNode::backward`] has been run from some output.
pub trait ScalarNode: Clone {
    /// Returns the forward pass value.
    fn data(&self) -> f64;

    /// Returns `d(root)/d(self)` for the most recent backward pass that reached this node.
    ///
    /// Nodes never reached by a backward pass report `0.0` ("no influence observed").
    fn grad(&self) -> f64;

    /// Runs backpropagation from this node to every node it depends on.
    fn backward(&self);

    /// Zeros the gradient at this node (e.g. before the next backward pass of a training step).
    fn zero_grad(&self);
}
