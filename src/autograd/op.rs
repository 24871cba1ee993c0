//! The closed set of graph operations and their local-derivative rules.
//!
//! An [`Op`] is pure data: it records *which* rule produced a node. Together with the
//! forward values of the node and its operands (fixed at construction) it is enough to
//! evaluate every partial derivative needed by the backward pass, so no per-operator
//! closure or subtype is stored in the graph.

use std::fmt;

/// Operation that produced a [`Scalar`](super::Scalar).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Op {
    /// Input or parameter created with [`Scalar::new`](super::Scalar::new).
    Leaf,
    /// Raw number promoted into the graph; never receives gradient.
    Const,
    Add,
    Sub,
    Mul,
    Div,
    /// `x^n` for a fixed real exponent `n` (the exponent is not a graph node).
    Pow(f64),
    Neg,
    Relu,
    Sigmoid,
    Sin,
    Exp,
    /// Identity activation.
    Linear,
}

impl Op {
    /// Number of operands a node with this op holds.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Op::Leaf | Op::Const => 0,
            Op::Add | Op::Sub | Op::Mul | Op::Div => 2,
            Op::Pow(_) | Op::Neg | Op::Relu | Op::Sigmoid | Op::Sin | Op::Exp | Op::Linear => 1,
        }
    }

    /// Returns `true` for nodes without operands (`Leaf` and `Const`).
    #[must_use]
    pub fn is_leaf(self) -> bool {
        self.arity() == 0
    }

    /// Partial derivative of a node's value with respect to operand `operand`.
    ///
    /// `inputs` holds the operands' forward values in order and `output` the node's own
    /// forward value. Returns `None` if `operand` is not a valid index for this op or
    /// `inputs` is shorter than [`Op::arity`].
    #[must_use]
    pub fn local_derivative(self, operand: usize, inputs: &[f64], output: f64) -> Option<f64> {
        if operand >= self.arity() || inputs.len() < self.arity() {
            return None;
        }
        let d = match (self, operand) {
            (Op::Add, _) => 1.0,
            (Op::Sub, 0) => 1.0,
            (Op::Sub, _) => -1.0,
            (Op::Mul, 0) => inputs[1],
            (Op::Mul, _) => inputs[0],
            (Op::Div, 0) => 1.0 / inputs[1],
            (Op::Div, _) => -inputs[0] / (inputs[1] * inputs[1]),
            // n == 0 is a constant function; avoids 0 * 0^-1 = NaN at x == 0.
            (Op::Pow(n), _) if n == 0.0 => 0.0,
            (Op::Pow(n), _) => n * inputs[0].powf(n - 1.0),
            (Op::Neg, _) => -1.0,
            // Matches the forward gate: only strictly negative inputs are closed.
            (Op::Relu, _) => {
                if inputs[0] < 0.0 {
                    0.0
                } else {
                    1.0
                }
            }
            (Op::Sigmoid, _) => output * (1.0 - output),
            (Op::Sin, _) => inputs[0].cos(),
            (Op::Exp, _) => output,
            (Op::Linear, _) => 1.0,
            (Op::Leaf | Op::Const, _) => return None,
        };
        Some(d)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Leaf => write!(f, "leaf"),
            Op::Const => write!(f, "const"),
            Op::Add => write!(f, "add"),
            Op::Sub => write!(f, "sub"),
            Op::Mul => write!(f, "mul"),
            Op::Div => write!(f, "div"),
            Op::Pow(n) => write!(f, "pow({n})"),
            Op::Neg => write!(f, "neg"),
            Op::Relu => write!(f, "relu"),
            Op::Sigmoid => write!(f, "sigmoid"),
            Op::Sin => write!(f, "sin"),
            Op::Exp => write!(f, "exp"),
            Op::Linear => write!(f, "linear"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_matches_operand_count() {
        assert_eq!(Op::Leaf.arity(), 0);
        assert_eq!(Op::Const.arity(), 0);
        assert_eq!(Op::Div.arity(), 2);
        assert_eq!(Op::Pow(2.0).arity(), 1);
        assert!(Op::Const.is_leaf());
        assert!(!Op::Relu.is_leaf());
    }

    #[test]
    fn out_of_range_operand_is_none() {
        assert_eq!(Op::Relu.local_derivative(1, &[1.0], 1.0), None);
        assert_eq!(Op::Leaf.local_derivative(0, &[], 1.0), None);
        assert_eq!(Op::Mul.local_derivative(0, &[1.0], 1.0), None);
    }

    #[test]
    fn binary_rules() {
        assert_eq!(Op::Sub.local_derivative(1, &[4.0, 2.0], 2.0), Some(-1.0));
        assert_eq!(Op::Mul.local_derivative(0, &[4.0, 2.0], 8.0), Some(2.0));
        assert_eq!(Op::Div.local_derivative(0, &[4.0, 2.0], 2.0), Some(0.5));
        assert_eq!(Op::Div.local_derivative(1, &[4.0, 2.0], 2.0), Some(-1.0));
    }

    #[test]
    fn pow_zero_exponent_has_zero_derivative_at_zero_base() {
        assert_eq!(Op::Pow(0.0).local_derivative(0, &[0.0], 1.0), Some(0.0));
        assert_eq!(Op::Pow(2.0).local_derivative(0, &[3.0], 9.0), Some(6.0));
    }

    #[test]
    fn relu_gate_is_open_at_zero() {
        assert_eq!(Op::Relu.local_derivative(0, &[0.0], 0.0), Some(1.0));
        assert_eq!(Op::Relu.local_derivative(0, &[-1e-12], 0.0), Some(0.0));
    }

    #[test]
    fn display_names() {
        assert_eq!(Op::Pow(3.0).to_string(), "pow(3)");
        assert_eq!(Op::Sigmoid.to_string(), "sigmoid");
    }
}
