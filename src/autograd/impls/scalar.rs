//! Scalar autograd: computation graph of single float values with backpropagation.

use crate::autograd::{Exp, GradError, Op, Pow, ScalarNode, Sin};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

/// Internal scalar node: forward value, gradient, and graph edges for backprop.
struct Node {
    /// Forward pass value.
    data: f64,
    /// Gradient of the backward root with respect to this node.
    grad: f64,
    /// Operation that produced this node; selects the local-derivative rule.
    op: Op,
    /// Operand nodes in order (empty for leaves and constants).
    operands: Vec<Scalar>,
}

impl Drop for Node {
    // Unlinks uniquely owned operands iteratively so that dropping a very long chain
    // does not recurse once per node.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.operands);
        while let Some(Scalar(rc)) = pending.pop() {
            if let Ok(cell) = Rc::try_unwrap(rc) {
                let mut node = cell.into_inner();
                pending.append(&mut node.operands);
            }
        }
    }
}

/// Handle to a scalar node in the autograd computation graph.
///
/// Wraps the node state in `Rc<RefCell<_>>` so that one node can be the operand of many
/// others (the graph is a DAG) and gradients can be accumulated during backward.
/// Cloning a `Scalar` clones the handle, not the node.
///
/// # Example
///
/// ```
/// use picograd::{Scalar, ScalarNode};
///
/// let x = Scalar::new(3.0);
/// let y = &x * &x;
/// y.backward();
/// assert_eq!(x.grad(), 6.0);
/// ```
#[derive(Clone)]
pub struct Scalar(Rc<RefCell<Node>>);

impl Scalar {
    /// Creates a leaf node (an input or parameter) with zero gradient.
    #[must_use]
    pub fn new(data: f64) -> Self {
        Scalar::from_op(data, Op::Leaf, Vec::new())
    }

    /// Creates a constant node. Constants never accumulate gradient.
    ///
    /// Raw `f64` operands of `+ - * /` are wrapped with this.
    #[must_use]
    pub fn constant(data: f64) -> Self {
        Scalar::from_op(data, Op::Const, Vec::new())
    }

    fn from_op(data: f64, op: Op, operands: Vec<Scalar>) -> Self {
        debug_assert_eq!(op.arity(), operands.len());
        Scalar(Rc::new(RefCell::new(Node {
            data,
            grad: 0.0,
            op,
            operands,
        })))
    }

    fn unary(&self, data: f64, op: Op) -> Scalar {
        Scalar::from_op(data, op, vec![self.clone()])
    }

    fn binary(lhs: &Scalar, rhs: &Scalar, data: f64, op: Op) -> Scalar {
        Scalar::from_op(data, op, vec![lhs.clone(), rhs.clone()])
    }

    fn set_grad(&self, g: f64) {
        self.0.borrow_mut().grad = g;
    }

    fn add_grad(&self, g: f64) {
        self.0.borrow_mut().grad += g;
    }

    /// Operation that produced this node.
    #[must_use]
    pub fn op(&self) -> Op {
        self.0.borrow().op
    }

    /// Handles to this node's operands, in order.
    #[must_use]
    pub fn operands(&self) -> Vec<Scalar> {
        self.0.borrow().operands.clone()
    }

    /// Returns `true` if both handles refer to the same graph node.
    #[must_use]
    pub fn ptr_eq(a: &Scalar, b: &Scalar) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// `d(self)/d(operand #operand)`, evaluated at the forward values.
    ///
    /// Returns `None` for leaves and for an index past the last operand.
    #[must_use]
    pub fn local_derivative(&self, operand: usize) -> Option<f64> {
        let node = self.0.borrow();
        let inputs: Vec<f64> = node.operands.iter().map(Scalar::data).collect();
        node.op.local_derivative(operand, &inputs, node.data)
    }

    /// Division that reports a zero divisor instead of producing `inf`/`NaN`.
    ///
    /// # Errors
    ///
    /// Returns [`GradError::DivisionByZero`] if `rhs.data() == 0.0`.
    pub fn checked_div(&self, rhs: &Scalar) -> Result<Scalar, GradError> {
        let (num, den) = (self.data(), rhs.data());
        if den == 0.0 {
            return Err(GradError::DivisionByZero { numerator: num });
        }
        Ok(Scalar::binary(self, rhs, num / den, Op::Div))
    }

    /// ReLU: `0` if `self < 0`, else `self`. Local grad is 0 below zero, 1 otherwise.
    #[must_use]
    pub fn relu(&self) -> Scalar {
        let x = self.data();
        self.unary(if x < 0.0 { 0.0 } else { x }, Op::Relu)
    }

    /// Logistic sigmoid `1 / (1 + e^-x)`. Local grad is `s * (1 - s)`.
    #[must_use]
    pub fn sigmoid(&self) -> Scalar {
        let s = 1.0 / (1.0 + (-self.data()).exp());
        self.unary(s, Op::Sigmoid)
    }

    /// Identity activation as a distinct node. Local grad is 1.
    #[must_use]
    pub fn linear(&self) -> Scalar {
        self.unary(self.data(), Op::Linear)
    }

    /// All nodes reachable from `self`, operands before the nodes that consume them.
    ///
    /// Each node appears once however many paths lead to it. The walk keeps its own
    /// stack, so graph depth is bounded by memory rather than the call stack.
    fn topological_order(&self) -> Vec<Scalar> {
        let mut order = Vec::new();
        let mut visited: HashSet<*const RefCell<Node>> = HashSet::new();
        let mut stack = vec![(self.clone(), false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                order.push(node);
                continue;
            }
            if !visited.insert(Rc::as_ptr(&node.0)) {
                continue;
            }
            stack.push((node.clone(), true));
            for operand in node.0.borrow().operands.iter().rev() {
                if !visited.contains(&Rc::as_ptr(&operand.0)) {
                    stack.push((operand.clone(), false));
                }
            }
        }
        order
    }
}

fn add_nodes(lhs: &Scalar, rhs: &Scalar) -> Scalar {
    Scalar::binary(lhs, rhs, lhs.data() + rhs.data(), Op::Add)
}

fn sub_nodes(lhs: &Scalar, rhs: &Scalar) -> Scalar {
    Scalar::binary(lhs, rhs, lhs.data() - rhs.data(), Op::Sub)
}

fn mul_nodes(lhs: &Scalar, rhs: &Scalar) -> Scalar {
    Scalar::binary(lhs, rhs, lhs.data() * rhs.data(), Op::Mul)
}

fn div_nodes(lhs: &Scalar, rhs: &Scalar) -> Result<Scalar, GradError> {
    lhs.checked_div(rhs)
}

// -----------------------------------------------------------------------------
// std::ops — algebra over Scalar, &Scalar and f64: x + y, x - y, x * y, x / y, -x
// -----------------------------------------------------------------------------

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $build:ident, $out:ty) => {
        impl $trait<&Scalar> for &Scalar {
            type Output = $out;

            fn $method(self, rhs: &Scalar) -> $out {
                $build(self, rhs)
            }
        }

        impl $trait<Scalar> for &Scalar {
            type Output = $out;

            fn $method(self, rhs: Scalar) -> $out {
                $build(self, &rhs)
            }
        }

        impl $trait<&Scalar> for Scalar {
            type Output = $out;

            fn $method(self, rhs: &Scalar) -> $out {
                $build(&self, rhs)
            }
        }

        impl $trait<Scalar> for Scalar {
            type Output = $out;

            fn $method(self, rhs: Scalar) -> $out {
                $build(&self, &rhs)
            }
        }

        impl $trait<f64> for &Scalar {
            type Output = $out;

            fn $method(self, rhs: f64) -> $out {
                $build(self, &Scalar::constant(rhs))
            }
        }

        impl $trait<f64> for Scalar {
            type Output = $out;

            fn $method(self, rhs: f64) -> $out {
                $build(&self, &Scalar::constant(rhs))
            }
        }

        impl $trait<&Scalar> for f64 {
            type Output = $out;

            fn $method(self, rhs: &Scalar) -> $out {
                $build(&Scalar::constant(self), rhs)
            }
        }

        impl $trait<Scalar> for f64 {
            type Output = $out;

            fn $method(self, rhs: Scalar) -> $out {
                $build(&Scalar::constant(self), &rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, add_nodes, Scalar);
impl_binary_op!(Sub, sub, sub_nodes, Scalar);
impl_binary_op!(Mul, mul, mul_nodes, Scalar);
impl_binary_op!(Div, div, div_nodes, Result<Scalar, GradError>);

impl Neg for &Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        self.unary(-self.data(), Op::Neg)
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        -&self
    }
}

// -----------------------------------------------------------------------------
// Pow, Exp, Sin — x.pow(n), x.exp(), x.sin()
// -----------------------------------------------------------------------------

impl Pow<f64> for &Scalar {
    type Output = Scalar;

    fn pow(self, exp: f64) -> Scalar {
        self.unary(self.data().powf(exp), Op::Pow(exp))
    }
}

impl Pow<i32> for &Scalar {
    type Output = Scalar;

    fn pow(self, exp: i32) -> Scalar {
        <&Scalar as Pow<f64>>::pow(self, f64::from(exp))
    }
}

impl Exp for &Scalar {
    type Output = Scalar;

    fn exp(self) -> Scalar {
        self.unary(self.data().exp(), Op::Exp)
    }
}

impl Sin for &Scalar {
    type Output = Scalar;

    fn sin(self) -> Scalar {
        self.unary(self.data().sin(), Op::Sin)
    }
}

impl ScalarNode for Scalar {
    fn data(&self) -> f64 {
        self.0.borrow().data
    }

    fn grad(&self) -> f64 {
        self.0.borrow().grad
    }

    fn backward(&self) {
        let order = self.topological_order();
        log::trace!("backward: {} nodes reachable from {}", order.len(), self.op());

        for node in &order {
            node.set_grad(0.0);
        }
        self.set_grad(1.0);

        for node in order.iter().rev() {
            let upstream = node.grad();
            let node_ref = node.0.borrow();
            if node_ref.op.is_leaf() {
                continue;
            }
            let inputs: Vec<f64> = node_ref.operands.iter().map(Scalar::data).collect();
            for (i, operand) in node_ref.operands.iter().enumerate() {
                if operand.op() == Op::Const {
                    continue;
                }
                if let Some(local) = node_ref.op.local_derivative(i, &inputs, node_ref.data) {
                    operand.add_grad(local * upstream);
                }
            }
        }
    }

    fn zero_grad(&self) {
        self.set_grad(0.0);
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data())
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("Scalar")
            .field("data", &node.data)
            .field("grad", &node.grad)
            .field("op", &node.op)
            .finish()
    }
}
