//! Tests for scalar autograd.
//!
//! Covers forward values and backward gradients for every op, gradient accumulation
//! over shared operands, constant promotion, zero_grad, and division by zero.

use crate::autograd::{Exp, GradError, Op, Pow, Scalar, ScalarNode, Sin};

#[test]
fn scalar_add_backward() {
    let a = Scalar::new(2.0);
    let b = Scalar::new(3.0);
    let c = &a + &b;
    assert_eq!(c.data(), 5.0);
    c.backward();
    assert_eq!(a.grad(), 1.0);
    assert_eq!(b.grad(), 1.0);
}

#[test]
fn scalar_sub_backward() {
    let a = Scalar::new(5.0);
    let b = Scalar::new(2.0);
    let c = &a - &b;
    assert_eq!(c.data(), 3.0);
    c.backward();
    assert_eq!(a.grad(), 1.0);
    assert_eq!(b.grad(), -1.0);
}

#[test]
fn scalar_mul_backward() {
    let a = Scalar::new(2.0);
    let b = Scalar::new(3.0);
    let c = &a * &b;
    assert_eq!(c.data(), 6.0);
    c.backward();
    assert_eq!(a.grad(), 3.0);
    assert_eq!(b.grad(), 2.0);
}

#[test]
fn scalar_div_backward() {
    let a = Scalar::new(6.0);
    let b = Scalar::new(2.0);
    let c = (&a / &b).unwrap();
    assert_eq!(c.data(), 3.0);
    assert_eq!(c.op(), Op::Div);
    c.backward();
    assert_eq!(a.grad(), 0.5);
    assert_eq!(b.grad(), -1.5); // d/db (a/b) = -a/b^2 = -6/4
}

#[test]
fn scalar_div_by_zero_fails() {
    let a = Scalar::new(1.0);
    let b = Scalar::new(0.0);
    assert_eq!(
        (&a / &b).unwrap_err(),
        GradError::DivisionByZero { numerator: 1.0 }
    );
    assert!(a.checked_div(&Scalar::new(-0.0)).is_err());
    assert!(matches!(&a / 0.0, Err(GradError::DivisionByZero { .. })));
}

#[test]
fn scalar_div_by_small_value_is_finite() {
    let c = (Scalar::new(1.0) / Scalar::new(0.0001)).unwrap();
    assert!(c.data().is_finite());
    assert!((c.data() - 10_000.0).abs() < 1e-6);
}

#[test]
fn scalar_pow_backward() {
    let a = Scalar::new(2.0);
    let b = a.pow(3.0);
    assert!((b.data() - 8.0).abs() < 1e-10);
    b.backward();
    // d/dx x^3 = 3x^2 = 12 at x=2
    assert!((a.grad() - 12.0).abs() < 1e-10);
}

#[test]
fn scalar_pow_integer_exponent() {
    let a = Scalar::new(-3.0);
    let b = a.pow(2);
    assert_eq!(b.data(), 9.0);
    assert_eq!(b.op(), Op::Pow(2.0));
    b.backward();
    assert_eq!(a.grad(), -6.0);
}

#[test]
fn scalar_pow_zero_exponent_has_zero_grad() {
    let a = Scalar::new(0.0);
    let b = a.pow(0.0);
    assert_eq!(b.data(), 1.0);
    b.backward();
    assert_eq!(a.grad(), 0.0);
}

#[test]
fn scalar_neg_backward() {
    let a = Scalar::new(3.0);
    let b = -&a;
    assert_eq!(b.data(), -3.0);
    b.backward();
    assert_eq!(a.grad(), -1.0);
}

#[test]
fn scalar_exp_backward() {
    let a = Scalar::new(1.0);
    let b = a.exp();
    assert!((b.data() - std::f64::consts::E).abs() < 1e-10);
    b.backward();
    assert!((a.grad() - std::f64::consts::E).abs() < 1e-10);
}

#[test]
fn scalar_sin_backward() {
    let a = Scalar::new(0.5);
    let b = a.sin();
    assert!((b.data() - 0.5f64.sin()).abs() < 1e-12);
    b.backward();
    assert!((a.grad() - 0.5f64.cos()).abs() < 1e-12);
}

#[test]
fn scalar_sigmoid_backward() {
    let a = Scalar::new(0.0);
    let b = a.sigmoid();
    assert_eq!(b.data(), 0.5);
    b.backward();
    assert_eq!(a.grad(), 0.25);
}

#[test]
fn scalar_sigmoid_saturates_without_nan() {
    let lo = Scalar::new(-1000.0).sigmoid();
    let hi = Scalar::new(1000.0).sigmoid();
    assert_eq!(lo.data(), 0.0);
    assert_eq!(hi.data(), 1.0);
}

#[test]
fn scalar_linear_backward() {
    let a = Scalar::new(-4.0);
    let b = a.linear();
    assert_eq!(b.data(), -4.0);
    assert_eq!(b.op(), Op::Linear);
    b.backward();
    assert_eq!(a.grad(), 1.0);
}

#[test]
fn scalar_relu_backward_positive() {
    let a = Scalar::new(1.5);
    let b = a.relu();
    assert_eq!(b.data(), 1.5);
    b.backward();
    assert_eq!(a.grad(), 1.0);
}

#[test]
fn scalar_relu_backward_negative() {
    let a = Scalar::new(-0.5);
    let b = a.relu();
    assert_eq!(b.data(), 0.0);
    b.backward();
    assert_eq!(a.grad(), 0.0);
}

#[test]
fn scalar_relu_gate_open_at_zero() {
    let a = Scalar::new(0.0);
    let b = a.relu();
    assert_eq!(b.data(), 0.0);
    b.backward();
    assert_eq!(a.grad(), 1.0);
}

#[test]
fn scalar_self_product_accumulates() {
    // y = x*x, dy/dx = 2x; a single-path multiply would give 3.
    let x = Scalar::new(3.0);
    let y = &x * &x;
    y.backward();
    assert_eq!(x.grad(), 6.0);
}

#[test]
fn scalar_diamond_accumulates_over_paths() {
    // a feeds both b and c, which meet again in d.
    let a = Scalar::new(2.0);
    let b = &a * 3.0;
    let c = a.pow(2.0);
    let d = &b + &c;
    d.backward();
    // d = 3a + a^2 => 3 + 2a = 7
    assert_eq!(a.grad(), 7.0);
    assert_eq!(b.grad(), 1.0);
    assert_eq!(c.grad(), 1.0);
}

#[test]
fn scalar_end_to_end_relu_closed() {
    let x = Scalar::new(-1.0);
    let y = Scalar::new(2.0);
    let z = (&x * &y + &x).relu();
    assert_eq!(z.data(), 0.0);
    z.backward();
    assert_eq!(x.grad(), 0.0);
    assert_eq!(y.grad(), 0.0);
}

#[test]
fn scalar_chain_compound() {
    // loss = (a * b + c).relu(); a=1, b=2, c=-1 => loss = 1
    let a = Scalar::new(1.0);
    let b = Scalar::new(2.0);
    let c = Scalar::new(-1.0);
    let loss = (&a * &b + &c).relu();
    assert_eq!(loss.data(), 1.0);
    loss.backward();
    assert!((a.grad() - 2.0).abs() < 1e-10);
    assert!((b.grad() - 1.0).abs() < 1e-10);
    assert!((c.grad() - 1.0).abs() < 1e-10);
}

#[test]
fn scalar_constants_are_promoted_and_get_no_grad() {
    let x = Scalar::new(4.0);
    let y = 2.0 * &x + 1.0;
    assert_eq!(y.data(), 9.0);
    y.backward();
    assert_eq!(x.grad(), 2.0);

    let operands = y.operands();
    assert_eq!(operands[1].op(), Op::Const);
    assert_eq!(operands[1].grad(), 0.0);
    let scaled = &operands[0];
    assert_eq!(scaled.operands()[0].op(), Op::Const);
    assert_eq!(scaled.operands()[0].grad(), 0.0);
}

#[test]
fn scalar_std_ops_owned_and_borrowed() {
    let a = Scalar::new(3.0);
    let b = Scalar::new(2.0);
    assert_eq!((a.clone() + b.clone()).data(), 5.0);
    assert_eq!((&a - b.clone()).data(), 1.0);
    assert_eq!((a.clone() * &b).data(), 6.0);
    assert_eq!((1.0 - &a).data(), -2.0);
    assert_eq!((6.0 / &b).unwrap().data(), 3.0);
    assert_eq!((-a.clone()).data(), -3.0);
}

#[test]
fn scalar_backward_on_leaf_seeds_itself() {
    let a = Scalar::new(7.0);
    a.backward();
    assert_eq!(a.grad(), 1.0);
}

#[test]
fn scalar_constant_root_is_seeded() {
    let c = Scalar::constant(3.0);
    c.backward();
    assert_eq!(c.grad(), 1.0);
}

#[test]
fn scalar_fractional_pow_of_negative_base_propagates_nan() {
    let a = Scalar::new(-2.0);
    let b = a.pow(0.5);
    assert!(b.data().is_nan());
    let loss = &b * 3.0 + 1.0;
    assert!(loss.data().is_nan());
    loss.backward();
    assert_eq!(loss.grad(), 1.0);
    assert!(a.grad().is_nan());
}

#[test]
fn scalar_grad_is_zero_before_backward() {
    let a = Scalar::new(7.0);
    let _b = &a * 2.0;
    assert_eq!(a.grad(), 0.0);
}

#[test]
fn scalar_repeated_backward_does_not_double_count() {
    let a = Scalar::new(2.0);
    let b = &a * &a;
    b.backward();
    b.backward();
    assert_eq!(a.grad(), 4.0);
}

#[test]
fn scalar_backward_leaves_unreachable_nodes_alone() {
    let a = Scalar::new(2.0);
    let b = Scalar::new(5.0);
    let c = &a * 3.0;
    let d = &b * 4.0;
    d.backward();
    c.backward();
    assert_eq!(a.grad(), 3.0);
    assert_eq!(b.grad(), 4.0);
}

#[test]
fn scalar_zero_grad_after_step() {
    let a = Scalar::new(2.0);
    let b = &a * &Scalar::new(3.0);
    b.backward();
    assert_eq!(a.grad(), 3.0);
    a.zero_grad();
    assert_eq!(a.grad(), 0.0);
}

#[test]
fn scalar_forward_values_unchanged_by_backward() {
    let a = Scalar::new(2.0);
    let b = Scalar::new(-3.0);
    let c = (&a * &b).sigmoid();
    let before = (a.data(), b.data(), c.data());
    c.backward();
    assert_eq!(before, (a.data(), b.data(), c.data()));
}

#[test]
fn scalar_local_derivative_uses_forward_values() {
    let a = Scalar::new(2.0);
    let b = Scalar::new(5.0);
    let c = &a * &b;
    assert_eq!(c.local_derivative(0), Some(5.0));
    assert_eq!(c.local_derivative(1), Some(2.0));
    assert_eq!(c.local_derivative(2), None);
    assert_eq!(a.local_derivative(0), None);
}

#[test]
fn scalar_operands_are_shared_handles() {
    let w = Scalar::new(0.5);
    let y = &w * 4.0;
    assert!(Scalar::ptr_eq(&y.operands()[0], &w));
    assert!(!Scalar::ptr_eq(&y, &w));
}

#[test]
fn scalar_deep_chain_does_not_overflow() {
    let x = Scalar::new(1.0);
    let mut acc = Scalar::constant(0.0);
    for _ in 0..100_000 {
        acc = &acc + &x;
    }
    assert_eq!(acc.data(), 100_000.0);
    acc.backward();
    assert_eq!(x.grad(), 100_000.0);
    drop(acc);
}

#[test]
fn scalar_display_and_debug() {
    let a = Scalar::new(1.5);
    assert_eq!(a.to_string(), "1.5");
    let dbg = format!("{a:?}");
    assert!(dbg.contains("data: 1.5"));
    assert!(dbg.contains("Leaf"));
}

#[test]
fn grad_error_display() {
    let e = GradError::DivisionByZero { numerator: 2.0 };
    assert!(e.to_string().contains("division by zero"));
}
