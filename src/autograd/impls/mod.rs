//! Concrete graph node types.

pub mod scalar;
