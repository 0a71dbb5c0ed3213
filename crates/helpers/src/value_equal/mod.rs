//! Value equality utilities.
//!
//! Provides deep, cycle-safe comparison of dynamic values.

mod deep_equal;

pub use deep_equal::deep_equal;
