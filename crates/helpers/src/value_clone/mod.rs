//! Structural cloning.
//!
//! Duplicates nested values with a visited set scoped to one top-level call,
//! deferring to values that know how to clone themselves.

mod cloner;

pub use cloner::clone;
