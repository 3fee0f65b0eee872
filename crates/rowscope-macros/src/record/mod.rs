//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates a `rowscope::Record` implementation and field name constants
//! from `#[field(...)]` annotations.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
