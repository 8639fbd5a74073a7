//! Arithmetic helpers for reserve and price calculations.
//!
//! The constant-product engine runs in `f64`: launch reserves are in the
//! tens of millions of tokens and USD, so integer amounts buy nothing here
//! and the IEEE 754 double is the natural unit.  [`CheckedFloat`] turns a
//! non-finite intermediate into a [`SimError`](crate::error::SimError).

mod checked;

pub use checked::{approx_eq_rel, finite, CheckedFloat};
