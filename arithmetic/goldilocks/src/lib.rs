//! This crate implements Goldilocks field with modulus 2^64 - 2^32 + 1.
//! Credit: the multiplication and its reduction are borrowed from Plonky2 with modifications.
//!
//! Elements fit in one machine word and are always kept canonical. Addition,
//! subtraction, doubling and negation are single add/sub with one
//! correction; inversion is a binary extended GCD that never multiplies;
//! multiplication reduces the 128-bit product using 2^64 = 2^32 - 1.
//!
//! The [`ff::Field`] trait is the interface meant for generic consumers.

pub mod batch;
pub mod fp;
mod inverse;
mod util;

pub use batch::batch_inverse;
pub use ff::{self, Field};
pub use fp::{Goldilocks, MODULUS};
