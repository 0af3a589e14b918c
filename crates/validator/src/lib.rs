#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod std_impl;

pub use error::*;
pub mod extras;

/// Types that can check their own contents and report every
/// problem found at once, keyed by field.
pub trait Validate {
  fn validate(&self) -> Result<(), ValidateError>;
}

pub trait HasLength {
  fn length(&self) -> usize;
}

#[cfg(feature = "derive")]
pub use validator_derive::Validate;
