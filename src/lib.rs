pub mod error;
pub mod hmm;
pub mod prob;

pub use error::{HmmError, Result};
pub use hmm::HmmModel;

#[cfg(test)]
#[macro_use]
extern crate approx;
