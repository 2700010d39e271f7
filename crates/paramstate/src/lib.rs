#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

#[macro_use]
extern crate derive_new;

mod config;
mod error;
mod file;
mod record;
mod state;

pub use config::*;
pub use error::*;
pub use record::*;
pub use state::*;

/// Tensor values and their encoding.
pub mod tensor {
    pub use paramstate_tensor::*;
}
