#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

mod data;
mod dtype;
mod element;
mod error;
mod native;

pub mod codec;

pub use codec::{decode_tensors, encode_tensors};
pub use data::*;
pub use dtype::*;
pub use element::*;
pub use error::*;
pub use native::*;

// Re-exported types
pub use half::{bf16, f16};
