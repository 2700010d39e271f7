use crate::DType;

/// Errors raised while building, reading or (de)serializing a [tensor value](crate::TensorValue).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// The native tensor uses an element type outside the supported set.
    #[error("Unsupported element type: {0}")]
    UnsupportedElementType(String),

    /// The byte layout does not match the tensor record schema.
    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),

    /// The declared shape disagrees with the size of the element buffer.
    #[error("Shape mismatch: shape {shape:?} requires {expected} bytes, found {found}")]
    ShapeMismatch {
        /// Declared shape.
        shape: Vec<usize>,
        /// Buffer length in bytes implied by the shape and element type.
        expected: usize,
        /// Buffer length in bytes actually provided.
        found: usize,
    },

    /// A typed read was requested with the wrong element type.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Requested element type.
        expected: DType,
        /// Element type of the tensor.
        found: DType,
    },

    /// The value could not be encoded.
    #[error("Encode error: {0}")]
    Encode(String),
}

impl From<bincode::error::DecodeError> for TensorError {
    fn from(err: bincode::error::DecodeError) -> Self {
        TensorError::MalformedEncoding(err.to_string())
    }
}

impl From<bincode::error::EncodeError> for TensorError {
    fn from(err: bincode::error::EncodeError) -> Self {
        TensorError::Encode(err.to_string())
    }
}
