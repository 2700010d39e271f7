use paramstate_tensor::TensorError;

/// Errors raised by [model state](crate::ModelState) and [model record](crate::ModelRecord)
/// operations.
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    /// Decoding, encoding or converting a tensor failed.
    #[error(transparent)]
    Tensor(#[from] TensorError),

    /// A replacement position is outside the current bounds.
    #[error("Index out of range: position {index} in a state of {len} tensors")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of tensors in the state.
        len: usize,
    },

    /// A model record was constructed with a blank name.
    #[error("Model name must not be empty")]
    EmptyModelName,

    /// The model state file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
