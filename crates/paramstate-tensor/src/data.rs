use crate::{DType, Element, TensorError};

/// An immutable, shape-typed tensor value.
///
/// The element buffer is stored as raw little-endian bytes in row-major order. Every constructor
/// checks that the buffer length matches the shape and element type, so a `TensorValue` is always
/// well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TensorValue {
    bytes: Vec<u8>,
    shape: Vec<usize>,
    dtype: DType,
}

impl TensorValue {
    /// Creates a new tensor value from a vector of elements and a shape.
    pub fn new<E: Element, S: Into<Vec<usize>>>(
        value: Vec<E>,
        shape: S,
    ) -> Result<Self, TensorError> {
        let bytes = bytemuck::cast_slice::<E, u8>(&value).to_vec();
        Self::from_bytes(bytes, shape, E::DTYPE)
    }

    /// Creates a new boolean tensor value, one byte per element.
    pub fn from_bools<S: Into<Vec<usize>>>(
        value: Vec<bool>,
        shape: S,
    ) -> Result<Self, TensorError> {
        let bytes = value.into_iter().map(u8::from).collect();
        Self::from_bytes(bytes, shape, DType::Bool)
    }

    /// Creates a new tensor value from raw little-endian bytes.
    pub fn from_bytes<S: Into<Vec<usize>>>(
        bytes: Vec<u8>,
        shape: S,
        dtype: DType,
    ) -> Result<Self, TensorError> {
        let shape = shape.into();
        // An overflowing shape can never match a real buffer.
        let expected = required_bytes(&shape, dtype).unwrap_or(usize::MAX);

        if expected != bytes.len() {
            return Err(TensorError::ShapeMismatch {
                shape,
                expected,
                found: bytes.len(),
            });
        }

        Ok(Self::from_parts(bytes, shape, dtype))
    }

    /// Assembles a value whose buffer length has already been checked.
    pub(crate) fn from_parts(bytes: Vec<u8>, shape: Vec<usize>, dtype: DType) -> Self {
        Self {
            bytes,
            shape,
            dtype,
        }
    }

    /// The element type tag.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// The dimensions of the tensor.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the total number of elements of the tensor.
    pub fn num_elements(&self) -> usize {
        if self.shape.contains(&0) {
            return 0;
        }

        self.shape.iter().product()
    }

    /// The raw little-endian element buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the value, returning the raw element buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Copies the elements into a typed vector.
    ///
    /// The buffer is reinterpreted in host byte order, which matches the stored little-endian
    /// layout on little-endian targets only.
    pub fn to_vec<E: Element>(&self) -> Result<Vec<E>, TensorError> {
        self.check_dtype(E::DTYPE)?;
        Ok(bytemuck::allocation::pod_collect_to_vec(&self.bytes))
    }

    /// Copies the elements of a boolean tensor.
    pub fn to_bools(&self) -> Result<Vec<bool>, TensorError> {
        self.check_dtype(DType::Bool)?;
        Ok(self.bytes.iter().map(|byte| *byte != 0).collect())
    }

    fn check_dtype(&self, expected: DType) -> Result<(), TensorError> {
        if self.dtype != expected {
            return Err(TensorError::TypeMismatch {
                expected,
                found: self.dtype,
            });
        }

        Ok(())
    }
}

/// Byte length of a buffer holding `shape` elements of `dtype`, or `None` on overflow.
pub(crate) fn required_bytes(shape: &[usize], dtype: DType) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }

    shape
        .iter()
        .try_fold(dtype.size(), |acc, dim| acc.checked_mul(*dim))
}
