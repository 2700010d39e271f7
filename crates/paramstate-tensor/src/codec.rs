//! Binary wire encoding of tensor values and tensor sequences.
//!
//! Records are encoded with [bincode]'s standard configuration (little-endian, variable-length
//! integers):
//!
//! ```text
//! tensor record                  sequence record
//! ┌─────────────────────────┐    ┌──────────────────────────┐
//! │ dtype   varint u32      │    │ count   varint u64       │
//! │ shape   varint len      │    │ tensor record #0         │
//! │         varint u64 * n  │    │ tensor record #1         │
//! │ bytes   varint len      │    │ ...                      │
//! │         raw LE elements │    │ tensor record #count-1   │
//! └─────────────────────────┘    └──────────────────────────┘
//! ```
//!
//! A sequence record is the tensor count followed by the concatenation of each tensor's own
//! encoding, so encoding a sequence never re-frames individual tensors.

use serde::{Deserialize, Serialize};

use crate::data::required_bytes;
use crate::{DType, TensorError, TensorValue};

/// Smallest possible tensor record: one byte each for dtype, shape length and buffer length.
const MIN_RECORD_SIZE: usize = 3;

#[derive(Serialize, Deserialize)]
struct TensorRecord {
    dtype: DType,
    shape: Vec<u64>,
    bytes: Vec<u8>,
}

impl From<&TensorValue> for TensorRecord {
    fn from(value: &TensorValue) -> Self {
        Self {
            dtype: value.dtype(),
            shape: value.shape().iter().map(|dim| *dim as u64).collect(),
            bytes: value.as_bytes().to_vec(),
        }
    }
}

impl TensorRecord {
    fn into_value(self) -> Result<TensorValue, TensorError> {
        let shape = self
            .shape
            .iter()
            .map(|&dim| {
                usize::try_from(dim).map_err(|_| {
                    TensorError::MalformedEncoding(format!(
                        "dimension {dim} exceeds platform maximum"
                    ))
                })
            })
            .collect::<Result<Vec<usize>, TensorError>>()?;

        let elem_size = self.dtype.size();
        if self.bytes.len() % elem_size != 0 {
            return Err(TensorError::MalformedEncoding(format!(
                "buffer of {} bytes is not a whole number of {} elements",
                self.bytes.len(),
                self.dtype
            )));
        }

        let expected = required_bytes(&shape, self.dtype).ok_or_else(|| {
            TensorError::MalformedEncoding(format!("shape {shape:?} overflows"))
        })?;

        if expected != self.bytes.len() {
            return Err(TensorError::ShapeMismatch {
                shape,
                expected,
                found: self.bytes.len(),
            });
        }

        Ok(TensorValue::from_parts(self.bytes, shape, self.dtype))
    }
}

pub(crate) fn bin_config() -> bincode::config::Configuration {
    bincode::config::standard()
}

impl TensorValue {
    /// Encodes the tensor value as a single tensor record.
    pub fn encode(&self) -> Result<Vec<u8>, TensorError> {
        let mut bytes = Vec::with_capacity(self.as_bytes().len() + 16);
        self.encode_into(&mut bytes)?;
        Ok(bytes)
    }

    fn encode_into(&self, bytes: &mut Vec<u8>) -> Result<(), TensorError> {
        bincode::serde::encode_into_std_write(TensorRecord::from(self), bytes, bin_config())?;
        Ok(())
    }

    /// Decodes exactly one tensor record.
    ///
    /// # Errors
    ///
    /// - [`TensorError::MalformedEncoding`] for truncated input, an unknown type tag or trailing
    ///   bytes.
    /// - [`TensorError::ShapeMismatch`] when the shape disagrees with the element count.
    pub fn decode(bytes: &[u8]) -> Result<Self, TensorError> {
        let (value, read) = Self::decode_prefix(bytes)?;

        if read != bytes.len() {
            return Err(TensorError::MalformedEncoding(format!(
                "{} trailing bytes after tensor record",
                bytes.len() - read
            )));
        }

        Ok(value)
    }

    /// Decodes the tensor record at the start of `bytes`, returning it with the number of bytes
    /// read.
    pub fn decode_prefix(bytes: &[u8]) -> Result<(Self, usize), TensorError> {
        let (record, read): (TensorRecord, usize) =
            bincode::serde::decode_from_slice(bytes, bin_config())?;

        Ok((record.into_value()?, read))
    }
}

/// Encodes an ordered sequence of tensor values.
pub fn encode_tensors(tensors: &[TensorValue]) -> Result<Vec<u8>, TensorError> {
    let payload: usize = tensors.iter().map(|t| t.as_bytes().len()).sum();
    let mut bytes = Vec::with_capacity(payload + 16 * (tensors.len() + 1));

    bincode::serde::encode_into_std_write(tensors.len() as u64, &mut bytes, bin_config())?;
    for tensor in tensors {
        tensor.encode_into(&mut bytes)?;
    }

    Ok(bytes)
}

/// Decodes an ordered sequence of tensor values.
///
/// The whole input must be consumed; nothing is returned unless every record decodes.
pub fn decode_tensors(bytes: &[u8]) -> Result<Vec<TensorValue>, TensorError> {
    let (count, mut offset): (u64, usize) =
        bincode::serde::decode_from_slice(bytes, bin_config())?;

    let remaining = bytes.len() - offset;
    let count = usize::try_from(count)
        .ok()
        .filter(|count| count.saturating_mul(MIN_RECORD_SIZE) <= remaining)
        .ok_or_else(|| {
            TensorError::MalformedEncoding(format!(
                "sequence declares {count} tensors but only {remaining} bytes remain"
            ))
        })?;

    let mut tensors = Vec::with_capacity(count);
    for _ in 0..count {
        let (tensor, read) = TensorValue::decode_prefix(&bytes[offset..])?;
        offset += read;
        tensors.push(tensor);
    }

    if offset != bytes.len() {
        return Err(TensorError::MalformedEncoding(format!(
            "{} trailing bytes after {count} tensor records",
            bytes.len() - offset
        )));
    }

    Ok(tensors)
}
