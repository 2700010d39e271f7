use core::ops::Index;

use paramstate_tensor::{decode_tensors, encode_tensors, TensorValue};

use crate::ModelError;

/// The ordered weight tensors of one version of a model.
///
/// A tensor's position is its identity: it matches the execution engine's own parameter
/// enumeration order. The number of tensors is fixed once the state is built; tensors are only
/// ever swapped through [`replace_at`](ModelState::replace_at).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelState {
    tensors: Vec<TensorValue>,
}

impl ModelState {
    /// Creates a state from tensors in parameter order.
    pub fn new(tensors: Vec<TensorValue>) -> Self {
        Self { tensors }
    }

    /// Decodes a state record.
    ///
    /// Nothing is returned unless every tensor record decodes.
    pub fn decode(bytes: &[u8]) -> Result<Self, ModelError> {
        Ok(Self::new(decode_tensors(bytes)?))
    }

    /// Encodes the state as a tensor count followed by each tensor's own encoding.
    pub fn encode(&self) -> Result<Vec<u8>, ModelError> {
        Ok(encode_tensors(&self.tensors)?)
    }

    /// Replaces the tensor at `position`, returning the previous one.
    ///
    /// The new value is not checked against the old one's element type or shape.
    ///
    /// # Errors
    ///
    /// [`ModelError::IndexOutOfRange`] when `position >= len`; the state is left unchanged.
    pub fn replace_at(
        &mut self,
        position: usize,
        value: TensorValue,
    ) -> Result<TensorValue, ModelError> {
        let len = self.tensors.len();
        let slot = self
            .tensors
            .get_mut(position)
            .ok_or(ModelError::IndexOutOfRange {
                index: position,
                len,
            })?;

        Ok(core::mem::replace(slot, value))
    }

    /// The tensor at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&TensorValue> {
        self.tensors.get(position)
    }

    /// All tensors in parameter order.
    pub fn tensors(&self) -> &[TensorValue] {
        &self.tensors
    }

    /// Iterates over the tensors in parameter order.
    pub fn iter(&self) -> core::slice::Iter<'_, TensorValue> {
        self.tensors.iter()
    }

    /// Number of tensors.
    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    /// Returns true if the state holds no tensors.
    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }

    /// Total number of elements over all tensors.
    pub fn num_params(&self) -> usize {
        self.tensors.iter().map(TensorValue::num_elements).sum()
    }

    /// Consumes the state, returning its tensors.
    pub fn into_tensors(self) -> Vec<TensorValue> {
        self.tensors
    }
}

impl Index<usize> for ModelState {
    type Output = TensorValue;

    fn index(&self, position: usize) -> &Self::Output {
        &self.tensors[position]
    }
}

impl<'a> IntoIterator for &'a ModelState {
    type Item = &'a TensorValue;
    type IntoIter = core::slice::Iter<'a, TensorValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.tensors.iter()
    }
}

impl From<Vec<TensorValue>> for ModelState {
    fn from(tensors: Vec<TensorValue>) -> Self {
        Self::new(tensors)
    }
}

impl FromIterator<TensorValue> for ModelState {
    fn from_iter<I: IntoIterator<Item = TensorValue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
