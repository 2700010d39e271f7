use crate::{DType, TensorError, TensorValue};

/// A tensor handle produced by an execution engine.
///
/// The engine owns the tensor; this crate only reads its element type, shape and buffer to build
/// an independent [`TensorValue`].
pub trait NativeTensor {
    /// Element type name as reported by the engine (e.g. `float32`, `long`).
    fn dtype_name(&self) -> &str;

    /// Dimensions of the tensor.
    fn shape(&self) -> Vec<usize>;

    /// Elements in row-major order, as little-endian bytes.
    ///
    /// The provided implementations copy element memory as is, so the bytes are in host order and
    /// only little-endian on little-endian targets.
    fn to_le_bytes(&self) -> Vec<u8>;
}

impl<T: NativeTensor + ?Sized> NativeTensor for &T {
    fn dtype_name(&self) -> &str {
        (**self).dtype_name()
    }

    fn shape(&self) -> Vec<usize> {
        (**self).shape()
    }

    fn to_le_bytes(&self) -> Vec<u8> {
        (**self).to_le_bytes()
    }
}

impl NativeTensor for TensorValue {
    fn dtype_name(&self) -> &str {
        self.dtype().name()
    }

    fn shape(&self) -> Vec<usize> {
        TensorValue::shape(self).to_vec()
    }

    fn to_le_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl TensorValue {
    /// Copies a native engine tensor into a new tensor value.
    ///
    /// # Errors
    ///
    /// - [`TensorError::UnsupportedElementType`] when the engine reports an unknown element type.
    /// - [`TensorError::ShapeMismatch`] when the buffer does not match the reported shape.
    pub fn from_native<T: NativeTensor + ?Sized>(native: &T) -> Result<Self, TensorError> {
        let dtype = DType::from_name(native.dtype_name())?;
        TensorValue::from_bytes(native.to_le_bytes(), native.shape(), dtype)
    }
}

#[cfg(feature = "ndarray")]
mod ndarray_native {
    use ndarray::{Array, ArrayBase, ArrayD, Data, Dimension, IxDyn};

    use super::NativeTensor;
    use crate::{Element, TensorError, TensorValue};

    impl<E, S, D> NativeTensor for ArrayBase<S, D>
    where
        E: Element,
        S: Data<Elem = E>,
        D: Dimension,
    {
        fn dtype_name(&self) -> &str {
            E::DTYPE.name()
        }

        fn shape(&self) -> Vec<usize> {
            ArrayBase::shape(self).to_vec()
        }

        fn to_le_bytes(&self) -> Vec<u8> {
            // Logical iteration order is row-major regardless of the memory layout.
            let values: Vec<E> = self.iter().copied().collect();
            bytemuck::cast_slice::<E, u8>(&values).to_vec()
        }
    }

    impl<E: Element, D: Dimension> From<Array<E, D>> for TensorValue {
        fn from(array: Array<E, D>) -> Self {
            TensorValue::from_parts(array.to_le_bytes(), array.shape().to_vec(), E::DTYPE)
        }
    }

    impl TensorValue {
        /// Copies the tensor value into a dynamically shaped `ndarray` array.
        pub fn to_ndarray<E: Element>(&self) -> Result<ArrayD<E>, TensorError> {
            let values = self.to_vec::<E>()?;

            ArrayD::from_shape_vec(IxDyn(self.shape()), values).map_err(|_| {
                TensorError::ShapeMismatch {
                    shape: self.shape().to_vec(),
                    expected: self.as_bytes().len(),
                    found: self.num_elements() * E::DTYPE.size(),
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EngineTensor {
        kind: &'static str,
        dims: Vec<usize>,
        data: Vec<u8>,
    }

    impl NativeTensor for EngineTensor {
        fn dtype_name(&self) -> &str {
            self.kind
        }

        fn shape(&self) -> Vec<usize> {
            self.dims.clone()
        }

        fn to_le_bytes(&self) -> Vec<u8> {
            self.data.clone()
        }
    }

    #[test]
    fn should_copy_native_tensor() {
        let native = EngineTensor {
            kind: "long",
            dims: vec![2],
            data: [3i64, -4].iter().flat_map(|v| v.to_le_bytes()).collect(),
        };

        let value = TensorValue::from_native(&native).unwrap();
        assert_eq!(value.dtype(), DType::I64);
        assert_eq!(value.shape(), &[2]);
        assert_eq!(value.to_vec::<i64>().unwrap(), vec![3, -4]);
    }

    #[test]
    fn should_reject_unsupported_native_type() {
        let native = EngineTensor {
            kind: "complex64",
            dims: vec![1],
            data: vec![0; 8],
        };

        let err = TensorValue::from_native(&native).unwrap_err();
        assert_eq!(
            err,
            TensorError::UnsupportedElementType("complex64".to_string())
        );
    }

    #[test]
    fn should_reject_native_buffer_mismatch() {
        let native = EngineTensor {
            kind: "float32",
            dims: vec![3],
            data: vec![0; 8],
        };

        let err = TensorValue::from_native(&native).unwrap_err();
        assert!(matches!(err, TensorError::ShapeMismatch { expected: 12, found: 8, .. }));
    }

    #[test]
    fn tensor_value_is_its_own_native_tensor() {
        let value = TensorValue::new(vec![1u16, 2, 3, 4], [2, 2]).unwrap();
        assert_eq!(TensorValue::from_native(&value).unwrap(), value);
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn should_convert_ndarray_in_logical_order() {
        let array = ndarray::arr2(&[[1.0f32, 2.0], [3.0, 4.0]]);
        let transposed = array.t();

        let value = TensorValue::from_native(&transposed).unwrap();
        assert_eq!(value.shape(), &[2, 2]);
        assert_eq!(value.to_vec::<f32>().unwrap(), vec![1.0, 3.0, 2.0, 4.0]);
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn ndarray_round_trip() {
        let array = ndarray::Array::from_shape_vec((2, 3), vec![1i32, 2, 3, 4, 5, 6]).unwrap();
        let value = TensorValue::from(array.clone());

        assert_eq!(value.dtype(), DType::I32);
        assert_eq!(value.to_ndarray::<i32>().unwrap(), array.into_dyn());
    }
}
