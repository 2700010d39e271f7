use core::fmt::Debug;

use half::{bf16, f16};

use crate::DType;

/// Element trait for tensor values.
///
/// Elements are plain-old-data so a buffer of them can be viewed as raw little-endian bytes.
pub trait Element: bytemuck::Pod + Debug + PartialEq + Send + Sync + 'static {
    /// The element type tag for this type.
    const DTYPE: DType;
}

macro_rules! make_element {
    ($ty:ty, $dtype:expr) => {
        impl Element for $ty {
            const DTYPE: DType = $dtype;
        }
    };
}

make_element!(f64, DType::F64);
make_element!(f32, DType::F32);
make_element!(f16, DType::F16);
make_element!(bf16, DType::BF16);
make_element!(i64, DType::I64);
make_element!(i32, DType::I32);
make_element!(i16, DType::I16);
make_element!(i8, DType::I8);
make_element!(u64, DType::U64);
make_element!(u32, DType::U32);
make_element!(u16, DType::U16);
make_element!(u8, DType::U8);
