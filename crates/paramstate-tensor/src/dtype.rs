use core::fmt;
use serde::{Deserialize, Serialize};

use crate::TensorError;

/// Supported element types for tensor values.
///
/// The wire discriminant of each variant is its declaration index, so variants must never be
/// reordered or removed. New types go at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    /// 64-bit floating point
    F64,
    /// 32-bit floating point
    F32,
    /// 16-bit floating point
    F16,
    /// Brain floating point
    BF16,
    /// 64-bit integer
    I64,
    /// 32-bit integer
    I32,
    /// 16-bit integer
    I16,
    /// 8-bit integer
    I8,
    /// 64-bit unsigned integer
    U64,
    /// 32-bit unsigned integer
    U32,
    /// 16-bit unsigned integer
    U16,
    /// 8-bit unsigned integer
    U8,
    /// Boolean, stored as one byte per element
    Bool,
}

impl DType {
    /// Size of a single element in bytes.
    pub const fn size(&self) -> usize {
        match self {
            DType::F64 | DType::I64 | DType::U64 => 8,
            DType::F32 | DType::I32 | DType::U32 => 4,
            DType::F16 | DType::BF16 | DType::I16 | DType::U16 => 2,
            DType::I8 | DType::U8 | DType::Bool => 1,
        }
    }

    /// Returns true if the data type is a floating point type.
    pub fn is_float(&self) -> bool {
        matches!(self, DType::F64 | DType::F32 | DType::F16 | DType::BF16)
    }

    /// Canonical lower-case name, as reported by execution engines.
    pub const fn name(&self) -> &'static str {
        match self {
            DType::F64 => "float64",
            DType::F32 => "float32",
            DType::F16 => "float16",
            DType::BF16 => "bfloat16",
            DType::I64 => "int64",
            DType::I32 => "int32",
            DType::I16 => "int16",
            DType::I8 => "int8",
            DType::U64 => "uint64",
            DType::U32 => "uint32",
            DType::U16 => "uint16",
            DType::U8 => "uint8",
            DType::Bool => "bool",
        }
    }

    /// Resolves an engine element-type name.
    ///
    /// Accepts the canonical names returned by [`DType::name`] as well as the short aliases used
    /// by PyTorch (`float`, `double`, `half`, `long`, `int`, `short`, `byte`). Matching ignores
    /// ASCII case and a leading `torch.` prefix.
    pub fn from_name(name: &str) -> Result<Self, TensorError> {
        let trimmed = name.trim();
        let lowered = trimmed.to_ascii_lowercase();
        let key = lowered.strip_prefix("torch.").unwrap_or(&lowered);

        let dtype = match key {
            "float64" | "double" => DType::F64,
            "float32" | "float" => DType::F32,
            "float16" | "half" => DType::F16,
            "bfloat16" => DType::BF16,
            "int64" | "long" => DType::I64,
            "int32" | "int" => DType::I32,
            "int16" | "short" => DType::I16,
            "int8" => DType::I8,
            "uint64" => DType::U64,
            "uint32" => DType::U32,
            "uint16" => DType::U16,
            "uint8" | "byte" => DType::U8,
            "bool" => DType::Bool,
            _ => return Err(TensorError::UnsupportedElementType(trimmed.to_string())),
        };

        Ok(dtype)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for DType {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DType::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("float32", DType::F32)]
    #[case("float", DType::F32)]
    #[case("torch.float32", DType::F32)]
    #[case("Float64", DType::F64)]
    #[case("double", DType::F64)]
    #[case("half", DType::F16)]
    #[case("bfloat16", DType::BF16)]
    #[case("long", DType::I64)]
    #[case("int", DType::I32)]
    #[case("short", DType::I16)]
    #[case("int8", DType::I8)]
    #[case("byte", DType::U8)]
    #[case("uint64", DType::U64)]
    #[case(" bool ", DType::Bool)]
    fn should_resolve_engine_names(#[case] name: &str, #[case] expected: DType) {
        assert_eq!(DType::from_name(name).unwrap(), expected);
    }

    #[rstest]
    #[case("complex64")]
    #[case("qint8")]
    #[case("")]
    fn should_reject_unknown_names(#[case] name: &str) {
        let err = DType::from_name(name).unwrap_err();
        assert!(matches!(err, TensorError::UnsupportedElementType(_)));
    }

    #[test]
    fn canonical_names_round_trip() {
        let all = [
            DType::F64,
            DType::F32,
            DType::F16,
            DType::BF16,
            DType::I64,
            DType::I32,
            DType::I16,
            DType::I8,
            DType::U64,
            DType::U32,
            DType::U16,
            DType::U8,
            DType::Bool,
        ];

        for dtype in all {
            assert_eq!(dtype.name().parse::<DType>().unwrap(), dtype);
        }
    }

    #[test]
    fn element_sizes() {
        assert_eq!(DType::F64.size(), 8);
        assert_eq!(DType::BF16.size(), 2);
        assert_eq!(DType::Bool.size(), 1);
        assert!(DType::F16.is_float());
        assert!(!DType::I32.is_float());
    }
}
