//! Element type tags

use core::any::TypeId;

use crate::{tags::lookup, CoreError, Result};

/// Scalar representation of a vector or matrix.
///
/// One native engine exists per element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum ElementType {
    F32 = 0,
    F64 = 1,
    I32 = 2,
    I64 = 3,
    I16 = 4,
    I8 = 5,
}

const ALIASES: [(&str, ElementType); 20] = [
    ("float32", ElementType::F32),
    ("float", ElementType::F32),
    ("f32", ElementType::F32),
    ("float64", ElementType::F64),
    ("double", ElementType::F64),
    ("f64", ElementType::F64),
    ("int32", ElementType::I32),
    ("int", ElementType::I32),
    ("i32", ElementType::I32),
    ("int64", ElementType::I64),
    ("long", ElementType::I64),
    ("i64", ElementType::I64),
    ("int16", ElementType::I16),
    ("short", ElementType::I16),
    ("i16", ElementType::I16),
    ("int8", ElementType::I8),
    ("byte", ElementType::I8),
    ("i8", ElementType::I8),
    ("uint8", ElementType::I8),
    ("u8", ElementType::I8),
];

impl ElementType {
    /// All element types, in registry slot order
    pub const ALL: [ElementType; 6] = [
        ElementType::F32,
        ElementType::F64,
        ElementType::I32,
        ElementType::I64,
        ElementType::I16,
        ElementType::I8,
    ];

    /// Every spelling accepted by [`ElementType::parse`]
    pub const SUPPORTED_TAGS: [&'static str; 20] = {
        let mut tags = [""; 20];
        let mut i = 0;
        while i < ALIASES.len() {
            tags[i] = ALIASES[i].0;
            i += 1;
        }
        tags
    };

    /// Parse a symbolic tag such as `"float32"`, `"double"` or `"uint8"`
    pub fn parse(tag: &str) -> Result<Self> {
        lookup(&ALIASES, tag).ok_or(CoreError::UnknownElementType)
    }

    /// Resolve a runtime type descriptor.
    ///
    /// `u8` shares the byte engine with `i8`.
    pub fn from_type_id(id: TypeId) -> Result<Self> {
        let table = [
            (TypeId::of::<f32>(), ElementType::F32),
            (TypeId::of::<f64>(), ElementType::F64),
            (TypeId::of::<i32>(), ElementType::I32),
            (TypeId::of::<i64>(), ElementType::I64),
            (TypeId::of::<i16>(), ElementType::I16),
            (TypeId::of::<i8>(), ElementType::I8),
            (TypeId::of::<u8>(), ElementType::I8),
        ];
        table
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, ty)| *ty)
            .ok_or(CoreError::UnknownElementType)
    }

    /// Canonical symbolic name
    pub const fn name(&self) -> &'static str {
        match self {
            ElementType::F32 => "float32",
            ElementType::F64 => "float64",
            ElementType::I32 => "int32",
            ElementType::I64 => "int64",
            ElementType::I16 => "int16",
            ElementType::I8 => "int8",
        }
    }

    /// Get the size in bytes for this element type
    pub const fn size_bytes(&self) -> usize {
        match self {
            ElementType::I8 => 1,
            ElementType::I16 => 2,
            ElementType::F32 | ElementType::I32 => 4,
            ElementType::F64 | ElementType::I64 => 8,
        }
    }
}

impl TryFrom<u8> for ElementType {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self> {
        ElementType::ALL
            .get(value as usize)
            .copied()
            .ok_or(CoreError::UnknownElementType)
    }
}

impl core::str::FromStr for ElementType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        ElementType::parse(s)
    }
}

impl core::fmt::Display for ElementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve_to_same_type() {
        assert_eq!(ElementType::parse("float"), Ok(ElementType::F32));
        assert_eq!(ElementType::parse("float32"), Ok(ElementType::F32));
        assert_eq!(ElementType::parse("F32"), Ok(ElementType::F32));
        assert_eq!(ElementType::parse("double"), Ok(ElementType::F64));
        assert_eq!(ElementType::parse("long"), Ok(ElementType::I64));
        assert_eq!(ElementType::parse("short"), Ok(ElementType::I16));
        assert_eq!(ElementType::parse("uint8"), Ok(ElementType::I8));
        assert_eq!(ElementType::parse(" byte "), Ok(ElementType::I8));
    }

    #[test]
    fn test_unknown_tag_has_no_default() {
        assert_eq!(ElementType::parse("float16"), Err(CoreError::UnknownElementType));
        assert_eq!(ElementType::parse(""), Err(CoreError::UnknownElementType));
        assert_eq!(ElementType::try_from(6), Err(CoreError::UnknownElementType));
    }

    #[test]
    fn test_type_id_matches_symbolic_tag() {
        assert_eq!(
            ElementType::from_type_id(TypeId::of::<f32>()),
            ElementType::parse("float")
        );
        assert_eq!(
            ElementType::from_type_id(TypeId::of::<u8>()),
            Ok(ElementType::I8)
        );
        assert_eq!(
            ElementType::from_type_id(TypeId::of::<u64>()),
            Err(CoreError::UnknownElementType)
        );
    }

    #[test]
    fn test_supported_tags_cover_every_type() {
        for ty in ElementType::ALL {
            assert!(ElementType::SUPPORTED_TAGS.contains(&ty.name()));
            assert_eq!(ElementType::try_from(ty as u8), Ok(ty));
        }
    }
}
