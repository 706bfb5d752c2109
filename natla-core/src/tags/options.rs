//! Option and mode flags

use crate::{tags::lookup, CoreError, Result};

/// Element order of dense storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Layout {
    #[default]
    Column,
    Row,
}

/// Which triangle holds the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Uplo {
    Upper,
    #[default]
    Lower,
}

/// Whether a triangular diagonal is implicitly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Diag {
    #[default]
    NonUnit,
    Unit,
}

/// Access mode of a memory-mapped region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MapMode {
    /// Shared mapping, writes reach the file
    #[default]
    ReadWrite,
    /// Immutable mapping
    ReadOnly,
    /// Copy-on-write mapping, writes stay in this process
    Private,
}

impl Layout {
    pub fn parse(s: &str) -> Result<Self> {
        let table = [
            ("column", Layout::Column),
            ("col", Layout::Column),
            ("column-major", Layout::Column),
            ("row", Layout::Row),
            ("row-major", Layout::Row),
        ];
        lookup(&table, s).ok_or(CoreError::UnknownOption)
    }
}

impl Uplo {
    pub fn parse(s: &str) -> Result<Self> {
        let table = [("upper", Uplo::Upper), ("lower", Uplo::Lower)];
        lookup(&table, s).ok_or(CoreError::UnknownOption)
    }
}

impl Diag {
    pub fn parse(s: &str) -> Result<Self> {
        let table = [
            ("non-unit", Diag::NonUnit),
            ("nonunit", Diag::NonUnit),
            ("unit", Diag::Unit),
        ];
        lookup(&table, s).ok_or(CoreError::UnknownOption)
    }
}

const MODE_ALIASES: [(&str, MapMode); 6] = [
    ("read-write", MapMode::ReadWrite),
    ("rw", MapMode::ReadWrite),
    ("read", MapMode::ReadOnly),
    ("read-only", MapMode::ReadOnly),
    ("private", MapMode::Private),
    ("copy-on-write", MapMode::Private),
];

impl MapMode {
    /// Every flag accepted by [`MapMode::parse`]
    pub const ACCEPTED: [&'static str; MODE_ALIASES.len()] = {
        let mut flags = [""; MODE_ALIASES.len()];
        let mut i = 0;
        while i < MODE_ALIASES.len() {
            flags[i] = MODE_ALIASES[i].0;
            i += 1;
        }
        flags
    };

    pub fn parse(s: &str) -> Result<Self> {
        lookup(&MODE_ALIASES, s).ok_or(CoreError::UnknownMode)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            MapMode::ReadWrite => "read-write",
            MapMode::ReadOnly => "read-only",
            MapMode::Private => "private",
        }
    }
}

impl core::str::FromStr for MapMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        MapMode::parse(s)
    }
}

impl core::fmt::Display for MapMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_mode_flags() {
        assert_eq!(MapMode::parse("read-write"), Ok(MapMode::ReadWrite));
        assert_eq!(MapMode::parse("read"), Ok(MapMode::ReadOnly));
        assert_eq!(MapMode::parse("read-only"), Ok(MapMode::ReadOnly));
        assert_eq!(MapMode::parse("copy-on-write"), Ok(MapMode::Private));
        assert_eq!(MapMode::parse("append"), Err(CoreError::UnknownMode));
    }

    #[test]
    fn test_accepted_modes_all_parse() {
        assert!(MapMode::ACCEPTED.contains(&"rw"));
        for flag in MapMode::ACCEPTED {
            assert!(MapMode::parse(flag).is_ok(), "{flag}");
        }
    }

    #[test]
    fn test_option_defaults() {
        assert_eq!(Layout::default(), Layout::Column);
        assert_eq!(Uplo::default(), Uplo::Lower);
        assert_eq!(Diag::default(), Diag::NonUnit);
        assert_eq!(Uplo::parse("UPPER"), Ok(Uplo::Upper));
        assert_eq!(Diag::parse("maybe"), Err(CoreError::UnknownOption));
    }
}
