//! Backend kind tags

use crate::{tags::lookup, CoreError, Result};

/// Native numerical library backing every engine of a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BackendKind {
    /// Vendor math kernel library (Intel MKL)
    Mkl,
    /// Open-source BLAS (OpenBLAS)
    OpenBlas,
    /// Apple Accelerate framework
    Accelerate,
    /// No native backend, no engines bound
    None,
}

const ALIASES: [(&str, BackendKind); 7] = [
    ("mkl", BackendKind::Mkl),
    ("intel-mkl", BackendKind::Mkl),
    ("openblas", BackendKind::OpenBlas),
    ("blas", BackendKind::OpenBlas),
    ("accelerate", BackendKind::Accelerate),
    ("apple", BackendKind::Accelerate),
    ("none", BackendKind::None),
];

impl BackendKind {
    /// Native kinds in auto-probe priority order
    pub const PROBE_ORDER: [BackendKind; 3] = [
        BackendKind::Accelerate,
        BackendKind::Mkl,
        BackendKind::OpenBlas,
    ];

    /// Every spelling accepted by [`BackendKind::parse`]
    pub const ACCEPTED: [&'static str; ALIASES.len()] = {
        let mut symbols = [""; ALIASES.len()];
        let mut i = 0;
        while i < ALIASES.len() {
            symbols[i] = ALIASES[i].0;
            i += 1;
        }
        symbols
    };

    /// Parse a backend request symbol
    pub fn parse(symbol: &str) -> Result<Self> {
        lookup(&ALIASES, symbol).ok_or(CoreError::UnknownBackend)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            BackendKind::Mkl => "mkl",
            BackendKind::OpenBlas => "openblas",
            BackendKind::Accelerate => "accelerate",
            BackendKind::None => "none",
        }
    }

    /// Whether this kind binds a native library
    pub const fn is_native(&self) -> bool {
        !matches!(self, BackendKind::None)
    }
}

impl core::str::FromStr for BackendKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        BackendKind::parse(s)
    }
}

impl core::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_symbols() {
        assert_eq!(BackendKind::parse("MKL"), Ok(BackendKind::Mkl));
        assert_eq!(BackendKind::parse("openblas"), Ok(BackendKind::OpenBlas));
        assert_eq!(BackendKind::parse("accelerate"), Ok(BackendKind::Accelerate));
        assert_eq!(BackendKind::parse("none"), Ok(BackendKind::None));
        assert_eq!(BackendKind::parse("cublas"), Err(CoreError::UnknownBackend));
        assert_eq!(BackendKind::parse(""), Err(CoreError::UnknownBackend));
    }

    #[test]
    fn test_accepted_symbols_all_parse() {
        assert_eq!(BackendKind::ACCEPTED.len(), ALIASES.len());
        assert!(BackendKind::ACCEPTED.contains(&"intel-mkl"));
        for symbol in BackendKind::ACCEPTED {
            assert!(BackendKind::parse(symbol).is_ok(), "{symbol}");
        }
    }

    #[test]
    fn test_probe_order_is_native_only() {
        assert_eq!(BackendKind::PROBE_ORDER[0], BackendKind::Accelerate);
        assert!(BackendKind::PROBE_ORDER.iter().all(BackendKind::is_native));
        assert!(!BackendKind::None.is_native());
    }
}
