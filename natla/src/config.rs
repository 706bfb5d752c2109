//! Loader configuration
//!
//! A [`LoaderConfig`] says which backend to bind (or none, meaning
//! auto-probe) and where to find native libraries that are not on the
//! default loader path. It can be built in code, read from JSON, or taken
//! from the environment:
//!
//! - `NATLA_CONFIG`: path to a JSON config file, applied first
//! - `NATLA_BACKEND`: backend request symbol (`mkl`, `openblas`, `accelerate`, `none`)
//! - `NATLA_MKL_LIB`, `NATLA_OPENBLAS_LIB`, `NATLA_ACCELERATE_LIB`: library overrides

use std::path::PathBuf;

use hashbrown::HashMap;
use natla_core::BackendKind;

use crate::{backend::BACKENDS, Error, Result};

/// Configuration consumed by the backend loader
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LoaderConfig {
    /// Requested backend symbol; absent means auto-probe
    pub backend: Option<String>,
    /// Library paths replacing the default candidates of a backend
    pub libraries: HashMap<BackendKind, PathBuf>,
}

impl LoaderConfig {
    pub const BACKEND_VAR: &'static str = "NATLA_BACKEND";
    pub const CONFIG_VAR: &'static str = "NATLA_CONFIG";

    /// Request a specific backend
    pub fn with_backend(mut self, symbol: impl Into<String>) -> Self {
        self.backend = Some(symbol.into());
        self
    }

    /// Override the library location of one backend
    pub fn with_library(mut self, kind: BackendKind, path: impl Into<PathBuf>) -> Self {
        self.libraries.insert(kind, path.into());
        self
    }

    /// The parsed backend request.
    ///
    /// A missing or blank symbol means auto-probe; an unknown one is a
    /// configuration error.
    pub fn requested(&self) -> Result<Option<BackendKind>> {
        match self.backend.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(symbol) => BackendKind::parse(symbol)
                .map(Some)
                .map_err(|_| Error::unknown_backend(symbol)),
        }
    }

    /// Parse a JSON config document
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read a JSON config file
    #[cfg(feature = "serde")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Build the config from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup(Self::CONFIG_VAR) {
            #[cfg(feature = "serde")]
            Some(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            #[cfg(not(feature = "serde"))]
            Some(path) if !path.trim().is_empty() => {
                return Err(Error::Config(format!(
                    "{} is set to {path}, but JSON config support is disabled",
                    Self::CONFIG_VAR
                )))
            }
            _ => Self::default(),
        };

        if let Some(symbol) = lookup(Self::BACKEND_VAR).filter(|s| !s.trim().is_empty()) {
            config.backend = Some(symbol);
        }

        for entry in &BACKENDS {
            if let Some(path) = lookup(entry.library_var).filter(|s| !s.trim().is_empty()) {
                config.libraries.insert(entry.kind, PathBuf::from(path));
            }
        }

        config.requested()?;
        Ok(config)
    }
}
