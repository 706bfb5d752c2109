//! Capability probing
//!
//! The loader never looks at the platform directly. It asks a [`Probe`] for
//! the OS name, the CPU architecture and whether a backend's native library
//! can be loaded. [`SystemProbe`] answers from the running process using
//! `libloading`; tests and embedders can supply their own.

use std::fmt;
use std::path::PathBuf;

use hashbrown::HashMap;
use natla_core::BackendKind;

use crate::backend::{self, NativeBackend};
use crate::config::LoaderConfig;

/// Why a backend could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// `(candidate, error)` for every library that was tried
    pub attempts: Vec<(String, String)>,
}

impl LoadFailure {
    pub fn new(candidate: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            attempts: vec![(candidate.into(), error.into())],
        }
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attempts.is_empty() {
            return write!(f, "no candidate library for this platform");
        }
        for (i, (candidate, error)) in self.attempts.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{candidate}: {error}")?;
        }
        Ok(())
    }
}

/// Read-only view of the environment the loader selects from
pub trait Probe {
    /// OS name, e.g. `"linux"` or `"macos"`
    fn os(&self) -> &str;

    /// CPU architecture, e.g. `"x86_64"` or `"aarch64"`
    fn arch(&self) -> &str;

    /// Load and initialise the native library of `kind`.
    ///
    /// Must not panic or abort; every failure is reported as a [`LoadFailure`].
    fn load(&self, kind: BackendKind) -> Result<NativeBackend, LoadFailure>;

    /// Whether `kind` can be loaded right now
    fn is_available(&self, kind: BackendKind) -> bool {
        self.load(kind).is_ok()
    }
}

/// OS-name gate for Accelerate: substring match on `mac`
pub fn is_macos(os: &str) -> bool {
    os.to_ascii_lowercase().contains("mac")
}

/// Architecture gate for the vendor kernel library: the 64-bit x86 spellings
pub fn is_x86_64(arch: &str) -> bool {
    const X86_64: [&str; 4] = ["x86_64", "amd64", "x86-64", "x64"];
    X86_64.iter().any(|name| name.eq_ignore_ascii_case(arch))
}

/// Whether the auto-probe considers `kind` on this platform
pub fn is_eligible(kind: BackendKind, os: &str, arch: &str) -> bool {
    match kind {
        BackendKind::Accelerate => is_macos(os),
        BackendKind::Mkl => is_x86_64(arch),
        BackendKind::OpenBlas => true,
        BackendKind::None => false,
    }
}

/// Probe of the running process
#[derive(Debug, Clone, Default)]
pub struct SystemProbe {
    overrides: HashMap<BackendKind, PathBuf>,
}

impl SystemProbe {
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            overrides: config.libraries.clone(),
        }
    }

    fn candidates(&self, kind: BackendKind) -> Vec<String> {
        match (self.overrides.get(&kind), backend::entry(kind)) {
            (Some(path), _) => vec![path.display().to_string()],
            (None, Some(entry)) => entry.libraries.iter().map(|s| s.to_string()).collect(),
            (None, None) => Vec::new(),
        }
    }
}

impl Probe for SystemProbe {
    fn os(&self) -> &str {
        std::env::consts::OS
    }

    fn arch(&self) -> &str {
        std::env::consts::ARCH
    }

    fn load(&self, kind: BackendKind) -> Result<NativeBackend, LoadFailure> {
        let entry = backend::entry(kind)
            .ok_or_else(|| LoadFailure::new(kind.name(), "not a native backend"))?;

        let mut failure = LoadFailure {
            attempts: Vec::new(),
        };
        for candidate in self.candidates(kind) {
            match NativeBackend::load(entry, &candidate) {
                Ok(backend) => return Ok(backend),
                Err(e) => failure.attempts.push((candidate, e.to_string())),
            }
        }
        Err(failure)
    }
}

/// Availability of one backend on this host
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BackendStatus {
    pub kind: BackendKind,
    /// Considered by the auto-probe on this OS/architecture
    pub eligible: bool,
    pub available: bool,
    /// Library the backend loaded from, or why it failed
    pub detail: String,
}

/// Snapshot of what the loader would see on this host
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProbeReport {
    pub os: String,
    pub arch: String,
    pub backends: Vec<BackendStatus>,
    /// Kind the auto-probe would pick
    pub auto_selection: BackendKind,
}

impl ProbeReport {
    /// Probe every native backend once
    pub fn collect(probe: &dyn Probe) -> Self {
        let (os, arch) = (probe.os().to_string(), probe.arch().to_string());
        let backends: Vec<BackendStatus> = BackendKind::PROBE_ORDER
            .iter()
            .map(|&kind| {
                let (available, detail) = match probe.load(kind) {
                    Ok(backend) => (true, backend.origin().to_string()),
                    Err(failure) => (false, failure.to_string()),
                };
                BackendStatus {
                    kind,
                    eligible: is_eligible(kind, &os, &arch),
                    available,
                    detail,
                }
            })
            .collect();

        let auto_selection = backends
            .iter()
            .find(|status| status.eligible && status.available)
            .map_or(BackendKind::None, |status| status.kind);

        Self {
            os,
            arch,
            backends,
            auto_selection,
        }
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "os: {}, arch: {}", self.os, self.arch)?;
        for status in &self.backends {
            let state = match (status.available, status.eligible) {
                (true, true) => "available",
                (true, false) => "available (not auto-probed here)",
                (false, _) => "unavailable",
            };
            writeln!(f, "  {:<10} {state}: {}", status.kind.name(), status.detail)?;
        }
        write!(f, "auto-probe selects: {}", self.auto_selection)
    }
}
