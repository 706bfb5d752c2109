#![allow(dead_code)]

use std::sync::Mutex;

use natla::{BackendKind, LoadFailure, NativeBackend, Probe, ThreadingHooks};

/// Probe with a fixed platform and a fixed set of loadable backends
pub struct StubProbe {
    pub os: &'static str,
    pub arch: &'static str,
    pub loadable: Vec<BackendKind>,
    pub attempts: Mutex<Vec<BackendKind>>,
}

impl StubProbe {
    pub fn new(os: &'static str, arch: &'static str, loadable: &[BackendKind]) -> Self {
        Self {
            os,
            arch,
            loadable: loadable.to_vec(),
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// Linux on x86_64 with only OpenBLAS installed
    pub fn openblas_only() -> Self {
        Self::new("linux", "x86_64", &[BackendKind::OpenBlas])
    }

    /// A host where no native library loads
    pub fn bare() -> Self {
        Self::new("linux", "aarch64", &[])
    }

    pub fn attempts(&self) -> Vec<BackendKind> {
        self.attempts.lock().unwrap().clone()
    }
}

impl Probe for StubProbe {
    fn os(&self) -> &str {
        self.os
    }

    fn arch(&self) -> &str {
        self.arch
    }

    fn load(&self, kind: BackendKind) -> Result<NativeBackend, LoadFailure> {
        self.attempts.lock().unwrap().push(kind);
        if self.loadable.contains(&kind) {
            Ok(NativeBackend::new(
                kind,
                format!("stub {kind}"),
                ThreadingHooks::in_memory(false),
            ))
        } else {
            Err(LoadFailure::new(format!("lib{kind}"), "not installed"))
        }
    }
}
