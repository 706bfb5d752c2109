//! Backend selection
//!
//! Without an explicit request the loader walks the native backends in a
//! fixed priority order and binds the first one that is eligible on this
//! platform and loads:
//!
//! 1. Accelerate, when the OS name contains `mac`
//! 2. MKL, when the architecture is 64-bit x86
//! 3. OpenBLAS, anywhere
//! 4. otherwise no backend
//!
//! An explicit request loads exactly that backend or fails. It never falls
//! back to another kind.

use natla_core::BackendKind;
use tracing::{debug, error, info, warn};

use crate::backend::{self, NativeBackend};
use crate::probe::{is_eligible, Probe};
use crate::{Error, Result};

/// Pick and load a backend.
///
/// Returns `None` when the selection is the `none` backend.
pub fn select_backend(
    requested: Option<BackendKind>,
    probe: &dyn Probe,
) -> Result<Option<NativeBackend>> {
    match requested {
        None => Ok(auto_select(probe)),
        Some(BackendKind::None) => {
            info!("Native backend disabled by request");
            Ok(None)
        }
        Some(kind) => load_requested(kind, probe).map(Some),
    }
}

fn auto_select(probe: &dyn Probe) -> Option<NativeBackend> {
    let (os, arch) = (probe.os(), probe.arch());
    info!("Searching for a native backend (os: {os}, arch: {arch})");

    for kind in BackendKind::PROBE_ORDER {
        if !is_eligible(kind, os, arch) {
            debug!("Skipping {kind}: not probed on {os}/{arch}");
            continue;
        }
        info!("Probing {kind} backend");
        match probe.load(kind) {
            Ok(backend) => {
                info!("Selected {kind} backend ({})", backend.origin());
                return Some(backend);
            }
            Err(failure) => info!("{kind} backend not available: {failure}"),
        }
    }

    warn!("No native backend found; native constructors will be unavailable");
    None
}

fn load_requested(kind: BackendKind, probe: &dyn Probe) -> Result<NativeBackend> {
    info!("Loading requested {kind} backend");
    probe.load(kind).map_err(|failure| {
        let remediation = backend::entry(kind).map_or("", |entry| entry.remediation);
        error!("Requested backend {kind} is not available: {failure}. {remediation}");
        Error::BackendUnavailable {
            requested: kind,
            reason: failure.to_string(),
            remediation,
        }
    })
}
