//! Engine registry
//!
//! A [`Registry`] is the outcome of one backend selection: the active
//! [`BackendKind`] and, unless that kind is `none`, an [`EngineSet`] with one
//! factory per element type. Registries are immutable once built.
//!
//! The process-wide registry lives in a [`OnceLock`]. [`init`] or
//! [`init_with`] fill it explicitly; otherwise the first call to
//! [`registry`] fills it from the environment. A failed initialization is
//! remembered: every later [`registry`] call returns a copy of the same
//! error, and the slot can never be rebound.

use std::sync::OnceLock;

use natla_core::BackendKind;
use tracing::{error, info};

use crate::backend::NativeBackend;
use crate::config::LoaderConfig;
use crate::factory::{AnyFactory, EngineSet, Factory, Native};
use crate::loader::select_backend;
use crate::probe::{Probe, SystemProbe};
use crate::{Error, Result};

/// Bound engines of one backend selection
#[derive(Debug, Clone)]
pub struct Registry {
    kind: BackendKind,
    engines: Option<EngineSet>,
}

impl Registry {
    /// Registry with no native backend
    pub fn none() -> Self {
        Self {
            kind: BackendKind::None,
            engines: None,
        }
    }

    /// Registry whose six engines are bound to `backend`
    pub fn from_backend(backend: NativeBackend) -> Self {
        let engines = EngineSet::bind(backend);
        Self {
            kind: engines.backend(),
            engines: Some(engines),
        }
    }

    /// Run backend selection for `config` against `probe`
    pub fn load(config: &LoaderConfig, probe: &dyn Probe) -> Result<Self> {
        let requested = config.requested()?;
        let registry = match select_backend(requested, probe)? {
            Some(backend) => Self::from_backend(backend),
            None => Self::none(),
        };
        info!("Engine registry bound to {} backend", registry.kind);
        Ok(registry)
    }

    pub fn backend(&self) -> BackendKind {
        self.kind
    }

    pub fn engines(&self) -> Option<&EngineSet> {
        self.engines.as_ref()
    }

    /// The bound factory for `T`
    pub fn factory<T: Native>(&self) -> Result<&Factory<T>> {
        self.engines
            .as_ref()
            .map(|set| set.get::<T>())
            .ok_or(Error::EngineUnavailable {
                element_type: Some(T::ELEMENT_TYPE),
                backend: self.kind,
            })
    }

    /// Every bound factory, in element type order
    pub fn factories(&self) -> Vec<AnyFactory> {
        self.engines
            .as_ref()
            .map(|set| set.iter().collect())
            .unwrap_or_default()
    }

    /// Enable or disable native multithreading
    pub fn set_threading(&self, enabled: bool) -> Result<()> {
        let engines = self.native_engines()?;
        info!(
            "{} native threading {}",
            self.kind,
            if enabled { "enabled" } else { "disabled" }
        );
        engines.native().set_threading(enabled);
        Ok(())
    }

    /// Whether native multithreading is enabled
    pub fn threading(&self) -> Result<bool> {
        Ok(self.native_engines()?.native().threading())
    }

    fn native_engines(&self) -> Result<&EngineSet> {
        self.engines.as_ref().ok_or(Error::EngineUnavailable {
            element_type: None,
            backend: self.kind,
        })
    }
}

static GLOBAL: OnceLock<std::result::Result<Registry, Error>> = OnceLock::new();

/// Initialize the process-wide registry using the system probe
pub fn init(config: &LoaderConfig) -> Result<&'static Registry> {
    init_with(config, &SystemProbe::new(config))
}

/// Initialize the process-wide registry using `probe`.
///
/// Fails with [`Error::AlreadyInitialized`] once the registry is bound,
/// whether by an earlier call or by lazy initialization.
pub fn init_with(config: &LoaderConfig, probe: &dyn Probe) -> Result<&'static Registry> {
    let mut ran = false;
    let slot = GLOBAL.get_or_init(|| {
        ran = true;
        Registry::load(config, probe).inspect_err(|e| error!("Backend initialization failed: {e}"))
    });

    match (ran, slot) {
        (true, Ok(registry)) => Ok(registry),
        (true, Err(e)) => Err(e.clone()),
        (false, slot) => Err(Error::AlreadyInitialized {
            active: slot.as_ref().map_or(BackendKind::None, Registry::backend),
        }),
    }
}

/// The process-wide registry, initialized from the environment on first use
pub fn registry() -> Result<&'static Registry> {
    let slot = GLOBAL.get_or_init(|| {
        LoaderConfig::from_env()
            .and_then(|config| Registry::load(&config, &SystemProbe::new(&config)))
            .inspect_err(|e| error!("Backend initialization failed: {e}"))
    });
    slot.as_ref().map_err(Error::clone)
}

/// Enable or disable multithreading on the process-wide backend
pub fn set_threading(enabled: bool) -> Result<()> {
    registry()?.set_threading(enabled)
}

/// Whether the process-wide backend runs multithreaded
pub fn threading() -> Result<bool> {
    registry()?.threading()
}
