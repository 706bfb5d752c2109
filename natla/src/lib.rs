//! natla - native linear algebra backends and typed constructors
//!
//! This library binds one native BLAS distribution per process (Intel MKL,
//! OpenBLAS or Apple Accelerate) and hands out typed engines for building
//! vectors and structured matrices on top of it.
//!
//! ## Architecture
//!
//! natla follows a definition/implementation separation:
//!
//! - **natla-core**: Tags, the structure taxonomy, shape rules and the `Element` trait (no I/O)
//! - **natla**: Backend probing and loading, the engine registry, constructors and mapped vectors
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use natla::native::{dgb, fv};
//! use natla::{fmap, MapMode, MapOptions, Shape};
//!
//! fn example() -> natla::Result<()> {
//!     // The first call picks a backend from NATLA_BACKEND or by probing
//!     println!("backend: {}", natla::registry()?.backend());
//!
//!     let x = fv(vec![1.0, 2.0, 3.0])?;
//!     let band = dgb(Shape::banded(4, 4, 1, 1))?;
//!     println!("{} stored band elements", band.len());
//!
//!     let mapped = fmap("data.f32", MapOptions::new().with_mode(MapMode::ReadOnly))?;
//!     println!("{} mapped, {} heap", mapped.len(), x.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Backend selection**: Auto-probe by platform, or an explicit request that never falls back
//! - **Type dispatch**: Symbolic tags, `ElementType` or `TypeId` resolve to one engine
//! - **Structured constructors**: Twelve matrix kinds for six element types
//! - **Memory-mapped vectors**: Read-write, read-only and copy-on-write file windows

// Re-export core definitions
pub use natla_core::{
    // Tags
    BackendKind, Diag, ElementType, Layout, MapMode, StructureKind, Uplo,
    // Element trait
    Element,
    // Shape rules
    storage_len, validate_shape, Shape, ShapeError, ShapeViolation,
    // Range checks
    MappingWindow, RangeViolation,
};

mod error;

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod factory;
pub mod loader;
pub mod native;
pub mod probe;
pub mod registry;
pub mod structures;
#[cfg(feature = "mmap")]
pub mod mapped;

pub use error::{Error, Result};

pub use backend::{NativeBackend, ThreadingHooks};
pub use config::LoaderConfig;
pub use dispatch::{resolve, TypeTag};
pub use factory::{AnyFactory, EngineSet, Factory, Native};
pub use loader::select_backend;
pub use probe::{BackendStatus, LoadFailure, Probe, ProbeReport, SystemProbe};
pub use registry::{init, init_with, registry, set_threading, threading, Registry};
pub use structures::{Args, Matrix, Options, Source, Vector, VectorArgs};

// Memory mapping features
#[cfg(feature = "mmap")]
pub use mapped::{fmap, map, map_vector, parse_mode, Channel, MapOptions, MappedRegion};
