#![no_std]

//! natla core - element, backend and structure tags for native linear algebra
//!
//! This crate provides the pure definitions shared by every natla backend:
//! the element-type and backend tags, the structured-matrix taxonomy, the
//! shape rules each structure obeys, and the [`Element`] trait that binds a
//! Rust scalar to its tag. Nothing here performs I/O or touches a native
//! library.

pub mod error;
pub mod tags;
pub mod traits;
pub mod validation;

pub use error::*;
pub use tags::*;
pub use traits::*;
pub use validation::{mapping_window, storage_len, validate_shape, MappingWindow, Shape};
