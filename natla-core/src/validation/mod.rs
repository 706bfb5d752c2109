//! Shape and range validation
//!
//! Pure functions with no I/O: the structure layer and the mapped-vector
//! path both call into here before touching memory.

pub mod bounds;
pub mod shape;

pub use bounds::{mapping_window, MappingWindow};
pub use shape::{storage_len, validate_shape, Shape};
