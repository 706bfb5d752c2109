//! Symbolic tags shared by loader, dispatcher and constructors
//!
//! Every tag parses from a fixed set of spellings and never falls back to a
//! default on unknown input.

pub mod backend;
pub mod element;
pub mod options;
pub mod structure;

pub use backend::BackendKind;
pub use element::ElementType;
pub use options::{Diag, Layout, MapMode, Uplo};
pub use structure::StructureKind;

/// Look up `tag` in an alias table, ignoring ASCII case
pub(crate) fn lookup<T: Copy>(table: &[(&str, T)], tag: &str) -> Option<T> {
    let tag = tag.trim();
    table
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(tag))
        .map(|(_, value)| *value)
}
