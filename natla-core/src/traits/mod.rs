//! Abstract interfaces for natla element types

pub mod element;

pub use element::Element;
