//! Element type constraints
//!
//! This module defines the trait that binds a Rust scalar to the
//! [`ElementType`] tag of the engine that stores it.

use crate::tags::ElementType;

/// Trait for types that can be stored in natla vectors and matrices
///
/// All element types must be:
/// - Pod: safe to view through a memory-mapped byte region
/// - Send + Sync: storage is shared with native engines across threads
pub trait Element: bytemuck::Pod + PartialEq + core::fmt::Debug + Send + Sync + 'static {
    /// Tag of the engine responsible for this type
    const ELEMENT_TYPE: ElementType;

    /// Get the natla element type for this scalar
    fn element_type() -> ElementType {
        Self::ELEMENT_TYPE
    }

    /// Get the size in bytes of this element type
    fn size_bytes() -> usize {
        core::mem::size_of::<Self>()
    }

    /// Convert from f64 for generic construction
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_element {
    ($type:ty, $tag:ident) => {
        impl Element for $type {
            const ELEMENT_TYPE: ElementType = ElementType::$tag;

            fn from_f64(value: f64) -> Self {
                value as $type
            }
        }
    };
}

impl_element!(f32, F32);
impl_element!(f64, F64);
impl_element!(i32, I32);
impl_element!(i64, I64);
impl_element!(i16, I16);
impl_element!(i8, I8);
