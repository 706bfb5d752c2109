//! Type dispatch
//!
//! Maps a type descriptor to the registry slot that serves it. Every
//! spelling of one logical type lands on the same factory.

use std::any::TypeId;

use natla_core::ElementType;

use crate::factory::AnyFactory;
use crate::registry::{registry, Registry};
use crate::{Error, Result};

/// Anything that names an element type
pub trait TypeTag {
    fn element_type(&self) -> Result<ElementType>;
}

impl TypeTag for ElementType {
    fn element_type(&self) -> Result<ElementType> {
        Ok(*self)
    }
}

impl TypeTag for &str {
    fn element_type(&self) -> Result<ElementType> {
        ElementType::parse(self).map_err(|_| Error::unsupported_type(*self))
    }
}

impl TypeTag for String {
    fn element_type(&self) -> Result<ElementType> {
        self.as_str().element_type()
    }
}

impl TypeTag for TypeId {
    fn element_type(&self) -> Result<ElementType> {
        ElementType::from_type_id(*self).map_err(|_| Error::unsupported_type(format!("{self:?}")))
    }
}

impl Registry {
    /// The factory bound for `tag`
    pub fn resolve(&self, tag: impl TypeTag) -> Result<AnyFactory> {
        let element_type = tag.element_type()?;
        self.engines()
            .map(|set| set.resolve(element_type))
            .ok_or(Error::EngineUnavailable {
                element_type: Some(element_type),
                backend: self.backend(),
            })
    }
}

/// Resolve `tag` against the process-wide registry
pub fn resolve(tag: impl TypeTag) -> Result<AnyFactory> {
    registry()?.resolve(tag)
}
