//! Typed engine factories
//!
//! A [`Factory<T>`] is the engine for one element type. All six factories of
//! an [`EngineSet`] share one [`NativeBackend`], so a set can never mix
//! backends. [`AnyFactory`] is the dynamically typed form handed out by the
//! type dispatcher.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use natla_core::{BackendKind, Element, ElementType};

use crate::backend::NativeBackend;

/// Engine for element type `T`
pub struct Factory<T: Element> {
    backend: Arc<NativeBackend>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Element> Factory<T> {
    pub(crate) fn new(backend: Arc<NativeBackend>) -> Self {
        Self {
            backend,
            _marker: PhantomData,
        }
    }

    pub fn element_type(&self) -> ElementType {
        T::ELEMENT_TYPE
    }

    pub fn backend(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn native(&self) -> &NativeBackend {
        &self.backend
    }

    /// Zero-filled storage of `len` elements
    pub fn zeroed(&self, len: usize) -> Vec<T> {
        vec![<T as bytemuck::Zeroable>::zeroed(); len]
    }

    /// Storage of `len` copies of `value`
    pub fn filled(&self, len: usize, value: T) -> Vec<T> {
        vec![value; len]
    }

    pub fn set_threading(&self, enabled: bool) {
        self.backend.set_threading(enabled)
    }

    pub fn threading(&self) -> bool {
        self.backend.threading()
    }
}

impl<T: Element> Clone for Factory<T> {
    fn clone(&self) -> Self {
        Self::new(self.backend.clone())
    }
}

impl<T: Element> PartialEq for Factory<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.backend, &other.backend)
    }
}

impl<T: Element> fmt::Debug for Factory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("element_type", &T::ELEMENT_TYPE)
            .field("backend", &self.backend.kind())
            .finish()
    }
}

/// Element types that have a slot in the engine registry
pub trait Native: Element {
    /// This type's factory within `engines`
    fn slot(engines: &EngineSet) -> &Factory<Self>;

    fn into_any(factory: Factory<Self>) -> AnyFactory;

    fn from_any(factory: AnyFactory) -> Option<Factory<Self>>;
}

/// The six engines bound from one backend
#[derive(Clone, Debug)]
pub struct EngineSet {
    float: Factory<f32>,
    double: Factory<f64>,
    int: Factory<i32>,
    long: Factory<i64>,
    short: Factory<i16>,
    byte: Factory<i8>,
}

impl EngineSet {
    /// Bind every slot to `backend`
    pub fn bind(backend: NativeBackend) -> Self {
        let backend = Arc::new(backend);
        Self {
            float: Factory::new(backend.clone()),
            double: Factory::new(backend.clone()),
            int: Factory::new(backend.clone()),
            long: Factory::new(backend.clone()),
            short: Factory::new(backend.clone()),
            byte: Factory::new(backend),
        }
    }

    pub fn backend(&self) -> BackendKind {
        self.float.backend()
    }

    pub fn native(&self) -> &NativeBackend {
        self.float.native()
    }

    pub fn get<T: Native>(&self) -> &Factory<T> {
        T::slot(self)
    }

    /// The factory for a runtime element type
    pub fn resolve(&self, element_type: ElementType) -> AnyFactory {
        match element_type {
            ElementType::F32 => AnyFactory::F32(self.float.clone()),
            ElementType::F64 => AnyFactory::F64(self.double.clone()),
            ElementType::I32 => AnyFactory::I32(self.int.clone()),
            ElementType::I64 => AnyFactory::I64(self.long.clone()),
            ElementType::I16 => AnyFactory::I16(self.short.clone()),
            ElementType::I8 => AnyFactory::I8(self.byte.clone()),
        }
    }

    /// All six factories in slot order
    pub fn iter(&self) -> impl Iterator<Item = AnyFactory> + '_ {
        ElementType::ALL.into_iter().map(|ty| self.resolve(ty))
    }
}

/// Factory for a runtime-chosen element type
#[derive(Clone, Debug, PartialEq)]
pub enum AnyFactory {
    F32(Factory<f32>),
    F64(Factory<f64>),
    I32(Factory<i32>),
    I64(Factory<i64>),
    I16(Factory<i16>),
    I8(Factory<i8>),
}

impl AnyFactory {
    pub fn element_type(&self) -> ElementType {
        match self {
            AnyFactory::F32(f) => f.element_type(),
            AnyFactory::F64(f) => f.element_type(),
            AnyFactory::I32(f) => f.element_type(),
            AnyFactory::I64(f) => f.element_type(),
            AnyFactory::I16(f) => f.element_type(),
            AnyFactory::I8(f) => f.element_type(),
        }
    }

    pub fn native(&self) -> &NativeBackend {
        match self {
            AnyFactory::F32(f) => f.native(),
            AnyFactory::F64(f) => f.native(),
            AnyFactory::I32(f) => f.native(),
            AnyFactory::I64(f) => f.native(),
            AnyFactory::I16(f) => f.native(),
            AnyFactory::I8(f) => f.native(),
        }
    }

    pub fn backend(&self) -> BackendKind {
        self.native().kind()
    }

    /// The typed factory, if this is the engine for `T`
    pub fn downcast<T: Native>(self) -> Option<Factory<T>> {
        T::from_any(self)
    }

    pub fn set_threading(&self, enabled: bool) {
        self.native().set_threading(enabled)
    }

    pub fn threading(&self) -> bool {
        self.native().threading()
    }
}

macro_rules! impl_native {
    ($type:ty, $field:ident, $variant:ident) => {
        impl Native for $type {
            fn slot(engines: &EngineSet) -> &Factory<Self> {
                &engines.$field
            }

            fn into_any(factory: Factory<Self>) -> AnyFactory {
                AnyFactory::$variant(factory)
            }

            fn from_any(factory: AnyFactory) -> Option<Factory<Self>> {
                match factory {
                    AnyFactory::$variant(f) => Some(f),
                    _ => None,
                }
            }
        }
    };
}

impl_native!(f32, float, F32);
impl_native!(f64, double, F64);
impl_native!(i32, int, I32);
impl_native!(i64, long, I64);
impl_native!(i16, short, I16);
impl_native!(i8, byte, I8);
