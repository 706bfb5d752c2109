//! Dense vectors over heap or mapped storage

use std::fmt;

use natla_core::{Element, ElementType, MapMode};

use crate::factory::Factory;
#[cfg(feature = "mmap")]
use crate::mapped::MappedRegion;
use crate::{Error, Result};

enum Storage<T: Element> {
    Heap(Vec<T>),
    #[cfg(feature = "mmap")]
    Mapped(MappedRegion<T>),
}

/// A dense vector.
///
/// Storage is either an ordinary allocation or a memory-mapped file region.
/// Read-only mappings reject every mutation with [`Error::ReadOnly`].
pub struct Vector<T: Element> {
    factory: Factory<T>,
    storage: Storage<T>,
}

impl<T: Element> Vector<T> {
    pub(crate) fn from_vec(factory: Factory<T>, data: Vec<T>) -> Self {
        Self {
            factory,
            storage: Storage::Heap(data),
        }
    }

    #[cfg(feature = "mmap")]
    pub(crate) fn mapped(factory: Factory<T>, region: MappedRegion<T>) -> Self {
        Self {
            factory,
            storage: Storage::Mapped(region),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element_type(&self) -> ElementType {
        T::ELEMENT_TYPE
    }

    pub fn factory(&self) -> &Factory<T> {
        &self.factory
    }

    pub fn is_mapped(&self) -> bool {
        !matches!(self.storage, Storage::Heap(_))
    }

    /// Access mode of the mapping, `None` for heap storage
    pub fn mode(&self) -> Option<MapMode> {
        match &self.storage {
            Storage::Heap(_) => None,
            #[cfg(feature = "mmap")]
            Storage::Mapped(region) => Some(region.mode()),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        match &self.storage {
            Storage::Heap(data) => data.as_slice(),
            #[cfg(feature = "mmap")]
            Storage::Mapped(region) => region.as_slice(),
        }
    }

    /// Mutable view, unless the storage is a read-only mapping
    pub fn try_as_mut_slice(&mut self) -> Result<&mut [T]> {
        match &mut self.storage {
            Storage::Heap(data) => Ok(data.as_mut_slice()),
            #[cfg(feature = "mmap")]
            Storage::Mapped(region) => region.as_mut_slice(),
        }
    }

    pub fn get(&self, index: usize) -> Result<T> {
        let data = self.as_slice();
        data.get(index).copied().ok_or(Error::IndexOutOfBounds {
            index,
            len: data.len(),
        })
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        let data = self.try_as_mut_slice()?;
        let len = data.len();
        let slot = data
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Copy `values` into the vector; lengths must match
    pub fn copy_from_slice(&mut self, values: &[T]) -> Result<()> {
        let data = self.try_as_mut_slice()?;
        if data.len() != values.len() {
            return Err(Error::SourceMismatch {
                expected: data.len(),
                actual: values.len(),
            });
        }
        data.copy_from_slice(values);
        Ok(())
    }

    /// Write a read-write mapping back to its file. No-op otherwise.
    pub fn flush(&self) -> Result<()> {
        match &self.storage {
            Storage::Heap(_) => Ok(()),
            #[cfg(feature = "mmap")]
            Storage::Mapped(region) => region.flush(),
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

impl<T: Element> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Element> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("backend", &self.factory.backend())
            .field("mode", &self.mode())
            .field("data", &self.as_slice())
            .finish()
    }
}
