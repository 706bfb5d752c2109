//! Structured matrices

use std::fmt;

use natla_core::{Diag, Element, ElementType, Layout, Shape, StructureKind, Uplo};

use crate::factory::Factory;
use crate::structures::Options;
use crate::{Error, Result};

/// A matrix of one [`StructureKind`], stored in the kind's native layout.
///
/// Holds the factory that built it; later registry changes do not affect an
/// existing matrix.
#[derive(Clone)]
pub struct Matrix<T: Element> {
    factory: Factory<T>,
    kind: StructureKind,
    shape: Shape,
    options: Options,
    data: Vec<T>,
}

impl<T: Element> Matrix<T> {
    pub(crate) fn new(
        factory: Factory<T>,
        kind: StructureKind,
        shape: Shape,
        options: Options,
        data: Vec<T>,
    ) -> Self {
        Self {
            factory,
            kind,
            shape,
            options,
            data,
        }
    }

    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.m
    }

    pub fn cols(&self) -> usize {
        self.shape.n
    }

    /// Options exactly as passed to the constructor
    pub fn options(&self) -> Options {
        self.options
    }

    pub fn layout(&self) -> Layout {
        self.options.layout.unwrap_or_default()
    }

    pub fn uplo(&self) -> Uplo {
        self.options.uplo.unwrap_or_default()
    }

    pub fn diag(&self) -> Diag {
        self.options.diag.unwrap_or_default()
    }

    pub fn element_type(&self) -> ElementType {
        T::ELEMENT_TYPE
    }

    pub fn factory(&self) -> &Factory<T> {
        &self.factory
    }

    /// Number of stored elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Storage in the kind's native order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Stored element at `index`
    pub fn get(&self, index: usize) -> Result<T> {
        self.data
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                index,
                len: self.data.len(),
            })
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Element> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.shape == other.shape
            && self.options == other.options
            && self.data == other.data
    }
}

impl<T: Element> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("kind", &self.kind)
            .field("shape", &self.shape)
            .field("options", &self.options)
            .field("backend", &self.factory.backend())
            .field("data", &self.data)
            .finish()
    }
}
