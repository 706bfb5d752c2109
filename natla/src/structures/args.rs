//! Constructor argument records
//!
//! Every matrix constructor takes one [`Args`] value instead of a family of
//! overloads. Missing pieces default to the empty shape, no source data and
//! no options. Vector constructors take a [`VectorArgs`].

use natla_core::{Diag, Element, Layout, Shape, Uplo};

use crate::structures::Matrix;
use crate::{Error, Result};

/// Initial contents of a new matrix
#[derive(Debug, Clone, PartialEq)]
pub enum Source<T: Element> {
    /// Zero-filled storage
    Empty,
    /// Values in storage order; the count must match the storage length
    Values(Vec<T>),
    /// Every stored element set to one value
    Fill(T),
    /// Copy of another matrix of the same kind and storage length
    Matrix(Matrix<T>),
}

impl<T: Element> Default for Source<T> {
    fn default() -> Self {
        Source::Empty
    }
}

impl<T: Element> From<Vec<T>> for Source<T> {
    fn from(values: Vec<T>) -> Self {
        Source::Values(values)
    }
}

impl<T: Element> From<&[T]> for Source<T> {
    fn from(values: &[T]) -> Self {
        Source::Values(values.to_vec())
    }
}

impl<T: Element> From<Matrix<T>> for Source<T> {
    fn from(matrix: Matrix<T>) -> Self {
        Source::Matrix(matrix)
    }
}

/// Layout and triangle flags. Unset fields take the constructor defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Options {
    pub layout: Option<Layout>,
    pub uplo: Option<Uplo>,
    pub diag: Option<Diag>,
}

impl Options {
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_uplo(mut self, uplo: Uplo) -> Self {
        self.uplo = Some(uplo);
        self
    }

    pub fn with_diag(mut self, diag: Diag) -> Self {
        self.diag = Some(diag);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Parse `key = value` string pairs.
    ///
    /// Keys are `layout`, `uplo` and `diag`. Later pairs override earlier
    /// ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let invalid = || Error::InvalidOption {
                key: key.to_string(),
                value: value.to_string(),
            };
            match key.trim().to_ascii_lowercase().as_str() {
                "layout" | "order" => {
                    options.layout = Some(Layout::parse(value).map_err(|_| invalid())?)
                }
                "uplo" => options.uplo = Some(Uplo::parse(value).map_err(|_| invalid())?),
                "diag" => options.diag = Some(Diag::parse(value).map_err(|_| invalid())?),
                _ => return Err(invalid()),
            }
        }
        Ok(options)
    }
}

/// Arguments of a matrix constructor
#[derive(Debug, Clone, PartialEq)]
pub struct Args<T: Element> {
    pub shape: Shape,
    pub source: Source<T>,
    pub options: Options,
}

impl<T: Element> Args<T> {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            source: Source::Empty,
            options: Options::default(),
        }
    }

    pub fn with_source(mut self, source: impl Into<Source<T>>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_fill(mut self, value: T) -> Self {
        self.source = Source::Fill(value);
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

impl<T: Element> Default for Args<T> {
    fn default() -> Self {
        Self::new(Shape::default())
    }
}

impl<T: Element> From<()> for Args<T> {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl<T: Element> From<Shape> for Args<T> {
    fn from(shape: Shape) -> Self {
        Self::new(shape)
    }
}

impl<T: Element> From<(Shape, Vec<T>)> for Args<T> {
    fn from((shape, values): (Shape, Vec<T>)) -> Self {
        Self::new(shape).with_source(values)
    }
}

impl<T: Element> From<(Shape, Vec<T>, Options)> for Args<T> {
    fn from((shape, values, options): (Shape, Vec<T>, Options)) -> Self {
        Self::new(shape).with_source(values).with_options(options)
    }
}

/// Arguments of a vector constructor
#[derive(Debug, Clone, PartialEq)]
pub enum VectorArgs<T: Element> {
    /// Zero-filled vector of this length
    Len(usize),
    /// Vector holding these values
    Values(Vec<T>),
}

impl<T: Element> From<usize> for VectorArgs<T> {
    fn from(len: usize) -> Self {
        VectorArgs::Len(len)
    }
}

impl<T: Element> From<Vec<T>> for VectorArgs<T> {
    fn from(values: Vec<T>) -> Self {
        VectorArgs::Values(values)
    }
}

impl<T: Element> From<&[T]> for VectorArgs<T> {
    fn from(values: &[T]) -> Self {
        VectorArgs::Values(values.to_vec())
    }
}

impl<T: Element, const N: usize> From<[T; N]> for VectorArgs<T> {
    fn from(values: [T; N]) -> Self {
        VectorArgs::Values(values.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::<f64>::default();
        assert_eq!(args.shape, Shape::default());
        assert_eq!(args.source, Source::Empty);
        assert!(args.options.is_empty());
        assert_eq!(Args::<f64>::from(()), args);
    }

    #[test]
    fn test_args_from_tuples() {
        let options = Options::default().with_uplo(Uplo::Upper);
        let args = Args::from((Shape::square(2), vec![1i32, 2, 3, 4], options));
        assert_eq!(args.shape, Shape::square(2));
        assert_eq!(args.source, Source::Values(vec![1, 2, 3, 4]));
        assert_eq!(args.options.uplo, Some(Uplo::Upper));
    }

    #[test]
    fn test_options_from_pairs() {
        let options =
            Options::from_pairs([("layout", "row"), ("uplo", "upper"), ("diag", "unit")]).unwrap();
        assert_eq!(options.layout, Some(Layout::Row));
        assert_eq!(options.uplo, Some(Uplo::Upper));
        assert_eq!(options.diag, Some(Diag::Unit));

        let options = Options::from_pairs([("uplo", "upper"), ("UPLO", "lower")]).unwrap();
        assert_eq!(options.uplo, Some(Uplo::Lower));
        assert_eq!(options.layout, None);
    }

    #[test]
    fn test_options_from_pairs_rejects_unknown() {
        match Options::from_pairs([("pivot", "yes")]) {
            Err(Error::InvalidOption { key, value }) => {
                assert_eq!(key, "pivot");
                assert_eq!(value, "yes");
            }
            other => panic!("expected InvalidOption, got {other:?}"),
        }
        assert!(matches!(
            Options::from_pairs([("diag", "sometimes")]),
            Err(Error::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_vector_args() {
        assert_eq!(VectorArgs::<f32>::from(3usize), VectorArgs::Len(3));
        assert_eq!(
            VectorArgs::from([1i16, 2]),
            VectorArgs::Values(vec![1i16, 2])
        );
        assert_eq!(
            VectorArgs::from(&[5i8][..]),
            VectorArgs::Values(vec![5i8])
        );
    }
}
