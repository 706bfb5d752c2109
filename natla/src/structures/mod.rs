//! Vectors, structured matrices and their generic constructors
//!
//! Each constructor takes the factory that will own the result, validates
//! the shape against the structure kind, checks the source length against
//! the kind's storage length and allocates through the factory.
//!
//! | constructor | kind | shape parameters | storage length |
//! |---|---|---|---|
//! | [`ge`] | general | `m`, `n` | `m * n` |
//! | [`tr`], [`sy`] | triangular, symmetric | `n` | `n * n` |
//! | [`gb`] | general banded | `m`, `n`, `kl`, `ku` | `(kl + ku + 1) * n` |
//! | [`tb`], [`sb`] | triangular/symmetric banded | `n`, `k` | `(k + 1) * n` |
//! | [`tp`], [`sp`] | packed triangular/symmetric | `n` | `n * (n + 1) / 2` |
//! | [`gd`] | diagonal | `n` | `n` |
//! | [`gt`], [`dt`] | tridiagonal, diagonally dominant tridiagonal | `n` | `3n - 2` |
//! | [`st`] | symmetric tridiagonal | `n` | `2n - 1` |

mod args;
mod matrix;
mod vector;

pub use args::{Args, Options, Source, VectorArgs};
pub use matrix::Matrix;
pub use vector::Vector;

use natla_core::{storage_len, Element, Shape, StructureKind};
use tracing::trace;

use crate::factory::Factory;
use crate::{Error, Result};

/// Build a heap vector owned by `factory`
pub fn vctr<T: Element>(factory: &Factory<T>, args: impl Into<VectorArgs<T>>) -> Vector<T> {
    let data = match args.into() {
        VectorArgs::Len(len) => factory.zeroed(len),
        VectorArgs::Values(values) => values,
    };
    Vector::from_vec(factory.clone(), data)
}

/// Build a matrix of `kind`
pub fn structure<T: Element>(
    factory: &Factory<T>,
    kind: StructureKind,
    args: impl Into<Args<T>>,
) -> Result<Matrix<T>> {
    let Args {
        shape,
        source,
        options,
    } = args.into();
    let len = storage_len(kind, &shape)?;

    let data = match source {
        Source::Empty => factory.zeroed(len),
        Source::Fill(value) => factory.filled(len, value),
        Source::Values(values) => check_len(values, len)?,
        Source::Matrix(matrix) => {
            check_compatible(&matrix, kind, &shape, &options)?;
            check_len(matrix.into_vec(), len)?
        }
    };

    trace!(
        "Built {kind} matrix of {} with {len} stored elements",
        T::ELEMENT_TYPE
    );
    Ok(Matrix::new(factory.clone(), kind, shape, options, data))
}

/// A matrix source must match the requested kind and shape, and for
/// triangular or symmetric kinds also the stored triangle.
fn check_compatible<T: Element>(
    source: &Matrix<T>,
    kind: StructureKind,
    shape: &Shape,
    options: &Options,
) -> Result<()> {
    if source.kind() != kind {
        return Err(Error::IncompatibleSource {
            expected: kind,
            actual: source.kind(),
        });
    }
    if source.shape() != *shape {
        return Err(Error::SourceShape {
            kind,
            expected: *shape,
            actual: source.shape(),
        });
    }
    let uplo = options.uplo.unwrap_or_default();
    if kind.has_uplo() && source.uplo() != uplo {
        return Err(Error::SourceTriangle {
            kind,
            expected: uplo,
            actual: source.uplo(),
        });
    }
    Ok(())
}

fn check_len<T>(values: Vec<T>, expected: usize) -> Result<Vec<T>> {
    if values.len() != expected {
        return Err(Error::SourceMismatch {
            expected,
            actual: values.len(),
        });
    }
    Ok(values)
}

macro_rules! structure_constructors {
    ($($name:ident => $kind:ident),* $(,)?) => {
        $(
            #[doc = concat!("Build a `", stringify!($name), "` matrix")]
            pub fn $name<T: Element>(
                factory: &Factory<T>,
                args: impl Into<Args<T>>,
            ) -> Result<Matrix<T>> {
                structure(factory, StructureKind::$kind, args)
            }
        )*
    };
}

structure_constructors! {
    ge => Ge,
    tr => Tr,
    sy => Sy,
    gb => Gb,
    tb => Tb,
    sb => Sb,
    tp => Tp,
    sp => Sp,
    gd => Gd,
    gt => Gt,
    dt => Dt,
    st => St,
}
