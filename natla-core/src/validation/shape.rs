//! Shape rules of the structured-matrix taxonomy
//!
//! Each [`StructureKind`] accepts a fixed subset of shape parameters. The
//! functions here check a [`Shape`] against those rules and compute how many
//! elements the kind's storage holds.

use crate::{ShapeError, ShapeViolation, StructureKind};

/// Dimensions and bandwidths of a structure.
///
/// Parameters a kind does not take must stay zero. `Shape::default()` is the
/// empty 0x0 shape accepted by every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    /// Number of rows
    pub m: usize,
    /// Number of columns
    pub n: usize,
    /// Sub-diagonals of a general banded matrix
    pub kl: usize,
    /// Super-diagonals of a general banded matrix
    pub ku: usize,
    /// Off-diagonals of a triangular or symmetric banded matrix
    pub k: usize,
}

impl Shape {
    /// `m x n` shape for general matrices
    pub const fn general(m: usize, n: usize) -> Self {
        Self {
            m,
            n,
            kl: 0,
            ku: 0,
            k: 0,
        }
    }

    /// `n x n` shape for square kinds
    pub const fn square(n: usize) -> Self {
        Self::general(n, n)
    }

    /// `m x n` general banded shape with `kl` sub- and `ku` super-diagonals
    pub const fn banded(m: usize, n: usize, kl: usize, ku: usize) -> Self {
        Self {
            m,
            n,
            kl,
            ku,
            k: 0,
        }
    }

    /// `n x n` triangular/symmetric banded shape with `k` off-diagonals
    pub const fn band(n: usize, k: usize) -> Self {
        Self {
            m: n,
            n,
            kl: 0,
            ku: 0,
            k,
        }
    }
}

fn violation(kind: StructureKind, violation: ShapeViolation) -> ShapeError {
    ShapeError { kind, violation }
}

fn check_unset(kind: StructureKind, param: &'static str, value: usize) -> Result<(), ShapeError> {
    if value != 0 {
        return Err(violation(kind, ShapeViolation::UnexpectedParameter(param)));
    }
    Ok(())
}

fn check_bandwidth(
    kind: StructureKind,
    param: &'static str,
    value: usize,
    dimension: usize,
) -> Result<(), ShapeError> {
    let ok = if dimension == 0 { value == 0 } else { value < dimension };
    if !ok {
        return Err(violation(
            kind,
            ShapeViolation::Bandwidth {
                param,
                value,
                dimension,
            },
        ));
    }
    Ok(())
}

/// Check that `shape` is consistent with `kind`
pub fn validate_shape(kind: StructureKind, shape: &Shape) -> Result<(), ShapeError> {
    if kind.is_square() && shape.m != shape.n {
        return Err(violation(
            kind,
            ShapeViolation::NotSquare {
                m: shape.m,
                n: shape.n,
            },
        ));
    }

    match kind {
        StructureKind::Gb => {
            check_unset(kind, "k", shape.k)?;
            check_bandwidth(kind, "kl", shape.kl, shape.m)?;
            check_bandwidth(kind, "ku", shape.ku, shape.n)
        }
        StructureKind::Tb | StructureKind::Sb => {
            check_unset(kind, "kl", shape.kl)?;
            check_unset(kind, "ku", shape.ku)?;
            check_bandwidth(kind, "k", shape.k, shape.n)
        }
        _ => {
            check_unset(kind, "kl", shape.kl)?;
            check_unset(kind, "ku", shape.ku)?;
            check_unset(kind, "k", shape.k)
        }
    }
}

/// Number of elements the storage of `kind` holds for `shape`.
///
/// Validates the shape first.
pub fn storage_len(kind: StructureKind, shape: &Shape) -> Result<usize, ShapeError> {
    validate_shape(kind, shape)?;

    let overflow = || violation(kind, ShapeViolation::Overflow);
    let n = shape.n;
    let len = match kind {
        StructureKind::Ge | StructureKind::Tr | StructureKind::Sy => shape.m.checked_mul(n),
        StructureKind::Gb => shape
            .kl
            .checked_add(shape.ku)
            .and_then(|b| b.checked_add(1))
            .and_then(|rows| if n == 0 { Some(0) } else { rows.checked_mul(n) }),
        StructureKind::Tb | StructureKind::Sb => {
            shape.k.checked_add(1).and_then(|rows| rows.checked_mul(n))
        }
        StructureKind::Tp | StructureKind::Sp => {
            n.checked_add(1).and_then(|n1| n1.checked_mul(n)).map(|v| v / 2)
        }
        StructureKind::Gd => Some(n),
        StructureKind::Gt | StructureKind::Dt => {
            if n == 0 {
                Some(0)
            } else {
                n.checked_mul(3).map(|v| v - 2)
            }
        }
        StructureKind::St => {
            if n == 0 {
                Some(0)
            } else {
                n.checked_mul(2).map(|v| v - 1)
            }
        }
    };
    len.ok_or_else(overflow)
}
