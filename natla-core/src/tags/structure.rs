//! The structured-matrix taxonomy

/// Storage shape of a matrix.
///
/// Shape parameters taken by each kind:
///
/// | kind | parameters |
/// |------|------------|
/// | `Ge` | `m`, `n` |
/// | `Gb` | `m`, `n`, `kl`, `ku` |
/// | `Tb`, `Sb` | `n`, `k` |
/// | everything else | `n` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StructureKind {
    /// General dense
    Ge,
    /// Triangular, full storage
    Tr,
    /// Symmetric, full storage
    Sy,
    /// General banded
    Gb,
    /// Triangular banded
    Tb,
    /// Symmetric banded
    Sb,
    /// Triangular packed
    Tp,
    /// Symmetric packed
    Sp,
    /// Diagonal
    Gd,
    /// Tridiagonal
    Gt,
    /// Diagonally dominant tridiagonal
    Dt,
    /// Symmetric positive definite tridiagonal
    St,
}

impl StructureKind {
    pub const ALL: [StructureKind; 12] = [
        StructureKind::Ge,
        StructureKind::Tr,
        StructureKind::Sy,
        StructureKind::Gb,
        StructureKind::Tb,
        StructureKind::Sb,
        StructureKind::Tp,
        StructureKind::Sp,
        StructureKind::Gd,
        StructureKind::Gt,
        StructureKind::Dt,
        StructureKind::St,
    ];

    /// Two-letter constructor suffix
    pub const fn name(&self) -> &'static str {
        match self {
            StructureKind::Ge => "ge",
            StructureKind::Tr => "tr",
            StructureKind::Sy => "sy",
            StructureKind::Gb => "gb",
            StructureKind::Tb => "tb",
            StructureKind::Sb => "sb",
            StructureKind::Tp => "tp",
            StructureKind::Sp => "sp",
            StructureKind::Gd => "gd",
            StructureKind::Gt => "gt",
            StructureKind::Dt => "dt",
            StructureKind::St => "st",
        }
    }

    /// Kinds addressed by a single dimension `n`
    pub const fn is_square(&self) -> bool {
        !matches!(self, StructureKind::Ge | StructureKind::Gb)
    }

    pub const fn is_banded(&self) -> bool {
        matches!(self, StructureKind::Gb | StructureKind::Tb | StructureKind::Sb)
    }

    pub const fn is_packed(&self) -> bool {
        matches!(self, StructureKind::Tp | StructureKind::Sp)
    }

    /// Kinds whose storage depends on the `uplo` option
    pub const fn has_uplo(&self) -> bool {
        matches!(
            self,
            StructureKind::Tr
                | StructureKind::Sy
                | StructureKind::Tb
                | StructureKind::Sb
                | StructureKind::Tp
                | StructureKind::Sp
        )
    }
}

impl core::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}
