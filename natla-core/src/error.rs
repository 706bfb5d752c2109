//! Error types for tag parsing and shape checks

use crate::tags::StructureKind;

/// Errors raised by the pure parsing and validation functions of this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// Element type tag not in the supported set
    UnknownElementType,
    /// Backend symbol not in the accepted set
    UnknownBackend,
    /// Mapping mode flag not recognized
    UnknownMode,
    /// Option value not recognized
    UnknownOption,
    /// Shape parameters inconsistent with the structure kind
    Shape(ShapeError),
}

impl core::fmt::Display for CoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoreError::UnknownElementType => write!(f, "Unknown element type"),
            CoreError::UnknownBackend => write!(f, "Unknown backend"),
            CoreError::UnknownMode => write!(f, "Unknown mapping mode"),
            CoreError::UnknownOption => write!(f, "Unknown option value"),
            CoreError::Shape(e) => write!(f, "{e}"),
        }
    }
}

impl From<ShapeError> for CoreError {
    fn from(e: ShapeError) -> Self {
        CoreError::Shape(e)
    }
}

/// Shape violation detected for a particular structure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeError {
    /// Structure whose rules were violated
    pub kind: StructureKind,
    /// What exactly was wrong
    pub violation: ShapeViolation,
}

/// The individual shape rules a structure can break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeViolation {
    /// Square kinds need `m == n`
    NotSquare { m: usize, n: usize },
    /// The kind does not take this parameter, but it was set
    UnexpectedParameter(&'static str),
    /// A bandwidth must lie in `[0, dimension)`, or be zero for an empty dimension
    Bandwidth {
        param: &'static str,
        value: usize,
        dimension: usize,
    },
    /// Storage size does not fit in `usize`
    Overflow,
}

impl core::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.violation {
            ShapeViolation::NotSquare { m, n } => {
                write!(f, "{} requires a square shape, got {m}x{n}", self.kind)
            }
            ShapeViolation::UnexpectedParameter(param) => {
                write!(f, "{} does not take parameter `{param}`", self.kind)
            }
            ShapeViolation::Bandwidth {
                param,
                value,
                dimension,
            } => write!(
                f,
                "{}: bandwidth {param}={value} outside [0, {dimension})",
                self.kind
            ),
            ShapeViolation::Overflow => write!(f, "{}: storage size overflows usize", self.kind),
        }
    }
}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, CoreError>;

/// Ways a mapping window can fall outside its channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeViolation {
    /// Offset lies beyond the end of the channel
    OffsetPastEnd,
    /// Offset plus requested length lies beyond the end of the channel
    LengthPastEnd,
    /// Offset is not a multiple of the element size
    Misaligned,
    /// Window holds no elements
    Empty,
    /// Byte arithmetic overflowed
    Overflow,
}

impl core::fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            RangeViolation::OffsetPastEnd => "offset past end of channel",
            RangeViolation::LengthPastEnd => "offset plus length past end of channel",
            RangeViolation::Misaligned => "offset not aligned to element size",
            RangeViolation::Empty => "empty mapping region",
            RangeViolation::Overflow => "byte range overflows",
        };
        write!(f, "{msg}")
    }
}
