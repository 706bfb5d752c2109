//! Byte-range validation for memory-mapped windows

use crate::RangeViolation;

/// A validated window into a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingWindow {
    /// Starting byte offset
    pub offset: u64,
    /// Number of elements in the window
    pub len: usize,
    /// Number of bytes in the window
    pub byte_len: usize,
}

/// Compute the window for `length` elements of `element_size` bytes starting
/// at `offset`, inside a channel of `available` bytes.
///
/// With no `length`, the window covers every whole element left after
/// `offset`.
pub fn mapping_window(
    offset: u64,
    length: Option<usize>,
    element_size: usize,
    available: u64,
) -> Result<MappingWindow, RangeViolation> {
    let element_size_u64 = element_size as u64;
    if element_size == 0 || offset % element_size_u64 != 0 {
        return Err(RangeViolation::Misaligned);
    }
    if offset > available {
        return Err(RangeViolation::OffsetPastEnd);
    }

    let remaining = available - offset;
    let len = match length {
        Some(len) => {
            let bytes = (len as u64)
                .checked_mul(element_size_u64)
                .ok_or(RangeViolation::Overflow)?;
            if bytes > remaining {
                return Err(RangeViolation::LengthPastEnd);
            }
            len
        }
        None => usize::try_from(remaining / element_size_u64)
            .map_err(|_| RangeViolation::Overflow)?,
    };

    if len == 0 {
        return Err(RangeViolation::Empty);
    }

    let byte_len = len
        .checked_mul(element_size)
        .ok_or(RangeViolation::Overflow)?;

    Ok(MappingWindow {
        offset,
        len,
        byte_len,
    })
}
