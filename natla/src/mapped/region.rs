//! Owned memory-mapped regions

use std::fs::File;
use std::marker::PhantomData;

use memmap2::{Mmap, MmapMut, MmapOptions};
use natla_core::{Element, MapMode, MappingWindow, RangeViolation};

use crate::{Error, Result};

enum Map {
    Shared(MmapMut),
    ReadOnly(Mmap),
    Private(MmapMut),
}

/// A typed window of a file mapped into memory.
///
/// Owns the mapping and, when the region was built from a path or an owned
/// descriptor, the file. The mapping is dropped before the file.
pub struct MappedRegion<T: Element> {
    map: Map,
    mode: MapMode,
    window: MappingWindow,
    file: Option<File>,
    _marker: PhantomData<T>,
}

impl<T: Element> MappedRegion<T> {
    /// Map `window` of `file` in `mode`. The region does not keep `file`.
    pub(crate) fn new(file: &File, window: MappingWindow, mode: MapMode) -> Result<Self> {
        let mut options = MmapOptions::new();
        options.offset(window.offset).len(window.byte_len);

        // SAFETY: the window was checked against the file length. Callers
        // must not truncate the file while the region is alive.
        let map = unsafe {
            match mode {
                MapMode::ReadWrite => options.map_mut(file).map(Map::Shared),
                MapMode::ReadOnly => options.map(file).map(Map::ReadOnly),
                MapMode::Private => options.map_copy(file).map(Map::Private),
            }
        }
        .map_err(|e| Error::channel("mapping the file", e))?;

        let region = Self {
            map,
            mode,
            window,
            file: None,
            _marker: PhantomData,
        };

        // Page-aligned base plus an element-aligned offset keeps the view aligned
        if bytemuck::try_cast_slice::<u8, T>(region.bytes()).is_err() {
            return Err(Error::MappingRange {
                offset: window.offset,
                length: Some(window.len),
                available: window.offset + window.byte_len as u64,
                violation: RangeViolation::Misaligned,
            });
        }
        Ok(region)
    }

    /// Take ownership of the file backing this region
    pub(crate) fn keep(mut self, file: File) -> Self {
        self.file = Some(file);
        self
    }

    fn bytes(&self) -> &[u8] {
        match &self.map {
            Map::Shared(map) | Map::Private(map) => &map[..],
            Map::ReadOnly(map) => &map[..],
        }
    }

    pub fn as_slice(&self) -> &[T] {
        bytemuck::cast_slice(self.bytes())
    }

    pub fn as_mut_slice(&mut self) -> Result<&mut [T]> {
        match &mut self.map {
            Map::Shared(map) | Map::Private(map) => Ok(bytemuck::cast_slice_mut(&mut map[..])),
            Map::ReadOnly(_) => Err(Error::ReadOnly),
        }
    }

    /// Sync a shared mapping to disk. Private and read-only regions have
    /// nothing to write back.
    pub fn flush(&self) -> Result<()> {
        match &self.map {
            Map::Shared(map) => map
                .flush()
                .map_err(|e| Error::channel("flushing the mapping", e)),
            Map::ReadOnly(_) | Map::Private(_) => Ok(()),
        }
    }

    pub fn mode(&self) -> MapMode {
        self.mode
    }

    /// Byte offset of the region in its file
    pub fn offset(&self) -> u64 {
        self.window.offset
    }

    pub fn len(&self) -> usize {
        self.window.len
    }

    pub fn is_empty(&self) -> bool {
        self.window.len == 0
    }

    /// Whether the region owns its file
    pub fn owns_file(&self) -> bool {
        self.file.is_some()
    }
}
