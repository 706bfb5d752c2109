//! Memory-mapped vectors
//!
//! [`map_vector`] turns a window of a file into a [`Vector`] whose storage is
//! the mapping itself. The file can be named by path, handed over as an
//! owned [`File`], or lent as `&File`:
//!
//! | channel | opened by | kept by the vector |
//! |---|---|---|
//! | [`Channel::Path`] | natla | yes |
//! | [`Channel::File`] | caller | yes |
//! | [`Channel::Borrowed`] | caller | no, the mapping outlives it |
//!
//! On any failure no vector is created and a file natla opened is closed
//! again.

mod region;

pub use region::MappedRegion;

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use natla_core::{mapping_window, Element, MapMode};
use tracing::debug;

use crate::factory::{Factory, Native};
use crate::registry::registry;
use crate::structures::Vector;
use crate::{Error, Result};

/// Where the mapped bytes come from
#[derive(Debug)]
pub enum Channel<'a> {
    /// Opened read-write for [`MapMode::ReadWrite`], read-only otherwise
    Path(PathBuf),
    /// Owned descriptor, closed with the vector
    File(File),
    /// Descriptor that stays with the caller
    Borrowed(&'a File),
}

impl From<PathBuf> for Channel<'_> {
    fn from(path: PathBuf) -> Self {
        Channel::Path(path)
    }
}

impl From<&Path> for Channel<'_> {
    fn from(path: &Path) -> Self {
        Channel::Path(path.to_path_buf())
    }
}

impl From<&str> for Channel<'_> {
    fn from(path: &str) -> Self {
        Channel::Path(PathBuf::from(path))
    }
}

impl From<File> for Channel<'_> {
    fn from(file: File) -> Self {
        Channel::File(file)
    }
}

impl<'a> From<&'a File> for Channel<'a> {
    fn from(file: &'a File) -> Self {
        Channel::Borrowed(file)
    }
}

/// Which part of the channel to map, and how
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapOptions {
    /// Number of elements; `None` maps every whole element after `offset`
    pub length: Option<usize>,
    pub mode: MapMode,
    /// Byte offset, a multiple of the element size
    pub offset: u64,
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_mode(mut self, mode: MapMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }
}

/// Parse a mapping mode flag
pub fn parse_mode(flag: &str) -> Result<MapMode> {
    MapMode::parse(flag).map_err(|_| Error::InvalidMode(flag.to_string()))
}

/// Map a window of `channel` as a vector owned by `factory`
pub fn map_vector<'a, T: Element>(
    factory: &Factory<T>,
    channel: impl Into<Channel<'a>>,
    options: MapOptions,
) -> Result<Vector<T>> {
    let region = match channel.into() {
        Channel::Path(path) => {
            let file = open(&path, options.mode)?;
            map_region::<T>(&file, &options)?.keep(file)
        }
        Channel::File(file) => map_region::<T>(&file, &options)?.keep(file),
        Channel::Borrowed(file) => map_region::<T>(file, &options)?,
    };

    debug!(
        "Mapped {} {} elements at offset {} ({})",
        region.len(),
        T::ELEMENT_TYPE,
        region.offset(),
        region.mode()
    );
    Ok(Vector::mapped(factory.clone(), region))
}

/// Map a window of `channel` using the process-wide engine for `T`
pub fn map<'a, T: Native>(channel: impl Into<Channel<'a>>, options: MapOptions) -> Result<Vector<T>> {
    map_vector(registry()?.factory::<T>()?, channel, options)
}

/// Map a window of `channel` as `f32`, the default element type
pub fn fmap<'a>(channel: impl Into<Channel<'a>>, options: MapOptions) -> Result<Vector<f32>> {
    map::<f32>(channel, options)
}

fn open(path: &Path, mode: MapMode) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(mode == MapMode::ReadWrite)
        .open(path)
        .map_err(|e| Error::channel("opening the file", e))
}

fn map_region<T: Element>(file: &File, options: &MapOptions) -> Result<MappedRegion<T>> {
    let available = file
        .metadata()
        .map_err(|e| Error::channel("reading file metadata", e))?
        .len();
    let window = mapping_window(options.offset, options.length, T::size_bytes(), available)
        .map_err(|violation| Error::MappingRange {
            offset: options.offset,
            length: options.length,
            available,
            violation,
        })?;
    MappedRegion::new(file, window, options.mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{NativeBackend, ThreadingHooks};
    use crate::factory::EngineSet;
    use natla_core::{BackendKind, RangeViolation};
    use std::io::Write;

    fn engines() -> EngineSet {
        EngineSet::bind(NativeBackend::new(
            BackendKind::Mkl,
            "test",
            ThreadingHooks::in_memory(false),
        ))
    }

    fn file_with(values: &[i32]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytemuck::cast_slice(values)).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("rw").unwrap(), MapMode::ReadWrite);
        assert_eq!(parse_mode("READ").unwrap(), MapMode::ReadOnly);
        assert_eq!(parse_mode("copy-on-write").unwrap(), MapMode::Private);
        assert!(matches!(parse_mode("append"), Err(Error::InvalidMode(flag)) if flag == "append"));
    }

    #[test]
    fn test_map_whole_file_by_path() {
        let set = engines();
        let file = file_with(&[1, 2, 3, 4]);
        let v = map_vector(
            set.get::<i32>(),
            file.path(),
            MapOptions::new().with_mode(MapMode::ReadOnly),
        )
        .unwrap();
        assert_eq!(v.as_slice(), &[1, 2, 3, 4]);
        assert!(v.is_mapped());
        assert_eq!(v.mode(), Some(MapMode::ReadOnly));
    }

    #[test]
    fn test_offset_and_length() {
        let set = engines();
        let file = file_with(&[10, 20, 30, 40, 50]);
        let v = map_vector(
            set.get::<i32>(),
            file.as_file(),
            MapOptions::new()
                .with_mode(MapMode::ReadOnly)
                .with_offset(4)
                .with_length(3),
        )
        .unwrap();
        assert_eq!(v.to_vec(), vec![20, 30, 40]);
    }

    #[test]
    fn test_read_only_rejects_mutation() {
        let set = engines();
        let file = file_with(&[1, 2]);
        let mut v = map_vector(
            set.get::<i32>(),
            file.path(),
            MapOptions::new().with_mode(MapMode::ReadOnly),
        )
        .unwrap();
        assert!(matches!(v.set(0, 9), Err(Error::ReadOnly)));
        assert!(matches!(v.try_as_mut_slice(), Err(Error::ReadOnly)));
        v.flush().unwrap();
    }

    #[test]
    fn test_range_errors() {
        let set = engines();
        let file = file_with(&[1, 2, 3]);
        let f = set.get::<i32>();

        let past_end = map_vector(f, file.path(), MapOptions::new().with_offset(4).with_length(3));
        assert!(matches!(
            past_end,
            Err(Error::MappingRange {
                available: 12,
                violation: RangeViolation::LengthPastEnd,
                ..
            })
        ));

        let offset_past_end = map_vector(f, file.path(), MapOptions::new().with_offset(16));
        assert!(matches!(
            offset_past_end,
            Err(Error::MappingRange {
                violation: RangeViolation::OffsetPastEnd,
                ..
            })
        ));

        let misaligned = map_vector(f, file.path(), MapOptions::new().with_offset(2));
        assert!(matches!(
            misaligned,
            Err(Error::MappingRange {
                violation: RangeViolation::Misaligned,
                ..
            })
        ));

        let empty = map_vector(f, file.path(), MapOptions::new().with_offset(12));
        assert!(matches!(
            empty,
            Err(Error::MappingRange {
                violation: RangeViolation::Empty,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_path() {
        let set = engines();
        let dir = tempfile::tempdir().unwrap();
        let result = map_vector(
            set.get::<f32>(),
            dir.path().join("absent.bin"),
            MapOptions::new(),
        );
        assert!(matches!(result, Err(Error::Channel { .. })));
    }

    #[test]
    fn test_borrowed_file_may_close_first() {
        let set = engines();
        let file = file_with(&[7, 8, 9]);
        let handle = File::open(file.path()).unwrap();
        let v = map_vector(
            set.get::<i32>(),
            &handle,
            MapOptions::new().with_mode(MapMode::ReadOnly),
        )
        .unwrap();
        drop(handle);
        assert_eq!(v.to_vec(), vec![7, 8, 9]);
    }

    #[test]
    fn test_region_keeps_only_handed_over_files() {
        let file = file_with(&[1, 2]);
        let handle = File::open(file.path()).unwrap();
        let options = MapOptions::new().with_mode(MapMode::ReadOnly);

        let lent = map_region::<i32>(&handle, &options).unwrap();
        assert!(!lent.owns_file());

        let owned = map_region::<i32>(&handle, &options).unwrap().keep(handle);
        assert!(owned.owns_file());
        drop(lent);
        assert_eq!(owned.as_slice(), &[1, 2]);
    }
}
