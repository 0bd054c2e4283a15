#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::{
    fs::File,
    io::{BufReader, Cursor, Read, Seek},
    path::Path,
};

use bytes::Bytes;
use zip::{read::ZipFile, result::ZipError, ZipArchive};

pub use crate::dir::DirPages;
pub use crate::errors::{Error, Result};
pub use crate::format::{media_type_for, PageFormat};
pub use crate::pages::{CbzPages, Page, PageIndex};
pub use crate::viewer::Viewer;

pub mod dir;
pub mod errors;
pub mod format;
pub mod natural;
pub mod pages;
pub mod viewer;

/// Upper bound of the buffer reserved up front when reading an entry, the
/// size stored in the entry header isn't trusted beyond that
const MAX_PREALLOCATION: usize = 64 * 1024 * 1024;

fn preallocation(size: u64) -> usize {
    usize::try_from(size).map_or(MAX_PREALLOCATION, |size| size.min(MAX_PREALLOCATION))
}

pub trait Cbz {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct CbzFile<'a>(ZipFile<'a>);

impl<'a> CbzFile<'a> {
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.0.size()
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.0.is_dir()
    }

    /// Reads the whole (decompressed) content of the file into `Bytes`
    ///
    /// ## Errors
    ///
    /// Fails if the content can't be read
    pub fn to_bytes(&mut self) -> Result<Bytes> {
        let mut buf = Vec::with_capacity(preallocation(self.size()));

        self.0
            .read_to_end(&mut buf)
            .map_err(|err| Error::CbzEntryRead {
                name: self.name().to_string(),
                source: err.into(),
            })?;

        Ok(buf.into())
    }
}

impl<'a> From<ZipFile<'a>> for CbzFile<'a> {
    fn from(zip_file: ZipFile<'a>) -> Self {
        Self(zip_file)
    }
}

#[derive(Debug)]
pub struct CbzReader<R> {
    archive: ZipArchive<R>,
}

impl<R> CbzReader<R> {
    #[must_use]
    pub fn new(archive: ZipArchive<R>) -> Self {
        Self { archive }
    }
}

impl<R> CbzReader<R>
where
    R: Read + Seek,
{
    /// Creates `CbzReader` from a `Read`
    ///
    /// ## Errors
    ///
    /// Fails if the underlying `ZipArchive` can't be created
    pub fn from_reader(reader: R) -> Result<Self, ZipError> {
        let archive = ZipArchive::new(reader)?;

        Ok(Self::new(archive))
    }

    /// Entry header lookup, nothing is decompressed
    ///
    /// ## Errors
    ///
    /// Fails if there is no entry at `index` or if its header is invalid
    pub fn by_index_raw(&mut self, index: usize) -> Result<CbzFile<'_>, ZipError> {
        Ok(self.archive.by_index_raw(index)?.into())
    }

    /// Opens the entry at `index` for reading
    ///
    /// ## Errors
    ///
    /// Fails if there is no entry at `index` or if it can't be decompressed
    pub fn by_index(&mut self, index: usize) -> Result<CbzFile<'_>, ZipError> {
        Ok(self.archive.by_index(index)?.into())
    }

    /// Opens the entry named `name` for reading
    ///
    /// ## Errors
    ///
    /// Fails if there is no such entry or if it can't be decompressed
    pub fn by_name(&mut self, name: &str) -> Result<CbzFile<'_>, ZipError> {
        Ok(self.archive.by_name(name)?.into())
    }
}

impl CbzReader<BufReader<File>> {
    /// Creates `CbzReader` from a path
    ///
    /// ## Errors
    ///
    /// Fails if the file can't be opened or the underlying `ZipArchive` can't be created
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ZipError> {
        let file = File::open(path.as_ref())?;

        Self::from_reader(BufReader::new(file))
    }
}

impl CbzReader<Cursor<Bytes>> {
    /// Creates `CbzReader` from bytes
    ///
    /// ## Errors
    ///
    /// Fails if the underlying `ZipArchive` can't be created
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Result<Self, ZipError> {
        let cursor = Cursor::new(bytes.into());

        Self::from_reader(cursor)
    }
}

impl<R> Cbz for CbzReader<R>
where
    R: Read + Seek,
{
    fn len(&self) -> usize {
        self.archive.len()
    }
}
