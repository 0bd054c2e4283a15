use std::{
    fs::File,
    io::{BufReader, Cursor, Read, Seek},
    path::Path,
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use tracing::debug;
use zip::result::ZipError;

use crate::{
    format::{media_type_for, PageFormat},
    natural::{self, base_name},
    Cbz, CbzReader, Error, Result,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct PageRef {
    position: usize,
    name: String,
    format: PageFormat,
}

/// Positions of the archive's image entries, in natural reading order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndex {
    pages: Vec<PageRef>,
}

impl PageIndex {
    /// Walks every entry header of the archive and keeps the recognized images,
    /// directories are skipped and nothing gets decompressed.
    ///
    /// ## Errors
    ///
    /// Fails if an entry header can't be read
    pub fn build<R>(reader: &mut CbzReader<R>) -> Result<Self, ZipError>
    where
        R: Read + Seek,
    {
        let mut pages = Vec::new();

        for position in 0..reader.len() {
            let file = reader.by_index_raw(position)?;
            if file.is_dir() {
                continue;
            }
            let Some(format) = PageFormat::from_name(file.name()) else {
                debug!("skipping non page entry {}", file.name());
                continue;
            };
            pages.push(PageRef {
                position,
                name: base_name(file.name()).to_string(),
                format,
            });
        }

        pages.sort_by(|a, b| natural::compare(&a.name, &b.name));

        Ok(Self { pages })
    }

    /// Page base names in reading order
    #[must_use]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|page| page.name.as_str())
    }

    /// Position of the page in the archive entry list
    #[must_use]
    pub fn position(&self, index: usize) -> Option<usize> {
        self.pages.get(index).map(|page| page.position)
    }

    fn get(&self, index: usize) -> Result<&PageRef> {
        self.pages.get(index).ok_or(Error::CbzPageOutOfBounds {
            index,
            len: self.pages.len(),
        })
    }
}

impl Cbz for PageIndex {
    fn len(&self) -> usize {
        self.pages.len()
    }
}

/// A page read out of the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    name: String,
    media_type: &'static str,
    bytes: Bytes,
}

impl Page {
    pub(crate) fn new(name: String, media_type: &'static str, bytes: Bytes) -> Self {
        Self {
            name,
            media_type,
            bytes,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// `data:<media type>;base64,<content>` using the standard padded alphabet
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// An open archive along with its page index
#[derive(Debug)]
pub struct CbzPages<R> {
    reader: CbzReader<R>,
    index: PageIndex,
}

impl<R> CbzPages<R>
where
    R: Read + Seek,
{
    /// ## Errors
    ///
    /// Fails if `reader` isn't a readable zip archive
    pub fn from_reader(reader: R) -> Result<Self> {
        let reader = CbzReader::from_reader(reader).map_err(Error::CbzOpen)?;

        Self::from_cbz_reader(reader)
    }

    /// ## Errors
    ///
    /// Fails if the entry headers can't be read
    pub fn from_cbz_reader(mut reader: CbzReader<R>) -> Result<Self> {
        let index = PageIndex::build(&mut reader).map_err(Error::CbzOpen)?;
        debug!(
            "indexed {} page(s) out of {} entries",
            index.len(),
            reader.len()
        );

        Ok(Self { reader, index })
    }

    #[must_use]
    pub fn index(&self) -> &PageIndex {
        &self.index
    }

    /// Page base names in reading order, as stored in the archive (case preserved)
    #[must_use]
    pub fn page_names(&self) -> Vec<&str> {
        self.index.names().collect()
    }

    /// Reads the page at `index`
    ///
    /// ## Errors
    ///
    /// Fails if `index` is out of bounds or if the entry can't be decompressed
    pub fn page(&mut self, index: usize) -> Result<Page> {
        let page_ref = self.index.get(index)?;
        let mut file = self
            .reader
            .by_index(page_ref.position)
            .map_err(|source| Error::CbzEntryRead {
                name: page_ref.name.clone(),
                source,
            })?;
        let bytes = file.to_bytes()?;
        debug!("read page {index} ({}, {} bytes)", page_ref.name, bytes.len());

        Ok(Page {
            name: page_ref.name.clone(),
            media_type: page_ref.format.media_type(),
            bytes,
        })
    }

    /// Same as `page` but encoded as a data URI
    ///
    /// ## Errors
    ///
    /// Same errors as `page`
    pub fn page_data_uri(&mut self, index: usize) -> Result<String> {
        Ok(self.page(index)?.to_data_uri())
    }

    /// Reads any entry by its full name, whether it's part of the pages or not
    ///
    /// ## Errors
    ///
    /// Fails if there is no such entry or if it can't be decompressed
    pub fn entry_by_name(&mut self, name: &str) -> Result<Page> {
        let mut file = self.reader.by_name(name).map_err(|err| match err {
            ZipError::FileNotFound => Error::CbzEntryNotFound(name.to_string()),
            source => Error::CbzEntryRead {
                name: name.to_string(),
                source,
            },
        })?;
        let bytes = file.to_bytes()?;

        Ok(Page {
            name: base_name(name).to_string(),
            media_type: media_type_for(name),
            bytes,
        })
    }
}

impl CbzPages<BufReader<File>> {
    /// Opens the archive located at `path` and indexes its pages
    ///
    /// ## Errors
    ///
    /// Fails if the file doesn't exist, can't be read, or isn't a zip archive
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let reader = CbzReader::from_path(path).map_err(Error::CbzOpen)?;

        Self::from_cbz_reader(reader)
    }
}

impl CbzPages<Cursor<Bytes>> {
    /// ## Errors
    ///
    /// Fails if `bytes` isn't a zip archive
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Result<Self> {
        let reader = CbzReader::from_bytes(bytes).map_err(Error::CbzOpen)?;

        Self::from_cbz_reader(reader)
    }
}

impl<R> Cbz for CbzPages<R> {
    fn len(&self) -> usize {
        self.index.len()
    }
}
