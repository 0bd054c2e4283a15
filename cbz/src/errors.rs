use std::{io, result};

use zip::result::ZipError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cbz couldn't be opened: {0}")]
    CbzOpen(#[source] ZipError),

    #[error("Cbz entry {name} couldn't be read: {source}")]
    CbzEntryRead {
        name: String,
        #[source]
        source: ZipError,
    },

    #[error("Page {index} is out of bounds, the cbz contains {len} page(s)")]
    CbzPageOutOfBounds { index: usize, len: usize },

    #[error("Entry {0} not found in cbz")]
    CbzEntryNotFound(String),

    #[error("Directory {path} couldn't be opened: {source}")]
    DirOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Page {name} couldn't be read: {source}")]
    DirEntryRead {
        name: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = Error> = result::Result<T, E>;
