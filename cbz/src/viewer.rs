use std::{fs::File, io::BufReader, path::Path};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::{Cbz, CbzPages, DirPages, Error, Page, Result};

#[derive(Debug)]
enum Source {
    Archive(CbzPages<BufReader<File>>),
    Dir(DirPages),
}

impl Source {
    fn open(path: &Path) -> Result<Self> {
        if path.is_dir() {
            DirPages::open(path).map(Self::Dir)
        } else {
            CbzPages::open(path).map(Self::Archive)
        }
    }

    fn page_names(&self) -> Vec<&str> {
        match self {
            Self::Archive(pages) => pages.page_names(),
            Self::Dir(pages) => pages.page_names(),
        }
    }

    fn page_name(&self, index: usize) -> Option<&str> {
        match self {
            Self::Archive(pages) => pages.index().names().nth(index),
            Self::Dir(pages) => pages.page_names().get(index).copied(),
        }
    }

    fn page(&mut self, index: usize) -> Result<Page> {
        match self {
            Self::Archive(pages) => pages.page(index),
            Self::Dir(pages) => pages.page(index),
        }
    }
}

impl Cbz for Source {
    fn len(&self) -> usize {
        match self {
            Self::Archive(pages) => pages.len(),
            Self::Dir(pages) => pages.len(),
        }
    }
}

/// A reading session over at most one open archive, or directory of images.
///
/// Opening a new archive always releases the previous one first, and a closed
/// viewer behaves like an archive without any page.
#[derive(Debug, Default)]
pub struct Viewer {
    pages: Option<Source>,
    path: Option<Utf8PathBuf>,
    current: usize,
}

impl Viewer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the archive at `path`, replacing the one currently open.
    /// A directory is read as its loose image files instead.
    ///
    /// ## Errors
    ///
    /// Fails if the archive can't be opened, the viewer is left closed in that case
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.close();

        let path = path.as_ref();
        let pages = Source::open(path)?;
        info!("opened {} ({} page(s))", path.display(), pages.len());

        self.path = Utf8Path::from_path(path).map(Utf8Path::to_path_buf);
        self.pages = Some(pages);

        Ok(())
    }

    /// Releases the open archive, does nothing if none is open
    pub fn close(&mut self) {
        if self.pages.take().is_some() {
            debug!("closed {:?}", self.path);
        }
        self.path = None;
        self.current = 0;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pages.is_some()
    }

    /// Path of the open archive, `None` when closed or if it isn't valid utf-8
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn list_pages(&self) -> Vec<String> {
        self.pages.as_ref().map_or_else(Vec::new, |pages| {
            pages.page_names().into_iter().map(String::from).collect()
        })
    }

    /// ## Errors
    ///
    /// Fails if `index` is out of bounds or if the page can't be read
    pub fn get_page(&mut self, index: usize) -> Result<Page> {
        match &mut self.pages {
            Some(pages) => pages.page(index),
            None => Err(Error::CbzPageOutOfBounds { index, len: 0 }),
        }
    }

    /// ## Errors
    ///
    /// Same errors as `get_page`
    pub fn get_page_data_uri(&mut self, index: usize) -> Result<String> {
        Ok(self.get_page(index)?.to_data_uri())
    }

    /// Index of the page the session is at, `None` without any page
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.current)
    }

    /// Moves to the next page, returns `false` if already on the last one
    pub fn next_page(&mut self) -> bool {
        if self.current + 1 < self.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Moves to the previous page, returns `false` if already on the first one
    pub fn previous_page(&mut self) -> bool {
        if self.current > 0 && !self.is_empty() {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// ## Errors
    ///
    /// Fails if `index` is out of bounds, the current page is left untouched
    pub fn go_to(&mut self, index: usize) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(Error::CbzPageOutOfBounds { index, len });
        }
        self.current = index;

        Ok(())
    }

    /// ## Errors
    ///
    /// Fails if no page is available or if it can't be read
    pub fn current_page(&mut self) -> Result<Page> {
        self.get_page(self.current)
    }

    /// `<page>/<total> - <name>`, counting pages from 1
    #[must_use]
    pub fn status(&self) -> Option<String> {
        let pages = self.pages.as_ref()?;
        let name = pages.page_name(self.current)?;

        Some(format!("{}/{} - {name}", self.current + 1, pages.len()))
    }
}

impl Cbz for Viewer {
    fn len(&self) -> usize {
        self.pages.as_ref().map_or(0, Cbz::len)
    }
}
