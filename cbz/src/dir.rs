use std::{
    fs, io,
    path::{Path, PathBuf},
};

use bytes::Bytes;
use tracing::debug;
use walkdir::WalkDir;

use crate::{format::PageFormat, natural, Cbz, Error, Page, Result};

/// How deep below the root directory pages are looked for
const MAX_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
struct DirPage {
    path: PathBuf,
    name: String,
    format: PageFormat,
}

/// Loose image files of a directory, read as pages in natural reading order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirPages {
    root: PathBuf,
    pages: Vec<DirPage>,
}

impl DirPages {
    /// Collects the recognized images located at most three levels below `root`
    ///
    /// ## Errors
    ///
    /// Fails if `root` isn't a directory or if it can't be walked
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let dir_open = |source: io::Error| Error::DirOpen {
            path: root.display().to_string(),
            source,
        };

        if !fs::metadata(root).map_err(dir_open)?.is_dir() {
            return Err(dir_open(io::Error::other("not a directory")));
        }

        let mut pages = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(MAX_DEPTH)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|err| dir_open(err.into()))?;
            if !entry.path().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                debug!("skipping non utf-8 file {}", entry.path().display());
                continue;
            };
            let Some(format) = PageFormat::from_name(name) else {
                debug!("skipping non page file {}", entry.path().display());
                continue;
            };
            pages.push(DirPage {
                name: name.to_string(),
                path: entry.into_path(),
                format,
            });
        }

        pages.sort_by(|a, b| natural::compare(&a.name, &b.name));
        debug!("found {} page(s) in {}", pages.len(), root.display());

        Ok(Self {
            root: root.to_path_buf(),
            pages,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Page file names in reading order
    #[must_use]
    pub fn page_names(&self) -> Vec<&str> {
        self.pages.iter().map(|page| page.name.as_str()).collect()
    }

    /// Full path of the page at `index`
    #[must_use]
    pub fn page_path(&self, index: usize) -> Option<&Path> {
        self.pages.get(index).map(|page| page.path.as_path())
    }

    /// Reads the page at `index` from disk
    ///
    /// ## Errors
    ///
    /// Fails if `index` is out of bounds or if the file can't be read
    pub fn page(&self, index: usize) -> Result<Page> {
        let page = self.pages.get(index).ok_or(Error::CbzPageOutOfBounds {
            index,
            len: self.pages.len(),
        })?;
        let bytes = fs::read(&page.path).map_err(|source| Error::DirEntryRead {
            name: page.name.clone(),
            source,
        })?;
        debug!("read page {index} ({}, {} bytes)", page.name, bytes.len());

        Ok(Page::new(
            page.name.clone(),
            page.format.media_type(),
            Bytes::from(bytes),
        ))
    }

    /// ## Errors
    ///
    /// Same errors as `page`
    pub fn page_data_uri(&self, index: usize) -> Result<String> {
        Ok(self.page(index)?.to_data_uri())
    }
}

impl Cbz for DirPages {
    fn len(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, name: &str, bytes: &[u8]) {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }

    fn comic() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "page10.png", b"ten");
        write(dir.path(), "Page2.JPG", b"two");
        write(dir.path(), "notes.txt", b"not a page");
        write(dir.path(), "chapter/page1.gif", b"one");
        write(dir.path(), "chapter/extra/page3.webp", b"three");
        write(dir.path(), "chapter/extra/deeper/page4.bmp", b"too deep");
        fs::create_dir_all(dir.path().join("empty.png")).unwrap();
        dir
    }

    #[test]
    fn test_page_names() {
        let dir = comic();
        let pages = DirPages::open(dir.path()).unwrap();

        assert_eq!(
            pages.page_names(),
            vec!["page1.gif", "Page2.JPG", "page3.webp", "page10.png"]
        );
        assert_eq!(pages.len(), 4);
        assert_eq!(pages.root(), dir.path());
    }

    #[test]
    fn test_page() {
        let dir = comic();
        let pages = DirPages::open(dir.path()).unwrap();

        let page = pages.page(1).unwrap();
        assert_eq!(page.name(), "Page2.JPG");
        assert_eq!(page.media_type(), "image/jpeg");
        assert_eq!(&page.bytes()[..], b"two");

        assert_eq!(
            pages.page_path(2),
            Some(dir.path().join("chapter/extra/page3.webp").as_path())
        );
        assert_eq!(
            pages.page_data_uri(2).unwrap(),
            "data:image/webp;base64,dGhyZWU="
        );
    }

    #[test]
    fn test_page_out_of_bounds() {
        let dir = comic();
        let pages = DirPages::open(dir.path()).unwrap();

        assert!(matches!(
            pages.page(4),
            Err(Error::CbzPageOutOfBounds { index: 4, len: 4 })
        ));
        assert_eq!(pages.page_path(4), None);
    }

    #[test]
    fn test_removed_page() {
        let dir = comic();
        let pages = DirPages::open(dir.path()).unwrap();
        fs::remove_file(dir.path().join("page10.png")).unwrap();

        assert!(matches!(
            pages.page(3),
            Err(Error::DirEntryRead { name, .. }) if name == "page10.png"
        ));
        assert_eq!(&pages.page(0).unwrap().bytes()[..], b"one");
    }

    #[test]
    fn test_directory_without_pages() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "readme.md", b"# hi");
        let pages = DirPages::open(dir.path()).unwrap();

        assert!(pages.is_empty());
        assert!(pages.page_names().is_empty());
    }

    #[test]
    fn test_open_errors() {
        let dir = comic();

        assert!(matches!(
            DirPages::open(dir.path().join("missing")),
            Err(Error::DirOpen { .. })
        ));
        assert!(matches!(
            DirPages::open(dir.path().join("page10.png")),
            Err(Error::DirOpen { .. })
        ));
    }
}
