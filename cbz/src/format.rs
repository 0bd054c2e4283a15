use image::ImageFormat;

use crate::natural::base_name;

/// Media type used for entries that are not recognized as pages
pub static OCTET_STREAM: &str = "application/octet-stream";

/// The image formats accepted as pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    Bmp,
}

impl PageFormat {
    /// Guesses the format from the extension of `name`, case is ignored.
    /// Returns `None` for anything that is not a recognized page format.
    ///
    /// The extension is whatever follows the last dot of the base name, so
    /// dot files like `.png` count as pages.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let (_, extension) = base_name(name).rsplit_once('.')?;

        match ImageFormat::from_extension(extension.to_ascii_lowercase())? {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::WebP => Some(Self::WebP),
            ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }

    #[must_use]
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Bmp => "image/bmp",
        }
    }
}

/// Media type for any entry name, falls back to `application/octet-stream`
#[must_use]
pub fn media_type_for(name: &str) -> &'static str {
    PageFormat::from_name(name).map_or(OCTET_STREAM, PageFormat::media_type)
}
