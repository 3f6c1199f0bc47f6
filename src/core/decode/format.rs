//! Container format detection by magic bytes and by file extension.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Image containers the decode boundary understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerFormat {
    Png,
    Jpeg,
    WebP,
}

impl ContainerFormat {
    /// Detect the container from its leading bytes.
    ///
    /// - PNG: `89 50 4E 47 0D 0A 1A 0A`
    /// - JPEG: `FF D8 FF`
    /// - WebP: `RIFF` + 4 size bytes + `WEBP`
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }

    /// Map a file extension (without the dot, any case)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// MIME type of the container
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// The matching `image` crate format
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::WebP => image::ImageFormat::WebP,
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "PNG"),
            Self::Jpeg => write!(f, "JPEG"),
            Self::WebP => write!(f, "WebP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_png() {
        let header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        assert_eq!(ContainerFormat::sniff(&header), Some(ContainerFormat::Png));
    }

    #[test]
    fn sniff_jpeg() {
        let header = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert_eq!(ContainerFormat::sniff(&header), Some(ContainerFormat::Jpeg));
    }

    #[test]
    fn sniff_webp() {
        let header = [
            0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50,
        ];
        assert_eq!(ContainerFormat::sniff(&header), Some(ContainerFormat::WebP));
    }

    #[test]
    fn sniff_rejects_other_riff() {
        assert_eq!(ContainerFormat::sniff(b"RIFF\0\0\0\0WAVEfmt "), None);
    }

    #[test]
    fn sniff_rejects_unknown_and_short() {
        assert_eq!(ContainerFormat::sniff(b"GIF89a"), None);
        assert_eq!(ContainerFormat::sniff(&[0xFF, 0xD8]), None);
        assert_eq!(ContainerFormat::sniff(&[]), None);
    }

    #[test]
    fn extension_detection_ignores_case() {
        assert_eq!(ContainerFormat::from_extension("JPG"), Some(ContainerFormat::Jpeg));
        assert_eq!(ContainerFormat::from_extension("jpeg"), Some(ContainerFormat::Jpeg));
        assert_eq!(ContainerFormat::from_extension("Png"), Some(ContainerFormat::Png));
        assert_eq!(ContainerFormat::from_extension("webp"), Some(ContainerFormat::WebP));
        assert_eq!(ContainerFormat::from_extension("gif"), None);
    }

    #[test]
    fn mime_types() {
        assert_eq!(ContainerFormat::Png.mime(), "image/png");
        assert_eq!(ContainerFormat::Jpeg.mime(), "image/jpeg");
        assert_eq!(ContainerFormat::WebP.mime(), "image/webp");
    }
}
