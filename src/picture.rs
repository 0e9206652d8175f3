//! Still pictures embedded in documents and slides

use crate::error::{Error, Result};
use crate::units::Length;
use image::ImageReader;
use log::warn;
use std::io::Cursor;
use std::path::Path;

/// Resolution assumed for pictures that are placed at their native size
pub const DEFAULT_DPI: f64 = 72.0;

/// Picture formats accepted for embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        }
    }

    /// Detect from the leading magic bytes
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF8") {
            Some(Self::Gif)
        } else if bytes.starts_with(b"BM") {
            Some(Self::Bmp)
        } else {
            None
        }
    }
}

/// Picture bytes with their detected format and pixel size
#[derive(Clone, Debug)]
pub struct Picture {
    data: Vec<u8>,
    format: ImageFormat,
    /// `None` when the header could not be decoded
    pixels: Option<(u32, u32)>,
}

impl Picture {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        Self::from_bytes(data).map_err(|e| match e {
            Error::Image(msg) => Error::Image(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = ImageFormat::detect(&data)
            .ok_or_else(|| Error::Image("unsupported picture format".into()))?;
        let pixels = read_dimensions(&data);
        Ok(Self {
            data,
            format,
            pixels,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn pixels(&self) -> Option<(u32, u32)> {
        self.pixels
    }

    /// Height over width; 1.0 when the size is unknown
    pub fn aspect_ratio(&self) -> f64 {
        match self.pixels {
            Some((w, h)) if w > 0 => h as f64 / w as f64,
            _ => 1.0,
        }
    }

    /// Size at [`DEFAULT_DPI`]; a 1 inch square when the size is unknown
    pub fn native_size(&self) -> (Length, Length) {
        match self.pixels {
            Some((w, h)) => (Length::px(w, DEFAULT_DPI), Length::px(h, DEFAULT_DPI)),
            None => (Length::inches(1.0), Length::inches(1.0)),
        }
    }

    /// Fill in whichever of `width`/`height` is missing from the aspect ratio
    pub fn fit(&self, width: Option<Length>, height: Option<Length>) -> (Length, Length) {
        let ratio = self.aspect_ratio();
        match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, w.scale(ratio)),
            (None, Some(h)) => (h.scale(1.0 / ratio), h),
            (None, None) => self.native_size(),
        }
    }
}

fn read_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let dims = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(image::ImageError::from)
        .and_then(|reader| reader.into_dimensions());
    match dims {
        Ok(dims) => Some(dims),
        Err(e) => {
            warn!("could not read picture dimensions, assuming square: {}", e);
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat as Codec, RgbImage};

    /// Encode a solid PNG of the given size
    pub(crate) fn png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbImage::from_pixel(width, height, image::Rgb([112, 182, 88]))
            .write_to(&mut out, Codec::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(ImageFormat::detect(&png(1, 1)), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::detect(b"GIF89a"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::detect(b"hello"), None);
        assert_eq!(ImageFormat::Jpeg.extension(), "jpeg");
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_dimensions() {
        let pic = Picture::from_bytes(png(144, 72)).unwrap();
        assert_eq!(pic.pixels(), Some((144, 72)));
        assert_eq!(pic.aspect_ratio(), 0.5);
        assert_eq!(pic.native_size(), (Length::inches(2.0), Length::inches(1.0)));
    }

    #[test]
    fn test_fit() {
        let pic = Picture::from_bytes(png(200, 100)).unwrap();
        assert_eq!(
            pic.fit(Some(Length::cm(10.0)), None),
            (Length::cm(10.0), Length::cm(5.0))
        );
        assert_eq!(
            pic.fit(None, Some(Length::cm(1.0))),
            (Length::cm(2.0), Length::cm(1.0))
        );
        assert_eq!(
            pic.fit(Some(Length::cm(3.0)), Some(Length::cm(3.0))),
            (Length::cm(3.0), Length::cm(3.0))
        );
    }

    #[test]
    fn test_rejects_unknown_bytes() {
        assert!(matches!(
            Picture::from_bytes(b"not a picture".to_vec()),
            Err(Error::Image(_))
        ));
    }

    #[test]
    fn test_truncated_header_falls_back_to_square() {
        let mut bytes = png(10, 20);
        bytes.truncate(8);
        let pic = Picture::from_bytes(bytes).unwrap();
        assert_eq!(pic.pixels(), None);
        assert_eq!(pic.aspect_ratio(), 1.0);
    }
}
