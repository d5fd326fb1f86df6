use std::path::{Path, PathBuf};

use image::RgbImage;
use thiserror::Error;

/// Errors encountered when loading input images
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Image has zero dimensions: {0}")]
    Empty(PathBuf),
}

/// A decoded RGB pixel buffer used as session input.
///
/// The driver owns the image; sessions copy it on registration so the
/// original can be dropped independently of the session.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: RgbImage,
    source: Option<PathBuf>,
}

impl RasterImage {
    /// Decode an image file (PNG, JPEG, TIFF, ...) into an RGB buffer.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let pixels = image::open(path)?.to_rgb8();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(ImageError::Empty(path.to_path_buf()));
        }
        Ok(RasterImage {
            pixels,
            source: Some(path.to_path_buf()),
        })
    }

    /// Wrap an already-decoded RGB buffer.
    pub fn from_rgb(pixels: RgbImage) -> Self {
        RasterImage {
            pixels,
            source: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Interleaved RGB bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Path the image was decoded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.png");
        let img = RgbImage::from_pixel(4, 3, image::Rgb([10, 20, 30]));
        img.save(&path).unwrap();

        let raster = RasterImage::from_file(&path).unwrap();
        assert_eq!(raster.width(), 4);
        assert_eq!(raster.height(), 3);
        assert_eq!(raster.as_raw().len(), 4 * 3 * 3);
        assert_eq!(raster.source(), Some(path.as_path()));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = RasterImage::from_file("/no/such/image.png").unwrap_err();
        assert!(matches!(
            err,
            ImageError::Io(_) | ImageError::Decode(_)
        ));
    }
}
