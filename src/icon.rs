//! Raster types for favicon derivation.
//!
//! A [`SourceImage`] is decoded once from disk and never modified. Every
//! output size is produced as a [`DerivedRaster`], and the sizes that go into
//! the icon container are grouped in a [`RasterSet`].

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageReader, RgbaImage};

use crate::error::FaviconError;

/// Edge sizes bundled into `favicon.ico`, in container order.
pub const ICO_SIZES: [u32; 3] = [16, 32, 48];

/// Edge size of the standalone PNG favicon.
pub const PNG_FAVICON_SIZE: u32 = 32;

/// Edge size of the Apple touch icon.
pub const APPLE_TOUCH_SIZE: u32 = 180;

/// Resampling filter used for every derived raster.
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

// ============================================================================
// SourceImage
// ============================================================================

/// The decoded source logo, always held as RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    data: RgbaImage,
}

impl SourceImage {
    /// Decodes the image at `path`, converting it to RGBA.
    ///
    /// Fails with [`FaviconError::SourceNotFound`] when nothing exists at
    /// `path`. No format validation is done beyond that: the format is
    /// sniffed from the content, falling back to the extension, and decoding
    /// errors surface as [`FaviconError::Decode`].
    pub fn open(path: &Path) -> Result<Self, FaviconError> {
        if !path.exists() {
            return Err(FaviconError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }

        let decoded = ImageReader::open(path)
            .and_then(ImageReader::with_guessed_format)
            .map_err(|e| FaviconError::io(path, e))?
            .decode()
            .map_err(|source| FaviconError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            color = ?decoded.color(),
            width = decoded.width(),
            height = decoded.height(),
            "decoded source logo"
        );

        Ok(Self::from_rgba(decoded.into_rgba8()))
    }

    /// Wraps an already-decoded RGBA bitmap.
    pub fn from_rgba(data: RgbaImage) -> Self {
        Self { data }
    }

    /// Returns the pixel dimensions of the source as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        self.data.dimensions()
    }

    /// Returns the underlying pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.data
    }

    /// Produces a square copy with the given edge length.
    ///
    /// The aspect ratio is not preserved; a non-square logo is stretched,
    /// exactly as the icon container expects square frames.
    pub fn derive(&self, edge: u32) -> DerivedRaster {
        let data = imageops::resize(&self.data, edge, edge, RESAMPLE_FILTER);
        DerivedRaster { data }
    }
}

// ============================================================================
// DerivedRaster
// ============================================================================

/// A resized copy of the source at one target size.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRaster {
    /// The resized RGBA pixels.
    pub data: RgbaImage,
}

impl DerivedRaster {
    /// Returns the edge length of a square raster.
    pub fn edge(&self) -> u32 {
        self.data.width()
    }
}

// ============================================================================
// RasterSet
// ============================================================================

/// An ordered group of derived rasters bundled into one container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RasterSet {
    rasters: Vec<DerivedRaster>,
}

impl RasterSet {
    /// Derives one raster per edge size, in the order given.
    pub fn derive(source: &SourceImage, sizes: &[u32]) -> Self {
        Self {
            rasters: sizes.iter().map(|&edge| source.derive(edge)).collect(),
        }
    }

    /// Finds the raster with exactly this edge length.
    pub fn find_by_edge(&self, edge: u32) -> Option<&DerivedRaster> {
        self.rasters.iter().find(|r| r.edge() == edge)
    }

    /// Returns an iterator over the rasters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DerivedRaster> {
        self.rasters.iter()
    }
}

impl<'a> IntoIterator for &'a RasterSet {
    type Item = &'a DerivedRaster;
    type IntoIter = std::slice::Iter<'a, DerivedRaster>;

    fn into_iter(self) -> Self::IntoIter {
        self.rasters.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> SourceImage {
        SourceImage::from_rgba(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        }))
    }

    #[test]
    fn derive_produces_square_edge() {
        let src = gradient(300, 200);
        assert_eq!(src.dimensions(), (300, 200));
        let raster = src.derive(180);
        assert_eq!(raster.data.dimensions(), (180, 180));
        assert_eq!(raster.edge(), 180);
    }

    #[test]
    fn raster_set_keeps_order() {
        let set = RasterSet::derive(&gradient(64, 64), &ICO_SIZES);
        let edges: Vec<u32> = set.iter().map(DerivedRaster::edge).collect();
        assert_eq!(edges, vec![16, 32, 48]);
        assert_eq!(set.find_by_edge(32).unwrap().edge(), 32);
        assert!(set.find_by_edge(64).is_none());
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let err = SourceImage::open(Path::new("/definitely/not/here.webp")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn opaque_source_keeps_alpha_channel() {
        let src = gradient(8, 8);
        let raster = src.derive(4);
        assert!(raster.data.pixels().all(|p| p[3] >= 250));
    }
}
