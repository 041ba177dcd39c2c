//! Artifact serialization: the multi-frame icon container and PNG files.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ico::{IconDir, IconDirEntry, ResourceType};
use image::{ImageFormat, RgbaImage};

use crate::error::FaviconError;
use crate::icon::RasterSet;

/// The files this crate writes into the static directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Multi-resolution `favicon.ico`.
    Ico,
    /// Standalone 32×32 PNG.
    Png32,
    /// 180×180 Apple touch icon.
    AppleTouch,
    /// Synthesized single-letter glyph.
    Fallback,
}

impl ArtifactKind {
    /// All artifacts, in the order they are produced.
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Ico,
        ArtifactKind::Png32,
        ArtifactKind::AppleTouch,
        ArtifactKind::Fallback,
    ];

    /// The fixed file name of this artifact.
    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Ico => "favicon.ico",
            ArtifactKind::Png32 => "favicon-32x32.png",
            ArtifactKind::AppleTouch => "apple-touch-icon.png",
            ArtifactKind::Fallback => "favicon-fallback.png",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

// ============================================================================
// ICO
// ============================================================================

/// Writes every raster in `set` as one frame of an ICO container at `path`.
///
/// Frames keep the set's order. An existing file is truncated.
pub fn write_ico(set: &RasterSet, path: &Path) -> Result<(), FaviconError> {
    let mut dir = IconDir::new(ResourceType::Icon);

    for raster in set {
        let frame = ico::IconImage::from_rgba_data(
            raster.data.width(),
            raster.data.height(),
            raster.data.as_raw().clone(),
        );
        let entry = IconDirEntry::encode(&frame).map_err(|e| FaviconError::io(path, e))?;
        dir.add_entry(entry);
        tracing::debug!(edge = raster.edge(), "added ico frame");
    }

    let file = File::create(path).map_err(|e| FaviconError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    dir.write(&mut writer).map_err(|e| FaviconError::io(path, e))?;
    writer.flush().map_err(|e| FaviconError::io(path, e))
}

/// Reads back the `(width, height)` of each frame stored in an ICO container.
pub fn read_ico_frames(path: &Path) -> Result<Vec<(u32, u32)>, FaviconError> {
    let file = File::open(path).map_err(|e| FaviconError::io(path, e))?;
    let dir = IconDir::read(file).map_err(|e| FaviconError::io(path, e))?;
    Ok(dir
        .entries()
        .iter()
        .map(|entry| (entry.width(), entry.height()))
        .collect())
}

// ============================================================================
// PNG
// ============================================================================

/// Saves `data` as a PNG at `path`.
pub fn write_png(data: &RgbaImage, path: &Path, artifact: ArtifactKind) -> Result<(), FaviconError> {
    data.save_with_format(path, ImageFormat::Png)
        .map_err(|source| match source {
            image::ImageError::IoError(e) => FaviconError::io(path, e),
            source => FaviconError::Encode { artifact, source },
        })
}
