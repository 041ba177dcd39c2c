//! Error types for favicon generation.

use std::path::PathBuf;

use crate::encode::ArtifactKind;

/// Errors raised while producing favicon artifacts.
#[derive(Debug, thiserror::Error)]
pub enum FaviconError {
    /// The source logo does not exist.
    #[error("Logo file not found at {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// The source logo exists but could not be decoded.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An artifact could not be encoded.
    #[error("failed to encode {artifact}: {source}")]
    Encode {
        artifact: ArtifactKind,
        #[source]
        source: image::ImageError,
    },

    /// Filesystem failure while reading or writing.
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A font candidate could not be loaded.
    #[error("font unavailable: {0}")]
    FontLoad(String),

    /// Text could not be rasterized with the selected font.
    #[error("glyph render failed: {0}")]
    GlyphRender(String),

    /// The built-in bitmap font has no glyph for this character.
    #[error("no built-in glyph for {0:?}")]
    UnsupportedGlyph(char),
}

impl FaviconError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the source logo was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_path() {
        let err = FaviconError::SourceNotFound {
            path: PathBuf::from("/tmp/nowhere/logo.webp"),
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/tmp/nowhere/logo.webp"));
    }

    #[test]
    fn unsupported_glyph_message() {
        let err = FaviconError::UnsupportedGlyph('?');
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "no built-in glyph for '?'");
    }
}
