//! favicon-gen: favicon asset generation from a project logo
//!
//! This crate derives the usual set of favicon files from one source logo:
//! a multi-resolution `favicon.ico` (16, 32 and 48 px), a standalone
//! `favicon-32x32.png`, a 180 px `apple-touch-icon.png`, and a synthesized
//! `favicon-fallback.png` showing a single letter on a solid background.
//!
//! # Example
//!
//! ```no_run
//! use favicon_gen::{FaviconGenerator, FaviconLayout};
//!
//! // Reads <root>/static/images/logo.webp, writes into <root>/static/
//! let generator = FaviconGenerator::new(FaviconLayout::new("/srv/site"));
//! let ok = generator.generate_primary_assets();
//! ```
//!
//! # Fallback Glyph
//!
//! The fallback glyph is independent of the logo and can be drawn on its
//! own. Its font chain always ends at a built-in bitmap font:
//!
//! ```
//! use favicon_gen::{synthesize_glyph, FontCandidate, GlyphStyle};
//!
//! let glyph = synthesize_glyph(&GlyphStyle::default(), &[FontCandidate::Builtin]).unwrap();
//! assert_eq!(glyph.image.dimensions(), (32, 32));
//! ```

mod encode;
mod error;
mod generator;
mod glyph;
mod icon;

pub use encode::{read_ico_frames, write_ico, write_png, ArtifactKind};
pub use error::FaviconError;
pub use generator::{
    FaviconGenerator, FaviconLayout, GenerationReport, LOGO_RELATIVE_PATH, STATIC_RELATIVE_DIR,
};
pub use glyph::{
    synthesize as synthesize_glyph, FontCandidate, GlyphStyle, LoadedFont, RenderedGlyph,
};
pub use icon::{
    DerivedRaster, RasterSet, SourceImage, APPLE_TOUCH_SIZE, ICO_SIZES, PNG_FAVICON_SIZE,
    RESAMPLE_FILTER,
};
