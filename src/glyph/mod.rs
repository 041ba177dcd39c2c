//! Fallback glyph synthesis.
//!
//! The fallback favicon is a solid square with one letter centered on it. It
//! does not depend on the source logo at all, so it can be produced even
//! when the logo is unusable.
//!
//! # Font Resolution
//!
//! The letter is drawn with the first [`FontCandidate`] that both loads and
//! leaves ink on the scratch canvas. Outline candidates go through resvg;
//! the chain always ends at the built-in bitmap font, so a glyph is produced
//! on machines with no fonts installed.

pub mod bitmap;
pub mod font;
pub mod svg;

pub use font::{FontCandidate, LoadedFont};

use image::imageops;
use image::{Rgba, RgbaImage};
use palette::Srgba;

use crate::error::FaviconError;

/// Scale applied to the 5×7 built-in font so it reads at 32px.
const BITMAP_SCALE: u32 = 2;

// ============================================================================
// GlyphStyle
// ============================================================================

/// Appearance of the fallback glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphStyle {
    /// Edge length of the square canvas.
    pub canvas: u32,
    /// Canvas fill.
    pub background: Srgba<u8>,
    /// Letter color.
    pub foreground: Srgba<u8>,
    /// The letter drawn.
    pub character: char,
    /// Font size in pixels for outline fonts.
    pub font_size: f32,
    /// Prefer a bold face.
    pub bold: bool,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            canvas: 32,
            background: Srgba::new(59, 130, 246, 255),
            foreground: Srgba::new(255, 255, 255, 255),
            character: 'F',
            font_size: 16.0,
            bold: true,
        }
    }
}

impl GlyphStyle {
    fn background_pixel(&self) -> Rgba<u8> {
        let c = self.background;
        Rgba([c.red, c.green, c.blue, c.alpha])
    }
}

// ============================================================================
// Synthesis
// ============================================================================

/// A rendered glyph together with the font that drew it.
#[derive(Debug, Clone)]
pub struct RenderedGlyph {
    pub image: RgbaImage,
    pub font: LoadedFont,
}

/// Draws the glyph described by `style` using the first usable candidate.
///
/// The letter's ink box is measured and centered on the canvas. If every
/// candidate fails, the built-in font is used even when the list does not
/// name it.
pub fn synthesize(
    style: &GlyphStyle,
    candidates: &[FontCandidate],
) -> Result<RenderedGlyph, FaviconError> {
    let (ink, font) = rasterize_with_fallback(style, candidates)?;

    let mut canvas = RgbaImage::from_pixel(style.canvas, style.canvas, style.background_pixel());
    let x = (style.canvas as i32 - ink.width() as i32) / 2;
    let y = (style.canvas as i32 - ink.height() as i32) / 2;
    svg::composite_over(&mut canvas, &ink, x, y);

    Ok(RenderedGlyph {
        image: canvas,
        font,
    })
}

fn rasterize_with_fallback(
    style: &GlyphStyle,
    candidates: &[FontCandidate],
) -> Result<(RgbaImage, LoadedFont), FaviconError> {
    for candidate in candidates {
        match candidate
            .load(style.bold)
            .and_then(|font| rasterize(style, &font).map(|ink| (ink, font)))
        {
            Ok(found) => {
                tracing::debug!(%candidate, "fallback glyph font selected");
                return Ok(found);
            }
            Err(e) => tracing::debug!(%candidate, error = %e, "font candidate skipped"),
        }
    }

    let font = LoadedFont::Builtin;
    let ink = rasterize(style, &font)?;
    Ok((ink, font))
}

/// Draws the character and crops to its ink.
fn rasterize(style: &GlyphStyle, font: &LoadedFont) -> Result<RgbaImage, FaviconError> {
    match font {
        LoadedFont::Outline { family, db } => {
            let scratch = svg::render_text(
                style.character,
                family,
                style.font_size,
                style.bold,
                style.foreground,
                db.clone(),
            )?;
            let (x, y, w, h) = svg::ink_bounds(&scratch).ok_or_else(|| {
                FaviconError::GlyphRender(format!("{family} drew no ink for {:?}", style.character))
            })?;
            Ok(imageops::crop_imm(&scratch, x, y, w, h).to_image())
        }
        LoadedFont::Builtin => bitmap::render(style.character, BITMAP_SCALE, style.foreground),
    }
}
