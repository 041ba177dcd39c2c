//! Text rasterization through resvg/usvg.
//!
//! An outline font is used by emitting a one-element SVG document with a
//! `<text>` node and letting usvg shape it against a private font database.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use palette::Srgba;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{fontdb, Options, Tree};

use crate::error::FaviconError;

// ============================================================================
// Text Rendering
// ============================================================================

/// Renders `ch` with the given font family into a transparent scratch image.
///
/// The scratch image is four times the font size on each side with the
/// baseline placed low enough that ascenders and descenders stay inside. The
/// caller measures the ink and crops; placement inside the scratch area does
/// not matter.
pub fn render_text(
    ch: char,
    family: &str,
    font_size: f32,
    bold: bool,
    color: Srgba<u8>,
    fontdb: Arc<fontdb::Database>,
) -> Result<RgbaImage, FaviconError> {
    let scratch = (font_size * 4.0).ceil() as u32;
    let svg = text_svg(ch, family, font_size, bold, color, scratch);

    let opts = Options {
        font_family: family.to_string(),
        fontdb,
        ..Options::default()
    };
    let tree = Tree::from_str(&svg, &opts).map_err(|e| FaviconError::GlyphRender(e.to_string()))?;

    let mut pixmap = Pixmap::new(scratch, scratch)
        .ok_or_else(|| FaviconError::GlyphRender(format!("cannot allocate {scratch}px pixmap")))?;
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Builds the SVG document for a single character.
fn text_svg(
    ch: char,
    family: &str,
    font_size: f32,
    bold: bool,
    color: Srgba<u8>,
    scratch: u32,
) -> String {
    let weight = if bold { "bold" } else { "normal" };
    let fill = format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue);
    let opacity = color.alpha as f32 / 255.0;
    let x = font_size;
    let y = font_size * 2.5;

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{scratch}" height="{scratch}"><text x="{x}" y="{y}" font-family="{family}" font-weight="{weight}" font-size="{font_size}" fill="{fill}" fill-opacity="{opacity}">{text}</text></svg>"#,
        family = escape_xml(family),
        text = escape_xml(&ch.to_string()),
    )
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    // tiny_skia stores premultiplied alpha
    RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        pixmap
            .pixel(x, y)
            .map(|p| unpremultiply(p.red(), p.green(), p.blue(), p.alpha()))
            .unwrap_or(Rgba([0, 0, 0, 0]))
    })
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    if a == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let a_f = a as f32 / 255.0;
    let channel = |c: u8| (c as f32 / a_f).round().min(255.0) as u8;
    Rgba([channel(r), channel(g), channel(b), a])
}

// ============================================================================
// Measuring and Compositing
// ============================================================================

/// Tight bounding box of the non-transparent pixels, as `(x, y, width, height)`.
///
/// Returns `None` for an image with no ink at all.
pub fn ink_bounds(img: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel[3] > 0 {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

/// Composites a source image onto a destination image at the specified position.
///
/// Uses standard alpha blending (source over destination).
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let dx = x + sx as i32;
        let dy = y + sy as i32;

        if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
            continue;
        }

        let dst_pixel = dest.get_pixel(dx as u32, dy as u32);
        let blended = alpha_blend(*src_pixel, *dst_pixel);
        dest.put_pixel(dx as u32, dy as u32, blended);
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}
