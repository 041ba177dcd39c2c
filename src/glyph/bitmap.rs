//! Minimal built-in bitmap font.
//!
//! Last resort when no outline font can be loaded. Covers uppercase ASCII
//! letters in a 5×7 cell; each row is five bits, most significant bit on the
//! left.

use image::{Rgba, RgbaImage};
use palette::Srgba;

use crate::error::FaviconError;

/// Width of a glyph cell in font units.
pub const CELL_WIDTH: u32 = 5;

/// Height of a glyph cell in font units.
pub const CELL_HEIGHT: u32 = 7;

const GLYPHS: [[u8; 7]; 26] = [
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
];

fn rows(ch: char) -> Option<&'static [u8; 7]> {
    if ch.is_ascii_uppercase() {
        GLYPHS.get((ch as u8 - b'A') as usize)
    } else {
        None
    }
}

/// Renders `ch` with each font unit drawn as a `scale`×`scale` block.
///
/// The result is exactly the glyph cell; unset bits are transparent.
pub fn render(ch: char, scale: u32, color: Srgba<u8>) -> Result<RgbaImage, FaviconError> {
    let rows = rows(ch).ok_or(FaviconError::UnsupportedGlyph(ch))?;
    let scale = scale.max(1);
    let ink = Rgba([color.red, color.green, color.blue, color.alpha]);

    Ok(RgbaImage::from_fn(
        CELL_WIDTH * scale,
        CELL_HEIGHT * scale,
        |x, y| {
            let bits = rows[(y / scale) as usize];
            let column = x / scale;
            if bits & (0x10 >> column) != 0 {
                ink
            } else {
                Rgba([0, 0, 0, 0])
            }
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Srgba<u8> {
        Srgba::new(255, 255, 255, 255)
    }

    #[test]
    fn covers_uppercase_only() {
        assert!(rows('A').is_some());
        assert!(rows('F').is_some());
        assert!(rows('Z').is_some());
        assert!(rows('f').is_none());
        assert!(rows('?').is_none());
    }

    #[test]
    fn renders_f_shape() {
        let img = render('F', 1, white()).unwrap();
        assert_eq!((img.width(), img.height()), (5, 7));
        // full top bar
        assert!((0..5).all(|x| img.get_pixel(x, 0)[3] == 255));
        // stem only on the bottom row
        assert_eq!(img.get_pixel(0, 6)[3], 255);
        assert!((1..5).all(|x| img.get_pixel(x, 6)[3] == 0));
    }

    #[test]
    fn scale_multiplies_cell() {
        let img = render('F', 2, white()).unwrap();
        assert_eq!((img.width(), img.height()), (10, 14));
        assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn unsupported_character_errors() {
        let err = render('#', 2, white()).unwrap_err();
        assert!(matches!(err, FaviconError::UnsupportedGlyph('#')));
    }
}
