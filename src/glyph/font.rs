//! Font candidates for the fallback glyph.
//!
//! Candidates are tried in order until one loads and actually draws the
//! character. The chain always terminates at the built-in bitmap font.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use resvg::usvg::fontdb::{self, Database, Family, Query, Weight};

use crate::error::FaviconError;

/// macOS system Arial.
pub const ARIAL_PATH: &str = "/System/Library/Fonts/Arial.ttf";

/// Debian/Ubuntu DejaVu Sans Bold.
pub const DEJAVU_BOLD_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

/// One entry of the font fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontCandidate {
    /// A specific font file on disk.
    File(PathBuf),
    /// Any installed sans-serif face, found by scanning system font directories.
    System,
    /// The built-in 5×7 bitmap font.
    Builtin,
}

impl FontCandidate {
    /// The default chain: Arial, DejaVu Sans Bold, any system sans, built-in.
    pub fn default_chain() -> Vec<FontCandidate> {
        vec![
            FontCandidate::File(PathBuf::from(ARIAL_PATH)),
            FontCandidate::File(PathBuf::from(DEJAVU_BOLD_PATH)),
            FontCandidate::System,
            FontCandidate::Builtin,
        ]
    }

    /// Loads this candidate.
    ///
    /// `bold` only steers face selection for [`FontCandidate::System`]; a
    /// file candidate uses whatever face the file holds.
    pub fn load(&self, bold: bool) -> Result<LoadedFont, FaviconError> {
        match self {
            FontCandidate::File(path) => {
                let mut db = Database::new();
                db.load_font_file(path)
                    .map_err(|e| FaviconError::FontLoad(format!("{}: {e}", path.display())))?;
                let family = first_family(db.faces())
                    .ok_or_else(|| FaviconError::FontLoad(format!("{}: no usable face", path.display())))?;
                Ok(LoadedFont::Outline {
                    family,
                    db: Arc::new(db),
                })
            }
            FontCandidate::System => {
                let mut db = Database::new();
                db.load_system_fonts();
                let family = system_sans_family(&db, bold)
                    .ok_or_else(|| FaviconError::FontLoad("no system sans-serif face".into()))?;
                Ok(LoadedFont::Outline {
                    family,
                    db: Arc::new(db),
                })
            }
            FontCandidate::Builtin => Ok(LoadedFont::Builtin),
        }
    }
}

impl fmt::Display for FontCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontCandidate::File(path) => write!(f, "{}", path.display()),
            FontCandidate::System => f.write_str("system sans-serif"),
            FontCandidate::Builtin => f.write_str("built-in bitmap"),
        }
    }
}

/// A font ready to draw with.
#[derive(Clone)]
pub enum LoadedFont {
    /// An outline font resolved by family name in a private database.
    Outline { family: String, db: Arc<Database> },
    /// The built-in bitmap font.
    Builtin,
}

impl fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadedFont::Outline { family, db } => f
                .debug_struct("Outline")
                .field("family", family)
                .field("faces", &db.len())
                .finish(),
            LoadedFont::Builtin => f.write_str("Builtin"),
        }
    }
}

fn first_family<'a>(mut faces: impl Iterator<Item = &'a fontdb::FaceInfo>) -> Option<String> {
    faces.find_map(|face| face.families.first().map(|(name, _)| name.clone()))
}

/// Picks a sans-serif family, preferring a bold proportional face.
fn system_sans_family(db: &Database, bold: bool) -> Option<String> {
    let weight = if bold { Weight::BOLD } else { Weight::NORMAL };
    let query = Query {
        families: &[Family::SansSerif],
        weight,
        ..Query::default()
    };

    if let Some(face) = db.query(&query).and_then(|id| db.face(id)) {
        return first_family(std::iter::once(face));
    }

    first_family(db.faces().filter(|f| !f.monospaced && f.weight == weight))
        .or_else(|| first_family(db.faces().filter(|f| !f.monospaced)))
}
