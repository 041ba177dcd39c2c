//! Favicon generation from the project logo.

use std::path::{Path, PathBuf};

use crate::encode::{self, ArtifactKind};
use crate::error::FaviconError;
use crate::glyph::{self, FontCandidate, GlyphStyle};
use crate::icon::{RasterSet, SourceImage, APPLE_TOUCH_SIZE, ICO_SIZES, PNG_FAVICON_SIZE};

/// Logo location relative to the project root.
pub const LOGO_RELATIVE_PATH: &str = "static/images/logo.webp";

/// Output directory relative to the project root.
pub const STATIC_RELATIVE_DIR: &str = "static";

// ============================================================================
// FaviconLayout
// ============================================================================

/// Where the logo is read from and where artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaviconLayout {
    pub project_root: PathBuf,
    pub logo_path: PathBuf,
    pub static_dir: PathBuf,
}

impl FaviconLayout {
    /// The fixed layout anchored at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            logo_path: project_root.join(LOGO_RELATIVE_PATH),
            static_dir: project_root.join(STATIC_RELATIVE_DIR),
            project_root,
        }
    }

    /// Path of an artifact inside the static directory.
    pub fn artifact_path(&self, artifact: ArtifactKind) -> PathBuf {
        self.static_dir.join(artifact.file_name())
    }
}

impl Default for FaviconLayout {
    /// Anchored at this crate's own root directory.
    fn default() -> Self {
        Self::new(env!("CARGO_MANIFEST_DIR"))
    }
}

// ============================================================================
// GenerationReport
// ============================================================================

/// What a successful run wrote.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationReport {
    /// Artifacts written, in order.
    pub written: Vec<(ArtifactKind, PathBuf)>,
    /// Whether the fallback glyph was produced.
    pub fallback_written: bool,
}

impl GenerationReport {
    /// Returns the path written for `artifact`, if any.
    pub fn path_of(&self, artifact: ArtifactKind) -> Option<&Path> {
        self.written
            .iter()
            .find(|(kind, _)| *kind == artifact)
            .map(|(_, path)| path.as_path())
    }
}

// ============================================================================
// FaviconGenerator
// ============================================================================

/// Produces the favicon set from the project logo.
///
/// Primary assets (`favicon.ico`, `favicon-32x32.png`,
/// `apple-touch-icon.png`) are derived from the logo; any failure there
/// fails the run. The fallback glyph is drawn afterwards and its failures
/// are reported but never fail the run.
///
/// # Example
///
/// ```no_run
/// use favicon_gen::{FaviconGenerator, FaviconLayout};
///
/// let generator = FaviconGenerator::new(FaviconLayout::new("/srv/site"));
/// if !generator.generate_primary_assets() {
///     std::process::exit(1);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FaviconGenerator {
    layout: FaviconLayout,
    style: GlyphStyle,
    fonts: Vec<FontCandidate>,
}

impl FaviconGenerator {
    /// Creates a generator with the default glyph style and font chain.
    pub fn new(layout: FaviconLayout) -> Self {
        Self {
            layout,
            style: GlyphStyle::default(),
            fonts: FontCandidate::default_chain(),
        }
    }

    /// Replaces the fallback glyph font chain.
    pub fn with_font_candidates(mut self, fonts: Vec<FontCandidate>) -> Self {
        self.fonts = fonts;
        self
    }

    /// Replaces the fallback glyph style.
    pub fn with_glyph_style(mut self, style: GlyphStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the layout in use.
    pub fn layout(&self) -> &FaviconLayout {
        &self.layout
    }

    /// Generates the primary assets and the fallback glyph.
    ///
    /// Errors are printed and turned into `false`.
    pub fn generate_primary_assets(&self) -> bool {
        match self.try_generate_primary_assets() {
            Ok(report) => {
                tracing::debug!(
                    artifacts = report.written.len(),
                    fallback = report.fallback_written,
                    "favicon generation finished"
                );
                true
            }
            Err(FaviconError::SourceNotFound { path }) => {
                println!("Error: Logo file not found at {}", path.display());
                false
            }
            Err(e) => {
                println!("Error creating favicon: {e}");
                false
            }
        }
    }

    /// Fallible core of [`generate_primary_assets`](Self::generate_primary_assets).
    pub fn try_generate_primary_assets(&self) -> Result<GenerationReport, FaviconError> {
        let mut report = GenerationReport::default();

        {
            let source = SourceImage::open(&self.layout.logo_path)?;
            let icons = RasterSet::derive(&source, &ICO_SIZES);

            let ico_path = self.layout.artifact_path(ArtifactKind::Ico);
            encode::write_ico(&icons, &ico_path)?;
            println!("Created favicon.ico at {}", ico_path.display());
            report.written.push((ArtifactKind::Ico, ico_path));

            let png_path = self.layout.artifact_path(ArtifactKind::Png32);
            let png = match icons.find_by_edge(PNG_FAVICON_SIZE) {
                Some(raster) => raster.clone(),
                None => source.derive(PNG_FAVICON_SIZE),
            };
            encode::write_png(&png.data, &png_path, ArtifactKind::Png32)?;
            println!("Created favicon-32x32.png at {}", png_path.display());
            report.written.push((ArtifactKind::Png32, png_path));

            let apple_path = self.layout.artifact_path(ArtifactKind::AppleTouch);
            let apple = source.derive(APPLE_TOUCH_SIZE);
            encode::write_png(&apple.data, &apple_path, ArtifactKind::AppleTouch)?;
            println!("Created apple-touch-icon.png at {}", apple_path.display());
            report.written.push((ArtifactKind::AppleTouch, apple_path));
        }

        if self.generate_fallback_glyph(&self.layout.static_dir) {
            report.fallback_written = true;
            report.written.push((
                ArtifactKind::Fallback,
                self.layout.artifact_path(ArtifactKind::Fallback),
            ));
        }

        Ok(report)
    }

    /// Draws the fallback glyph into `static_dir`.
    ///
    /// Errors are printed and swallowed; the return value only says whether
    /// the file was written.
    pub fn generate_fallback_glyph(&self, static_dir: &Path) -> bool {
        match self.try_generate_fallback_glyph(static_dir) {
            Ok(_) => true,
            Err(e) => {
                println!("Error creating fallback favicon: {e}");
                tracing::warn!(error = %e, "fallback glyph skipped");
                false
            }
        }
    }

    /// Fallible core of [`generate_fallback_glyph`](Self::generate_fallback_glyph).
    pub fn try_generate_fallback_glyph(&self, static_dir: &Path) -> Result<PathBuf, FaviconError> {
        let glyph = glyph::synthesize(&self.style, &self.fonts)?;
        tracing::debug!(font = ?glyph.font, "fallback glyph drawn");

        let path = static_dir.join(ArtifactKind::Fallback.file_name());
        encode::write_png(&glyph.image, &path, ArtifactKind::Fallback)?;
        println!("Created fallback favicon at {}", path.display());
        Ok(path)
    }
}

impl Default for FaviconGenerator {
    fn default() -> Self {
        Self::new(FaviconLayout::default())
    }
}
