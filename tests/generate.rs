use std::fs;
use std::path::Path;

use favicon_gen::{
    read_ico_frames, ArtifactKind, FaviconGenerator, FaviconLayout, FontCandidate,
    LOGO_RELATIVE_PATH,
};
use image::{ImageFormat, Rgba, RgbaImage};
use tempfile::TempDir;

fn project(with_logo: bool) -> TempDir {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("static/images")).unwrap();
    if with_logo {
        // RGB source, exercising the RGBA conversion
        let logo = image::RgbImage::from_fn(256, 256, |x, y| {
            image::Rgb([x as u8, y as u8, ((x + y) / 2) as u8])
        });
        logo.save_with_format(root.path().join(LOGO_RELATIVE_PATH), ImageFormat::Png)
            .unwrap();
    }
    root
}

fn generator(root: &Path) -> FaviconGenerator {
    FaviconGenerator::new(FaviconLayout::new(root))
        .with_font_candidates(vec![FontCandidate::File("/no/such/font.ttf".into())])
}

fn dimensions(path: &Path) -> (u32, u32) {
    let img = image::open(path).unwrap();
    (img.width(), img.height())
}

#[test]
fn writes_all_primary_assets() {
    let root = project(true);
    let generator = generator(root.path());

    assert!(generator.generate_primary_assets());

    for artifact in [ArtifactKind::Ico, ArtifactKind::Png32, ArtifactKind::AppleTouch] {
        let path = generator.layout().artifact_path(artifact);
        let meta = fs::metadata(&path).unwrap();
        assert!(meta.len() > 0, "{artifact} is empty");
    }
}

#[test]
fn missing_logo_writes_nothing() {
    let root = project(false);
    let generator = generator(root.path());

    let err = generator.try_generate_primary_assets().unwrap_err();
    let logo = root.path().join(LOGO_RELATIVE_PATH);
    assert!(err.to_string().contains(&logo.display().to_string()));

    assert!(!generator.generate_primary_assets());
    let written: Vec<_> = fs::read_dir(root.path().join("static"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .filter(|name| name != "images")
        .collect();
    assert!(written.is_empty(), "unexpected files: {written:?}");
}

#[test]
fn ico_holds_three_frames() {
    let root = project(true);
    let generator = generator(root.path());
    generator.try_generate_primary_assets().unwrap();

    let frames = read_ico_frames(&generator.layout().artifact_path(ArtifactKind::Ico)).unwrap();
    assert_eq!(frames, vec![(16, 16), (32, 32), (48, 48)]);
}

#[test]
fn png_dimensions() {
    let root = project(true);
    let generator = generator(root.path());
    generator.try_generate_primary_assets().unwrap();

    let layout = generator.layout();
    assert_eq!(dimensions(&layout.artifact_path(ArtifactKind::Png32)), (32, 32));
    assert_eq!(dimensions(&layout.artifact_path(ArtifactKind::AppleTouch)), (180, 180));
}

#[test]
fn fallback_glyph_without_system_fonts() {
    let root = project(true);
    let generator = generator(root.path());
    let report = generator.try_generate_primary_assets().unwrap();

    assert!(report.fallback_written);
    let path = generator.layout().artifact_path(ArtifactKind::Fallback);
    assert_eq!(dimensions(&path), (32, 32));

    let img = image::open(&path).unwrap().into_rgba8();
    assert_eq!(*img.get_pixel(0, 0), Rgba([59, 130, 246, 255]));
    assert!(img.pixels().any(|p| *p == Rgba([255, 255, 255, 255])));
}

#[test]
fn default_font_chain_always_produces_glyph() {
    let root = tempfile::tempdir().unwrap();
    let generator = FaviconGenerator::new(FaviconLayout::new(root.path()));

    let path = generator.try_generate_fallback_glyph(root.path()).unwrap();
    assert_eq!(dimensions(&path), (32, 32));

    let img = image::open(&path).unwrap().into_rgba8();
    assert_eq!(*img.get_pixel(0, 0), Rgba([59, 130, 246, 255]));
    assert_eq!(*img.get_pixel(31, 31), Rgba([59, 130, 246, 255]));
    // letter ink lands in the middle of the canvas
    let centre_ink = (8..24)
        .flat_map(|y| (8..24).map(move |x| (x, y)))
        .filter(|&(x, y)| {
            let p = img.get_pixel(x, y);
            p[0] > 200 && p[1] > 200 && p[2] > 200
        })
        .count();
    assert!(centre_ink > 0, "no white ink near the centre");
}

#[test]
fn fallback_into_missing_directory_is_swallowed() {
    let root = tempfile::tempdir().unwrap();
    let generator = generator(root.path());

    assert!(!generator.generate_fallback_glyph(&root.path().join("absent")));
    assert!(!root.path().join("absent").exists());
}

#[test]
fn missing_static_dir_fails_primary() {
    let root = project(false);
    RgbaImage::new(64, 64)
        .save_with_format(root.path().join(LOGO_RELATIVE_PATH), ImageFormat::Png)
        .unwrap();
    let mut layout = FaviconLayout::new(root.path());
    layout.static_dir = root.path().join("public");

    let generator = FaviconGenerator::new(layout).with_font_candidates(vec![FontCandidate::Builtin]);
    assert!(!generator.generate_primary_assets());
    assert!(!root.path().join("public").exists());
}

#[test]
fn rerun_is_idempotent() {
    let root = project(true);
    let generator = generator(root.path());
    let layout = generator.layout().clone();

    generator.try_generate_primary_assets().unwrap();
    let first_frames = read_ico_frames(&layout.artifact_path(ArtifactKind::Ico)).unwrap();
    let first_apple = dimensions(&layout.artifact_path(ArtifactKind::AppleTouch));

    generator.try_generate_primary_assets().unwrap();
    assert_eq!(
        read_ico_frames(&layout.artifact_path(ArtifactKind::Ico)).unwrap(),
        first_frames
    );
    assert_eq!(dimensions(&layout.artifact_path(ArtifactKind::AppleTouch)), first_apple);
    assert_eq!(dimensions(&layout.artifact_path(ArtifactKind::Fallback)), (32, 32));
}
