//! Creates the favicon set for this project from `static/images/logo.webp`.

use std::process::ExitCode;

use favicon_gen::FaviconGenerator;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let generator = FaviconGenerator::default();
    tracing::debug!(layout = ?generator.layout(), "generating favicons");

    if generator.generate_primary_assets() {
        println!("Favicon creation completed successfully!");
        ExitCode::SUCCESS
    } else {
        println!("Favicon creation failed!");
        ExitCode::FAILURE
    }
}
