//! Lay out a string with a saved atlas and print the resulting mesh.
//!
//! Usage: `show_text_mesh <atlas> [text] [width] [height]`
//!
//! `<atlas>` is the JSON file, the PNG file, or their common stem. The text
//! is centred on a surface of `width`x`height` pixels (default 800x600).

use std::process::ExitCode;

use bitfont::{FontResult, RenderFont, layout_text, read_font};
use bitfont_core::logging;
use bitfont_core::math::Vec2;

fn main() -> ExitCode {
    // The mesh goes to stdout; keep the log to warnings.
    logging::init_with_filter("warn");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(atlas_path) = args.first() else {
        eprintln!("usage: show_text_mesh <atlas> [text] [width] [height]");
        return ExitCode::FAILURE;
    };
    let text = args.get(1).map(String::as_str).unwrap_or("Hello, World!");
    let width = args.get(2).and_then(|arg| arg.parse().ok()).unwrap_or(800.0);
    let height = args.get(3).and_then(|arg| arg.parse().ok()).unwrap_or(600.0);

    match run(atlas_path, text, Vec2::new(width, height)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(atlas_path: &str, text: &str, screen_size: Vec2) -> FontResult<()> {
    let mut atlas = read_font(atlas_path)?;
    let font = RenderFont::from_atlas(&atlas, screen_size)?;
    let (atlas_width, atlas_height) = font.atlas_size();
    println!(
        "{} glyphs from a {}x{} atlas, normalized for {}x{}",
        font.len(),
        atlas_width,
        atlas_height,
        font.screen_size().x,
        font.screen_size().y
    );

    let origin = layout_text(&font, text, Vec2::ZERO).bounds.centered_origin();
    let layout = layout_text(&font, text, origin);

    println!("{}", layout.mesh);
    println!(
        "{} quads, {} vertex bytes, {} index bytes",
        layout.mesh.quad_count(),
        layout.mesh.vertex_bytes().len(),
        layout.mesh.index_bytes().len()
    );
    println!(
        "bounds: min [{}, {}] max [{}, {}]",
        layout.bounds.min.x, layout.bounds.min.y, layout.bounds.max.x, layout.bounds.max.y
    );

    // A renderer would upload this; the metrics stay usable without it.
    let image = atlas.take_image()?;
    println!("texture {}x{} ready for upload", image.width(), image.height());
    Ok(())
}
