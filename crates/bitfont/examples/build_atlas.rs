//! Build a bitmap font atlas from a TrueType/OpenType font.
//!
//! Usage: `build_atlas <font-file> [pixel-size] [output]`
//!
//! Packs printable ASCII plus Latin-1 and writes `<output>.json` and
//! `<output>.png`. The output defaults to the font's file stem followed by
//! the pixel size.
//!
//! Set `BITFONT_PROFILE=1` to serve puffin data on the default profiler
//! address while the atlas is built.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bitfont::{AtlasConfig, CharSet, FontResult, build_atlas, write_font};
use bitfont_core::{logging, profiling};

fn main() -> ExitCode {
    logging::init();
    if std::env::var_os("BITFONT_PROFILE").is_some() {
        profiling::init_profiling(profiling::DEFAULT_ADDR);
    }

    let mut args = std::env::args().skip(1);
    let Some(font_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: build_atlas <font-file> [pixel-size] [output]");
        return ExitCode::FAILURE;
    };
    let pixel_size = match args.next().map(|arg| arg.parse::<f32>()) {
        None => AtlasConfig::default().pixel_size,
        Some(Ok(size)) => size,
        Some(Err(err)) => {
            eprintln!("invalid pixel size: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output(&font_path, pixel_size));

    let result = run(&font_path, pixel_size, &output);
    profiling::new_frame();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn default_output(font_path: &Path, pixel_size: f32) -> PathBuf {
    let stem = font_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "font".to_string());
    PathBuf::from(format!("{}-{}", stem, pixel_size.round() as u32))
}

fn run(font_path: &Path, pixel_size: f32, output: &Path) -> FontResult<()> {
    let config = AtlasConfig::new().with_pixel_size(pixel_size);
    let chars = CharSet::from_ranges(&[' '..='~', '\u{a0}'..='ÿ']);

    let atlas = build_atlas(font_path, &config, chars.chars())?;
    let (lowest, highest) = atlas.vertical_extremes();
    let image = atlas.image()?;
    println!(
        "{} glyphs in a {}x{} image, vertical extent {}..{} px",
        atlas.len(),
        image.width(),
        image.height(),
        lowest,
        highest
    );

    let (json_path, png_path) = write_font(&atlas, output)?;
    println!("wrote {} and {}", json_path.display(), png_path.display());
    Ok(())
}
