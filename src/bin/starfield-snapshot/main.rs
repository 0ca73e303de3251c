// starfield-snapshot - Render the daily starfield to a PNG
//
// Pipeline:
//   1. Parse flags, resolve the seed day (today unless --date)
//   2. Build the engine at the requested size
//   3. Step N frames at 60 Hz into an RGBA buffer
//   4. Write the last frame as PNG
//
// Usage: cargo run --bin starfield-snapshot -- [--width N] [--height N]
//        [--date YYYY-MM-DD] [--frames N] [--out PATH] [--no-shooting-stars]

mod args;
mod surface;

use std::env;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use starfield_engine::{SeedDate, Starfield, StarfieldConfig};

use surface::ImageSurface;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> Result<()> {
    init_logging();

    let argv: Vec<String> = env::args().collect();
    let args = args::parse(&argv)?;

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let seed = SeedDate::new(date.year(), date.month0(), date.day());

    let config = StarfieldConfig {
        shooting_stars_enabled: args.shooting_stars,
        ..StarfieldConfig::default()
    };
    let (w, h) = (args.width as f64, args.height as f64);
    let mut field = Starfield::new(w, h, seed, config);
    let mut surface = ImageSurface::new(args.width, args.height);

    // The spawn timer is seconds away; show one streak in short runs.
    if args.shooting_stars {
        field.spawn_shooting_star();
    }

    field.render(&mut surface);
    for frame in 0..args.frames {
        field.tick(frame as f64 * FRAME_MS, &mut surface);
    }

    log::info!(
        "{} frame(s), {} stars, {} shooting star(s) live",
        args.frames,
        field.stars().len(),
        field.shooting_stars().len()
    );

    surface
        .image()
        .save(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    log::info!("wrote {}", args.out.display());

    Ok(())
}

/// `RUST_LOG` wins; otherwise info.
fn init_logging() {
    let mut builder = env_logger::Builder::new();
    match env::var("RUST_LOG") {
        Ok(filter) => builder.parse_filters(&filter),
        Err(_) => builder.filter_level(log::LevelFilter::Info),
    };
    builder.init();
}
