// args.rs - Command-line flags
//
// Usage: starfield-snapshot [--width N] [--height N] [--date YYYY-MM-DD]
//                           [--frames N] [--out PATH] [--no-shooting-stars]

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

#[derive(Debug, PartialEq)]
pub struct Args {
    pub width: u32,
    pub height: u32,
    pub date: Option<NaiveDate>,
    pub frames: u32,
    pub out: PathBuf,
    pub shooting_stars: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            date: None,
            frames: 1,
            out: PathBuf::from("starfield.png"),
            shooting_stars: true,
        }
    }
}

/// Parse flags, skipping the program name.
pub fn parse(argv: &[String]) -> Result<Args> {
    let mut args = Args::default();
    let mut it = argv.iter().skip(1);

    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--width" => args.width = number(flag, it.next())?,
            "--height" => args.height = number(flag, it.next())?,
            "--frames" => args.frames = number(flag, it.next())?,
            "--date" => {
                let raw = value(flag, it.next())?;
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .with_context(|| format!("--date expects YYYY-MM-DD, got {raw:?}"))?;
                args.date = Some(date);
            }
            "--out" => args.out = PathBuf::from(value(flag, it.next())?),
            "--no-shooting-stars" => args.shooting_stars = false,
            other => bail!("unknown flag {other:?}"),
        }
    }

    Ok(args)
}

fn value<'a>(flag: &str, v: Option<&'a String>) -> Result<&'a str> {
    v.map(String::as_str)
        .with_context(|| format!("{flag} needs a value"))
}

fn number(flag: &str, v: Option<&String>) -> Result<u32> {
    let raw = value(flag, v)?;
    raw.parse()
        .with_context(|| format!("{flag} expects a whole number, got {raw:?}"))
}
