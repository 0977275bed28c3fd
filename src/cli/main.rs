use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use exif_frame::{config, exif, pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "exif-frame",
    version,
    about = "Add a white EXIF caption band with camera logo under photos"
)]
struct Cli {
    /// Image file or directory of images to frame
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Output file (single image) or directory (directory source)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding <Make>.png logo files
    #[arg(long = "logo-dir", value_name = "DIR")]
    logo_dir: Option<PathBuf>,

    /// Use this logo file for every image instead of <logo-dir>/<Make>.png
    #[arg(long, value_name = "FILE", conflicts_with = "no_logo")]
    logo: Option<PathBuf>,

    /// Frame without a manufacturer logo
    #[arg(long = "no-logo")]
    no_logo: bool,

    /// Font for the exposure and camera lines
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Font for the capture time line
    #[arg(long = "time-font", value_name = "FILE")]
    time_font: Option<PathBuf>,

    /// Copy the source EXIF block into the framed image
    #[arg(long = "preserve-exif")]
    preserve_exif: bool,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Display the extracted EXIF tags and exit
    #[arg(long = "show-exif")]
    show_exif: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    let Some(source) = cli.source.as_deref() else {
        anyhow::bail!("No input file or directory specified. Use --help for usage.");
    };

    // Load config
    let mut config = config::Config::load(cli.config.as_deref())?;

    // Handle --show-exif
    if cli.show_exif {
        let images = if source.is_dir() {
            pipeline::collect_images(source, &config.batch)
        } else if source.is_file() {
            vec![source.to_path_buf()]
        } else {
            anyhow::bail!("No such file or directory: {}", source.display());
        };
        if images.is_empty() {
            anyhow::bail!("No supported image files found in {}", source.display());
        }
        for image_path in &images {
            print_full_exif(image_path);
        }
        return Ok(());
    }

    // CLI flags override the config file
    if let Some(dir) = cli.logo_dir {
        config.assets.logo_dir = dir;
    }
    if let Some(logo) = cli.logo {
        config.frame.logo.path = Some(logo);
    }
    if cli.no_logo {
        config.frame.logo.enabled = false;
    }
    if let Some(font) = cli.font {
        config.assets.primary_font = font;
    }
    if let Some(font) = cli.time_font {
        config.assets.secondary_font = font;
    }
    if cli.preserve_exif {
        config.output.preserve_exif = true;
    }

    let report = pipeline::run(source, cli.output.as_deref(), &config)?;

    // JSON output
    if cli.json {
        let json_results: Vec<serde_json::Value> = report
            .results
            .iter()
            .map(|r| {
                serde_json::json!({
                    "path": r.path.display().to_string(),
                    "output": r.output.as_ref().map(|p| p.display().to_string()),
                    "exif_tags": r.exif_tags,
                    "error": r.error,
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&json_results)?);
    }

    // Summary
    let success = report.succeeded();
    let failed = report.failed();
    let total = report.total();
    log::info!("Done: {success} succeeded, {failed} failed out of {total} images");

    if failed > 0 {
        anyhow::bail!("{failed} of {total} image(s) could not be framed");
    }

    Ok(())
}

// ANSI color codes
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Max width for the value column before wrapping.
const VAL_WIDTH: usize = 46;
/// Indent for continuation lines (tag column width + " : " = 25 chars + 2 leading spaces).
const INDENT: &str = "                           ";

/// Tags that feed the caption band, shown first.
const CAPTION_TAGS: &[&str] = &[
    "Make",
    "Model",
    "LensModel",
    "DateTimeOriginal",
    "ExposureTime",
    "FNumber",
    "ISOSpeedRatings",
    "FocalLength",
];

/// Print every extracted EXIF tag for a file, caption tags first.
fn print_full_exif(path: &Path) {
    let data = exif::read_exif(path);

    println!();
    println!("{BOLD}File:{RESET} {}", path.display());
    println!("{DIM}{}{RESET}", "═".repeat(72));

    if data.is_empty() {
        println!("  {DIM}(no EXIF metadata found){RESET}");
        println!();
        return;
    }

    if CAPTION_TAGS.iter().any(|tag| data.get(tag).is_some()) {
        println!("  {BOLD}Caption{RESET}");
        println!("  {DIM}{}{RESET}", "─".repeat(70));
        for tag in CAPTION_TAGS {
            if let Some(value) = data.get(tag) {
                print_row(tag, &value.to_string());
            }
        }
        println!();
    }

    let others: Vec<_> = data
        .iter()
        .filter(|(tag, _)| !CAPTION_TAGS.contains(tag))
        .collect();
    if !others.is_empty() {
        println!("  {BOLD}Other Tags{RESET}");
        println!("  {DIM}{}{RESET}", "─".repeat(70));
        for (tag, value) in others {
            print_row(tag, &value.to_string());
        }
        println!();
    }
}

/// Print a single row in the EXIF display table.
fn print_row(tag: &str, val: &str) {
    let tag_col = format!("{:<22}", tag);
    let lines = wrap_text(val, VAL_WIDTH);
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            println!("  {tag_col} : {line}");
        } else {
            println!("  {INDENT}{line}");
        }
    }
}

/// Wrap text at word boundaries to fit within max_width.
fn wrap_text(s: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in s.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(s.to_string());
    }

    lines
}
