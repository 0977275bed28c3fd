//! Manufacturer logo in the left of the border band.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};

use crate::config::{FrameConfig, LogoConfig};
use crate::error::{FrameError, Result};
use crate::exif::ExifData;
use crate::overlay::Band;

/// Asset path for a manufacturer: `<logo_dir>/<make>.png`.
pub fn logo_path(logo_dir: &Path, make: &str) -> PathBuf {
    logo_dir.join(format!("{make}.png"))
}

/// Load the logo for the image's `Make` tag, or the fixed `logo.path`.
pub fn load_logo(logo_dir: &Path, exif: &ExifData, logo: &LogoConfig) -> Result<DynamicImage> {
    let make = exif.text("Make").unwrap_or_default();
    let (path, needs_make) = match &logo.path {
        Some(fixed) => (fixed.clone(), false),
        None => (logo_path(logo_dir, make), true),
    };

    if (needs_make && make.is_empty()) || !path.is_file() {
        return Err(FrameError::LogoNotFound {
            make: make.to_string(),
            path,
        });
    }

    log::debug!("Using logo {}", path.display());
    Ok(image::open(&path)?)
}

/// Resize `logo` to `height` pixels tall, keeping its aspect ratio.
pub fn scale_logo(logo: &DynamicImage, height: u32) -> RgbaImage {
    if height == 0 || logo.height() == 0 {
        return RgbaImage::new(0, 0);
    }
    let width = (u64::from(logo.width()) * u64::from(height) / u64::from(logo.height())) as u32;
    imageops::resize(&logo.to_rgba8(), width.max(1), height, FilterType::Lanczos3)
}

/// Paste the manufacturer logo into the band and return its scaled width.
///
/// Returns 0 without drawing when `frame.logo.enabled` is off. The logo is `logo_ratio` of the band tall, `logo_margin` pixels from the
/// left edge, and vertically centred. Transparent logo pixels keep the band
/// white.
pub fn place_logo(
    canvas: &mut RgbaImage,
    band: &Band,
    exif: &ExifData,
    logo_dir: &Path,
    frame: &FrameConfig,
) -> Result<u32> {
    if !frame.logo.enabled {
        log::debug!("Logo disabled");
        return Ok(0);
    }

    let logo = load_logo(logo_dir, exif, &frame.logo)?;
    let target = (f64::from(band.height) * frame.logo_ratio) as u32;
    let scaled = scale_logo(&logo, target);

    let x = i64::from(frame.logo_margin);
    let y = i64::from(band.top) + (i64::from(band.height) - i64::from(target)) / 2;
    imageops::overlay(canvas, &scaled, x, y);

    Ok(scaled.width())
}
