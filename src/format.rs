//! Caption text built from EXIF fields.
//!
//! Every field is optional. An absent field prints as [`PLACEHOLDER`];
//! a present field that cannot be interpreted is a [`FrameError::InvalidExif`].

use chrono::NaiveDateTime;

use crate::error::{FrameError, Result};
use crate::exif::{ExifData, ExifValue};

/// Printed in place of a missing EXIF field.
pub const PLACEHOLDER: &str = "—";

/// Gap between the groups of a caption line.
const SEPARATOR: &str = "    ";

const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest denominator used when a decimal exposure time is turned into a fraction.
const MAX_DENOMINATOR: u64 = 1_000_000;

/// `"35mm    f 1.8    1/250    ISO 400"`
pub fn exposure_line(exif: &ExifData) -> Result<String> {
    let focal = optional(exif, "FocalLength", |v| number(v).map(|f| (f.trunc() as i64).to_string()))?;
    let aperture = optional(exif, "FNumber", |v| number(v).map(|f| f.to_string()))?;
    let shutter = optional(exif, "ExposureTime", exposure_fraction)?;
    let iso = optional(exif, "ISOSpeedRatings", |v| match v {
        ExifValue::Integer(n) => Some(n.to_string()),
        ExifValue::Text(s) if !s.is_empty() => Some(s.clone()),
        other => number(other).map(|f| (f.trunc() as i64).to_string()),
    })?;

    Ok(format!(
        "{focal}mm{SEPARATOR}f {aperture}{SEPARATOR}{shutter}{SEPARATOR}ISO {iso}"
    ))
}

/// `DateTimeOriginal` as `YYYY-MM-DD HH:MM:SS`.
pub fn capture_time(exif: &ExifData) -> Result<String> {
    optional(exif, "DateTimeOriginal", |v| {
        let raw = v.as_text()?;
        NaiveDateTime::parse_from_str(raw.trim(), EXIF_DATE_FORMAT)
            .ok()
            .map(|t| t.format(DISPLAY_DATE_FORMAT).to_string())
    })
}

/// Manufacturer and model on one line, e.g. `"Lumix    DC-S5M2"`.
pub fn device_line(exif: &ExifData) -> String {
    let make = exif.text("Make").map(display_make).unwrap_or(PLACEHOLDER);
    let model = exif.text("Model").unwrap_or(PLACEHOLDER);
    format!("{make}{SEPARATOR}{model}")
}

pub fn lens_line(exif: &ExifData) -> String {
    exif.text("LensModel").unwrap_or(PLACEHOLDER).to_string()
}

/// Brand name printed for a manufacturer; Panasonic bodies are sold as Lumix.
pub fn display_make(make: &str) -> &str {
    match make {
        "Panasonic" => "Lumix",
        other => other,
    }
}

/// Exposure time in lowest terms: `4/1000` → `1/250`, `2/1` → `2`.
fn exposure_fraction(value: &ExifValue) -> Option<String> {
    let (num, den) = match *value {
        ExifValue::Rational { num, den } if den != 0 => (u64::from(num), u64::from(den)),
        ExifValue::Integer(n) if n >= 0 => (n as u64, 1),
        ExifValue::Text(ref s) => parse_fraction(s)?,
        ref other => {
            let x = number(other)?;
            if x < 0.0 {
                return None;
            }
            approximate(x, MAX_DENOMINATOR)
        }
    };
    let (num, den) = reduce(num, den);
    Some(if den == 1 {
        num.to_string()
    } else {
        format!("{num}/{den}")
    })
}

fn parse_fraction(s: &str) -> Option<(u64, u64)> {
    let s = s.trim();
    match s.split_once('/') {
        Some((n, d)) => {
            let den: u64 = d.trim().parse().ok()?;
            if den == 0 {
                return None;
            }
            Some((n.trim().parse().ok()?, den))
        }
        None => {
            let x: f64 = s.parse().ok()?;
            (x >= 0.0 && x.is_finite()).then(|| approximate(x, MAX_DENOMINATOR))
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Divide both terms by their greatest common divisor.
pub fn reduce(num: u64, den: u64) -> (u64, u64) {
    match gcd(num, den) {
        0 => (num, den),
        g => (num / g, den / g),
    }
}

/// Closest fraction to `x` whose denominator does not exceed `max_den`.
///
/// Walks the continued-fraction convergents; when the next convergent's
/// denominator is out of range, the best semiconvergent below the bound is
/// also considered and the nearer of the two wins (ties go to the
/// convergent).
pub fn approximate(x: f64, max_den: u64) -> (u64, u64) {
    let (mut p0, mut q0) = (0u64, 1u64);
    let (mut p1, mut q1) = (1u64, 0u64);
    let mut r = x;

    loop {
        let a = r.floor();
        let a_int = a as u64;
        let q2 = a_int.saturating_mul(q1).saturating_add(q0);
        if q2 > max_den {
            break;
        }
        let p2 = a_int.saturating_mul(p1).saturating_add(p0);
        (p0, q0, p1, q1) = (p1, q1, p2, q2);

        let frac = r - a;
        if frac < 1e-12 || (p1 as f64 / q1 as f64 - x).abs() <= f64::EPSILON * x.max(1.0) {
            return (p1, q1);
        }
        r = 1.0 / frac;
    }

    if q1 == 0 {
        return (x.round() as u64, 1);
    }

    let k = (max_den - q0) / q1;
    let (sp, sq) = (p0 + k * p1, q0 + k * q1);
    let convergent_err = (p1 as f64 / q1 as f64 - x).abs();
    let semi_err = (sp as f64 / sq as f64 - x).abs();
    if convergent_err <= semi_err { (p1, q1) } else { (sp, sq) }
}

fn number(value: &ExifValue) -> Option<f64> {
    value.as_f64().filter(|f| f.is_finite())
}

/// Format an optional field: absent → placeholder, uninterpretable → error.
fn optional(
    exif: &ExifData,
    tag: &'static str,
    render: impl FnOnce(&ExifValue) -> Option<String>,
) -> Result<String> {
    match exif.get(tag) {
        None => Ok(PLACEHOLDER.to_string()),
        Some(value) => render(value).ok_or_else(|| FrameError::InvalidExif {
            tag,
            value: value.to_string(),
        }),
    }
}
