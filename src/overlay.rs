//! Caption text drawn into the border band.
//!
//! Three captions share the band: exposure settings (upper right), capture
//! time (lower right), and camera + lens (upper/lower left, after the logo).

use ab_glyph::{FontArc, FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::Path;

use crate::config::{AssetsConfig, CaptionConfig, FrameConfig};
use crate::error::{FrameError, Result};
use crate::exif::ExifData;
use crate::format;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

static BUILTIN_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Fonts used for the captions.
///
/// `primary` sets the exposure and camera lines, `secondary` the capture
/// time. Lens text uses the primary font as well.
#[derive(Clone)]
pub struct Fonts {
    pub primary: FontArc,
    pub secondary: FontArc,
}

impl Fonts {
    /// Load the configured fonts, substituting the built-in face for any
    /// file that is missing or unreadable.
    pub fn load(assets: &AssetsConfig) -> Result<Self> {
        let builtin = builtin_font()?;
        Ok(Self {
            primary: load_font(&assets.primary_font).unwrap_or_else(|| builtin.clone()),
            secondary: load_font(&assets.secondary_font).unwrap_or(builtin),
        })
    }

    /// Both captions in the built-in face.
    pub fn builtin() -> Result<Self> {
        let font = builtin_font()?;
        Ok(Self {
            primary: font.clone(),
            secondary: font,
        })
    }
}

fn builtin_font() -> Result<FontArc> {
    FontArc::try_from_slice(BUILTIN_FONT).map_err(|e| FrameError::Font(e.to_string()))
}

/// Read a TrueType font or the first face of a collection (`.ttc`).
fn load_font(path: &Path) -> Option<FontArc> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Font {} unavailable ({e}), using built-in font", path.display());
            return None;
        }
    };
    match FontVec::try_from_vec_and_index(data, 0) {
        Ok(font) => Some(FontArc::new(font)),
        Err(e) => {
            log::warn!("Font {} is not usable ({e}), using built-in font", path.display());
            None
        }
    }
}

/// The border band of a framed canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// First row of the band, i.e. the height of the original image.
    pub top: u32,
    pub height: u32,
    pub width: u32,
}

impl Band {
    /// Band at the bottom of `canvas` that is `height` rows tall.
    pub fn bottom_of(canvas: &RgbaImage, height: u32) -> Self {
        Self {
            top: canvas.height().saturating_sub(height),
            height,
            width: canvas.width(),
        }
    }

    /// Font size for captions in this band.
    pub fn font_scale(&self, frame: &FrameConfig) -> PxScale {
        let px = (f64::from(self.height) * frame.font_ratio) as u32;
        PxScale::from(px.max(1) as f32)
    }
}

/// Which part of the band a line is centred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    /// Centred in the top quarter.
    Upper,
    /// Centred in the bottom three quarters.
    Lower,
}

/// Position and rendered size of one caption line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl TextLayout {
    /// Lay out `text` flush right, `margin` pixels from the canvas edge.
    pub fn right_aligned(band: &Band, size: (u32, u32), margin: u32, row: Row) -> Self {
        let (width, height) = size;
        Self {
            x: band.width as i32 - width as i32 - margin as i32,
            y: row_y(band, height, row),
            width,
            height,
        }
    }

    /// Lay out `text` flush left starting at column `x`.
    pub fn left_aligned(band: &Band, size: (u32, u32), x: u32, row: Row) -> Self {
        let (width, height) = size;
        Self {
            x: x as i32,
            y: row_y(band, height, row),
            width,
            height,
        }
    }
}

fn row_y(band: &Band, text_height: u32, row: Row) -> i32 {
    let quarters = match row {
        Row::Upper => 1,
        Row::Lower => 3,
    };
    let slack = band.height as i32 - text_height as i32;
    band.top as i32 + (slack * quarters).div_euclid(4)
}

/// Draw `text` at `layout`; with `bold` it is repainted at every 1px offset.
fn draw_line(
    canvas: &mut RgbaImage,
    layout: &TextLayout,
    font: &FontArc,
    scale: PxScale,
    text: &str,
    bold: bool,
) {
    if bold {
        for dx in -1..=1 {
            for dy in -1..=1 {
                draw_text_mut(canvas, BLACK, layout.x + dx, layout.y + dy, scale, font, text);
            }
        }
    } else {
        draw_text_mut(canvas, BLACK, layout.x, layout.y, scale, font, text);
    }
}

/// The line a slot prints: its literal text, or the EXIF-derived line.
fn caption_text(
    caption: &CaptionConfig,
    from_exif: impl FnOnce() -> Result<String>,
) -> Result<String> {
    match &caption.text {
        Some(text) => Ok(text.clone()),
        None => from_exif(),
    }
}

/// Exposure settings, upper right of the band.
///
/// Returns `None` when the slot is disabled.
pub fn add_exposure_info(
    canvas: &mut RgbaImage,
    band: &Band,
    exif: &ExifData,
    fonts: &Fonts,
    frame: &FrameConfig,
) -> Result<Option<TextLayout>> {
    let caption = &frame.captions.exposure;
    if !caption.enabled {
        return Ok(None);
    }
    let text = caption_text(caption, || format::exposure_line(exif))?;
    let scale = band.font_scale(frame);
    let size = text_size(scale, &fonts.primary, &text);
    let layout = TextLayout::right_aligned(band, size, frame.text_margin, Row::Upper);

    draw_line(canvas, &layout, &fonts.primary, scale, &text, caption.bold);
    Ok(Some(layout))
}

/// Capture time, lower right of the band.
pub fn add_shot_time(
    canvas: &mut RgbaImage,
    band: &Band,
    exif: &ExifData,
    fonts: &Fonts,
    frame: &FrameConfig,
) -> Result<Option<TextLayout>> {
    let caption = &frame.captions.shot_time;
    if !caption.enabled {
        return Ok(None);
    }
    let text = caption_text(caption, || format::capture_time(exif))?;
    let scale = band.font_scale(frame);
    let size = text_size(scale, &fonts.secondary, &text);
    let layout = TextLayout::right_aligned(band, size, frame.text_margin, Row::Lower);

    draw_line(canvas, &layout, &fonts.secondary, scale, &text, caption.bold);
    Ok(Some(layout))
}

/// Camera (upper row) and lens (lower row), left of the band after a logo
/// `logo_width` pixels wide.
///
/// Both rows are positioned from the camera line's height so they share a
/// baseline grid, even when the camera slot is disabled.
pub fn add_device_info(
    canvas: &mut RgbaImage,
    band: &Band,
    exif: &ExifData,
    fonts: &Fonts,
    frame: &FrameConfig,
    logo_width: u32,
) -> (Option<TextLayout>, Option<TextLayout>) {
    let captions = &frame.captions;
    let device = captions
        .device
        .text
        .clone()
        .unwrap_or_else(|| format::device_line(exif));
    let scale = band.font_scale(frame);
    let x = logo_width + frame.text_margin;
    let device_size = text_size(scale, &fonts.primary, &device);

    let device_layout = captions.device.enabled.then(|| {
        let layout = TextLayout::left_aligned(band, device_size, x, Row::Upper);
        draw_line(canvas, &layout, &fonts.primary, scale, &device, captions.device.bold);
        layout
    });

    let lens_layout = captions.lens.enabled.then(|| {
        let lens = captions
            .lens
            .text
            .clone()
            .unwrap_or_else(|| format::lens_line(exif));
        let layout = TextLayout {
            width: text_size(scale, &fonts.primary, &lens).0,
            ..TextLayout::left_aligned(band, device_size, x, Row::Lower)
        };
        draw_line(canvas, &layout, &fonts.primary, scale, &lens, captions.lens.bold);
        layout
    });

    (device_layout, lens_layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::ExifValue;
    use std::path::PathBuf;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn sample() -> ExifData {
        let mut exif = ExifData::default();
        exif.insert("FocalLength", ExifValue::Rational { num: 35, den: 1 });
        exif.insert("FNumber", ExifValue::Rational { num: 18, den: 10 });
        exif.insert("ExposureTime", ExifValue::Rational { num: 1, den: 250 });
        exif.insert("ISOSpeedRatings", ExifValue::Integer(400));
        exif.insert("DateTimeOriginal", ExifValue::Text("2023:07:04 10:15:30".into()));
        exif.insert("Make", ExifValue::Text("Panasonic".into()));
        exif.insert("Model", ExifValue::Text("DC-S5M2".into()));
        exif.insert("LensModel", ExifValue::Text("LUMIX S 35/F1.8".into()));
        exif
    }

    /// A 1600x1000 photo area (black) over a 64px white band.
    fn canvas() -> (RgbaImage, Band) {
        let mut canvas = RgbaImage::from_pixel(1600, 1064, WHITE);
        for y in 0..1000 {
            for x in 0..1600 {
                canvas.put_pixel(x, y, Rgba([10, 10, 10, 255]));
            }
        }
        let band = Band::bottom_of(&canvas, 64);
        (canvas, band)
    }

    fn inked(canvas: &RgbaImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> bool {
        ys.into_iter()
            .any(|y| xs.clone().any(|x| *canvas.get_pixel(x, y) != WHITE))
    }

    #[test]
    fn band_geometry() {
        let (canvas, band) = canvas();
        assert_eq!(band, Band { top: 1000, height: 64, width: 1600 });
        assert_eq!(Band::bottom_of(&canvas, 64).font_scale(&FrameConfig::default()), PxScale::from(14.0));
    }

    #[test]
    fn font_scale_never_zero() {
        let band = Band { top: 10, height: 2, width: 10 };
        assert_eq!(band.font_scale(&FrameConfig::default()), PxScale::from(1.0));
    }

    #[test]
    fn row_positions_use_quarters_of_the_slack() {
        let band = Band { top: 1000, height: 100, width: 2000 };
        let upper = TextLayout::right_aligned(&band, (300, 20), 50, Row::Upper);
        let lower = TextLayout::right_aligned(&band, (300, 20), 50, Row::Lower);
        assert_eq!((upper.x, upper.y), (1650, 1020));
        assert_eq!((lower.x, lower.y), (1650, 1060));

        let left = TextLayout::left_aligned(&band, (120, 21), 130, Row::Lower);
        assert_eq!((left.x, left.y), (130, 1000 + (79 * 3) / 4));
    }

    #[test]
    fn oversized_text_floors_like_integer_division() {
        let band = Band { top: 100, height: 10, width: 200 };
        let layout = TextLayout::right_aligned(&band, (20, 13), 0, Row::Upper);
        assert_eq!(layout.y, 99);
    }

    #[test]
    fn exposure_drawn_on_the_right() {
        let (mut canvas, band) = canvas();
        let fonts = Fonts::builtin().unwrap();
        let layout =
            add_exposure_info(&mut canvas, &band, &sample(), &fonts, &FrameConfig::default())
                .unwrap()
                .unwrap();

        assert_eq!(layout.x + layout.width as i32, 1600 - 50);
        assert!(inked(&canvas, 1000..1550, 1000..1064));
        assert!(!inked(&canvas, 0..400, 1000..1064));
    }

    #[test]
    fn shot_time_sits_below_exposure() {
        let (mut canvas, band) = canvas();
        let fonts = Fonts::builtin().unwrap();
        let frame = FrameConfig::default();
        let exposure = add_exposure_info(&mut canvas, &band, &sample(), &fonts, &frame)
            .unwrap()
            .unwrap();
        let time = add_shot_time(&mut canvas, &band, &sample(), &fonts, &frame)
            .unwrap()
            .unwrap();

        assert!(time.y > exposure.y);
        assert_eq!(time.x + time.width as i32, 1600 - 50);
    }

    #[test]
    fn device_text_starts_after_logo() {
        let (mut canvas, band) = canvas();
        let fonts = Fonts::builtin().unwrap();
        let (device, lens) = add_device_info(
            &mut canvas,
            &band,
            &sample(),
            &fonts,
            &FrameConfig::default(),
            120,
        );
        let (device, lens) = (device.unwrap(), lens.unwrap());

        assert_eq!(device.x, 170);
        assert_eq!(lens.x, 170);
        assert!(lens.y > device.y);
        assert!(!inked(&canvas, 0..168, 1000..1064));
        assert!(inked(&canvas, 168..800, 1000..1064));
    }

    #[test]
    fn photo_area_untouched() {
        let (mut canvas, band) = canvas();
        let before = canvas.clone();
        let fonts = Fonts::builtin().unwrap();
        let frame = FrameConfig::default();
        add_exposure_info(&mut canvas, &band, &sample(), &fonts, &frame).unwrap();
        add_shot_time(&mut canvas, &band, &sample(), &fonts, &frame).unwrap();
        add_device_info(&mut canvas, &band, &sample(), &fonts, &frame, 50);

        for y in (0..999).step_by(37) {
            for x in (0..1600).step_by(53) {
                assert_eq!(canvas.get_pixel(x, y), before.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn malformed_date_is_reported() {
        let (mut canvas, band) = canvas();
        let mut exif = sample();
        exif.insert("DateTimeOriginal", ExifValue::Text("not a date".into()));
        let err = add_shot_time(
            &mut canvas,
            &band,
            &exif,
            &Fonts::builtin().unwrap(),
            &FrameConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FrameError::InvalidExif { .. }));
    }

    #[test]
    fn disabled_slots_draw_nothing() {
        let (mut canvas, band) = canvas();
        let before = canvas.clone();
        let fonts = Fonts::builtin().unwrap();
        let mut frame = FrameConfig::default();
        frame.captions.exposure.enabled = false;
        frame.captions.shot_time.enabled = false;
        frame.captions.device.enabled = false;
        frame.captions.lens.enabled = false;

        assert_eq!(add_exposure_info(&mut canvas, &band, &sample(), &fonts, &frame).unwrap(), None);
        assert_eq!(add_shot_time(&mut canvas, &band, &sample(), &fonts, &frame).unwrap(), None);
        assert_eq!(add_device_info(&mut canvas, &band, &sample(), &fonts, &frame, 0), (None, None));
        assert_eq!(canvas, before);
    }

    #[test]
    fn disabled_time_skips_date_parsing() {
        let (mut canvas, band) = canvas();
        let mut exif = sample();
        exif.insert("DateTimeOriginal", ExifValue::Text("not a date".into()));
        let mut frame = FrameConfig::default();
        frame.captions.shot_time.enabled = false;

        let layout = add_shot_time(&mut canvas, &band, &exif, &Fonts::builtin().unwrap(), &frame);
        assert_eq!(layout.unwrap(), None);
    }

    #[test]
    fn literal_text_replaces_exif_line() {
        let (mut canvas, band) = canvas();
        let fonts = Fonts::builtin().unwrap();
        let mut exif = sample();
        exif.insert("DateTimeOriginal", ExifValue::Text("not a date".into()));
        let mut frame = FrameConfig::default();
        frame.captions.shot_time.text = Some("Summer 2023".into());
        frame.captions.lens.text = Some("Helios 44-2".into());

        let time = add_shot_time(&mut canvas, &band, &exif, &fonts, &frame)
            .unwrap()
            .unwrap();
        let scale = band.font_scale(&frame);
        assert_eq!(time.width, text_size(scale, &fonts.secondary, "Summer 2023").0);

        let (_, lens) = add_device_info(&mut canvas, &band, &exif, &fonts, &frame, 0);
        assert_eq!(lens.unwrap().width, text_size(scale, &fonts.primary, "Helios 44-2").0);
    }

    #[test]
    fn lens_keeps_its_row_without_device_line() {
        let (mut canvas, band) = canvas();
        let fonts = Fonts::builtin().unwrap();
        let frame = FrameConfig::default();
        let (_, with_device) = add_device_info(&mut canvas, &band, &sample(), &fonts, &frame, 0);

        let mut frame = FrameConfig::default();
        frame.captions.device.enabled = false;
        let (device, alone) = add_device_info(&mut canvas, &band, &sample(), &fonts, &frame, 0);

        assert_eq!(device, None);
        assert_eq!(alone, with_device);
    }

    #[test]
    fn missing_font_files_fall_back() {
        let assets = AssetsConfig {
            logo_dir: PathBuf::from("logo"),
            primary_font: PathBuf::from("/nonexistent/Primary.ttf"),
            secondary_font: PathBuf::from("/nonexistent/Secondary.ttc"),
        };
        let fonts = Fonts::load(&assets).unwrap();
        let scale = PxScale::from(20.0);
        assert!(text_size(scale, &fonts.primary, "ISO 400").0 > 0);
        assert!(text_size(scale, &fonts.secondary, "2023-07-04").0 > 0);
    }

    #[test]
    fn non_font_file_falls_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"not a font").unwrap();
        assert!(load_font(&bogus).is_none());

        let assets = AssetsConfig {
            primary_font: bogus.clone(),
            secondary_font: bogus,
            ..AssetsConfig::default()
        };
        assert!(Fonts::load(&assets).is_ok());
    }
}
