use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, RgbaImage};
use img_parts::{Bytes, DynImage, ImageEXIF};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::border::{BorderGeometry, add_border};
use crate::config::{BatchConfig, Config};
use crate::error::{FrameError, Result};
use crate::exif::{self, ExifData};
use crate::logo;
use crate::overlay::{self, Band, Fonts};

/// Extensions picked up when scanning a directory.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// The container written for a framed image, determined by its extension.
///
/// # Example
///
/// ```rust
/// use exif_frame::pipeline::ImageKind;
/// use std::path::Path;
///
/// assert_eq!(ImageKind::from_path(Path::new("photo.JPG")), Some(ImageKind::Jpeg));
/// assert_eq!(ImageKind::from_path(Path::new("scan.png")), Some(ImageKind::Png));
/// assert_eq!(ImageKind::from_path(Path::new("notes.txt")), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageKind {
    /// JPEG: written as 8-bit RGB
    Jpeg,
    /// PNG: written as 8-bit RGBA
    Png,
}

impl ImageKind {
    /// Determine the image kind from a file path extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// The outcome of framing one image.
///
/// Failures are captured in `error` so a batch can carry on past them.
#[derive(Debug)]
pub struct ProcessResult {
    pub path: PathBuf,
    /// Where the framed image was written, on success.
    pub output: Option<PathBuf>,
    /// Number of EXIF tags found in the source.
    pub exif_tags: usize,
    pub error: Option<String>,
}

/// Per-file results of a [`run`].
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<ProcessResult>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_none()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }
}

/// Collect the images of a directory, sorted by file name.
///
/// Only the top level is scanned unless `batch.recursive` is set. Output
/// directories (named `batch.output_dir_name`) are never descended into, so
/// framing a directory twice does not frame the previous results.
///
/// # Example
///
/// ```rust,no_run
/// use exif_frame::config::BatchConfig;
/// use exif_frame::pipeline::collect_images;
///
/// let images = collect_images("./photos".as_ref(), &BatchConfig::default());
/// println!("Found {} images", images.len());
/// ```
pub fn collect_images(dir: &Path, batch: &BatchConfig) -> Vec<PathBuf> {
    let max_depth = if batch.recursive { usize::MAX } else { 1 };

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == batch.output_dir_name.as_str()))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_supported_image(p, batch.case_sensitive_extensions))
        .collect()
}

/// Check if a file has a supported image extension.
fn is_supported_image(path: &Path, case_sensitive: bool) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            if case_sensitive {
                IMAGE_EXTENSIONS.contains(&ext)
            } else {
                IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
            }
        })
        .unwrap_or(false)
}

/// Default destination: `<source dir>/<output_dir_name>/<file name>`.
pub fn default_output_path(source: &Path, batch: &BatchConfig) -> PathBuf {
    let parent = source.parent().unwrap_or(Path::new(""));
    let name = source.file_name().unwrap_or_default();
    parent.join(&batch.output_dir_name).join(name)
}

/// Add the caption border to a decoded image.
///
/// Draws, in order: capture time, exposure settings, the manufacturer logo,
/// then camera and lens to the right of the logo.
pub fn frame_image(image: &DynamicImage, exif: &ExifData, config: &Config) -> Result<RgbaImage> {
    let border = BorderGeometry::with_ratios(image.width(), image.height(), &config.frame);
    let mut canvas = add_border(image, &border);
    let band = Band::bottom_of(&canvas, border.height());
    let fonts = Fonts::load(&config.assets)?;

    overlay::add_shot_time(&mut canvas, &band, exif, &fonts, &config.frame)?;
    overlay::add_exposure_info(&mut canvas, &band, exif, &fonts, &config.frame)?;
    let logo_width = logo::place_logo(
        &mut canvas,
        &band,
        exif,
        &config.assets.logo_dir,
        &config.frame,
    )?;
    overlay::add_device_info(&mut canvas, &band, exif, &fonts, &config.frame, logo_width);

    Ok(canvas)
}

/// Frame a single file and write the result.
///
/// `output` defaults to [`default_output_path`]; its parent directory is
/// created when missing. The container follows the output extension, or
/// the source format when the extension is not recognised.
///
/// Returns the path written.
pub fn process_file(source: &Path, output: Option<&Path>, config: &Config) -> Result<PathBuf> {
    let bytes = std::fs::read(source)?;
    let exif = exif::read_exif_from_bytes(&bytes);
    frame_bytes(source, &bytes, &exif, output, config)
}

/// Frame a single file, capturing any failure in the result.
pub fn process_image(source: &Path, output: Option<&Path>, config: &Config) -> ProcessResult {
    let mut result = ProcessResult {
        path: source.to_path_buf(),
        output: None,
        exif_tags: 0,
        error: None,
    };

    let bytes = match std::fs::read(source) {
        Ok(bytes) => bytes,
        Err(e) => {
            result.error = Some(FrameError::from(e).to_string());
            return result;
        }
    };
    let exif = exif::read_exif_from_bytes(&bytes);
    result.exif_tags = exif.len();

    match frame_bytes(source, &bytes, &exif, output, config) {
        Ok(path) => result.output = Some(path),
        Err(e) => result.error = Some(e.to_string()),
    }

    result
}

fn frame_bytes(
    source: &Path,
    bytes: &[u8],
    exif: &ExifData,
    output: Option<&Path>,
    config: &Config,
) -> Result<PathBuf> {
    let output = match output {
        Some(p) => p.to_path_buf(),
        None => default_output_path(source, &config.batch),
    };

    let image = image::load_from_memory(bytes)?;
    log::debug!("{} EXIF tags in {}", exif.len(), source.display());

    let canvas = frame_image(&image, exif, config)?;

    let kind = ImageKind::from_path(&output)
        .or_else(|| ImageKind::from_path(source))
        .unwrap_or(ImageKind::Jpeg);
    let mut encoded = encode(canvas, kind, config.output.jpeg_quality)?;
    if config.output.preserve_exif {
        encoded = carry_exif(bytes, encoded)?;
    }

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&output, encoded)?;
    log::info!("Saved framed image to {}", output.display());

    Ok(output)
}

/// Where a directory run writes `image`: `output` with the image's path
/// relative to `source` (subdirectories mirrored), or the default path.
fn batch_target(source: &Path, image: &Path, output: Option<&Path>) -> Option<PathBuf> {
    let dir = output?;
    let relative = image
        .strip_prefix(source)
        .unwrap_or_else(|_| Path::new(image.file_name().unwrap_or_default()));
    Some(dir.join(relative))
}

/// Frame a file, or every image in a directory.
///
/// For a directory, each image goes to its default output path, or under
/// `output` at the same relative path it has below `source`. A failing image is logged and recorded in
/// the report; the remaining images are still processed.
///
/// # Errors
///
/// [`FrameError::NotFound`] when `source` is neither a file nor a directory.
pub fn run(source: &Path, output: Option<&Path>, config: &Config) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    if source.is_dir() {
        let images = collect_images(source, &config.batch);
        let total = images.len();
        log::info!("Found {total} image(s) in {}", source.display());

        for (i, image_path) in images.iter().enumerate() {
            log::info!("[{}/{}] Processing: {}", i + 1, total, image_path.display());

            let target = batch_target(source, image_path, output);
            let result = process_image(image_path, target.as_deref(), config);
            if let Some(ref err) = result.error {
                log::error!("  Error: {err}");
            }
            report.results.push(result);
        }
    } else if source.is_file() {
        log::info!("Processing: {}", source.display());
        let result = process_image(source, output, config);
        if let Some(ref err) = result.error {
            log::error!("  Error: {err}");
        }
        report.results.push(result);
    } else {
        return Err(FrameError::NotFound(source.to_path_buf()));
    }

    Ok(report)
}

fn encode(canvas: RgbaImage, kind: ImageKind, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match kind {
        ImageKind::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))?;
        }
        ImageKind::Png => canvas.write_with_encoder(PngEncoder::new(&mut buf))?,
    }
    Ok(buf)
}

/// Copy the EXIF block of `source` into the encoded output.
fn carry_exif(source: &[u8], encoded: Vec<u8>) -> Result<Vec<u8>> {
    let exif_block = DynImage::from_bytes(Bytes::copy_from_slice(source))
        .ok()
        .flatten()
        .and_then(|img| img.exif());
    let Some(exif_block) = exif_block else {
        log::debug!("Source has no EXIF block to carry over");
        return Ok(encoded);
    };

    let mut framed = DynImage::from_bytes(Bytes::from(encoded))
        .map_err(|e| FrameError::Metadata(format!("Failed to parse encoded output: {e}")))?
        .ok_or_else(|| FrameError::Metadata("Unsupported output container".to_string()))?;
    framed.set_exif(Some(exif_block));
    Ok(framed.encoder().bytes().to_vec())
}
