use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for the exif-frame library.
///
/// Controls where logos and fonts are looked up, the proportions of the
/// border band, how directories are scanned, and output behavior.
///
/// # Loading
///
/// ```rust,no_run
/// use exif_frame::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.assets.logo_dir = "/opt/logos".into();
/// config.output.preserve_exif = true;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Logo directory and font files.
    pub assets: AssetsConfig,
    /// Border band proportions and text placement.
    pub frame: FrameConfig,
    /// Directory scanning behavior.
    pub batch: BatchConfig,
    /// Output behavior (EXIF carry-over, JPEG quality).
    pub output: OutputConfig,
}

/// Locations of external assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding `<Make>.png` logo files.
    pub logo_dir: PathBuf,
    /// Font for the exposure and camera lines.
    pub primary_font: PathBuf,
    /// Font for the capture time line.
    pub secondary_font: PathBuf,
}

/// Proportions of the border band and its contents.
///
/// All ratios are relative: the border to the image width, the font size
/// and logo height to the border height.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Border height as a fraction of the width for landscape images.
    pub landscape_ratio: f64,
    /// Border height as a fraction of the width for portrait and square images.
    pub portrait_ratio: f64,
    /// Font size as a fraction of the border height.
    pub font_ratio: f64,
    /// Logo height as a fraction of the border height.
    pub logo_ratio: f64,
    /// Gap in pixels between text and the image edge (or the logo).
    pub text_margin: u32,
    /// Gap in pixels between the logo and the left edge.
    pub logo_margin: u32,
    /// What each caption slot shows and how.
    pub captions: CaptionsConfig,
    /// Manufacturer logo on the left of the band.
    pub logo: LogoConfig,
}

/// The four caption slots of the band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionsConfig {
    /// Upper right: focal length, aperture, shutter, ISO.
    pub exposure: CaptionConfig,
    /// Lower right: capture time.
    pub shot_time: CaptionConfig,
    /// Upper left: camera make and model.
    pub device: CaptionConfig,
    /// Lower left: lens model.
    pub lens: CaptionConfig,
}

/// One caption slot.
///
/// Fields left out of a slot in the config file take the plain defaults
/// (enabled, EXIF text, not bold).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptionConfig {
    pub enabled: bool,
    /// Literal text printed instead of the EXIF-derived line.
    pub text: Option<String>,
    /// Repaint at 1px offsets to thicken the strokes.
    pub bold: bool,
}

/// Logo placement.
///
/// With `enabled` off no logo is drawn and the camera line starts at
/// `text_margin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    pub enabled: bool,
    /// Fixed logo file used for every image instead of `<logo_dir>/<Make>.png`.
    pub path: Option<PathBuf>,
}

/// Controls which files a directory run picks up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Descend into subdirectories instead of only the top level.
    pub recursive: bool,
    /// Match `jpg`/`png` extensions exactly, so `IMG.JPG` is skipped.
    pub case_sensitive_extensions: bool,
    /// Name of the per-source output directory.
    pub output_dir_name: String,
}

/// Output behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Copy the source EXIF block into the framed file.
    pub preserve_exif: bool,
    /// JPEG encoder quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            logo_dir: PathBuf::from("logo"),
            primary_font: PathBuf::from("/System/Library/Fonts/SFCompactItalic.ttf"),
            secondary_font: PathBuf::from("/System/Library/Fonts/Helvetica.ttc"),
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            landscape_ratio: 0.04,
            portrait_ratio: 0.07,
            font_ratio: 0.23,
            logo_ratio: 0.8,
            text_margin: 50,
            logo_margin: 10,
            captions: CaptionsConfig::default(),
            logo: LogoConfig::default(),
        }
    }
}

impl Default for CaptionsConfig {
    fn default() -> Self {
        Self {
            exposure: CaptionConfig::with_bold(true),
            shot_time: CaptionConfig::with_bold(false),
            device: CaptionConfig::with_bold(true),
            lens: CaptionConfig::with_bold(false),
        }
    }
}

impl CaptionConfig {
    fn with_bold(bold: bool) -> Self {
        Self {
            enabled: true,
            text: None,
            bold,
        }
    }
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self::with_bold(false)
    }
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            case_sensitive_extensions: false,
            output_dir_name: "tmp".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            preserve_exif: false,
            jpeg_quality: 95,
        }
    }
}

impl Config {
    /// Resolve the config file path: same directory as the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::debug!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }
}
