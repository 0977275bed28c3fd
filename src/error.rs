//! Error kinds raised while framing an image.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort processing of a single image.
///
/// Missing EXIF data and unreadable fonts are not represented here: both are
/// recovered where they happen (empty metadata, built-in font).
#[derive(Debug, Error)]
pub enum FrameError {
    /// The input path is neither a file nor a directory.
    #[error("No such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    /// No logo asset exists for the camera manufacturer.
    #[error("No logo for camera make {make:?} (looked for {})", .path.display())]
    LogoNotFound {
        /// Manufacturer as read from the `Make` tag, empty when absent.
        make: String,
        /// Asset path that was probed.
        path: PathBuf,
    },

    /// An EXIF field is present but cannot be interpreted.
    #[error("Malformed EXIF {tag}: {value:?}")]
    InvalidExif {
        /// Tag name, e.g. `DateTimeOriginal`.
        tag: &'static str,
        /// Raw value as read from the file.
        value: String,
    },

    /// The embedded fallback font could not be parsed.
    #[error("Font error: {0}")]
    Font(String),

    /// Decoding or encoding the raster failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Carrying the source EXIF block into the output failed.
    #[error("Metadata error: {0}")]
    Metadata(String),
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, FrameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_not_found_message_names_make_and_path() {
        let err = FrameError::LogoNotFound {
            make: "Hasselblad".into(),
            path: PathBuf::from("logo/Hasselblad.png"),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"Hasselblad\""));
        assert!(msg.contains("logo/Hasselblad.png"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: FrameError = io.into();
        assert!(matches!(err, FrameError::Io(_)));
    }
}
