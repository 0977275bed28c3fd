//! EXIF metadata extraction.
//!
//! - [`read_exif`] / [`read_exif_from_bytes`]: collect the primary image's
//!   tags into an [`ExifData`] map keyed by tag name
//! - [`tag_name`]: the numeric tag ID → name table used for the keys
//!
//! Extraction never fails: images without EXIF produce an empty map.

mod reader;
mod tags;

pub use reader::{ExifData, ExifValue, read_exif, read_exif_from_bytes};
pub use tags::tag_name;
