//! # exif-frame
//!
//! Add a white caption band under a photo, filled from its EXIF metadata:
//! exposure settings and capture time on the right, the manufacturer logo
//! with camera and lens on the left.
//!
//! ## Quick Start
//!
//! The pipeline module handles the whole read → frame → write flow for a
//! file or a directory:
//!
//! ```rust,no_run
//! use exif_frame::config::Config;
//! use exif_frame::pipeline;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Some("config.json".as_ref()))?;
//!
//!     // Frames every .jpg/.png in ./photos into ./photos/tmp/
//!     let report = pipeline::run("./photos".as_ref(), None, &config)?;
//!
//!     for result in &report.results {
//!         match (&result.output, &result.error) {
//!             (Some(out), _) => println!("Framed: {}", out.display()),
//!             (_, Some(err)) => eprintln!("Error processing {}: {err}", result.path.display()),
//!             _ => {}
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! Each stage can be driven on its own:
//!
//! ```rust,no_run
//! use exif_frame::border::{BorderGeometry, add_border};
//! use exif_frame::config::FrameConfig;
//! use exif_frame::exif::read_exif;
//! use exif_frame::overlay::{self, Band, Fonts};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let path = Path::new("photo.jpg");
//!     let frame = FrameConfig::default();
//!
//!     // 1. Read EXIF (empty when the file has none)
//!     let exif = read_exif(path);
//!     println!("Camera: {:?}", exif.text("Model"));
//!
//!     // 2. Grow the canvas
//!     let image = image::open(path)?;
//!     let border = BorderGeometry::for_dimensions(image.width(), image.height());
//!     let mut canvas = add_border(&image, &border);
//!
//!     // 3. Caption the band
//!     let band = Band::bottom_of(&canvas, border.height());
//!     let fonts = Fonts::builtin()?;
//!     overlay::add_exposure_info(&mut canvas, &band, &exif, &fonts, &frame)?;
//!     overlay::add_shot_time(&mut canvas, &band, &exif, &fonts, &frame)?;
//!
//!     canvas.save("framed.png")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`border`]: band geometry and canvas compositing
//! - [`config`]: configuration types and loading/saving
//! - [`error`]: the library error type
//! - [`exif`]: EXIF extraction into a tag-name map
//! - [`format`]: caption strings built from EXIF values
//! - [`logo`]: manufacturer logo lookup and placement
//! - [`overlay`]: font loading and caption drawing
//! - [`pipeline`]: file/directory driver, image collection, output encoding

pub mod border;
pub mod config;
pub mod error;
pub mod exif;
pub mod format;
pub mod logo;
pub mod overlay;
pub mod pipeline;

#[cfg(test)]
mod test_support;
