//! Border band geometry and compositing.

use image::{DynamicImage, Rgba, RgbaImage, imageops};

use crate::config::FrameConfig;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Thickness of the border on each side, in pixels.
///
/// Only the bottom edge carries a band; the other sides are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGeometry {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl BorderGeometry {
    /// Band height from the image shape: 4 % of the width for landscape
    /// images, 7 % for portrait and square ones, truncated to whole pixels.
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        Self::with_ratios(width, height, &FrameConfig::default())
    }

    /// Same as [`for_dimensions`](Self::for_dimensions) with configured ratios.
    pub fn with_ratios(width: u32, height: u32, frame: &FrameConfig) -> Self {
        let ratio = if width > height {
            frame.landscape_ratio
        } else {
            frame.portrait_ratio
        };
        Self {
            top: 0,
            right: 0,
            bottom: (f64::from(width) * ratio) as u32,
            left: 0,
        }
    }

    /// Height of the bottom band.
    pub fn height(&self) -> u32 {
        self.bottom
    }
}

/// Return a copy of `image` on a white canvas grown by `border`.
///
/// The original pixels are copied unchanged; with the default geometry they
/// sit at the top and the band fills the rows below.
pub fn add_border(image: &DynamicImage, border: &BorderGeometry) -> RgbaImage {
    let width = image.width() + border.left + border.right;
    let height = image.height() + border.top + border.bottom;

    let mut canvas = RgbaImage::from_pixel(width, height, WHITE);
    imageops::replace(
        &mut canvas,
        &image.to_rgba8(),
        i64::from(border.left),
        i64::from(border.top),
    );
    canvas
}
