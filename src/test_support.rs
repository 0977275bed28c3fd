//! Fixture builders shared by the unit tests.

use ::exif::experimental::Writer;
use ::exif::{Field, In, Rational, Tag, Value};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use img_parts::jpeg::Jpeg;
use img_parts::png::Png;
use img_parts::{Bytes, ImageEXIF};
use std::io::Cursor;
use std::path::Path;

pub fn ascii(tag: Tag, s: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![s.as_bytes().to_vec()]),
    }
}

pub fn rational(tag: Tag, num: u32, denom: u32) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![Rational { num, denom }]),
    }
}

pub fn short(tag: Tag, v: u16) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![v]),
    }
}

/// The fields of a typical camera JPEG.
pub fn camera_fields(make: &str) -> Vec<Field> {
    vec![
        ascii(Tag::Make, make),
        ascii(Tag::Model, "DC-S5M2"),
        rational(Tag::FocalLength, 35, 1),
        rational(Tag::FNumber, 18, 10),
        rational(Tag::ExposureTime, 4, 1000),
        short(Tag::PhotographicSensitivity, 400),
        ascii(Tag::DateTimeOriginal, "2023:07:04 10:15:30"),
        ascii(Tag::LensModel, "LUMIX S 35/F1.8"),
    ]
}

/// Serialize fields into a TIFF-structured EXIF block.
pub fn exif_block(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    buf.into_inner()
}

pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut out, format)
        .unwrap();
    out.into_inner()
}

pub fn plain_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(&gradient(width, height), ImageFormat::Jpeg)
}

pub fn jpeg_with_exif(width: u32, height: u32, fields: &[Field]) -> Vec<u8> {
    let bytes = encode(&gradient(width, height), ImageFormat::Jpeg);
    let mut jpeg = Jpeg::from_bytes(Bytes::from(bytes)).unwrap();
    jpeg.set_exif(Some(Bytes::from(exif_block(fields))));
    jpeg.encoder().bytes().to_vec()
}

pub fn png_with_exif(width: u32, height: u32, fields: &[Field]) -> Vec<u8> {
    let bytes = encode(&gradient(width, height), ImageFormat::Png);
    let mut png = Png::from_bytes(Bytes::from(bytes)).unwrap();
    png.set_exif(Some(Bytes::from(exif_block(fields))));
    png.encoder().bytes().to_vec()
}

/// Write a solid logo PNG into `dir` as `<make>.png`.
pub fn write_logo(dir: &Path, make: &str, width: u32, height: u32) {
    std::fs::create_dir_all(dir).unwrap();
    RgbaImage::from_pixel(width, height, Rgba([200, 0, 0, 255]))
        .save(dir.join(format!("{make}.png")))
        .unwrap();
}
