use ::exif::{Context, Field, In, Reader, Value};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use super::tags::tag_name;

/// A single EXIF value, reduced to the first component of the field.
///
/// Multi-valued fields (ISO is stored as a SHORT array) keep only their
/// first element, which is what every caption consumer wants.
#[derive(Debug, Clone, PartialEq)]
pub enum ExifValue {
    Text(String),
    Integer(i64),
    Rational { num: u32, den: u32 },
    SignedRational { num: i32, den: i32 },
    Float(f64),
    Bytes(Vec<u8>),
}

impl ExifValue {
    /// Numeric value, if the field is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Integer(v) => Some(v as f64),
            Self::Rational { num, den } if den != 0 => Some(num as f64 / den as f64),
            Self::SignedRational { num, den } if den != 0 => Some(num as f64 / den as f64),
            Self::Float(v) => Some(v),
            Self::Text(ref s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text content, if the field is an ASCII string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExifValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Rational { num, den } => write!(f, "{num}/{den}"),
            Self::SignedRational { num, den } => write!(f, "{num}/{den}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// EXIF tags of the primary image, keyed by tag name.
#[derive(Debug, Clone, Default)]
pub struct ExifData {
    fields: BTreeMap<String, ExifValue>,
}

impl ExifData {
    pub fn get(&self, tag: &str) -> Option<&ExifValue> {
        self.fields.get(tag)
    }

    /// Text of a string tag, `None` when absent or blank.
    pub fn text(&self, tag: &str) -> Option<&str> {
        self.get(tag)
            .and_then(ExifValue::as_text)
            .filter(|s| !s.is_empty())
    }

    pub fn insert(&mut self, tag: impl Into<String>, value: ExifValue) {
        self.fields.insert(tag.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExifValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, ExifValue)> for ExifData {
    fn from_iter<I: IntoIterator<Item = (String, ExifValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Read EXIF data from an image file.
///
/// Never fails: a missing file, an image without EXIF, or a corrupt
/// block all yield empty data and a log line.
pub fn read_exif(path: &Path) -> ExifData {
    match std::fs::read(path) {
        Ok(bytes) => read_exif_from_bytes(&bytes),
        Err(e) => {
            log::warn!("Failed to read {}: {e}", path.display());
            ExifData::default()
        }
    }
}

/// Read EXIF data from an encoded image (JPEG, PNG, TIFF, WebP, HEIF).
pub fn read_exif_from_bytes(bytes: &[u8]) -> ExifData {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(e) => {
            log::warn!("No EXIF data: {e}");
            return ExifData::default();
        }
    };

    exif.fields()
        .filter(|field| field.ifd_num == In::PRIMARY)
        .filter_map(|field| Some((field_name(field), convert_value(&field.value)?)))
        .collect()
}

/// Resolve a field's tag to a name, preferring the conventional table.
fn field_name(field: &Field) -> String {
    let known = match field.tag.context() {
        Context::Tiff | Context::Exif => tag_name(field.tag.number()),
        _ => None,
    };
    match known {
        Some(name) => name.to_string(),
        None => field.tag.to_string(),
    }
}

fn convert_value(value: &Value) -> Option<ExifValue> {
    match value {
        Value::Ascii(strings) => {
            let raw = strings.first()?;
            let text = String::from_utf8_lossy(raw);
            Some(ExifValue::Text(text.trim_end_matches('\0').trim().to_string()))
        }
        Value::Byte(v) => v.first().map(|&n| ExifValue::Integer(n.into())),
        Value::Short(v) => v.first().map(|&n| ExifValue::Integer(n.into())),
        Value::Long(v) => v.first().map(|&n| ExifValue::Integer(n.into())),
        Value::SByte(v) => v.first().map(|&n| ExifValue::Integer(n.into())),
        Value::SShort(v) => v.first().map(|&n| ExifValue::Integer(n.into())),
        Value::SLong(v) => v.first().map(|&n| ExifValue::Integer(n.into())),
        Value::Rational(v) => v.first().map(|r| ExifValue::Rational {
            num: r.num,
            den: r.denom,
        }),
        Value::SRational(v) => v.first().map(|r| ExifValue::SignedRational {
            num: r.num,
            den: r.denom,
        }),
        Value::Float(v) => v.first().map(|&n| ExifValue::Float(n.into())),
        Value::Double(v) => v.first().map(|&n| ExifValue::Float(n)),
        Value::Undefined(bytes, _) => Some(ExifValue::Bytes(bytes.clone())),
        Value::Unknown(..) => None,
    }
}
