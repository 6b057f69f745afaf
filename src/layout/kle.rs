//! Decoder for Keyboard Layout Editor "raw data" documents.
//!
//! The document is a JSON5 array. Element 0 may be a metadata object; every array element is a
//! row that interleaves property objects with legend strings:
//!
//! ```text
//! [ {name: "60%", author: "me"},
//!   ["~\n`", "!\n1", {w: 2}, "Backspace"],
//!   [{w: 1.5}, "Tab", "Q", "W"], ]
//! ```
//!
//! Positions are ordinal. The native `x`/`y`/`r*` properties are ignored, so a key's column is
//! simply how many keys precede it in its row.

use super::legend::{normalize_legends, MAX_ALIGNMENT};
use super::{Key, KeyboardMetadata, LayoutModel};
use crate::error::{KleError, KtResult};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Properties collected from one or more property objects, waiting for the next legend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingProperties {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub x2: Option<f64>,
    pub y2: Option<f64>,
    pub width2: Option<f64>,
    pub height2: Option<f64>,
    pub color: Option<String>,
    pub text_color: Option<String>,
    pub font_size: Option<u8>,
    pub alignment: Option<u8>,
    pub profile: Option<String>,
    pub decal: Option<bool>,
    pub ghost: Option<bool>,
    pub nub: Option<bool>,
    pub stepped: Option<bool>,
    pub switch_mount: Option<String>,
    pub switch_brand: Option<String>,
    pub switch_type: Option<String>,
}

/// One item of a row, after dropping anything that is neither an object nor a string.
#[derive(Debug, Clone, PartialEq)]
pub enum RowToken {
    Properties(PendingProperties),
    Legend(String),
}

impl PendingProperties {
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let mut props = Self::default();
        for (name, value) in record {
            props.set(name, value);
        }
        props
    }

    fn set(&mut self, name: &str, value: &Value) {
        match name {
            "w" => self.width = number(name, value),
            "h" => self.height = number(name, value),
            "x2" => self.x2 = number(name, value),
            "y2" => self.y2 = number(name, value),
            "w2" => self.width2 = number(name, value),
            "h2" => self.height2 = number(name, value),
            "c" => self.color = text(name, value),
            "t" => self.text_color = text(name, value).and_then(|t| first_line(&t)),
            "f" => {
                self.font_size = integer(name, value).and_then(|f| match u8::try_from(f) {
                    Ok(f) => Some(f),
                    Err(_) => {
                        warn!("Ignoring font size {} (expected 0..={})", f, u8::MAX);
                        None
                    }
                })
            }
            "a" => {
                self.alignment = integer(name, value).and_then(|a| match u8::try_from(a) {
                    Ok(a) if a <= MAX_ALIGNMENT => Some(a),
                    _ => {
                        warn!("Ignoring alignment {} (expected 0..={})", a, MAX_ALIGNMENT);
                        None
                    }
                })
            }
            "p" => self.profile = text(name, value),
            "d" => self.decal = flag(name, value),
            "g" => self.ghost = flag(name, value),
            "n" => self.nub = flag(name, value),
            "l" => self.stepped = flag(name, value),
            "sm" => self.switch_mount = text(name, value),
            "sb" => self.switch_brand = text(name, value),
            "st" => self.switch_type = text(name, value),
            _ => debug!("Ignoring key property '{}'", name),
        }
    }

    /// Overlays `later` onto `self`; properties set in `later` win.
    pub fn merge(&mut self, later: PendingProperties) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(
                    if later.$field.is_some() {
                        self.$field = later.$field;
                    }
                )*
            };
        }

        overlay!(
            width, height, x2, y2, width2, height2, color, text_color, font_size, alignment,
            profile, decal, ghost, nub, stepped, switch_mount, switch_brand, switch_type
        );
    }

    fn apply(self, key: &mut Key) {
        if let Some(w) = self.width {
            key.width = w;
        }
        if let Some(h) = self.height {
            key.height = h;
        }
        key.width2 = self.width2.unwrap_or(key.width);
        key.height2 = self.height2.unwrap_or(key.height);
        key.x2 = self.x2.unwrap_or(0.0);
        key.y2 = self.y2.unwrap_or(0.0);
        key.color = self.color;
        key.text_color = self.text_color;
        if let Some(f) = self.font_size {
            key.font_size = f;
        }
        if let Some(a) = self.alignment {
            key.alignment = a;
        }
        key.profile = self.profile.unwrap_or_default();
        key.decal = self.decal.unwrap_or(false);
        key.ghost = self.ghost.unwrap_or(false);
        key.nub = self.nub.unwrap_or(false);
        key.stepped = self.stepped.unwrap_or(false);
        key.switch_mount = self.switch_mount.unwrap_or_default();
        key.switch_brand = self.switch_brand.unwrap_or_default();
        key.switch_type = self.switch_type.unwrap_or_default();
    }
}

/// Parses a whole document into a layout.
pub fn decode(content: &str) -> KtResult<LayoutModel> {
    let document: Value = json5::from_str(content)?;

    let elements = document.as_array().ok_or_else(|| {
        KleError::Decode(format!(
            "top-level value must be an array of rows, found {}",
            kind(&document)
        ))
    })?;

    let mut model = LayoutModel::default();
    let mut row_index = 0;

    for (position, element) in elements.iter().enumerate() {
        match element {
            Value::Object(record) if position == 0 => {
                model.meta = parse_metadata(record);
            }
            Value::Array(items) => {
                let keys = decode_row(row_index, tokenize_row(items))?;
                debug!("Row {}: {} keys", row_index, keys.len());
                model.keys.extend(keys);
                row_index += 1;
            }
            other => debug!("Skipping top-level {} at position {}", kind(other), position),
        }
    }

    info!(
        "Decoded layout '{}': {} rows, {} keys",
        model.meta.name,
        row_index,
        model.keys.len()
    );
    Ok(model)
}

/// Copies the recognized metadata fields; anything else in the record is ignored.
pub fn parse_metadata(record: &Map<String, Value>) -> KeyboardMetadata {
    let mut meta = KeyboardMetadata::default();
    for (name, value) in record {
        let Some(text) = value.as_str() else {
            debug!("Ignoring non-text metadata field '{}'", name);
            continue;
        };
        let slot = match name.as_str() {
            "author" => &mut meta.author,
            "backcolor" => &mut meta.backcolor,
            "name" => &mut meta.name,
            "notes" => &mut meta.notes,
            "radii" => &mut meta.radii,
            "switchBrand" => &mut meta.switch_brand,
            "switchMount" => &mut meta.switch_mount,
            "switchType" => &mut meta.switch_type,
            _ => continue,
        };
        *slot = text.to_string();
    }
    meta
}

pub fn tokenize_row(items: &[Value]) -> Vec<RowToken> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(RowToken::Properties(PendingProperties::from_record(
                record,
            ))),
            Value::String(legend) => Some(RowToken::Legend(legend.clone())),
            other => {
                debug!("Skipping {} inside a row", kind(other));
                None
            }
        })
        .collect()
}

/// Folds a row's tokens into keys. Pending properties apply to exactly the next legend.
pub fn decode_row(row: usize, tokens: Vec<RowToken>) -> KtResult<Vec<Key>> {
    let mut keys = Vec::new();
    let mut pending: Option<PendingProperties> = None;

    for token in tokens {
        match token {
            RowToken::Properties(props) => match pending.as_mut() {
                Some(current) => current.merge(props),
                None => pending = Some(props),
            },
            RowToken::Legend(text) => {
                let mut key = Key::new(row, keys.len());
                if let Some(props) = pending.take() {
                    props.apply(&mut key);
                }
                key.legends = normalize_legends(&text, key.alignment)?;
                keys.push(key);
            }
        }
    }

    Ok(keys)
}

fn number(name: &str, value: &Value) -> Option<f64> {
    let n = value.as_f64();
    if n.is_none() {
        warn!("Ignoring property '{}': expected a number, got {}", name, value);
    }
    n
}

fn integer(name: &str, value: &Value) -> Option<i64> {
    let n = value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64));
    if n.is_none() {
        warn!("Ignoring property '{}': expected an integer, got {}", name, value);
    }
    n
}

fn text(name: &str, value: &Value) -> Option<String> {
    let s = value.as_str().map(str::to_string);
    if s.is_none() {
        warn!("Ignoring property '{}': expected a string, got {}", name, value);
    }
    s
}

fn flag(name: &str, value: &Value) -> Option<bool> {
    let b = value.as_bool();
    if b.is_none() {
        warn!("Ignoring property '{}': expected a boolean, got {}", name, value);
    }
    b
}

// `t` holds one colour per legend line; the first one colours the whole key.
fn first_line(colors: &str) -> Option<String> {
    colors
        .split('\n')
        .map(str::trim)
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
