pub mod kle;
pub mod legend;

use crate::error::KtResult;
use legend::{Legends, DEFAULT_ALIGNMENT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_FONT_SIZE: u8 = 3;
/// Identity of the space bar, and of a typed space.
pub const SPACE_IDENTITY: &str = "SPACE";
/// Blank keys at least this wide (in layout units) are treated as the space bar.
pub const SPACE_BAR_MIN_WIDTH: f64 = 4.0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardMetadata {
    pub author: String,
    pub backcolor: String,
    pub name: String,
    pub notes: String,
    pub radii: String,
    pub switch_brand: String,
    pub switch_mount: String,
    pub switch_type: String,
}

impl KeyboardMetadata {
    /// "Keyboard: <name> by <author>", or `None` for an unnamed board.
    pub fn caption(&self) -> Option<String> {
        if self.name.is_empty() {
            return None;
        }
        let mut caption = format!("Keyboard: {}", self.name);
        if !self.author.is_empty() {
            caption.push_str(&format!(" by {}", self.author));
        }
        Some(caption)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub row: usize, // Ordinal row (not the document's y)
    pub col: usize, // Ordinal column within the row (not the document's x)
    pub width: f64,
    pub height: f64,

    // Secondary rectangle for stepped / ISO keys. Carried, never drawn.
    pub x2: f64,
    pub y2: f64,
    pub width2: f64,
    pub height2: f64,

    pub legends: Legends,
    pub color: Option<String>,
    pub text_color: Option<String>,
    pub font_size: u8,
    pub alignment: u8,

    pub decal: bool,
    pub ghost: bool,
    pub stepped: bool,
    pub nub: bool,

    pub profile: String,
    pub switch_mount: String,
    pub switch_brand: String,
    pub switch_type: String,
}

impl Key {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            width: 1.0,
            height: 1.0,
            x2: 0.0,
            y2: 0.0,
            width2: 1.0,
            height2: 1.0,
            legends: Default::default(),
            color: None,
            text_color: None,
            font_size: DEFAULT_FONT_SIZE,
            alignment: DEFAULT_ALIGNMENT,
            decal: false,
            ghost: false,
            stepped: false,
            nub: false,
            profile: String::new(),
            switch_mount: String::new(),
            switch_brand: String::new(),
            switch_type: String::new(),
        }
    }

    pub fn primary_legend(&self) -> Option<&str> {
        legend::primary_legend(&self.legends)
    }

    /// Upper-cased primary legend.
    pub fn identity(&self) -> Option<String> {
        self.primary_legend().map(str::to_uppercase)
    }

    /// Every name this key lights up under: each visible legend, upper-cased. A wide key
    /// with no legend at all is the space bar.
    pub fn identities(&self) -> Vec<String> {
        let ids: Vec<String> = self.visible_legends().map(str::to_uppercase).collect();
        if ids.is_empty() && self.width >= SPACE_BAR_MIN_WIDTH {
            return vec![SPACE_IDENTITY.to_string()];
        }
        ids
    }

    /// Legends with visible text, in slot order.
    pub fn visible_legends(&self) -> impl Iterator<Item = &str> {
        self.legends
            .iter()
            .map(String::as_str)
            .filter(|l| !legend::is_blank(l))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutModel {
    pub meta: KeyboardMetadata,
    pub keys: Vec<Key>,
}

impl LayoutModel {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KtResult<Self> {
        let content = fs::read_to_string(path)?;
        kle::decode(&content)
    }

    /// Keys grouped by row index, each row in column order.
    pub fn rows(&self) -> BTreeMap<usize, Vec<&Key>> {
        let mut rows: BTreeMap<usize, Vec<&Key>> = BTreeMap::new();
        for key in &self.keys {
            rows.entry(key.row).or_default().push(key);
        }
        rows
    }

    /// Sum of key widths (in layout units) per row.
    pub fn row_widths(&self) -> BTreeMap<usize, f64> {
        let mut widths: BTreeMap<usize, f64> = BTreeMap::new();
        for key in &self.keys {
            *widths.entry(key.row).or_insert(0.0) += key.width;
        }
        widths
    }

    pub fn max_row_width(&self) -> f64 {
        self.row_widths().values().fold(0.0f64, |max, w| max.max(*w))
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }
}
