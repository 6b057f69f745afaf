use crate::error::KtResult;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub practice: PracticeParams,
    #[command(flatten)]
    pub theme: ThemeColors,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PracticeParams {
    /// How long a typed key stays highlighted
    #[arg(long, default_value_t = 100)]
    pub clear_delay_ms: u64,
    /// Pause after a completed prompt before the next one
    #[arg(long, default_value_t = 1000)]
    pub advance_delay_ms: u64,
    #[arg(long, default_value_t = 80)]
    pub min_width: usize,
    #[arg(long, default_value_t = 24)]
    pub min_height: usize,
    /// Practice sentence (repeatable). Built-in pangrams are used when none is given.
    #[arg(long = "prompt")]
    pub prompts: Vec<String>,
}

impl Default for PracticeParams {
    fn default() -> Self {
        Self {
            clear_delay_ms: 100,
            advance_delay_ms: 1000,
            min_width: 80,
            min_height: 24,
            prompts: Vec::new(),
        }
    }
}

/// Key colours: ANSI-256 index, `#rgb`/`#rrggbb`, or a colour name. Empty = terminal default.
#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThemeColors {
    #[arg(long, default_value = "255")]
    pub normal_fg: String,
    #[arg(long, default_value = "236")]
    pub normal_bg: String,
    #[arg(long, default_value = "240")]
    pub normal_border: String,

    #[arg(long, default_value = "33")]
    pub special_fg: String,
    #[arg(long, default_value = "237")]
    pub special_bg: String,
    #[arg(long, default_value = "33")]
    pub special_border: String,

    #[arg(long, default_value = "0")]
    pub pressed_fg: String,
    #[arg(long, default_value = "46")]
    pub pressed_bg: String,
    #[arg(long, default_value = "46")]
    pub pressed_border: String,

    /// Shown for legend slots that are blank
    #[arg(long, default_value = " ")]
    pub blank_glyph: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            normal_fg: "255".to_string(),
            normal_bg: "236".to_string(),
            normal_border: "240".to_string(),
            special_fg: "33".to_string(),
            special_bg: "237".to_string(),
            special_border: "33".to_string(),
            pressed_fg: "0".to_string(),
            pressed_bg: "46".to_string(),
            pressed_border: "46".to_string(),
            blank_glyph: " ".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KtResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies every option the user typed on the command line over the file values.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(practice.clear_delay_ms);
        update_if_present!(practice.advance_delay_ms);
        update_if_present!(practice.min_width);
        update_if_present!(practice.min_height);
        update_if_present!(practice.prompts);

        update_if_present!(theme.normal_fg);
        update_if_present!(theme.normal_bg);
        update_if_present!(theme.normal_border);
        update_if_present!(theme.special_fg);
        update_if_present!(theme.special_bg);
        update_if_present!(theme.special_border);
        update_if_present!(theme.pressed_fg);
        update_if_present!(theme.pressed_bg);
        update_if_present!(theme.pressed_border);
        update_if_present!(theme.blank_glyph);
    }
}
