use crate::config::ThemeColors;
use crate::error::{KleError, KtResult};
use crossterm::style::{Attribute, Color, ContentStyle};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl CellStyle {
    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            bold: false,
        }
    }

    pub fn on(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && !self.bold
    }

    pub fn content_style(&self) -> ContentStyle {
        let mut style = ContentStyle::new();
        style.foreground_color = self.fg;
        style.background_color = self.bg;
        if self.bold {
            style.attributes.set(Attribute::Bold);
        }
        style
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStyle {
    pub face: CellStyle,
    pub border: CellStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderGlyphs {
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum KeyClass {
    Normal,
    Special,
    Pressed,
}

/// Every colour and glyph the renderers use. Built once and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    pub normal: KeyStyle,
    pub special: KeyStyle,
    pub pressed: KeyStyle,
    pub border: BorderGlyphs,
    /// Drawn for legend slots that hold the blank placeholder.
    pub blank_glyph: String,
    pub caption: CellStyle,

    // Prompt panel
    pub panel_border: CellStyle,
    pub correct: CellStyle,
    pub incorrect: CellStyle,
    pub current: CellStyle,
    pub pending: CellStyle,
    pub help: CellStyle,

    pub status_line: CellStyle,
    pub error: CellStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let theme = ThemeColors::default();
        Self {
            normal: KeyStyle {
                face: CellStyle::fg(Color::AnsiValue(255)).on(Color::AnsiValue(236)),
                border: CellStyle::fg(Color::AnsiValue(240)),
            },
            special: KeyStyle {
                face: CellStyle::fg(Color::AnsiValue(33)).on(Color::AnsiValue(237)),
                border: CellStyle::fg(Color::AnsiValue(33)),
            },
            pressed: KeyStyle {
                face: CellStyle::fg(Color::AnsiValue(0))
                    .on(Color::AnsiValue(46))
                    .bold(),
                border: CellStyle::fg(Color::AnsiValue(46)),
            },
            border: BorderGlyphs::ROUNDED,
            blank_glyph: theme.blank_glyph,
            caption: CellStyle::fg(Color::AnsiValue(212)).bold(),
            panel_border: CellStyle::fg(Color::AnsiValue(62)),
            correct: CellStyle::fg(Color::AnsiValue(46)),
            incorrect: CellStyle::fg(Color::AnsiValue(196)),
            current: CellStyle::fg(Color::AnsiValue(226)).on(Color::AnsiValue(240)),
            pending: CellStyle::fg(Color::AnsiValue(244)),
            help: CellStyle::fg(Color::AnsiValue(241)),
            status_line: CellStyle::fg(Color::AnsiValue(255))
                .on(Color::AnsiValue(236))
                .bold(),
            error: CellStyle::fg(Color::AnsiValue(196)).bold(),
        }
    }
}

impl StyleConfig {
    /// Builds the key styles from user-supplied colour strings.
    pub fn from_theme(theme: &ThemeColors) -> KtResult<Self> {
        let key_style = |fg: &str, bg: &str, border: &str, bold: bool| -> KtResult<KeyStyle> {
            Ok(KeyStyle {
                face: CellStyle {
                    fg: theme_color(fg)?,
                    bg: theme_color(bg)?,
                    bold,
                },
                border: CellStyle {
                    fg: theme_color(border)?,
                    bg: None,
                    bold: false,
                },
            })
        };

        Ok(Self {
            normal: key_style(&theme.normal_fg, &theme.normal_bg, &theme.normal_border, false)?,
            special: key_style(
                &theme.special_fg,
                &theme.special_bg,
                &theme.special_border,
                false,
            )?,
            pressed: key_style(
                &theme.pressed_fg,
                &theme.pressed_bg,
                &theme.pressed_border,
                true,
            )?,
            blank_glyph: theme.blank_glyph.clone(),
            ..Self::default()
        })
    }

    pub fn key_style(&self, class: KeyClass) -> &KeyStyle {
        match class {
            KeyClass::Normal => &self.normal,
            KeyClass::Special => &self.special,
            KeyClass::Pressed => &self.pressed,
        }
    }
}

// Empty means "terminal default".
fn theme_color(text: &str) -> KtResult<Option<Color>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_color(text)
        .map(Some)
        .ok_or_else(|| KleError::Config(format!("Unrecognized colour '{}'", text)))
}

/// Accepts ANSI-256 indices ("240"), hex ("#ccc", "#1a2b3c") and crossterm colour names
/// ("dark_grey", "cyan").
pub fn parse_color(text: &str) -> Option<Color> {
    let text = text.trim();
    if let Ok(index) = text.parse::<u8>() {
        return Some(Color::AnsiValue(index));
    }
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }
    Color::try_from(text).ok()
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Color::Rgb {
                r: expand(0)?,
                g: expand(1)?,
                b: expand(2)?,
            })
        }
        6 => Some(Color::Rgb {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
        }),
        _ => None,
    }
}

/// Well-known modifier and whitespace keys, drawn with the special style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr)]
pub enum SpecialKey {
    Tab,
    #[strum(serialize = "Caps Lock")]
    CapsLock,
    Shift,
    Enter,
    Backspace,
    Space,
    #[strum(serialize = "CMD")]
    Cmd,
    Alt,
    #[strum(serialize = "FN")]
    Function,
    #[strum(serialize = "win")]
    Win,
    #[strum(serialize = "menü")]
    Menu,
    Ctrl,
    Esc,
}

/// Case-insensitive equality or substring match against the special key names.
pub fn is_special(label: &str) -> bool {
    let label = label.to_lowercase();
    SpecialKey::iter().any(|special| {
        let name = special.as_ref().to_lowercase();
        label == name || label.contains(&name)
    })
}
