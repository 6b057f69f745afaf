//! Keyboard panel renderer.
//!
//! Maps key records onto a character grid at a fixed scale: one layout unit is 4 columns by
//! 3 lines of keycap interior, plus a one-cell border around every key. The scale never adapts
//! to the viewport, so wide boards overflow and tall boards lose their bottom rows. Both happen
//! silently; rendering has no error path.

pub mod prompt;
pub mod screen;
pub mod style;
pub mod text;

use crate::layout::legend::BLANK_LEGEND;
use crate::layout::{Key, LayoutModel};
use std::collections::HashSet;
use style::{is_special, parse_color, CellStyle, KeyClass, StyleConfig};
use text::{fit, Span, StyledBlock, StyledLine};

/// Terminal columns per layout unit of key width.
pub const COLUMNS_PER_UNIT: usize = 4;
/// Widest interior any single key is drawn with.
pub const MAX_KEY_COLUMNS: usize = 256;
/// Interior lines of every keycap.
pub const KEY_INTERIOR_HEIGHT: usize = 3;
/// Lines one keyboard row occupies, border included.
pub const KEY_ROW_HEIGHT: usize = KEY_INTERIOR_HEIGHT + 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Lines given to the typing prompt: two thirds of the height.
    pub fn prompt_budget(&self) -> usize {
        self.height * 2 / 3
    }

    /// Lines given to the keyboard: whatever the prompt leaves.
    pub fn keyboard_budget(&self) -> usize {
        self.height - self.prompt_budget()
    }
}

/// Interior width of a key in columns: `max(4, round(width * 4))`, capped at `MAX_KEY_COLUMNS`.
/// Negative and NaN widths draw as one unit.
pub fn key_cell_width(width_units: f64) -> usize {
    let columns = (width_units * COLUMNS_PER_UNIT as f64).round();
    // `as` saturates: NaN and negatives become 0, huge values usize::MAX.
    (columns as usize).clamp(COLUMNS_PER_UNIT, MAX_KEY_COLUMNS)
}

/// Columns a row of keys occupies, borders included.
pub fn row_columns(keys: &[&Key]) -> usize {
    keys.iter()
        .fold(0usize, |total, k| total.saturating_add(key_cell_width(k.width) + 2))
}

/// Keyboard rows that fit in `budget` lines, given whether a caption line is drawn.
pub fn rows_that_fit(budget: usize, captioned: bool) -> usize {
    budget.saturating_sub(usize::from(captioned)) / KEY_ROW_HEIGHT
}

/// Columns the widest keyboard row needs, borders included.
pub fn panel_width(layout: &LayoutModel) -> usize {
    layout
        .rows()
        .values()
        .map(|keys| row_columns(keys))
        .max()
        .unwrap_or(0)
}

pub fn classify(key: &Key, pressed: &HashSet<String>) -> KeyClass {
    if key.identities().iter().any(|id| pressed.contains(id)) {
        KeyClass::Pressed
    } else if key.visible_legends().any(is_special) {
        KeyClass::Special
    } else {
        KeyClass::Normal
    }
}

/// Renders the keyboard panel. `pressed` holds upper-cased key identities.
pub fn render_keyboard(
    layout: &LayoutModel,
    pressed: &HashSet<String>,
    viewport: Viewport,
    style: &StyleConfig,
) -> StyledBlock {
    let caption = layout.meta.caption();
    let max_rows = rows_that_fit(viewport.keyboard_budget(), caption.is_some());

    let mut block = StyledBlock::new();
    if let Some(caption) = caption {
        block.push_line(StyledLine::new(vec![Span::new(caption, style.caption)]));
    }

    let rows: Vec<StyledBlock> = layout
        .rows()
        .into_values()
        .take(max_rows)
        .map(|keys| render_row(&keys, pressed, style))
        .collect();

    // Rows are centered against the widest one.
    let widest = rows.iter().map(StyledBlock::width).max().unwrap_or(0);
    for mut row in rows {
        let indent = (widest - row.width()) / 2;
        for line in row.lines.iter_mut() {
            line.indent(indent);
        }
        block.append(row);
    }

    block
}

fn render_row(keys: &[&Key], pressed: &HashSet<String>, style: &StyleConfig) -> StyledBlock {
    let mut row = StyledBlock {
        lines: vec![StyledLine::default(); KEY_ROW_HEIGHT],
    };
    for key in keys {
        row.join_right(render_key(key, classify(key, pressed), style));
    }
    row
}

/// Draws one bordered keycap, `KEY_ROW_HEIGHT` lines tall.
pub fn render_key(key: &Key, class: KeyClass, style: &StyleConfig) -> StyledBlock {
    let width = key_cell_width(key.width);
    let key_style = style.key_style(class);
    let glyphs = &style.border;

    let mut face = key_style.face;
    if let Some(bg) = key.color.as_deref().and_then(parse_color) {
        face.bg = Some(bg);
    }
    if let Some(fg) = key.text_color.as_deref().and_then(parse_color) {
        face.fg = Some(fg);
    }
    let border: CellStyle = key_style.border;

    let horizontal: String = std::iter::repeat(glyphs.horizontal).take(width).collect();
    let edge = glyphs.vertical.to_string();

    let mut block = StyledBlock::new();
    block.push_line(StyledLine::new(vec![Span::new(
        format!("{}{}{}", glyphs.top_left, horizontal, glyphs.top_right),
        border,
    )]));

    // Slots 0-8 form three lines of three; the front-face slots 9-11 are not drawn.
    for group in key.legends[..9].chunks(3) {
        let text: String = group
            .iter()
            .map(|slot| {
                if slot == BLANK_LEGEND {
                    style.blank_glyph.as_str()
                } else {
                    slot.as_str()
                }
            })
            .collect();
        block.push_line(StyledLine::new(vec![
            Span::new(edge.clone(), border),
            Span::new(fit(&text, width), face),
            Span::new(edge.clone(), border),
        ]));
    }

    block.push_line(StyledLine::new(vec![Span::new(
        format!("{}{}{}", glyphs.bottom_left, horizontal, glyphs.bottom_right),
        border,
    )]));
    block
}
