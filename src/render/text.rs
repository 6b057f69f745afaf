//! Styled text blocks: what the renderers produce and the terminal layer prints.

use super::style::CellStyle;
use crossterm::style::StyledContent;
use std::fmt::{self, Write as _};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: CellStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: CellStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, CellStyle::default())
    }

    pub fn width(&self) -> usize {
        self.text.width()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<Span>,
}

impl StyledLine {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn push(&mut self, span: Span) {
        if !span.text.is_empty() {
            self.spans.push(span);
        }
    }

    pub fn extend(&mut self, other: StyledLine) {
        self.spans.extend(other.spans);
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// The first `columns` display columns of this line, styles kept.
    pub fn truncated(&self, columns: usize) -> StyledLine {
        let mut out = StyledLine::default();
        let mut left = columns;
        for span in &self.spans {
            if left == 0 {
                break;
            }
            let text = truncate(&span.text, left);
            left -= text.width();
            out.push(Span::new(text, span.style));
        }
        out
    }

    pub fn indent(&mut self, columns: usize) {
        if columns > 0 {
            self.spans.insert(0, Span::plain(" ".repeat(columns)));
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledBlock {
    pub lines: Vec<StyledLine>,
}

impl StyledBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: StyledLine) {
        self.lines.push(line);
    }

    /// Stacks `other` below this block.
    pub fn append(&mut self, other: StyledBlock) {
        self.lines.extend(other.lines);
    }

    /// Places `other` to the right of this block, line by line. Both blocks must be
    /// the same height; extra lines of the taller block are kept as-is.
    pub fn join_right(&mut self, other: StyledBlock) {
        let mut other_lines = other.lines.into_iter();
        for line in self.lines.iter_mut() {
            if let Some(next) = other_lines.next() {
                line.extend(next);
            }
        }
        self.lines.extend(other_lines);
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn width(&self) -> usize {
        self.lines.iter().map(StyledLine::width).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text without styling, one line per row.
    pub fn plain(&self) -> String {
        self.lines
            .iter()
            .map(StyledLine::plain)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Text with ANSI escape sequences, one line per row.
    pub fn to_ansi(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StyledBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            for span in &line.spans {
                if span.style.is_plain() {
                    f.write_str(&span.text)?;
                } else {
                    write!(
                        f,
                        "{}",
                        StyledContent::new(span.style.content_style(), span.text.as_str())
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Cuts `text` to at most `columns` display columns. No ellipsis.
pub fn truncate(text: &str, columns: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > columns {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// Truncates and right-pads `text` to exactly `columns` display columns.
pub fn fit(text: &str, columns: usize) -> String {
    let mut out = truncate(text, columns);
    let w = out.width();
    out.push_str(&" ".repeat(columns.saturating_sub(w)));
    out
}
