use super::style::{CellStyle, StyleConfig};
use super::text::{fit, Span, StyledBlock, StyledLine};
use super::Viewport;
use crate::practice::{CharStatus, PracticeSession};

const HELP: &str = "Tab: Next prompt | Esc/Ctrl+C: Quit";

/// Bordered typing panel: the prompt coloured by what has been typed, then progress and help.
/// Lines that do not fit in the prompt budget are dropped from the bottom.
pub fn render_prompt(
    session: &PracticeSession,
    viewport: Viewport,
    style: &StyleConfig,
) -> StyledBlock {
    let budget = viewport.prompt_budget();
    if budget < 2 || viewport.width < 4 {
        return StyledBlock::new();
    }

    let progress = format!(
        "Progress: {}/{} characters | Prompt {}/{}",
        session.typed_len(),
        session.prompt_len(),
        session.prompt_index() + 1,
        session.prompt_count()
    );

    let mut content = vec![
        typed_line(session, style),
        StyledLine::default(),
        StyledLine::new(vec![Span::plain(progress)]),
        StyledLine::new(vec![Span::new(HELP, style.help)]),
    ];
    content.truncate(budget - 2);

    let inner = content
        .iter()
        .map(StyledLine::width)
        .max()
        .unwrap_or(0)
        .min(viewport.width - 4);

    let glyphs = &style.border;
    let horizontal: String = std::iter::repeat(glyphs.horizontal)
        .take(inner + 2)
        .collect();

    let mut block = StyledBlock::new();
    block.push_line(StyledLine::new(vec![Span::new(
        format!("{}{}{}", glyphs.top_left, horizontal, glyphs.top_right),
        style.panel_border,
    )]));
    for line in content {
        let mut row = StyledLine::new(vec![Span::new(
            format!("{} ", glyphs.vertical),
            style.panel_border,
        )]);
        row.extend(clip(line, inner));
        row.push(Span::new(
            format!(" {}", glyphs.vertical),
            style.panel_border,
        ));
        block.push_line(row);
    }
    block.push_line(StyledLine::new(vec![Span::new(
        format!("{}{}{}", glyphs.bottom_left, horizontal, glyphs.bottom_right),
        style.panel_border,
    )]));
    block
}

// Consecutive characters with the same status share one span.
fn typed_line(session: &PracticeSession, style: &StyleConfig) -> StyledLine {
    let mut line = StyledLine::default();
    let mut run = String::new();
    let mut run_style: Option<CellStyle> = None;

    for (ch, status) in session.char_statuses() {
        let cell = match status {
            CharStatus::Correct => style.correct,
            CharStatus::Incorrect => style.incorrect,
            CharStatus::Current => style.current,
            CharStatus::Pending => style.pending,
        };
        match run_style {
            Some(prev) if prev != cell => line.push(Span::new(std::mem::take(&mut run), prev)),
            _ => {}
        }
        run_style = Some(cell);
        run.push(ch);
    }
    if let Some(s) = run_style {
        line.push(Span::new(run, s));
    }
    line
}

/// Truncates a styled line to `columns` and pads it to exactly that width.
fn clip(line: StyledLine, columns: usize) -> StyledLine {
    let mut out = line.truncated(columns);
    out.push(Span::plain(fit("", columns - out.width())));
    out
}
