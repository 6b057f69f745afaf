use super::prompt::render_prompt;
use super::style::StyleConfig;
use super::text::{fit, Span, StyledBlock, StyledLine};
use super::{render_keyboard, Viewport};
use crate::layout::LayoutModel;
use crate::practice::PracticeSession;

/// Everything one frame of the practice screen depends on.
pub struct ScreenState<'a> {
    pub layout: &'a LayoutModel,
    pub session: &'a PracticeSession,
    pub viewport: Viewport,
    pub min_size: Viewport,
}

/// Full practice screen: prompt panel, keyboard panel and a status line on the last row.
/// A terminal below `min_size` gets an explanation instead of the panels.
pub fn render_screen(state: &ScreenState<'_>, style: &StyleConfig) -> StyledBlock {
    let ScreenState {
        layout,
        session,
        viewport,
        min_size,
    } = *state;
    if viewport.height == 0 || viewport.width == 0 {
        return StyledBlock::new();
    }

    // The status line takes the last row.
    let panels = Viewport::new(viewport.width, viewport.height - 1);

    let mut screen = if viewport.width < min_size.width || viewport.height < min_size.height {
        too_small(viewport, min_size, style)
    } else {
        let mut prompt = center(render_prompt(session, panels, style), panels.width);
        pad_to(&mut prompt, panels.prompt_budget());
        let keyboard = render_keyboard(layout, session.pressed(), panels, style);
        prompt.append(center(keyboard, panels.width));
        prompt
    };

    pad_to(&mut screen, panels.height);
    screen.lines.truncate(panels.height);
    screen.push_line(status_line(viewport, style));
    screen
}

fn too_small(viewport: Viewport, min_size: Viewport, style: &StyleConfig) -> StyledBlock {
    let message = format!(
        "Terminal too small: need at least {}x{}, got {}x{}",
        min_size.width, min_size.height, viewport.width, viewport.height
    );
    let mut block = StyledBlock::new();
    block.push_line(StyledLine::new(vec![Span::new(message, style.error)]));
    block.push_line(StyledLine::default());
    block.push_line(StyledLine::new(vec![Span::new(
        "Please resize your terminal. Press 'q' or Ctrl+C to quit.",
        style.help,
    )]));
    center(block, viewport.width)
}

fn status_line(viewport: Viewport, style: &StyleConfig) -> StyledLine {
    let left = "| MAIN |";
    let right = format!("[ {}x{} ]", viewport.width, viewport.height);
    let spacing = viewport.width.saturating_sub(left.len() + right.len());
    let text = format!("{}{}{}", left, " ".repeat(spacing), right);
    StyledLine::new(vec![Span::new(fit(&text, viewport.width), style.status_line)])
}

/// Indents every line so the block sits in the middle of `width` columns.
pub fn center(mut block: StyledBlock, width: usize) -> StyledBlock {
    let indent = width.saturating_sub(block.width()) / 2;
    for line in block.lines.iter_mut() {
        line.indent(indent);
    }
    block
}

fn pad_to(block: &mut StyledBlock, height: usize) {
    while block.height() < height {
        block.push_line(StyledLine::default());
    }
}
