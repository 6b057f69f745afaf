use clap::Args;
use kletype::error::KtResult;
use kletype::layout::LayoutModel;
use kletype::render::style::StyleConfig;
use kletype::render::{panel_width, render_keyboard, Viewport};
use std::collections::HashSet;
use tracing::{debug, warn};

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Viewport width in columns (default: terminal width, or 120)
    #[arg(long)]
    pub width: Option<usize>,

    /// Viewport height in lines; the keyboard gets the bottom third (default: terminal height, or 45)
    #[arg(long)]
    pub height: Option<usize>,

    /// Draw a key as pressed, by its primary legend (repeatable)
    #[arg(short, long = "press")]
    pub pressed: Vec<String>,

    /// Print without ANSI colours
    #[arg(long, default_value_t = false)]
    pub plain: bool,
}

pub fn run(args: &RenderArgs, layout: &LayoutModel, style: &StyleConfig) -> KtResult<()> {
    let (term_width, term_height) = crossterm::terminal::size()
        .map(|(w, h)| (w as usize, h as usize))
        .unwrap_or((120, 45));
    let viewport = Viewport::new(
        args.width.unwrap_or(term_width),
        args.height.unwrap_or(term_height),
    );
    debug!("Rendering into {}x{}", viewport.width, viewport.height);

    let needed = panel_width(layout);
    if needed > viewport.width {
        warn!(
            "Keyboard needs {} columns but the viewport has {}",
            needed, viewport.width
        );
    }

    let pressed: HashSet<String> = args.pressed.iter().map(|p| p.to_uppercase()).collect();
    let block = render_keyboard(layout, &pressed, viewport, style);
    if block.is_empty() {
        warn!("Viewport height {} leaves no room for the keyboard", viewport.height);
        return Ok(());
    }

    if args.plain {
        println!("{}", block.plain());
    } else {
        println!("{}", block.to_ansi());
    }
    Ok(())
}
