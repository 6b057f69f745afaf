use crate::terminal::Terminal;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use kletype::config::Config;
use kletype::error::KtResult;
use kletype::layout::LayoutModel;
use kletype::practice::PracticeSession;
use kletype::render::screen::{render_screen, ScreenState};
use kletype::render::style::StyleConfig;
use kletype::render::{panel_width, Viewport};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run(layout: &LayoutModel, config: &Config, style: &StyleConfig) -> KtResult<()> {
    let params = &config.practice;
    let min_size = Viewport::new(params.min_width, params.min_height);
    let mut session = PracticeSession::new(params);

    info!("🎯 Starting practice with {} prompts", session.prompt_count());

    // Checked before the alternate screen takes over stderr's terminal.
    let (columns, _) = crossterm::terminal::size()?;
    let needed = panel_width(layout);
    if needed > columns as usize {
        warn!(
            "Keyboard needs {} columns but the terminal has {}",
            needed, columns
        );
    }

    let mut term = Terminal::new()?;

    loop {
        let viewport = term.viewport()?;
        let frame = render_screen(
            &ScreenState {
                layout,
                session: &session,
                viewport,
                min_size,
            },
            style,
        );
        term.draw(&frame, viewport)?;

        let timeout = session
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()));

        if let Some(Event::Key(key)) = term.next_event(timeout)? {
            let too_small = viewport.width < min_size.width || viewport.height < min_size.height;
            if handle_key(&mut session, key, too_small) == Flow::Quit {
                break;
            }
        }
        session.tick(Instant::now());
    }

    info!("👋 Practice finished on prompt {}", session.prompt_index() + 1);
    Ok(())
}

fn handle_key(session: &mut PracticeSession, key: KeyEvent, too_small: bool) -> Flow {
    if key.kind != KeyEventKind::Press {
        return Flow::Continue;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Flow::Quit,
        KeyCode::Esc => Flow::Quit,
        KeyCode::Char('q') if too_small => Flow::Quit,
        _ if too_small => Flow::Continue,
        KeyCode::Tab => {
            session.next_prompt();
            Flow::Continue
        }
        KeyCode::Backspace => {
            session.backspace();
            Flow::Continue
        }
        KeyCode::Char(ch) => {
            session.type_char(ch, Instant::now());
            Flow::Continue
        }
        _ => Flow::Continue,
    }
}
