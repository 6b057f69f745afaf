use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event},
    execute, queue,
    style::{Print, PrintStyledContent, StyledContent},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use kletype::render::text::StyledBlock;
use kletype::render::Viewport;
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Raw-mode, alternate-screen terminal. Dropping it restores the user's screen.
pub struct Terminal;

impl Terminal {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }

    pub fn viewport(&self) -> io::Result<Viewport> {
        let (width, height) = size()?;
        Ok(Viewport::new(width as usize, height as usize))
    }

    /// Draws a whole frame from the top-left corner. Lines are clipped to the
    /// terminal width so nothing wraps.
    pub fn draw(&mut self, frame: &StyledBlock, viewport: Viewport) -> io::Result<()> {
        let mut out = stdout().lock();
        for (y, line) in frame.lines.iter().take(viewport.height).enumerate() {
            queue!(out, MoveTo(0, y as u16), Clear(ClearType::CurrentLine))?;
            for span in line.truncated(viewport.width).spans {
                if span.style.is_plain() {
                    queue!(out, Print(span.text))?;
                } else {
                    queue!(
                        out,
                        PrintStyledContent(StyledContent::new(
                            span.style.content_style(),
                            span.text
                        ))
                    )?;
                }
            }
        }
        queue!(out, Clear(ClearType::FromCursorDown))?;
        out.flush()
    }

    /// Waits up to `timeout` for an event; `None` blocks until one arrives.
    pub fn next_event(&self, timeout: Option<Duration>) -> io::Result<Option<Event>> {
        match timeout {
            Some(t) if !poll(t)? => Ok(None),
            _ => read().map(Some),
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
