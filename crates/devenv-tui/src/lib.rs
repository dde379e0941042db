mod dir_picker;
mod form_flow;
mod handoff;
mod keymap;
mod repo_picker;
mod theme;
mod ui;

use std::io::{Stdout, stdout};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use devenv_app::App;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::form_flow::{FormOptions, FormScreen, FormSignal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiExit {
    Completed,
    Canceled,
}

pub(crate) struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub(crate) fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;

        let mut out = stdout();
        if let Err(error) =
            execute!(out, EnterAlternateScreen, Hide).context("failed to enter alternate screen")
        {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout()))
            .context("failed to create terminal backend")
        {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let mut out = stdout();
                let _ = execute!(out, Show, LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(error)
            }
        }
    }

    pub(crate) fn draw<F>(&mut self, draw_fn: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame<'_>),
    {
        self.terminal
            .draw(draw_fn)
            .context("failed to render terminal")?;
        Ok(())
    }

    pub(crate) fn autoresize(&mut self) -> Result<()> {
        self.terminal
            .autoresize()
            .context("failed to autoresize terminal")?;
        Ok(())
    }

    /// Hands the terminal to a blocking foreground body and takes it back
    /// afterwards. The interactive buffers survive; the screen is cleared
    /// on resume to force a full redraw.
    pub(crate) fn suspend<T>(&mut self, body: impl FnOnce() -> T) -> Result<T> {
        let value = handoff::with_suspended(
            || {
                disable_raw_mode().context("failed to suspend raw mode")?;
                let mut out = stdout();
                execute!(out, Show, LeaveAlternateScreen)
                    .context("failed to leave alternate screen")
            },
            || {
                enable_raw_mode().context("failed to restore raw mode")?;
                let mut out = stdout();
                execute!(out, EnterAlternateScreen, Hide)
                    .context("failed to re-enter alternate screen")
            },
            body,
        )?;

        self.terminal
            .clear()
            .context("failed to clear terminal after resume")?;
        Ok(value)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.terminal.backend_mut(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

pub(crate) fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

pub fn run_root(app: &App<'_>) -> Result<UiExit> {
    let options = FormOptions::from_app(app)?;
    let mut session = TerminalSession::enter()?;
    let mut screen = FormScreen::new(options);

    loop {
        session.draw(|frame| screen.render(frame))?;

        let event = event::read().context("failed to read terminal event")?;
        let key = match event {
            Event::Resize(_, _) => {
                session.autoresize()?;
                continue;
            }
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => key,
            _ => continue,
        };

        if is_ctrl_c(key) {
            return Ok(UiExit::Canceled);
        }

        match screen.on_key(key, app) {
            None => {}
            Some(FormSignal::Exit(exit)) => return Ok(exit),
            Some(FormSignal::RunSetup(request)) => {
                // The root loop owns the only suspend entry point, so at
                // most one handoff can ever be in flight.
                let result = session.suspend(|| handoff::run_setup_in_foreground(app, &request))?;
                screen.on_setup_finished(&request, result);
            }
        }
    }
}

pub(crate) fn centered_rect(
    percent_x: u16,
    percent_y: u16,
    area: ratatui::layout::Rect,
) -> ratatui::layout::Rect {
    let pct_x = percent_x.min(100);
    let pct_y = percent_y.min(100);

    let [_, vertical, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ])
        .areas(area);
    let [_, horizontal, _] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ])
        .areas(vertical);
    horizontal
}
