use crate::app::controller::Controller;
use crate::app::state::AppState;
use crate::app::view;
use crate::config::Config;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use layout::FrameLayout;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};

pub mod layout;
pub mod theme;
pub mod widgets;

pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

pub struct TerminalGuard {
    terminal: TuiTerminal,
    mouse: bool,
}

impl TerminalGuard {
    pub fn enter(mouse: bool) -> anyhow::Result<Self> {
        enable_raw_mode().context("enable raw mode")?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("enter alt screen")?;
        if mouse {
            execute!(stdout, EnableMouseCapture).context("enable mouse capture")?;
        }

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("create terminal")?;
        terminal.hide_cursor().context("hide cursor")?;

        Ok(Self { terminal, mouse })
    }

    pub fn terminal_mut(&mut self) -> &mut TuiTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best-effort cleanup; don't panic in Drop.
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        if self.mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Paints one frame and returns the geometry that was drawn, for hit-testing
/// the next mouse event.
pub fn draw(
    terminal: &mut TuiTerminal,
    cfg: &Config,
    state: &AppState,
    controller: &Controller,
) -> anyhow::Result<FrameLayout> {
    let view = view::describe(controller);
    let mut layout = FrameLayout::default();
    terminal
        .draw(|f| {
            layout = FrameLayout::compute(f.area(), &view);
            widgets::root::render(f, cfg, state, &view, &layout);
        })
        .context("terminal draw")?;
    Ok(layout)
}
