//! Root layout widget - orchestrates the frame
//!
//! ┌─────────────────────────────────────────────┐
//! │ #RRGGBB                                     │
//! │                light surface                │
//! │             ┌──── picker ────┐              │
//! │             └────────────────┘              │
//! │                 toast line                  │
//! ├─────────────────────────────────────────────┤
//! │ ▇▇ ▇▇ ▇▇ ▇▇ │ ▇▇ ▇▇  [+]      palette bar    │
//! └─────────────────────────────────────────────┘

use crate::app::state::{AppState, ToastKind};
use crate::app::view::ViewDescription;
use crate::config::Config;
use crate::tui::layout::FrameLayout;
use crate::tui::theme::{contrast, get_theme, term_color};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use super::{help, palette, picker};

pub fn render(
    frame: &mut Frame,
    cfg: &Config,
    state: &AppState,
    view: &ViewDescription,
    layout: &FrameLayout,
) {
    render_light(frame, cfg, view, layout.light);

    if !view.fullscreen {
        palette::render(frame, state, view, layout);
    }

    if let (Some(pv), Some(pl)) = (&view.picker, &layout.picker) {
        picker::render(frame, pv, pl);
    }

    render_toast(frame, state, layout.light);

    if state.show_help {
        help::render(frame, frame.area());
    }
}

fn render_light(frame: &mut Frame, cfg: &Config, view: &ViewDescription, area: Rect) {
    let bg = term_color(&view.surface);
    frame.render_widget(Block::default().style(Style::default().bg(bg)), area);

    if cfg.ui.show_hints && !view.fullscreen && area.height > 0 {
        let label = Line::from(Span::styled(
            format!(" {} ", view.surface),
            Style::default()
                .fg(contrast(&view.surface))
                .bg(bg)
                .add_modifier(Modifier::DIM),
        ));
        frame.render_widget(Paragraph::new(label), Rect { height: 1, ..area });
    }
}

fn render_toast(frame: &mut Frame, state: &AppState, light: Rect) {
    let Some(toast) = &state.toast else {
        return;
    };
    if toast.is_expired() || light.height < 2 {
        return;
    }
    let theme = get_theme();
    let (prefix, color) = match toast.kind {
        ToastKind::Info => (theme.icons.info, theme.palette.fg_primary),
        ToastKind::Error => (theme.icons.error, theme.palette.error),
    };
    let width = light.width.saturating_sub(4) as usize;
    let line = Line::from(vec![
        Span::styled(format!(" {} ", prefix), Style::default().fg(color)),
        Span::styled(
            format!("{} ", truncate_str(&toast.message, width.saturating_sub(4))),
            Style::default().fg(theme.palette.fg_primary),
        ),
    ]);
    let area = Rect {
        y: light.y + light.height - 2,
        height: 1,
        ..light
    };
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(Style::default().bg(theme.palette.bg_secondary)),
        centered_line(area, line_width(&toast.message, width)),
    );
}

fn line_width(message: &str, max: usize) -> u16 {
    (message.chars().count() + 4).min(max) as u16
}

fn centered_line(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

pub(super) fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    let char_count: usize = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}
