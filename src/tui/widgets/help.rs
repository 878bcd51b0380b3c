//! Help overlay showing keybindings and mouse gestures

use crate::tui::theme::{Theme, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
};

const WIDTH: u16 = 72;
const HEIGHT: u16 = 22;

/// Render the help overlay centered in `area`
pub fn render(frame: &mut Frame, area: Rect) {
    let theme = get_theme();
    let popup = centered(area, WIDTH, HEIGHT);

    let block = Block::bordered()
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(" Keys ")
        .title_style(Style::default().fg(theme.palette.accent))
        .style(Style::default().bg(theme.palette.bg_secondary));

    frame.render_widget(Clear, popup);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left_content = vec![
        section_header("Palette", &theme),
        keybind("h / l", "Move focus", &theme),
        keybind("Enter", "Select / edit focused", &theme),
        keybind("x", "Hold: reveal delete / drag", &theme),
        keybind("d / Del", "Delete focused custom", &theme),
        keybind("H / L", "Move system color", &theme),
        keybind("n / p", "Next / previous color", &theme),
        keybind("a / +", "Open color picker", &theme),
        keybind("f", "Toggle fullscreen", &theme),
        keybind("Esc", "Hide delete button", &theme),
        Line::default(),
        section_header("General", &theme),
        keybind("?", "Toggle this help", &theme),
        keybind("q", "Quit", &theme),
    ];
    frame.render_widget(
        Paragraph::new(left_content).wrap(Wrap { trim: false }),
        cols[0],
    );

    let right_content = vec![
        section_header("Picker", &theme),
        keybind("h / l", "Saturation", &theme),
        keybind("j / k", "Brightness", &theme),
        keybind("[ / ]", "Hue -5 / +5", &theme),
        keybind("{ / }", "Hue -30 / +30", &theme),
        keybind("Enter", "Add color", &theme),
        keybind("Esc", "Close (keeps color)", &theme),
        Line::default(),
        section_header("Mouse", &theme),
        keybind("Click", "Select / edit", &theme),
        keybind("Hold", "Delete / drag to reorder", &theme),
        keybind("Swipe", "Next / previous color", &theme),
        keybind("Click light", "Toggle fullscreen", &theme),
        keybind("Wheel", "Next / previous color", &theme),
    ];
    frame.render_widget(
        Paragraph::new(right_content).wrap(Wrap { trim: false }),
        cols[1],
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("── {} ──", title),
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    )])
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(
            format!("{:12}", key),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.palette.fg_primary)),
    ])
}
