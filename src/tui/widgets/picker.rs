//! Color picker popup: saturation/value gradient, hue slider, preview and
//! the add button.

use crate::app::view::PickerView;
use crate::color::{Color, hsv_to_rgb};
use crate::picker::Control;
use crate::tui::layout::PickerLayout;
use crate::tui::theme::{Theme, contrast, get_theme, term_color};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color as TermColor, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

pub fn render(frame: &mut Frame, view: &PickerView, layout: &PickerLayout) {
    let theme = get_theme();

    frame.render_widget(Clear, layout.popup);
    let block = Block::bordered()
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(" Add color ")
        .title_style(Style::default().fg(theme.palette.accent))
        .style(Style::default().bg(theme.palette.bg_secondary));
    frame.render_widget(block, layout.popup);

    frame.render_widget(
        Paragraph::new(format!(" {} ", theme.icons.close))
            .style(Style::default().fg(theme.palette.fg_primary)),
        layout.close,
    );

    frame.render_widget(
        SvGradient {
            hue: view.hue_degrees,
            cursor: view.cursor,
            cursor_symbol: theme.icons.cursor,
            active: view.dragging == Some(Control::Gradient),
        },
        layout.gradient,
    );
    frame.render_widget(HueBar, layout.hue);
    render_hue_cursor(frame, &theme, view, layout.hue);
    render_preview(frame, &theme, view, layout.preview);

    frame.render_widget(
        Paragraph::new("[ Add ]")
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.palette.bg_primary)
                    .bg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        layout.confirm,
    );
}

/// Saturation grows left to right, value grows bottom to top.
struct SvGradient {
    hue: f64,
    cursor: (f64, f64),
    cursor_symbol: &'static str,
    active: bool,
}

impl Widget for SvGradient {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let span_x = f64::from(area.width.saturating_sub(1).max(1));
        let span_y = f64::from(area.height.saturating_sub(1).max(1));
        for dy in 0..area.height {
            for dx in 0..area.width {
                let s = f64::from(dx) / span_x * 100.0;
                let v = (1.0 - f64::from(dy) / span_y) * 100.0;
                let (r, g, b) = hsv_to_rgb(self.hue, s, v);
                if let Some(cell) = buf.cell_mut((area.x + dx, area.y + dy)) {
                    cell.set_symbol(" ").set_bg(TermColor::Rgb(r, g, b));
                }
            }
        }

        let cx = area.x + (self.cursor.0 * span_x).round() as u16;
        let cy = area.y + (self.cursor.1 * span_y).round() as u16;
        let (r, g, b) = hsv_to_rgb(
            self.hue,
            self.cursor.0 * 100.0,
            (1.0 - self.cursor.1) * 100.0,
        );
        let under = Color::from_rgb(r, g, b);
        let mut style = Style::default().fg(contrast(&under));
        if self.active {
            style = style.add_modifier(Modifier::BOLD);
        }
        if let Some(cell) = buf.cell_mut((cx.min(area.right() - 1), cy.min(area.bottom() - 1))) {
            cell.set_symbol(self.cursor_symbol).set_style(style);
        }
    }
}

/// Full-saturation hue ramp.
struct HueBar;

impl Widget for HueBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let span = f64::from(area.width.saturating_sub(1).max(1));
        for dx in 0..area.width {
            let hue = f64::from(dx) / span * 359.0;
            let (r, g, b) = hsv_to_rgb(hue, 100.0, 100.0);
            for dy in 0..area.height {
                if let Some(cell) = buf.cell_mut((area.x + dx, area.y + dy)) {
                    cell.set_symbol(" ").set_bg(TermColor::Rgb(r, g, b));
                }
            }
        }
    }
}

/// Marker on the row under the hue slider.
fn render_hue_cursor(frame: &mut Frame, theme: &Theme, view: &PickerView, hue: Rect) {
    if hue.is_empty() {
        return;
    }
    let span = f64::from(hue.width.saturating_sub(1));
    let x = hue.x + (view.hue * span).round() as u16;
    let marker = Rect {
        x: x.min(hue.right() - 1),
        y: hue.y + hue.height,
        width: 1,
        height: 1,
    }
    .intersection(frame.area());
    if marker.is_empty() {
        return;
    }
    let mut style = Style::default().fg(term_color(&view.hue_base));
    if view.dragging == Some(Control::Hue) {
        style = style.add_modifier(Modifier::BOLD);
    }
    frame.render_widget(Paragraph::new(theme.icons.hue_cursor).style(style), marker);
}

fn render_preview(frame: &mut Frame, theme: &Theme, view: &PickerView, area: Rect) {
    let line = Line::from(vec![
        Span::styled("    ", Style::default().bg(term_color(&view.color))),
        Span::styled(
            format!(" {} ", view.color),
            Style::default()
                .fg(theme.palette.fg_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:.0}°", view.hue_degrees),
            Style::default().fg(theme.palette.fg_secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
