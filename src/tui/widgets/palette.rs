//! Palette bar: system swatches, divider, custom swatches, add button.

use crate::app::state::AppState;
use crate::app::view::{SwatchView, ViewDescription};
use crate::tui::layout::FrameLayout;
use crate::tui::theme::{Theme, contrast, get_theme, term_color};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, state: &AppState, view: &ViewDescription, layout: &FrameLayout) {
    let Some(area) = layout.palette else {
        return;
    };
    let theme = get_theme();

    let block = Block::default()
        .borders(Borders::TOP)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .style(Style::default().bg(theme.palette.bg_primary));
    frame.render_widget(block, area);

    for swatch in &view.palette {
        let Some(rect) = layout.swatch_rect(swatch.index) else {
            continue;
        };
        render_swatch(frame, &theme, swatch, rect);
        if let Some((index, corner)) = layout.delete
            && index == swatch.index
        {
            render_delete(frame, &theme, corner);
        }
        if state.focus == swatch.index && view.picker.is_none() {
            render_focus(frame, &theme, rect, area);
        }
    }

    if let Some(divider) = layout.divider
        && !divider.is_empty()
    {
        let lines: Vec<Line> = (0..divider.height)
            .map(|_| Line::from(theme.icons.divider))
            .collect();
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().fg(theme.palette.border)),
            divider,
        );
    }

    if let Some(add) = layout.add_button
        && !add.is_empty()
    {
        let active = view.picker.is_some();
        let color = if active {
            theme.palette.accent
        } else {
            theme.palette.fg_secondary
        };
        let block = Block::bordered()
            .border_set(theme.border_set())
            .border_style(Style::default().fg(color));
        let inner = block.inner(add);
        frame.render_widget(block, add);
        frame.render_widget(
            Paragraph::new(theme.icons.add)
                .alignment(Alignment::Center)
                .style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            inner,
        );
    }
}

fn render_swatch(frame: &mut Frame, theme: &Theme, swatch: &SwatchView, rect: Rect) {
    if rect.is_empty() {
        return;
    }
    let bg = term_color(&swatch.color);
    let fg = contrast(&swatch.color);
    let style = Style::default().bg(bg).fg(fg);

    if swatch.selected {
        let block = Block::bordered()
            .border_set(theme.selected_border_set())
            .border_style(style)
            .style(style);
        frame.render_widget(block, rect);
    } else {
        frame.render_widget(Block::default().style(style), rect);
    }

    let middle = Rect {
        y: rect.y + rect.height / 2,
        height: 1,
        ..rect
    };
    let mark = if swatch.drag_source {
        Some(theme.icons.drag)
    } else if swatch.selected {
        Some(theme.icons.selected)
    } else {
        None
    };
    if let Some(mark) = mark {
        frame.render_widget(
            Paragraph::new(mark).alignment(Alignment::Center).style(style),
            middle,
        );
    }
}

fn render_delete(frame: &mut Frame, theme: &Theme, corner: Rect) {
    frame.render_widget(
        Paragraph::new(theme.icons.delete).style(
            Style::default()
                .fg(theme.palette.fg_primary)
                .bg(theme.palette.error)
                .add_modifier(Modifier::BOLD),
        ),
        corner,
    );
}

/// Underline in the gap row below the focused swatch.
fn render_focus(frame: &mut Frame, theme: &Theme, rect: Rect, palette: Rect) {
    let underline = Rect {
        y: rect.y + rect.height,
        height: 1,
        ..rect
    }
    .intersection(palette);
    if underline.is_empty() {
        return;
    }
    frame.render_widget(
        Paragraph::new(theme.icons.focus)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.palette.accent)),
        underline,
    );
}
