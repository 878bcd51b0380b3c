//! Theme configuration

pub mod borders;
pub mod icons;
pub mod palette;

pub use borders::BorderStyle;
pub use icons::Icons;
pub use palette::Palette;

use crate::color::Color;
use ratatui::style::Color as TermColor;

#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub icons: Icons,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::MONO,
            icons: Icons::unicode(),
        }
    }

    pub fn border_set(&self) -> ratatui::symbols::border::Set<'static> {
        BorderStyle::to_border_set()
    }

    pub fn selected_border_set(&self) -> ratatui::symbols::border::Set<'static> {
        BorderStyle::to_selected_set()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get_theme() -> Theme {
    Theme::new()
}

pub fn term_color(color: &Color) -> TermColor {
    let (r, g, b) = color.rgb();
    TermColor::Rgb(r, g, b)
}

/// Black or white, whichever reads better on top of `color`.
pub fn contrast(color: &Color) -> TermColor {
    let (r, g, b) = color.rgb();
    let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    if luma > 150.0 {
        TermColor::Black
    } else {
        TermColor::White
    }
}
