//! Border styles

use ratatui::symbols::border;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderStyle;

impl BorderStyle {
    pub fn to_border_set() -> border::Set<'static> {
        border::ROUNDED
    }

    /// Heavier frame for the selected swatch.
    pub fn to_selected_set() -> border::Set<'static> {
        border::THICK
    }
}
