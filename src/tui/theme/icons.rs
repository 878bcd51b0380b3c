//! Glyphs used by the panel. Plain Unicode, no Nerd Font required.

#[derive(Debug, Clone)]
pub struct Icons {
    pub selected: &'static str,
    pub focus: &'static str,
    pub add: &'static str,
    pub close: &'static str,
    pub delete: &'static str,
    pub drag: &'static str,
    pub cursor: &'static str,
    pub hue_cursor: &'static str,
    pub divider: &'static str,
    pub error: &'static str,
    pub info: &'static str,
}

impl Icons {
    pub const fn unicode() -> Self {
        Self {
            selected: "●",
            focus: "▔▔",
            add: "+",
            close: "×",
            delete: "×",
            drag: "⇄",
            cursor: "◎",
            hue_cursor: "▲",
            divider: "│",
            error: "✗",
            info: "•",
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::unicode()
    }
}
