use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Info,
            created_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > Duration::from_secs(3)
    }
}

/// What the primary mouse button went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Swatch,
    Picker,
    Light,
    Other,
}

#[derive(Debug, Clone, Copy)]
pub struct PointerOrigin {
    pub target: PointerTarget,
    pub column: u16,
    pub row: u16,
    pub at: Instant,
}

/// Terminal-side state. Palette and picker state live in the controller.
#[derive(Debug, Default)]
pub struct AppState {
    pub should_quit: bool,
    pub show_help: bool,
    /// Keyboard focus, as an absolute palette index.
    pub focus: usize,
    pub pointer: Option<PointerOrigin>,
    pub toast: Option<Toast>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn focus_next(&mut self, len: usize) {
        if len > 0 {
            self.focus = (self.focus + 1).min(len - 1);
        }
    }

    /// Keeps focus in range after the palette shrinks.
    pub fn clamp_focus(&mut self, len: usize) {
        self.focus = self.focus.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_bounds() {
        let mut s = AppState::new();
        s.focus_prev();
        assert_eq!(s.focus, 0);
        s.focus_next(2);
        s.focus_next(2);
        assert_eq!(s.focus, 1);
        s.clamp_focus(1);
        assert_eq!(s.focus, 0);
        s.focus_next(0);
        assert_eq!(s.focus, 0);
    }
}
