//! HSV picker: cursor, staged color, and the open/closed state machine.
//!
//! The picker is either closed or open. Opening stages the cursor color
//! as the pending color; every way of closing hands that pending color
//! back to the caller to be committed. There is no discard path.

use crate::color::{Color, hsv_to_hex, rgb_to_hsv};
use tracing::debug;

/// Largest hue the slider produces; the right edge stays red instead of
/// wrapping the cursor back to the left.
const MAX_HUE: f64 = 359.999;

/// A control's rectangle in the same coordinate space as pointer events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Horizontal position as a fraction of the width, clamped to [0, 1].
    pub fn fraction_x(&self, px: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        (px - self.x).clamp(0.0, self.width) / self.width
    }

    pub fn fraction_y(&self, py: f64) -> f64 {
        if self.height <= 0.0 {
            return 0.0;
        }
        (py - self.y).clamp(0.0, self.height) / self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerCursor {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl Default for PickerCursor {
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 0.0,
            value: 100.0,
        }
    }
}

impl PickerCursor {
    pub fn from_color(color: &Color) -> Self {
        let (r, g, b) = color.rgb();
        let (hue, saturation, value) = rgb_to_hsv(r, g, b);
        Self {
            hue: hue.min(MAX_HUE),
            saturation,
            value,
        }
    }

    pub fn color(&self) -> Color {
        hsv_to_hex(self.hue, self.saturation, self.value)
    }

    /// Fully saturated, full value color of the current hue: the base the
    /// SV gradient is tinted with.
    pub fn hue_base(&self) -> Color {
        hsv_to_hex(self.hue, 100.0, 100.0)
    }

    /// Cursor glyph position inside the gradient, as (x, y) fractions.
    pub fn gradient_position(&self) -> (f64, f64) {
        (self.saturation / 100.0, 1.0 - self.value / 100.0)
    }

    pub fn hue_position(&self) -> f64 {
        self.hue / 360.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Gradient,
    Hue,
}

#[derive(Debug, Default)]
pub struct PickerState {
    open: bool,
    cursor: PickerCursor,
    pending: Option<Color>,
    drag: Option<(Control, Bounds)>,
}

impl PickerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn cursor(&self) -> &PickerCursor {
        &self.cursor
    }

    pub fn pending(&self) -> Option<&Color> {
        self.pending.as_ref()
    }

    pub fn dragging(&self) -> Option<Control> {
        self.drag.map(|(control, _)| control)
    }

    /// Closed -> Open, staging the cursor color.
    pub fn open(&mut self) {
        self.open = true;
        self.pending = Some(self.cursor.color());
        debug!(pending = ?self.pending, "picker opened");
    }

    /// Opens on an existing swatch: the cursor jumps to that color and the
    /// color itself is staged.
    pub fn open_for(&mut self, color: &Color) {
        self.open = true;
        self.cursor = PickerCursor::from_color(color);
        self.pending = Some(color.clone());
        debug!(%color, "picker opened for re-edit");
    }

    /// Open -> Closed. Returns the staged color for the caller to commit;
    /// cursor and drag state are reset.
    pub fn close(&mut self) -> Option<Color> {
        self.open = false;
        self.drag = None;
        self.cursor = PickerCursor::default();
        let pending = self.pending.take();
        debug!(?pending, "picker closed");
        pending
    }

    /// Starts a drag on one of the picker controls and applies the first
    /// position. Ignored while closed.
    pub fn pointer_down(&mut self, control: Control, bounds: Bounds, x: f64, y: f64) -> bool {
        if !self.open {
            return false;
        }
        self.drag = Some((control, bounds));
        self.apply(control, bounds, x, y);
        true
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let Some((control, bounds)) = self.drag else {
            return false;
        };
        self.apply(control, bounds, x, y);
        true
    }

    /// Ends any active drag. Safe to call when none is active.
    pub fn pointer_up(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Relative cursor adjustment for keyboard input. Hue wraps, the other
    /// channels clamp.
    pub fn nudge(&mut self, hue: f64, saturation: f64, value: f64) -> bool {
        if !self.open {
            return false;
        }
        self.cursor.hue = (self.cursor.hue + hue).rem_euclid(360.0).min(MAX_HUE);
        self.cursor.saturation = (self.cursor.saturation + saturation).clamp(0.0, 100.0);
        self.cursor.value = (self.cursor.value + value).clamp(0.0, 100.0);
        self.restage();
        true
    }

    fn apply(&mut self, control: Control, bounds: Bounds, x: f64, y: f64) {
        match control {
            Control::Gradient => {
                self.cursor.saturation = bounds.fraction_x(x) * 100.0;
                self.cursor.value = 100.0 - bounds.fraction_y(y) * 100.0;
            }
            Control::Hue => {
                self.cursor.hue = (bounds.fraction_x(x) * 360.0).min(MAX_HUE);
            }
        }
        self.restage();
    }

    fn restage(&mut self) {
        if self.open {
            self.pending = Some(self.cursor.color());
        }
    }
}
