use crate::picker::{Bounds, Control};
use std::time::{Duration, Instant};

/// Abstract gestures consumed by the controller. Positions are already
/// resolved to palette indices or control rectangles; nothing here knows
/// about terminals or raw input events.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Short press on a swatch (absolute palette index).
    TapSwatch(usize),
    LongPressSwatch(usize),
    /// Drag-and-drop of one swatch onto another.
    DropSwatch { from: usize, to: usize },
    DeleteSwatch(usize),
    /// Tap outside any swatch.
    DismissReveal,

    /// Raw press tracking, for front-ends that only see down/move/up.
    PressStart { index: usize, at: Instant },
    PressMove { over: Option<usize> },
    PressEnd { over: Option<usize>, at: Instant },
    PressCancel,
    Tick(Instant),

    ToggleAdd,
    PickerConfirm,
    PickerClose,
    TapOutsidePicker,
    PickerPointerDown { control: Control, bounds: Bounds, x: f64, y: f64 },
    PickerPointerMove { x: f64, y: f64 },
    PickerPointerUp,
    NudgeCursor { hue: f64, saturation: f64, value: f64 },

    /// Horizontal swipe on the light surface; positive distance is "right".
    Swipe { distance: f64, elapsed: Duration },
    Step(isize),
    TapLight,
    ToggleFullscreen,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Resize,
    ToggleHelp,
    FocusPrev,
    FocusNext,
    TapFocused,
    LongPressFocused,
    DeleteFocused,
    /// Move the focused system swatch one slot left or right.
    MoveFocused(isize),
    Gesture(Gesture),
}

impl From<Gesture> for Action {
    fn from(g: Gesture) -> Self {
        Action::Gesture(g)
    }
}
