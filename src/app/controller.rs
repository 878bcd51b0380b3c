//! Turns gestures into palette, picker and selection mutations and reports
//! which parts of the view went stale.

use super::actions::Gesture;
use crate::color::Color;
use crate::config::GestureConfig;
use crate::palette::{self, ColorStore, PaletteModel, Slot};
use crate::picker::PickerState;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redraw {
    pub palette: bool,
    pub surface: bool,
    pub picker: bool,
}

impl Redraw {
    pub const NONE: Self = Self {
        palette: false,
        surface: false,
        picker: false,
    };

    pub const ALL: Self = Self {
        palette: true,
        surface: true,
        picker: true,
    };

    pub fn palette() -> Self {
        Self {
            palette: true,
            ..Self::NONE
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

impl std::ops::BitOr for Redraw {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            palette: self.palette || rhs.palette,
            surface: self.surface || rhs.surface,
            picker: self.picker || rhs.picker,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    pub redraw: Redraw,
    /// Non-fatal failure to report, e.g. a storage write that failed.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct SwatchPress {
    index: usize,
    started: Instant,
    moved: bool,
    long: bool,
}

pub struct Controller {
    store: ColorStore,
    picker: PickerState,
    gestures: GestureConfig,
    fullscreen: bool,
    revealed: Option<usize>,
    drag_source: Option<usize>,
    press: Option<SwatchPress>,
}

impl Controller {
    pub fn new(store: ColorStore, gestures: GestureConfig) -> Self {
        Self {
            store,
            picker: PickerState::new(),
            gestures,
            fullscreen: false,
            revealed: None,
            drag_source: None,
            press: None,
        }
    }

    pub fn store(&self) -> &ColorStore {
        &self.store
    }

    pub fn picker(&self) -> &PickerState {
        &self.picker
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn set_fullscreen(&mut self, on: bool) {
        self.fullscreen = on;
    }

    /// Custom swatch currently showing its delete affordance.
    pub fn revealed(&self) -> Option<usize> {
        self.revealed
    }

    /// System swatch armed for reordering by a long press.
    pub fn drag_source(&self) -> Option<usize> {
        self.drag_source
    }

    /// Color the light surface shows: the live picker color while the
    /// picker is open, otherwise the selection.
    pub fn surface_color(&self) -> Color {
        if self.picker.is_open() {
            self.picker.cursor().color()
        } else {
            self.store.selection().color.clone()
        }
    }

    pub fn handle(&mut self, gesture: Gesture) -> Outcome {
        let redraw = match gesture {
            Gesture::TapSwatch(index) => self.tap_swatch(index),
            Gesture::LongPressSwatch(index) => self.long_press(index),
            Gesture::DropSwatch { from, to } => self.drop_swatch(from, to),
            Gesture::DeleteSwatch(index) => self.delete_swatch(index),
            Gesture::DismissReveal => self.dismiss_reveal(),

            // A new press disarms any drag left over from a keyboard hold.
            Gesture::PressStart { index, at } => {
                self.press = Some(SwatchPress {
                    index,
                    started: at,
                    moved: false,
                    long: false,
                });
                self.clear_drag()
            }
            Gesture::PressMove { over } => self.press_move(over),
            Gesture::PressEnd { over, at } => self.press_end(over, at),
            Gesture::PressCancel => {
                self.press = None;
                self.clear_drag()
            }
            Gesture::Tick(now) => self.poll_long_press(now),

            Gesture::ToggleAdd => {
                if self.picker.is_open() {
                    self.close_picker()
                } else {
                    self.picker.open();
                    Redraw::ALL
                }
            }
            // Commit first, then close: the close commits again but the
            // duplicate check turns that into a no-op.
            Gesture::PickerConfirm => {
                if self.picker.is_open() {
                    if let Some(color) = self.picker.pending().cloned() {
                        self.commit(color);
                    }
                    self.close_picker() | Redraw::palette()
                } else {
                    Redraw::NONE
                }
            }
            Gesture::PickerClose | Gesture::TapOutsidePicker => {
                if self.picker.is_open() {
                    self.close_picker()
                } else {
                    Redraw::NONE
                }
            }
            Gesture::PickerPointerDown {
                control,
                bounds,
                x,
                y,
            } => {
                let changed = self.picker.pointer_down(control, bounds, x, y);
                self.picker_changed(changed)
            }
            Gesture::PickerPointerMove { x, y } => {
                let changed = self.picker.pointer_move(x, y);
                self.picker_changed(changed)
            }
            Gesture::PickerPointerUp => {
                self.picker.pointer_up();
                Redraw::NONE
            }
            Gesture::NudgeCursor {
                hue,
                saturation,
                value,
            } => {
                let changed = self.picker.nudge(hue, saturation, value);
                self.picker_changed(changed)
            }

            Gesture::Swipe { distance, elapsed } => self.swipe(distance, elapsed),
            Gesture::Step(delta) => self.step(delta),
            Gesture::TapLight => {
                if self.picker.is_open() {
                    self.close_picker()
                } else {
                    self.dismiss_reveal() | self.toggle_fullscreen()
                }
            }
            Gesture::ToggleFullscreen => self.toggle_fullscreen(),
        };

        Outcome {
            redraw,
            error: self.store.take_persist_error(),
        }
    }

    fn tap_swatch(&mut self, index: usize) -> Redraw {
        let Some(slot) = PaletteModel::new(&self.store).locate(index) else {
            return Redraw::NONE;
        };
        let mut redraw = Redraw::NONE;
        if self.picker.is_open() {
            redraw = self.close_picker();
        }
        match slot {
            Slot::System(_) => {
                if self.store.select(index) {
                    redraw = redraw | Redraw::palette();
                    redraw.surface = true;
                }
            }
            Slot::Custom(_) => {
                // Re-edit: the swatch stays in place and is staged as is.
                if let Some(color) = self.store.color_at(index).cloned() {
                    self.picker.open_for(&color);
                    redraw = redraw | Redraw::ALL;
                }
            }
        }
        redraw
    }

    fn long_press(&mut self, index: usize) -> Redraw {
        match PaletteModel::new(&self.store).locate(index) {
            Some(Slot::Custom(_)) => {
                self.revealed = Some(index);
                Redraw::palette()
            }
            Some(Slot::System(_)) => {
                debug!(index, "drag armed");
                self.drag_source = Some(index);
                Redraw::palette()
            }
            None => Redraw::NONE,
        }
    }

    fn drop_swatch(&mut self, from: usize, to: usize) -> Redraw {
        let moved = palette::model::move_item(&mut self.store, from, to);
        let cleared = self.clear_drag();
        if moved { Redraw::palette() } else { cleared }
    }

    fn delete_swatch(&mut self, index: usize) -> Redraw {
        let before = self.store.selection().clone();
        if !palette::model::delete_item(&mut self.store, index) {
            return Redraw::NONE;
        }
        self.revealed = None;
        let mut redraw = Redraw::palette();
        redraw.surface = *self.store.selection() != before;
        redraw
    }

    /// Hides the delete affordance and disarms a pending drag.
    fn dismiss_reveal(&mut self) -> Redraw {
        let cleared = self.clear_drag();
        if self.revealed.take().is_some() {
            Redraw::palette()
        } else {
            cleared
        }
    }

    fn clear_drag(&mut self) -> Redraw {
        if self.drag_source.take().is_some() {
            Redraw::palette()
        } else {
            Redraw::NONE
        }
    }

    fn press_move(&mut self, over: Option<usize>) -> Redraw {
        let Some(press) = self.press.as_mut() else {
            return Redraw::NONE;
        };
        // Moving before the hold threshold cancels the long press; after
        // it, movement is the drag itself.
        if !press.long && over != Some(press.index) {
            press.moved = true;
        }
        Redraw::NONE
    }

    fn press_end(&mut self, over: Option<usize>, at: Instant) -> Redraw {
        let mut redraw = self.poll_long_press(at);
        let Some(press) = self.press.take() else {
            return redraw;
        };
        if press.long {
            if self.drag_source == Some(press.index) {
                redraw = redraw
                    | match over {
                        Some(to) if to != press.index => self.drop_swatch(press.index, to),
                        _ => self.clear_drag(),
                    };
            }
        } else if !press.moved && over == Some(press.index) {
            redraw = redraw | self.tap_swatch(press.index);
        }
        redraw
    }

    fn poll_long_press(&mut self, now: Instant) -> Redraw {
        let threshold = Duration::from_millis(self.gestures.long_press_ms);
        let fire = match self.press.as_mut() {
            Some(press) if !press.long && !press.moved => {
                if now.saturating_duration_since(press.started) >= threshold {
                    press.long = true;
                    Some(press.index)
                } else {
                    None
                }
            }
            _ => None,
        };
        match fire {
            Some(index) => self.long_press(index),
            None => Redraw::NONE,
        }
    }

    fn swipe(&mut self, distance: f64, elapsed: Duration) -> Redraw {
        let fast = elapsed < Duration::from_millis(self.gestures.swipe_max_ms);
        if distance.abs() <= self.gestures.swipe_min_distance || !fast {
            debug!(distance, ?elapsed, "swipe below threshold");
            return Redraw::NONE;
        }
        // Swiping right reveals the previous color.
        let delta = if distance > 0.0 { -1 } else { 1 };
        self.step(delta)
    }

    fn step(&mut self, delta: isize) -> Redraw {
        if self.store.step(delta) {
            Redraw {
                palette: true,
                surface: !self.picker.is_open(),
                picker: false,
            }
        } else {
            Redraw::NONE
        }
    }

    fn toggle_fullscreen(&mut self) -> Redraw {
        self.fullscreen = !self.fullscreen;
        info!(fullscreen = self.fullscreen, "fullscreen toggled");
        Redraw::ALL
    }

    /// Every close commits the staged color; there is no cancel path.
    fn close_picker(&mut self) -> Redraw {
        if let Some(color) = self.picker.close() {
            self.commit(color);
        }
        Redraw::ALL
    }

    fn commit(&mut self, color: Color) -> bool {
        let added = self.store.add_custom(color.clone());
        if !added {
            debug!(%color, "staged color already in palette");
        }
        added
    }

    fn picker_changed(&self, changed: bool) -> Redraw {
        if changed {
            Redraw {
                palette: false,
                surface: true,
                picker: true,
            }
        } else {
            Redraw::NONE
        }
    }
}
