//! Full, framework-agnostic description of what should be on screen.
//! Rebuilt from scratch on every frame; there is no incremental diffing.

use super::controller::Controller;
use crate::color::Color;
use crate::palette::{PaletteModel, Section};
use crate::picker::Control;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewDescription {
    pub surface: Color,
    pub fullscreen: bool,
    pub palette: Vec<SwatchView>,
    pub picker: Option<PickerView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwatchView {
    pub index: usize,
    pub color: Color,
    pub section: Section,
    pub selected: bool,
    pub deletable: bool,
    pub draggable: bool,
    pub revealed: bool,
    pub drag_source: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerView {
    /// Cursor position inside the SV gradient, as fractions.
    pub cursor: (f64, f64),
    /// Cursor position along the hue slider, as a fraction.
    pub hue: f64,
    pub hue_degrees: f64,
    /// Base tint of the SV gradient.
    pub hue_base: Color,
    pub color: Color,
    pub pending: Option<Color>,
    pub dragging: Option<Control>,
}

pub fn describe(ctl: &Controller) -> ViewDescription {
    let palette = PaletteModel::new(ctl.store())
        .items()
        .into_iter()
        .map(|item| SwatchView {
            deletable: item.deletable(),
            draggable: item.draggable(),
            revealed: ctl.revealed() == Some(item.index),
            drag_source: ctl.drag_source() == Some(item.index),
            index: item.index,
            color: item.color,
            section: item.section,
            selected: item.selected,
        })
        .collect();

    let picker = ctl.picker().is_open().then(|| {
        let p = ctl.picker();
        let cursor = p.cursor();
        PickerView {
            cursor: cursor.gradient_position(),
            hue: cursor.hue_position(),
            hue_degrees: cursor.hue,
            hue_base: cursor.hue_base(),
            color: cursor.color(),
            pending: p.pending().cloned(),
            dragging: p.dragging(),
        }
    });

    ViewDescription {
        surface: ctl.surface_color(),
        fullscreen: ctl.is_fullscreen(),
        palette,
        picker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::actions::Gesture;
    use crate::config::GestureConfig;
    use crate::palette::{ColorStore, Snapshot};
    use crate::storage::MemoryStore;

    fn ctl() -> Controller {
        let c = |s: &str| Color::parse(s).unwrap();
        let store = ColorStore::from_snapshot(
            Snapshot {
                system_colors: vec![c("#AAAAAA"), c("#BBBBBB")],
                custom_colors: vec![c("#123456")],
                current_color: c("#BBBBBB"),
            },
            Box::new(MemoryStore::new()),
        );
        Controller::new(store, GestureConfig::default())
    }

    #[test]
    fn test_describe_closed() {
        let view = describe(&ctl());
        assert_eq!(view.surface.as_str(), "#BBBBBB");
        assert!(!view.fullscreen);
        assert!(view.picker.is_none());
        assert_eq!(view.palette.len(), 3);
        assert!(view.palette[1].selected);
        assert!(view.palette[2].deletable);
        assert!(view.palette[0].draggable);
    }

    #[test]
    fn test_describe_flags_follow_gestures() {
        let mut ctl = ctl();
        ctl.handle(Gesture::LongPressSwatch(2));
        ctl.handle(Gesture::LongPressSwatch(0));
        let view = describe(&ctl);
        assert!(view.palette[2].revealed);
        assert!(view.palette[0].drag_source);
        assert!(!view.palette[1].revealed && !view.palette[1].drag_source);
    }

    #[test]
    fn test_describe_open_picker() {
        let mut ctl = ctl();
        ctl.handle(Gesture::ToggleAdd);
        ctl.handle(Gesture::NudgeCursor {
            hue: 120.0,
            saturation: 100.0,
            value: -50.0,
        });
        let view = describe(&ctl);
        let picker = view.picker.unwrap();
        assert_eq!(picker.color.as_str(), "#008000");
        assert_eq!(view.surface, picker.color);
        assert_eq!(picker.pending.as_ref(), Some(&picker.color));
        assert_eq!(picker.hue_base.as_str(), "#00FF00");
        assert_eq!(picker.cursor, (1.0, 0.5));
        assert!((picker.hue - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_describe_is_idempotent() {
        let ctl = ctl();
        assert_eq!(describe(&ctl), describe(&ctl));
    }
}
