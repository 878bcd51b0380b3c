//! Frame geometry. Computed once per frame from the view description and
//! reused to hit-test mouse input against what was drawn.

use crate::app::view::ViewDescription;
use crate::palette::Section;
use ratatui::layout::{Position, Rect};

pub const SWATCH_WIDTH: u16 = 6;
pub const SWATCH_HEIGHT: u16 = 3;
const DIVIDER_WIDTH: u16 = 1;
const GAP: u16 = 1;

const POPUP_WIDTH: u16 = 44;
const POPUP_HEIGHT: u16 = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Swatch(usize),
    /// Delete corner of the revealed custom swatch.
    Delete(usize),
    AddButton,
    Gradient,
    Hue,
    PickerClose,
    PickerConfirm,
    /// Inside the popup but on no control.
    Popup,
    /// Palette bar background.
    Palette,
    Light,
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerLayout {
    pub popup: Rect,
    pub gradient: Rect,
    pub hue: Rect,
    pub preview: Rect,
    pub close: Rect,
    pub confirm: Rect,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameLayout {
    pub light: Rect,
    pub palette: Option<Rect>,
    pub swatches: Vec<(usize, Rect)>,
    pub delete: Option<(usize, Rect)>,
    pub divider: Option<Rect>,
    pub add_button: Option<Rect>,
    pub picker: Option<PickerLayout>,
}

impl FrameLayout {
    pub fn compute(area: Rect, view: &ViewDescription) -> Self {
        let mut layout = FrameLayout {
            light: area,
            ..Default::default()
        };

        if !view.fullscreen {
            let sections: Vec<Section> = view.palette.iter().map(|s| s.section).collect();
            let inner_width = area.width.saturating_sub(2).max(SWATCH_WIDTH);
            let rows = flow(&sections, inner_width, 0, 0).rows;
            let height = (rows * (SWATCH_HEIGHT + 1) + 1).min(area.height.saturating_sub(3));
            let palette = Rect {
                x: area.x,
                y: area.y + area.height.saturating_sub(height),
                width: area.width,
                height,
            };
            let placed = flow(&sections, inner_width, palette.x + 1, palette.y + 1);
            layout.light.height = area.height.saturating_sub(height);
            layout.swatches = placed
                .swatches
                .into_iter()
                .zip(view.palette.iter())
                .map(|(rect, s)| (s.index, rect.intersection(palette)))
                .collect();
            layout.delete = view
                .palette
                .iter()
                .find(|s| s.revealed && s.deletable)
                .and_then(|s| {
                    let rect = layout.swatch_rect(s.index)?;
                    (!rect.is_empty()).then(|| (s.index, delete_corner(rect)))
                });
            layout.divider = Some(placed.divider.intersection(palette));
            layout.add_button = Some(placed.add.intersection(palette));
            layout.palette = Some(palette);
        }

        if view.picker.is_some() {
            layout.picker = Some(picker_layout(area));
        }
        layout
    }

    pub fn hit(&self, column: u16, row: u16) -> Hit {
        let pos = Position::new(column, row);
        if let Some(p) = &self.picker {
            if p.close.contains(pos) {
                return Hit::PickerClose;
            }
            if p.confirm.contains(pos) {
                return Hit::PickerConfirm;
            }
            if p.gradient.contains(pos) {
                return Hit::Gradient;
            }
            if p.hue.contains(pos) {
                return Hit::Hue;
            }
            if p.popup.contains(pos) {
                return Hit::Popup;
            }
        }
        if let Some(palette) = self.palette
            && palette.contains(pos)
        {
            if let Some((index, corner)) = self.delete
                && corner.contains(pos)
            {
                return Hit::Delete(index);
            }
            if let Some((index, _)) = self.swatches.iter().find(|(_, r)| r.contains(pos)) {
                return Hit::Swatch(*index);
            }
            if self.add_button.is_some_and(|r| r.contains(pos)) {
                return Hit::AddButton;
            }
            return Hit::Palette;
        }
        if self.light.contains(pos) {
            return Hit::Light;
        }
        Hit::None
    }

    pub fn swatch_rect(&self, index: usize) -> Option<Rect> {
        self.swatches
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, r)| *r)
    }
}

/// Top-right cell of a swatch.
pub fn delete_corner(swatch: Rect) -> Rect {
    Rect {
        x: swatch.x + swatch.width.saturating_sub(1),
        y: swatch.y,
        width: 1.min(swatch.width),
        height: 1.min(swatch.height),
    }
}

struct Flow {
    swatches: Vec<Rect>,
    divider: Rect,
    add: Rect,
    rows: u16,
}

/// Left-to-right wrapping placement: system swatches, a divider, custom
/// swatches, then the add button.
fn flow(sections: &[Section], width: u16, x0: u16, y0: u16) -> Flow {
    let mut cursor_x = 0u16;
    let mut row = 0u16;
    let mut place = |w: u16| -> Rect {
        if cursor_x > 0 && cursor_x + w > width {
            cursor_x = 0;
            row += 1;
        }
        let rect = Rect {
            x: x0 + cursor_x,
            y: y0 + row * (SWATCH_HEIGHT + 1),
            width: w,
            height: SWATCH_HEIGHT,
        };
        cursor_x += w + GAP;
        rect
    };

    let mut swatches = Vec::with_capacity(sections.len());
    let mut divider = None;
    for section in sections {
        if *section == Section::Custom && divider.is_none() {
            divider = Some(place(DIVIDER_WIDTH));
        }
        swatches.push(place(SWATCH_WIDTH));
    }
    let divider = match divider {
        Some(d) => d,
        None => place(DIVIDER_WIDTH),
    };
    let add = place(SWATCH_WIDTH);

    Flow {
        swatches,
        divider,
        add,
        rows: row + 1,
    }
}

fn picker_layout(area: Rect) -> PickerLayout {
    let width = POPUP_WIDTH.min(area.width);
    let height = POPUP_HEIGHT.min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    let inner = Rect {
        x: popup.x + 2,
        y: popup.y + 1,
        width: popup.width.saturating_sub(4),
        height: popup.height.saturating_sub(2),
    };
    let gradient = Rect {
        height: inner.height.saturating_sub(5),
        ..inner
    };
    let hue = Rect {
        y: gradient.y + gradient.height + 1,
        height: 1.min(inner.height),
        ..inner
    };
    let buttons_y = hue.y + 2;
    let confirm = Rect {
        x: inner.x + inner.width.saturating_sub(9),
        y: buttons_y,
        width: 9.min(inner.width),
        height: 1,
    };
    let preview = Rect {
        x: inner.x,
        y: buttons_y,
        width: inner.width.saturating_sub(confirm.width + 1),
        height: 1,
    };
    let close = Rect {
        x: popup.x + popup.width.saturating_sub(4),
        y: popup.y,
        width: 3.min(popup.width),
        height: 1,
    };
    PickerLayout {
        popup,
        gradient: gradient.intersection(popup),
        hue: hue.intersection(popup),
        preview: preview.intersection(popup),
        close,
        confirm: confirm.intersection(popup),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::view::{PickerView, SwatchView};
    use crate::color::Color;

    fn view(system: usize, custom: usize) -> ViewDescription {
        let palette = (0..system + custom)
            .map(|i| SwatchView {
                index: i,
                color: Color::white(),
                section: if i < system { Section::System } else { Section::Custom },
                selected: i == 0,
                deletable: i >= system,
                draggable: i < system,
                revealed: false,
                drag_source: false,
            })
            .collect();
        ViewDescription {
            surface: Color::white(),
            fullscreen: false,
            palette,
            picker: None,
        }
    }

    #[test]
    fn test_single_row_palette() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = FrameLayout::compute(area, &view(3, 2));
        let palette = layout.palette.unwrap();
        assert_eq!(palette.height, SWATCH_HEIGHT + 2);
        assert_eq!(layout.light.height, 40 - palette.height);
        assert_eq!(layout.swatches.len(), 5);

        let first = layout.swatch_rect(0).unwrap();
        assert_eq!((first.x, first.y), (1, palette.y + 1));
        // Divider sits between the last system and first custom swatch.
        let divider = layout.divider.unwrap();
        assert!(divider.x > layout.swatch_rect(2).unwrap().x);
        assert!(divider.x < layout.swatch_rect(3).unwrap().x);
    }

    #[test]
    fn test_palette_wraps() {
        let area = Rect::new(0, 0, 30, 40);
        let layout = FrameLayout::compute(area, &view(11, 0));
        let palette = layout.palette.unwrap();
        assert!(palette.height > SWATCH_HEIGHT + 2);
        let rows: std::collections::BTreeSet<u16> =
            layout.swatches.iter().map(|(_, r)| r.y).collect();
        assert!(rows.len() > 1);
    }

    #[test]
    fn test_hit_testing() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = FrameLayout::compute(area, &view(3, 2));
        let s4 = layout.swatch_rect(4).unwrap();
        assert_eq!(layout.hit(s4.x + 1, s4.y + 1), Hit::Swatch(4));
        let add = layout.add_button.unwrap();
        assert_eq!(layout.hit(add.x, add.y), Hit::AddButton);
        assert_eq!(layout.hit(5, 5), Hit::Light);
        let palette = layout.palette.unwrap();
        assert_eq!(layout.hit(119, palette.y + 1), Hit::Palette);
        assert_eq!(layout.hit(500, 500), Hit::None);
    }

    #[test]
    fn test_revealed_swatch_exposes_delete_corner() {
        let area = Rect::new(0, 0, 120, 40);
        let mut v = view(3, 2);
        let plain = FrameLayout::compute(area, &v);
        assert!(plain.delete.is_none());

        v.palette[4].revealed = true;
        let layout = FrameLayout::compute(area, &v);
        let r = layout.swatch_rect(4).unwrap();
        assert_eq!(layout.delete, Some((4, delete_corner(r))));
        assert_eq!(layout.hit(r.x + r.width - 1, r.y), Hit::Delete(4));
        // The rest of the swatch still taps.
        assert_eq!(layout.hit(r.x, r.y + 1), Hit::Swatch(4));
    }

    #[test]
    fn test_fullscreen_hides_palette() {
        let mut v = view(3, 0);
        v.fullscreen = true;
        let layout = FrameLayout::compute(Rect::new(0, 0, 80, 24), &v);
        assert!(layout.palette.is_none());
        assert!(layout.swatches.is_empty());
        assert_eq!(layout.light, Rect::new(0, 0, 80, 24));
    }

    #[test]
    fn test_picker_overlays_everything() {
        let mut v = view(3, 0);
        v.picker = Some(PickerView {
            cursor: (0.0, 0.0),
            hue: 0.0,
            hue_degrees: 0.0,
            hue_base: Color::white(),
            color: Color::white(),
            pending: None,
            dragging: None,
        });
        let layout = FrameLayout::compute(Rect::new(0, 0, 100, 40), &v);
        let p = layout.picker.clone().unwrap();
        assert!(p.gradient.height > 0);
        assert_eq!(layout.hit(p.gradient.x, p.gradient.y), Hit::Gradient);
        assert_eq!(layout.hit(p.hue.x + 3, p.hue.y), Hit::Hue);
        assert_eq!(layout.hit(p.close.x, p.close.y), Hit::PickerClose);
        assert_eq!(layout.hit(p.confirm.x, p.confirm.y), Hit::PickerConfirm);
        assert_eq!(layout.hit(p.popup.x, p.popup.y + 1), Hit::Popup);
        assert_eq!(layout.hit(0, 0), Hit::Light);
    }
}
