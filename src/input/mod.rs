use crate::app::actions::{Action, Gesture};
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, PointerOrigin, PointerTarget};
use crate::config::InputConfig;
use crate::picker::{Bounds, Control};
use crate::tui::layout::{FrameLayout, Hit};
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::Instant;
use tokio::sync::mpsc;

/// Cursor step for arrow keys inside the picker, in percent.
const NUDGE: f64 = 5.0;
const HUE_STEP: f64 = 5.0;
const HUE_JUMP: f64 = 30.0;

pub fn spawn_input_task(tx: mpsc::Sender<Event>, mouse_enabled: bool) {
    tokio::task::spawn_blocking(move || {
        loop {
            if event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                let ev = match event::read() {
                    Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => InputEvent::Key(k),
                    Ok(CtEvent::Mouse(m)) if mouse_enabled => InputEvent::Mouse(m),
                    Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!(error = %e, "terminal read failed");
                        continue;
                    }
                };
                if tx.blocking_send(Event::Input(ev)).is_err() {
                    break;
                }
            } else if tx.is_closed() {
                break;
            }
        }
    });
}

/// What the mapper needs to know about the frame that was last drawn.
pub struct InputContext<'a> {
    pub layout: &'a FrameLayout,
    pub picker_open: bool,
    pub input: &'a InputConfig,
}

pub fn map_input(state: &mut AppState, ctx: &InputContext<'_>, ev: InputEvent) -> Vec<Action> {
    match ev {
        InputEvent::Resize => vec![Action::Resize],
        InputEvent::Key(k) => handle_key(state, ctx, k).into_iter().collect(),
        InputEvent::Mouse(m) => handle_mouse(state, ctx, m),
    }
}

fn handle_key(state: &AppState, ctx: &InputContext<'_>, k: KeyEvent) -> Option<Action> {
    if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }
    if state.show_help {
        return handle_help_overlay(k);
    }
    if ctx.picker_open {
        return handle_picker_mode(k);
    }
    handle_normal_mode(k)
}

fn handle_help_overlay(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::F(1) => Some(Action::ToggleHelp),
        _ => None,
    }
}

fn handle_normal_mode(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::ToggleHelp),

        // Focus
        KeyCode::Left | KeyCode::Char('h') => Some(Action::FocusPrev),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::FocusNext),

        // Swatch actions on the focused index
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::TapFocused),
        KeyCode::Char('x') => Some(Action::LongPressFocused),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteFocused),
        KeyCode::Char('H') => Some(Action::MoveFocused(-1)),
        KeyCode::Char('L') => Some(Action::MoveFocused(1)),

        // Selection stepping, same as swiping the light
        KeyCode::Char('n') | KeyCode::Char(']') | KeyCode::Down | KeyCode::Char('j') => {
            Some(Gesture::Step(1).into())
        }
        KeyCode::Char('p') | KeyCode::Char('[') | KeyCode::Up | KeyCode::Char('k') => {
            Some(Gesture::Step(-1).into())
        }

        KeyCode::Char('a') | KeyCode::Char('+') => Some(Gesture::ToggleAdd.into()),
        KeyCode::Char('f') => Some(Gesture::ToggleFullscreen.into()),
        KeyCode::Esc => Some(Gesture::DismissReveal.into()),
        _ => None,
    }
}

fn handle_picker_mode(k: KeyEvent) -> Option<Action> {
    let nudge = |hue: f64, saturation: f64, value: f64| {
        Some(Action::Gesture(Gesture::NudgeCursor {
            hue,
            saturation,
            value,
        }))
    };
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::ToggleHelp),

        KeyCode::Left | KeyCode::Char('h') => nudge(0.0, -NUDGE, 0.0),
        KeyCode::Right | KeyCode::Char('l') => nudge(0.0, NUDGE, 0.0),
        KeyCode::Up | KeyCode::Char('k') => nudge(0.0, 0.0, NUDGE),
        KeyCode::Down | KeyCode::Char('j') => nudge(0.0, 0.0, -NUDGE),
        KeyCode::Char('[') => nudge(-HUE_STEP, 0.0, 0.0),
        KeyCode::Char(']') => nudge(HUE_STEP, 0.0, 0.0),
        KeyCode::Char('{') => nudge(-HUE_JUMP, 0.0, 0.0),
        KeyCode::Char('}') => nudge(HUE_JUMP, 0.0, 0.0),

        KeyCode::Enter => Some(Gesture::PickerConfirm.into()),
        KeyCode::Esc => Some(Gesture::PickerClose.into()),
        KeyCode::Char('a') | KeyCode::Char('+') => Some(Gesture::ToggleAdd.into()),
        _ => None,
    }
}

fn handle_mouse(state: &mut AppState, ctx: &InputContext<'_>, m: MouseEvent) -> Vec<Action> {
    let now = Instant::now();
    let hit = ctx.layout.hit(m.column, m.row);
    match m.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // A press whose release never arrived.
            let stale = matches!(
                state.pointer,
                Some(PointerOrigin {
                    target: PointerTarget::Swatch,
                    ..
                })
            );
            let (target, mut actions) = pointer_down(ctx, hit, m, now);
            if stale {
                actions.insert(0, Gesture::PressCancel.into());
            }
            state.pointer = Some(PointerOrigin {
                target,
                column: m.column,
                row: m.row,
                at: now,
            });
            actions
        }
        MouseEventKind::Drag(MouseButton::Left) => match state.pointer.map(|p| p.target) {
            Some(PointerTarget::Swatch) => vec![
                Gesture::PressMove {
                    over: swatch_under(hit),
                }
                .into(),
            ],
            Some(PointerTarget::Picker) => {
                let (x, y) = to_units(ctx.input, m.column, m.row);
                vec![Gesture::PickerPointerMove { x, y }.into()]
            }
            _ => Vec::new(),
        },
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(origin) = state.pointer.take() else {
                return Vec::new();
            };
            match origin.target {
                PointerTarget::Swatch => vec![
                    Gesture::PressEnd {
                        over: swatch_under(hit),
                        at: now,
                    }
                    .into(),
                ],
                PointerTarget::Picker => vec![Gesture::PickerPointerUp.into()],
                PointerTarget::Light => {
                    if (m.column, m.row) == (origin.column, origin.row) {
                        vec![Gesture::TapLight.into()]
                    } else {
                        let dx = (f64::from(m.column) - f64::from(origin.column))
                            * ctx.input.cell_width;
                        vec![
                            Gesture::DismissReveal.into(),
                            Gesture::Swipe {
                                distance: dx,
                                elapsed: now.saturating_duration_since(origin.at),
                            }
                            .into(),
                        ]
                    }
                }
                PointerTarget::Other => Vec::new(),
            }
        }
        MouseEventKind::ScrollUp => vec![Gesture::Step(-1).into()],
        MouseEventKind::ScrollDown => vec![Gesture::Step(1).into()],
        _ => Vec::new(),
    }
}

fn pointer_down(
    ctx: &InputContext<'_>,
    hit: Hit,
    m: MouseEvent,
    now: Instant,
) -> (PointerTarget, Vec<Action>) {
    let control = match hit {
        Hit::Gradient => Some(Control::Gradient),
        Hit::Hue => Some(Control::Hue),
        _ => None,
    };
    if let Some(control) = control
        && let Some(rect) = picker_rect(ctx.layout, control)
    {
        let (x, y) = to_units(ctx.input, m.column, m.row);
        let bounds = bounds_of(ctx.input, rect);
        return (
            PointerTarget::Picker,
            vec![
                Gesture::PickerPointerDown {
                    control,
                    bounds,
                    x,
                    y,
                }
                .into(),
            ],
        );
    }

    match hit {
        Hit::Swatch(index) => (
            PointerTarget::Swatch,
            vec![Gesture::PressStart { index, at: now }.into()],
        ),
        Hit::Delete(index) => (
            PointerTarget::Other,
            vec![Gesture::DeleteSwatch(index).into()],
        ),
        Hit::AddButton => (
            PointerTarget::Other,
            vec![Gesture::DismissReveal.into(), Gesture::ToggleAdd.into()],
        ),
        Hit::PickerClose => (PointerTarget::Other, vec![Gesture::PickerClose.into()]),
        Hit::PickerConfirm => (PointerTarget::Other, vec![Gesture::PickerConfirm.into()]),
        Hit::Popup => (PointerTarget::Other, Vec::new()),
        _ if ctx.picker_open => (PointerTarget::Other, vec![Gesture::TapOutsidePicker.into()]),
        Hit::Palette => (PointerTarget::Other, vec![Gesture::DismissReveal.into()]),
        Hit::Light => (PointerTarget::Light, Vec::new()),
        _ => (PointerTarget::Other, Vec::new()),
    }
}

fn swatch_under(hit: Hit) -> Option<usize> {
    match hit {
        Hit::Swatch(index) | Hit::Delete(index) => Some(index),
        _ => None,
    }
}

fn picker_rect(layout: &FrameLayout, control: Control) -> Option<Rect> {
    let picker = layout.picker.as_ref()?;
    Some(match control {
        Control::Gradient => picker.gradient,
        Control::Hue => picker.hue,
    })
}

fn to_units(input: &InputConfig, column: u16, row: u16) -> (f64, f64) {
    (
        f64::from(column) * input.cell_width,
        f64::from(row) * input.cell_height,
    )
}

/// Control bounds in the same units as pointer positions. The last cell of
/// a control maps to the far edge, so clicking it reaches 100%.
fn bounds_of(input: &InputConfig, rect: Rect) -> Bounds {
    let (x, y) = to_units(input, rect.x, rect.y);
    Bounds::new(
        x,
        y,
        f64::from(rect.width.saturating_sub(1)) * input.cell_width,
        f64::from(rect.height.saturating_sub(1)) * input.cell_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::view::{PickerView, SwatchView, ViewDescription};
    use crate::color::Color;
    use crate::palette::Section;
    use std::time::Duration;

    fn layout(picker: bool) -> FrameLayout {
        layout_with(picker, None)
    }

    fn layout_with(picker: bool, revealed: Option<usize>) -> FrameLayout {
        let palette = (0..4)
            .map(|i| SwatchView {
                index: i,
                color: Color::white(),
                section: if i < 3 { Section::System } else { Section::Custom },
                selected: i == 0,
                deletable: i == 3,
                draggable: i < 3,
                revealed: revealed == Some(i),
                drag_source: false,
            })
            .collect();
        let picker = picker.then(|| PickerView {
            cursor: (0.0, 0.0),
            hue: 0.0,
            hue_degrees: 0.0,
            hue_base: Color::white(),
            color: Color::white(),
            pending: None,
            dragging: None,
        });
        FrameLayout::compute(
            Rect::new(0, 0, 100, 40),
            &ViewDescription {
                surface: Color::white(),
                fullscreen: false,
                palette,
                picker,
            },
        )
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> InputEvent {
        InputEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_normal_mode_keys() {
        let layout = layout(false);
        let input = InputConfig::default();
        let ctx = InputContext {
            layout: &layout,
            picker_open: false,
            input: &input,
        };
        let mut state = AppState::new();
        assert_eq!(
            map_input(&mut state, &ctx, key(KeyCode::Char('q'))),
            vec![Action::Quit]
        );
        assert_eq!(
            map_input(&mut state, &ctx, key(KeyCode::Char('n'))),
            vec![Action::Gesture(Gesture::Step(1))]
        );
        assert_eq!(
            map_input(&mut state, &ctx, key(KeyCode::Char('L'))),
            vec![Action::MoveFocused(1)]
        );
        assert_eq!(
            map_input(&mut state, &ctx, key(KeyCode::Char('a'))),
            vec![Action::Gesture(Gesture::ToggleAdd)]
        );
    }

    #[test]
    fn test_picker_mode_keys() {
        let layout = layout(true);
        let input = InputConfig::default();
        let ctx = InputContext {
            layout: &layout,
            picker_open: true,
            input: &input,
        };
        let mut state = AppState::new();
        assert_eq!(
            map_input(&mut state, &ctx, key(KeyCode::Right)),
            vec![Action::Gesture(Gesture::NudgeCursor {
                hue: 0.0,
                saturation: NUDGE,
                value: 0.0,
            })]
        );
        assert_eq!(
            map_input(&mut state, &ctx, key(KeyCode::Enter)),
            vec![Action::Gesture(Gesture::PickerConfirm)]
        );
        assert_eq!(
            map_input(&mut state, &ctx, key(KeyCode::Esc)),
            vec![Action::Gesture(Gesture::PickerClose)]
        );
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let layout = layout(false);
        let input = InputConfig::default();
        let ctx = InputContext {
            layout: &layout,
            picker_open: false,
            input: &input,
        };
        let mut state = AppState::new();
        state.show_help = true;
        assert!(map_input(&mut state, &ctx, key(KeyCode::Char('n'))).is_empty());
        assert_eq!(
            map_input(&mut state, &ctx, key(KeyCode::Esc)),
            vec![Action::ToggleHelp]
        );
    }

    #[test]
    fn test_swatch_press_and_release() {
        let layout = layout(false);
        let input = InputConfig::default();
        let ctx = InputContext {
            layout: &layout,
            picker_open: false,
            input: &input,
        };
        let mut state = AppState::new();
        let r = layout.swatch_rect(1).unwrap();

        let down = map_input(
            &mut state,
            &ctx,
            mouse(MouseEventKind::Down(MouseButton::Left), r.x, r.y),
        );
        assert!(matches!(
            down.as_slice(),
            [Action::Gesture(Gesture::PressStart { index: 1, .. })]
        ));

        let up = map_input(
            &mut state,
            &ctx,
            mouse(MouseEventKind::Up(MouseButton::Left), r.x + 1, r.y),
        );
        assert!(matches!(
            up.as_slice(),
            [Action::Gesture(Gesture::PressEnd { over: Some(1), .. })]
        ));
        assert!(state.pointer.is_none());
    }

    #[test]
    fn test_click_on_delete_corner_deletes() {
        let layout = layout_with(false, Some(3));
        let input = InputConfig::default();
        let ctx = InputContext {
            layout: &layout,
            picker_open: false,
            input: &input,
        };
        let mut state = AppState::new();
        let r = layout.swatch_rect(3).unwrap();

        let down = map_input(
            &mut state,
            &ctx,
            mouse(MouseEventKind::Down(MouseButton::Left), r.x + r.width - 1, r.y),
        );
        assert_eq!(down, vec![Action::Gesture(Gesture::DeleteSwatch(3))]);
        assert!(
            map_input(
                &mut state,
                &ctx,
                mouse(MouseEventKind::Up(MouseButton::Left), r.x + r.width - 1, r.y)
            )
            .is_empty()
        );
    }

    #[test]
    fn test_lost_release_cancels_press() {
        let layout = layout(false);
        let input = InputConfig::default();
        let ctx = InputContext {
            layout: &layout,
            picker_open: false,
            input: &input,
        };
        let mut state = AppState::new();
        let r = layout.swatch_rect(0).unwrap();
        let down = mouse(MouseEventKind::Down(MouseButton::Left), r.x, r.y);
        map_input(&mut state, &ctx, down.clone());
        let again = map_input(&mut state, &ctx, down);
        assert_eq!(again[0], Action::Gesture(Gesture::PressCancel));
        assert!(matches!(
            again[1],
            Action::Gesture(Gesture::PressStart { index: 0, .. })
        ));
    }

    #[test]
    fn test_light_tap_and_swipe() {
        let layout = layout(false);
        let input = InputConfig::default();
        let ctx = InputContext {
            layout: &layout,
            picker_open: false,
            input: &input,
        };
        let mut state = AppState::new();

        assert!(
            map_input(
                &mut state,
                &ctx,
                mouse(MouseEventKind::Down(MouseButton::Left), 10, 5)
            )
            .is_empty()
        );
        assert_eq!(
            map_input(
                &mut state,
                &ctx,
                mouse(MouseEventKind::Up(MouseButton::Left), 10, 5)
            ),
            vec![Action::Gesture(Gesture::TapLight)]
        );

        map_input(
            &mut state,
            &ctx,
            mouse(MouseEventKind::Down(MouseButton::Left), 10, 5),
        );
        let up = map_input(
            &mut state,
            &ctx,
            mouse(MouseEventKind::Up(MouseButton::Left), 20, 5),
        );
        match up.as_slice() {
            [
                Action::Gesture(Gesture::DismissReveal),
                Action::Gesture(Gesture::Swipe { distance, elapsed }),
            ] => {
                assert_eq!(*distance, 10.0 * input.cell_width);
                assert!(*elapsed < Duration::from_secs(5));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_gradient_press_maps_to_units() {
        let layout = layout(true);
        let input = InputConfig::default();
        let ctx = InputContext {
            layout: &layout,
            picker_open: true,
            input: &input,
        };
        let mut state = AppState::new();
        let g = layout.picker.as_ref().unwrap().gradient;
        let col = g.x + g.width - 1;

        let down = map_input(
            &mut state,
            &ctx,
            mouse(MouseEventKind::Down(MouseButton::Left), col, g.y),
        );
        match down.as_slice() {
            [Action::Gesture(Gesture::PickerPointerDown {
                control,
                bounds,
                x,
                y,
            })] => {
                assert_eq!(*control, Control::Gradient);
                assert_eq!(bounds.fraction_x(*x), 1.0);
                assert_eq!(bounds.fraction_y(*y), 0.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            map_input(
                &mut state,
                &ctx,
                mouse(MouseEventKind::Up(MouseButton::Left), col, g.y)
            ),
            vec![Action::Gesture(Gesture::PickerPointerUp)]
        );
    }

    #[test]
    fn test_click_outside_picker_closes_it() {
        let layout = layout(true);
        let input = InputConfig::default();
        let ctx = InputContext {
            layout: &layout,
            picker_open: true,
            input: &input,
        };
        let mut state = AppState::new();
        assert_eq!(
            map_input(
                &mut state,
                &ctx,
                mouse(MouseEventKind::Down(MouseButton::Left), 0, 0)
            ),
            vec![Action::Gesture(Gesture::TapOutsidePicker)]
        );
    }
}
