pub mod actions;
pub mod controller;
pub mod events;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::input::{self, InputContext};
use crate::palette::ColorStore;
use crate::storage::KeyValueStore;
use crate::tui::layout::FrameLayout;
use crate::tui::{self, TuiTerminal};
use actions::{Action, Gesture};
use controller::Controller;
use events::Event;
use state::{AppState, Toast};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Drives long-press detection and toast expiry.
const TICK: Duration = Duration::from_millis(100);

pub struct App {
    cfg: Config,
    state: AppState,
    controller: Controller,
    layout: FrameLayout,
}

impl App {
    pub fn new(cfg: Config, storage: Box<dyn KeyValueStore>) -> Self {
        let store = ColorStore::load(storage);
        info!(
            colors = store.len(),
            current = %store.selection().color,
            "starting tui"
        );
        let mut controller = Controller::new(store, cfg.gestures.clone());
        controller.set_fullscreen(cfg.ui.start_fullscreen);

        let mut state = AppState::new();
        state.focus = controller.store().selection().index;
        if cfg.ui.show_hints {
            state.toast = Some(Toast::info("? for keys, a to add a color"));
        }

        Self {
            cfg,
            state,
            controller,
            layout: FrameLayout::default(),
        }
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone(), self.cfg.input.mouse);
        spawn_ticker(tx.clone());
        drop(tx);

        self.layout = tui::draw(terminal, &self.cfg, &self.state, &self.controller)?;

        while let Some(ev) = rx.recv().await {
            let redraw = match ev {
                Event::Input(input_ev) => {
                    let ctx = InputContext {
                        layout: &self.layout,
                        picker_open: self.controller.picker().is_open(),
                        input: &self.cfg.input,
                    };
                    let actions = input::map_input(&mut self.state, &ctx, input_ev);
                    let mut redraw = false;
                    for action in actions {
                        redraw |= self.handle_action(action);
                    }
                    redraw
                }
                Event::Tick => self.on_tick(),
            };

            if self.state.should_quit {
                break;
            }

            if redraw {
                self.layout = tui::draw(terminal, &self.cfg, &self.state, &self.controller)?;
            }
        }

        info!("bye");
        Ok(())
    }

    fn on_tick(&mut self) -> bool {
        let mut redraw = self.apply(Gesture::Tick(Instant::now()));
        if self.state.toast.as_ref().is_some_and(Toast::is_expired) {
            self.state.toast = None;
            redraw = true;
        }
        redraw
    }

    /// Returns whether the frame needs repainting.
    fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                self.state.should_quit = true;
                false
            }
            Action::Resize => true,
            Action::ToggleHelp => {
                self.state.show_help = !self.state.show_help;
                true
            }
            // Moving focus drops any reveal or armed drag on the old swatch.
            Action::FocusPrev => {
                self.state.focus_prev();
                self.apply(Gesture::DismissReveal);
                true
            }
            Action::FocusNext => {
                self.state.focus_next(self.controller.store().len());
                self.apply(Gesture::DismissReveal);
                true
            }
            Action::TapFocused => self.apply(Gesture::TapSwatch(self.state.focus)),
            Action::LongPressFocused => self.apply(Gesture::LongPressSwatch(self.state.focus)),
            Action::DeleteFocused => self.apply(Gesture::DeleteSwatch(self.state.focus)),
            Action::MoveFocused(delta) => {
                let from = self.state.focus;
                let Some(to) = from.checked_add_signed(delta) else {
                    return false;
                };
                let color = self.controller.store().color_at(from).cloned();
                let redraw = self.apply(Gesture::DropSwatch { from, to });
                // Focus travels with the swatch.
                if color.is_some() && self.controller.store().color_at(to) == color.as_ref() {
                    self.state.focus = to;
                }
                redraw
            }
            Action::Gesture(gesture) => self.apply(gesture),
        }
    }

    fn apply(&mut self, gesture: Gesture) -> bool {
        if !matches!(gesture, Gesture::Tick(_)) {
            debug!(?gesture, "gesture");
        }
        let outcome = self.controller.handle(gesture);
        self.state.clamp_focus(self.controller.store().len());
        match outcome.error {
            Some(err) => {
                warn!(error = %err, "palette not saved");
                self.state.toast = Some(Toast::error(format!("Palette not saved: {err}")));
                true
            }
            None => !outcome.redraw.is_empty(),
        }
    }
}

fn spawn_ticker(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx.send(Event::Tick).await.is_err() {
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Snapshot;
    use crate::storage::{MemoryStore, STORAGE_KEY};

    fn app() -> App {
        let snapshot = Snapshot {
            system_colors: ["#AAAAAA", "#BBBBBB", "#CCCCCC"]
                .iter()
                .map(|s| s.parse().unwrap())
                .collect(),
            custom_colors: vec!["#123456".parse().unwrap()],
            current_color: "#AAAAAA".parse().unwrap(),
        };
        let mut storage = MemoryStore::new();
        storage
            .set(STORAGE_KEY, &snapshot.to_json().unwrap())
            .unwrap();
        let mut cfg = Config::default();
        cfg.ui.show_hints = false;
        App::new(cfg, Box::new(storage))
    }

    #[test]
    fn test_new_focuses_selection() {
        let app = app();
        assert_eq!(app.state.focus, 0);
        assert!(app.state.toast.is_none());
        assert_eq!(app.controller.store().len(), 4);
    }

    #[test]
    fn test_move_focused_carries_focus() {
        let mut app = app();
        app.handle_action(Action::FocusNext);
        assert!(app.handle_action(Action::MoveFocused(1)));
        assert_eq!(app.state.focus, 2);
        assert_eq!(app.controller.store().system()[2].as_str(), "#BBBBBB");

        // The last system slot cannot move into the custom section.
        assert!(!app.handle_action(Action::MoveFocused(1)));
        assert_eq!(app.state.focus, 2);
        assert!(!app.handle_action(Action::MoveFocused(-5)));
    }

    #[test]
    fn test_delete_focused_clamps_focus() {
        let mut app = app();
        for _ in 0..3 {
            app.handle_action(Action::FocusNext);
        }
        assert_eq!(app.state.focus, 3);
        assert!(app.handle_action(Action::DeleteFocused));
        assert_eq!(app.controller.store().len(), 3);
        assert_eq!(app.state.focus, 2);
    }

    fn click(app: &mut App, column: u16, row: u16) {
        use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
        for kind in [
            MouseEventKind::Down(MouseButton::Left),
            MouseEventKind::Up(MouseButton::Left),
        ] {
            let ev = events::InputEvent::Mouse(MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            });
            let ctx = InputContext {
                layout: &app.layout,
                picker_open: app.controller.picker().is_open(),
                input: &app.cfg.input,
            };
            let actions = input::map_input(&mut app.state, &ctx, ev);
            for action in actions {
                app.handle_action(action);
            }
            app.layout = FrameLayout::compute(
                ratatui::layout::Rect::new(0, 0, 100, 40),
                &view::describe(&app.controller),
            );
        }
    }

    #[test]
    fn test_clicking_revealed_delete_removes_color() {
        let mut app = app();
        app.state.focus = 3;
        app.handle_action(Action::LongPressFocused);
        app.layout = FrameLayout::compute(
            ratatui::layout::Rect::new(0, 0, 100, 40),
            &view::describe(&app.controller),
        );
        let r = app.layout.swatch_rect(3).unwrap();

        click(&mut app, r.x + r.width - 1, r.y);
        assert!(app.controller.store().custom().is_empty());
        assert!(!app.controller.picker().is_open());
        assert_eq!(app.controller.revealed(), None);
    }

    #[test]
    fn test_focus_move_disarms_keyboard_drag() {
        let mut app = app();
        app.handle_action(Action::LongPressFocused);
        assert_eq!(app.controller.drag_source(), Some(0));
        app.handle_action(Action::FocusNext);
        assert_eq!(app.controller.drag_source(), None);
    }

    #[test]
    fn test_quit_and_help() {
        let mut app = app();
        app.handle_action(Action::ToggleHelp);
        assert!(app.state.show_help);
        assert!(!app.handle_action(Action::Quit));
        assert!(app.state.should_quit);
    }
}
