//! Mouse forwarding to a UI view.

use super::UiView;
use crate::{
    config::Config,
    input::mouse::{MouseButton, MouseInputHandler, MouseNotification, MouseTracker},
};

use ::std::time::Duration;
use ::tracing::debug;

/// Tracks the mouse samples offered by a chain and forwards the resulting
/// changes to an attached [`UiView`].
///
/// The handler never claims anything, so handlers after it in the chain see
/// every sample too. Changes are detected even while no view is attached, so
/// attaching a view mid-drag does not replay stale edges.
pub struct ViewMouseHandler<V> {
    view: Option<V>,
    tracker: MouseTracker,
}

impl<V: UiView> ViewMouseHandler<V> {
    /// Constructs a handler with no view attached.
    pub fn new(config: &Config) -> Self {
        Self {
            view: None,
            tracker: MouseTracker::new(config),
        }
    }

    /// Starts forwarding to `view`. Returns the previously attached view.
    pub fn attach(&mut self, view: V) -> Option<V> {
        debug!("Attaching view to mouse handler");
        self.view.replace(view)
    }

    /// Stops forwarding, and returns the view.
    pub fn detach(&mut self) -> Option<V> {
        debug!("Detaching view from mouse handler");
        self.view.take()
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut V> {
        self.view.as_mut()
    }
}

impl<V: UiView> MouseInputHandler for ViewMouseHandler<V> {
    fn prepare_processing(&mut self) {
        self.tracker.prepare();
    }

    fn process_mouse_move(&mut self, x: i32, y: i32) -> bool {
        self.tracker.set_position(x, y);
        false
    }

    fn process_mouse_wheel(&mut self, wheel: i32) -> bool {
        self.tracker.set_wheel(wheel);
        false
    }

    fn process_button_pressed(&mut self, button: MouseButton) -> bool {
        self.tracker.press(button);
        false
    }

    fn update(&mut self, time: Duration) {
        let notifications = self.tracker.update(time);
        let view = match self.view.as_mut() {
            Some(view) => view,
            None => return,
        };

        for notification in notifications {
            match notification {
                MouseNotification::Move { x, y } => view.mouse_move(x, y),
                MouseNotification::Wheel { x, y, delta } => view.mouse_wheel(x, y, delta),
                MouseNotification::ButtonDown { x, y, button } => {
                    view.mouse_button_down(x, y, button)
                }
                MouseNotification::ButtonUp { x, y, button } => view.mouse_button_up(x, y, button),
                MouseNotification::DoubleClick { x, y, button } => {
                    view.mouse_double_click(x, y, button)
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{
        keyboard::KeyCode, mouse::MouseHandlerChain, HandlerRef, InputHandlerPriority,
    };

    use ::pretty_assertions::assert_eq;
    use ::std::{cell::RefCell, rc::Rc};

    /// Records mouse notifications as the view receives them.
    #[derive(Default)]
    struct Canvas {
        received: Vec<MouseNotification>,
    }

    impl UiView for Canvas {
        fn key_down(&mut self, _key: KeyCode) -> bool {
            false
        }

        fn key_up(&mut self, _key: KeyCode) -> bool {
            false
        }

        fn mouse_move(&mut self, x: i32, y: i32) -> bool {
            self.received.push(MouseNotification::Move { x, y });
            true
        }

        fn mouse_wheel(&mut self, x: i32, y: i32, delta: i32) -> bool {
            self.received.push(MouseNotification::Wheel { x, y, delta });
            true
        }

        fn mouse_button_down(&mut self, x: i32, y: i32, button: MouseButton) -> bool {
            self.received.push(MouseNotification::ButtonDown { x, y, button });
            true
        }

        fn mouse_button_up(&mut self, x: i32, y: i32, button: MouseButton) -> bool {
            self.received.push(MouseNotification::ButtonUp { x, y, button });
            true
        }

        fn mouse_double_click(&mut self, x: i32, y: i32, button: MouseButton) -> bool {
            self.received.push(MouseNotification::DoubleClick { x, y, button });
            true
        }
    }

    /// Claims every move.
    #[derive(Default)]
    struct Game {
        moves: usize,
    }

    impl MouseInputHandler for Game {
        fn process_mouse_move(&mut self, _x: i32, _y: i32) -> bool {
            self.moves += 1;
            true
        }
    }

    fn tick(chain: &mut MouseHandlerChain, time: u64, left: bool) {
        chain.prepare_processing();
        chain.process_mouse_move(8, 8);
        chain.process_mouse_wheel(0);
        if left {
            chain.process_button_pressed(MouseButton::Left);
        }
        chain.update(Duration::from_millis(time));
    }

    #[test]
    fn test_observes_without_claiming() {
        let ui: HandlerRef<ViewMouseHandler<Canvas>> =
            Rc::new(RefCell::new(ViewMouseHandler::new(&Config::default())));
        ui.borrow_mut().attach(Canvas::default());
        let game = Rc::new(RefCell::new(Game::default()));

        let mut chain = MouseHandlerChain::new();
        chain.add(InputHandlerPriority::High, ui.clone());
        chain.add(InputHandlerPriority::Normal, game.clone());

        tick(&mut chain, 0, true);
        tick(&mut chain, 50, false);
        tick(&mut chain, 100, true);

        assert_eq!(game.borrow().moves, 3);

        let ui = ui.borrow();
        let received = &ui.view().unwrap().received;
        assert_eq!(
            *received,
            vec![
                MouseNotification::Move { x: 8, y: 8 },
                MouseNotification::ButtonDown {
                    x: 8,
                    y: 8,
                    button: MouseButton::Left
                },
                MouseNotification::ButtonUp {
                    x: 8,
                    y: 8,
                    button: MouseButton::Left
                },
                MouseNotification::DoubleClick {
                    x: 8,
                    y: 8,
                    button: MouseButton::Left
                },
            ]
        );
    }

    #[test]
    fn test_tracks_while_detached() {
        let mut handler = ViewMouseHandler::<Canvas>::new(&Config::default());

        handler.prepare_processing();
        handler.process_button_pressed(MouseButton::Right);
        handler.update(Duration::ZERO);

        handler.attach(Canvas::default());
        handler.prepare_processing();
        handler.process_button_pressed(MouseButton::Right);
        handler.update(Duration::from_millis(16));

        assert!(handler.view().unwrap().received.is_empty());
    }
}
