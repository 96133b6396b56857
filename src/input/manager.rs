//! Per-tick orchestration of the input pipeline.

use super::{
    keyboard::{KeySet, KeyboardHandlerChain, KeyboardInputHandler},
    mouse::{MouseButton, MouseHandlerChain, MouseInputHandler, MouseState},
};
use crate::errors::{Context, Result};

use ::std::{cell::RefCell, rc::Rc, time::Duration};
use ::strum::IntoEnumIterator;
use ::tap::Pipe;
use ::tracing::trace;

/// A source of keyboard samples, polled once per tick.
pub trait KeyboardStateReader {
    /// The keys which are down right now.
    fn pressed_keys(&mut self) -> Result<KeySet>;
}

/// A source of mouse samples, polled once per tick.
pub trait MouseStateReader {
    /// The mouse as it is right now.
    fn mouse_state(&mut self) -> Result<MouseState>;
}

/// Drives one tick of input: polls both readers and routes the samples
/// through the mouse and keyboard handlers. The manager makes no routing
/// decisions of its own.
///
/// # Example
///
/// ```
/// use ::std::{cell::RefCell, rc::Rc, time::Duration};
/// use ::switchyard::input::{
///     keyboard::{KeyCode, KeyEvent, KeySet, Keyboard, KeyboardInputRegister, RegisterHandler},
///     mouse::Mouse,
///     InputHandlerPriority, InputManager,
/// };
///
/// let keyboard = Rc::new(RefCell::new(Keyboard::new()));
/// let mut manager = InputManager::new(keyboard.clone(), Mouse::new());
///
/// let mut register = KeyboardInputRegister::new();
/// register.register_key(KeyCode::Space, (), |_| true);
/// manager.keyboard_handler_mut().add(
///     InputHandlerPriority::Normal,
///     Rc::new(RefCell::new(RegisterHandler::new(register, || ()))),
/// );
///
/// keyboard.borrow_mut().process_evt(KeyEvent::KeyDown {
///     key_code: KeyCode::Space,
///     is_repeat: false,
/// });
/// keyboard.borrow_mut().process_evt(KeyEvent::KeyDown {
///     key_code: KeyCode::Tab,
///     is_repeat: false,
/// });
///
/// let unclaimed = manager.update(Duration::from_millis(16)).unwrap();
/// assert_eq!(unclaimed, KeySet::from([KeyCode::Tab]));
/// ```
pub struct InputManager<KH = KeyboardHandlerChain, MH = MouseHandlerChain> {
    keyboard_reader: Box<dyn KeyboardStateReader>,
    mouse_reader: Box<dyn MouseStateReader>,
    keyboard_handler: KH,
    mouse_handler: MH,
}

impl InputManager {
    /// Constructs a manager which routes input through empty keyboard and
    /// mouse chains.
    pub fn new<KR, MR>(keyboard_reader: KR, mouse_reader: MR) -> Self
    where
        KR: KeyboardStateReader + 'static,
        MR: MouseStateReader + 'static,
    {
        Self::with_handlers(
            keyboard_reader,
            mouse_reader,
            KeyboardHandlerChain::new(),
            MouseHandlerChain::new(),
        )
    }
}

impl<KH, MH> InputManager<KH, MH>
where
    KH: KeyboardInputHandler,
    MH: MouseInputHandler,
{
    /// Constructs a manager around arbitrary handlers.
    pub fn with_handlers<KR, MR>(
        keyboard_reader: KR,
        mouse_reader: MR,
        keyboard_handler: KH,
        mouse_handler: MH,
    ) -> Self
    where
        KR: KeyboardStateReader + 'static,
        MR: MouseStateReader + 'static,
    {
        Self {
            keyboard_reader: Box::new(keyboard_reader),
            mouse_reader: Box::new(mouse_reader),
            keyboard_handler,
            mouse_handler,
        }
    }

    pub fn keyboard_handler(&self) -> &KH {
        &self.keyboard_handler
    }

    /// Mutable access to the keyboard handler. Must not be called from
    /// within a handler during [`update`](Self::update).
    pub fn keyboard_handler_mut(&mut self) -> &mut KH {
        &mut self.keyboard_handler
    }

    pub fn mouse_handler(&self) -> &MH {
        &self.mouse_handler
    }

    /// Mutable access to the mouse handler. Must not be called from within a
    /// handler during [`update`](Self::update).
    pub fn mouse_handler_mut(&mut self) -> &mut MH {
        &mut self.mouse_handler
    }

    /// Runs one tick of input processing at `time`.
    ///
    /// The mouse is processed first: the handler is prepared, offered the
    /// pointer position, the wheel value and each pressed button (left,
    /// right, then middle), and updated. The keyboard follows. Returns the
    /// keys which no keyboard handler claimed.
    ///
    /// A failing reader aborts the tick. If the mouse reader fails, the
    /// keyboard is not polled.
    pub fn update(&mut self, time: Duration) -> Result<KeySet> {
        let mouse = self
            .mouse_reader
            .mouse_state()
            .context("Failed to poll mouse state")?;

        self.mouse_handler.prepare_processing();
        self.mouse_handler.process_mouse_move(mouse.x, mouse.y);
        self.mouse_handler.process_mouse_wheel(mouse.scroll_wheel);
        for button in MouseButton::iter().filter(|button| mouse.is_pressed(*button)) {
            self.mouse_handler.process_button_pressed(button);
        }
        self.mouse_handler.update(time);

        let unclaimed = self
            .keyboard_reader
            .pressed_keys()
            .context("Failed to poll keyboard state")?
            .pipe(|pressed| self.keyboard_handler.process_keys(&pressed, time));

        trace!(?time, ?unclaimed, "Input tick complete");
        Ok(unclaimed)
    }
}

/// Readers shared with the host, which keeps feeding them events between
/// ticks.
impl<R: KeyboardStateReader + ?Sized> KeyboardStateReader for Rc<RefCell<R>> {
    fn pressed_keys(&mut self) -> Result<KeySet> {
        self.borrow_mut().pressed_keys()
    }
}

impl<R: MouseStateReader + ?Sized> MouseStateReader for Rc<RefCell<R>> {
    fn mouse_state(&mut self) -> Result<MouseState> {
        self.borrow_mut().mouse_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::{Error, ErrorKind},
        input::keyboard::KeyCode,
    };

    use ::pretty_assertions::assert_eq;
    use ::std::fmt;

    type CallLog = Rc<RefCell<Vec<String>>>;

    struct ScriptedKeyboard {
        keys: KeySet,
        log: CallLog,
    }

    impl KeyboardStateReader for ScriptedKeyboard {
        fn pressed_keys(&mut self) -> Result<KeySet> {
            self.log.borrow_mut().push("poll keyboard".to_owned());
            Ok(self.keys)
        }
    }

    struct ScriptedMouse {
        state: MouseState,
        log: CallLog,
    }

    impl MouseStateReader for ScriptedMouse {
        fn mouse_state(&mut self) -> Result<MouseState> {
            self.log.borrow_mut().push("poll mouse".to_owned());
            Ok(self.state)
        }
    }

    struct LoggingMouseHandler(CallLog);

    impl MouseInputHandler for LoggingMouseHandler {
        fn prepare_processing(&mut self) {
            self.0.borrow_mut().push("prepare".to_owned());
        }

        fn process_mouse_move(&mut self, x: i32, y: i32) -> bool {
            self.0.borrow_mut().push(format!("move {x},{y}"));
            false
        }

        fn process_mouse_wheel(&mut self, wheel: i32) -> bool {
            self.0.borrow_mut().push(format!("wheel {wheel}"));
            false
        }

        fn process_button_pressed(&mut self, button: MouseButton) -> bool {
            self.0.borrow_mut().push(format!("button {button}"));
            false
        }

        fn update(&mut self, time: Duration) {
            self.0.borrow_mut().push(format!("update {}", time.as_millis()));
        }
    }

    struct LoggingKeyboardHandler(CallLog);

    impl KeyboardInputHandler for LoggingKeyboardHandler {
        fn process_keys(&mut self, pressed_keys: &KeySet, _time: Duration) -> KeySet {
            self.0.borrow_mut().push(format!("keys {pressed_keys:?}"));
            pressed_keys.difference(&KeySet::from([KeyCode::Enter]))
        }
    }

    #[test]
    fn test_update_call_order() {
        let log = CallLog::default();
        let mut manager = InputManager::with_handlers(
            ScriptedKeyboard {
                keys: KeySet::from([KeyCode::Enter, KeyCode::Escape]),
                log: log.clone(),
            },
            ScriptedMouse {
                state: MouseState {
                    x: 3,
                    y: 4,
                    scroll_wheel: 120,
                    left: true,
                    right: false,
                    middle: true,
                },
                log: log.clone(),
            },
            LoggingKeyboardHandler(log.clone()),
            LoggingMouseHandler(log.clone()),
        );

        let unclaimed = manager.update(Duration::from_millis(16)).unwrap();

        assert_eq!(unclaimed, KeySet::from([KeyCode::Escape]));
        assert_eq!(
            *log.borrow(),
            vec![
                "poll mouse",
                "prepare",
                "move 3,4",
                "wheel 120",
                "button Left",
                "button Middle",
                "update 16",
                "poll keyboard",
                "keys {Enter, Escape}",
            ]
        );
    }

    #[derive(Debug)]
    struct Unplugged;

    impl fmt::Display for Unplugged {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("device unplugged")
        }
    }

    impl ::std::error::Error for Unplugged {}

    struct FailingMouse;

    impl MouseStateReader for FailingMouse {
        fn mouse_state(&mut self) -> Result<MouseState> {
            Err(Error::input_source(Unplugged))
        }
    }

    #[test]
    fn test_reader_failure_propagates_with_context() {
        let log = CallLog::default();
        let mut manager = InputManager::new(
            ScriptedKeyboard {
                keys: KeySet::new(),
                log: log.clone(),
            },
            FailingMouse,
        );

        let err = manager.update(Duration::ZERO).unwrap_err();

        assert_eq!(err.kind(), &ErrorKind::InputSource);
        assert_eq!(err.context_message(), Some("Failed to poll mouse state"));
        assert!(log.borrow().is_empty(), "Keyboard must not be polled");
    }

    #[test]
    fn test_shared_reader_sees_host_events() {
        use crate::input::keyboard::{KeyEvent, Keyboard};
        use crate::input::mouse::Mouse;

        let keyboard = Rc::new(RefCell::new(Keyboard::new()));
        let mut manager = InputManager::new(keyboard.clone(), Mouse::new());

        keyboard.borrow_mut().process_evt(KeyEvent::KeyDown {
            key_code: KeyCode::Q,
            is_repeat: false,
        });
        assert_eq!(
            manager.update(Duration::ZERO).unwrap(),
            KeySet::from([KeyCode::Q])
        );

        keyboard.borrow_mut().reset();
        assert!(manager.update(Duration::from_millis(16)).unwrap().is_empty());
    }
}
