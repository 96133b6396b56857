//! A tiny game model with a state machine, and the key bindings which drive
//! it.

use ::std::{cell::RefCell, rc::Rc, time::Duration};
use ::strum::Display;
use ::switchyard::input::keyboard::{
    at_key_down, at_key_up, with_repeat_delay, KeyCode, KeyStroke, KeyboardInputRegister,
    RegisterHandler,
};
use ::tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum GameState {
    Setup,
    Running,
    Pause,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum GameEvent {
    Start,
    Pause,
    Exit,
    Move(Direction),
}

#[derive(Debug)]
pub struct GameModel {
    state: GameState,
    position: (i32, i32),
}

impl GameModel {
    pub fn new() -> Self {
        Self {
            state: GameState::Setup,
            position: (0, 0),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn trigger(&mut self, event: GameEvent) {
        let next = match (self.state, event) {
            (GameState::Setup, GameEvent::Start) => GameState::Running,
            (GameState::Setup, GameEvent::Exit) => GameState::Exit,
            (GameState::Running, GameEvent::Pause) => GameState::Pause,
            (GameState::Running, GameEvent::Move(direction)) => {
                self.step(direction);
                return;
            }
            (GameState::Pause, GameEvent::Start) => GameState::Running,
            (GameState::Pause, GameEvent::Exit) => GameState::Setup,
            (state, event) => {
                warn!(%state, %event, "No transition for event");
                return;
            }
        };

        info!(from = %self.state, to = %next, %event, "Game state changed");
        if self.state == GameState::Setup && next == GameState::Running {
            self.position = (0, 0);
        }
        self.state = next;
    }

    fn step(&mut self, direction: Direction) {
        let (x, y) = self.position;
        self.position = match direction {
            Direction::Up => (x, y - 1),
            Direction::Down => (x, y + 1),
            Direction::Left => (x - 1, y),
            Direction::Right => (x + 1, y),
        };
        info!(%direction, position = ?self.position, "Player moved");
    }
}

/// Binds the game's keys per state, and wraps them into a chain handler
/// which reads the current state from the model.
pub fn input_handler(model: &Rc<RefCell<GameModel>>) -> RegisterHandler<GameState> {
    let mut register = KeyboardInputRegister::new();

    let trigger = |event: GameEvent| {
        let model = model.clone();
        move |_: &KeyStroke<'_, GameState>| {
            model.borrow_mut().trigger(event);
            true
        }
    };

    register.register_key(
        KeyCode::Enter,
        GameState::Setup,
        at_key_down(trigger(GameEvent::Start)),
    );
    register.register_key(
        KeyCode::Escape,
        GameState::Setup,
        at_key_down(trigger(GameEvent::Exit)),
    );

    for (key, direction) in [
        (KeyCode::Up, Direction::Up),
        (KeyCode::Down, Direction::Down),
        (KeyCode::Left, Direction::Left),
        (KeyCode::Right, Direction::Right),
    ] {
        register.register_key(
            key,
            GameState::Running,
            with_repeat_delay(
                trigger(GameEvent::Move(direction)),
                Duration::from_millis(250),
                Some(Duration::from_millis(100)),
            ),
        );
    }
    register.register_key(
        KeyCode::Escape,
        GameState::Running,
        at_key_up(trigger(GameEvent::Pause)),
    );

    register.register_key(
        KeyCode::Escape,
        GameState::Pause,
        at_key_up(trigger(GameEvent::Start)),
    );
    register.register_key(
        KeyCode::Q,
        GameState::Pause,
        at_key_down(trigger(GameEvent::Exit)),
    );

    let model = model.clone();
    RegisterHandler::new(register, move || model.borrow().state())
}
