//! Replays a few seconds of scripted keyboard and mouse input through an
//! input pipeline with a HUD on top of a small game.
//!
//! Run with `RUST_LOG=info` (or `debug`, `trace`) to see what happens.

mod game;
mod hud;

use crate::{
    game::{GameModel, GameState},
    hud::Hud,
};
use ::std::{cell::RefCell, rc::Rc, time::Duration};
use ::switchyard::{
    config::Builder,
    errors::Result,
    input::{
        keyboard::{KeyCode, KeyEvent, Keyboard},
        mouse::{Mouse, MouseButton, MouseEvent},
        InputHandlerPriority, InputManager,
    },
    ui::{ViewKeyboardHandler, ViewMouseHandler},
};
use ::tracing::{info, trace};
use ::tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Simulation step of the replayed game loop.
const FRAME: Duration = Duration::from_millis(16);

/// Give up replaying after this long, even if the game has not exited.
const MAX_RUNTIME: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug)]
enum Input {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

fn down(key_code: KeyCode) -> Input {
    Input::Key(KeyEvent::KeyDown {
        key_code,
        is_repeat: false,
    })
}

fn up(key_code: KeyCode) -> Input {
    Input::Key(KeyEvent::KeyUp { key_code })
}

fn click(button: MouseButton, pressed: bool) -> Input {
    Input::Mouse(if pressed {
        MouseEvent::ButtonDown { button }
    } else {
        MouseEvent::ButtonUp { button }
    })
}

/// Host events as `(milliseconds, event)`, ordered by time.
fn script() -> Vec<(u64, Input)> {
    vec![
        (100, down(KeyCode::Enter)),
        (180, up(KeyCode::Enter)),
        (300, down(KeyCode::Right)),
        (900, up(KeyCode::Right)),
        (1000, down(KeyCode::F1)),
        (1100, up(KeyCode::F1)),
        (1200, Input::Mouse(MouseEvent::Move { x: 120, y: 80 })),
        (1250, click(MouseButton::Left, true)),
        (1300, click(MouseButton::Left, false)),
        (1400, click(MouseButton::Left, true)),
        (1450, click(MouseButton::Left, false)),
        (1500, Input::Mouse(MouseEvent::Wheel { delta: -120 })),
        // Closes the help overlay, so the game never sees this press.
        (1600, down(KeyCode::Escape)),
        (1650, up(KeyCode::Escape)),
        (1800, down(KeyCode::Escape)),
        (1900, up(KeyCode::Escape)),
        // Unbound while paused.
        (2000, down(KeyCode::Up)),
        (2100, up(KeyCode::Up)),
        (2200, down(KeyCode::Escape)),
        (2300, up(KeyCode::Escape)),
        (2400, down(KeyCode::Escape)),
        (2450, up(KeyCode::Escape)),
        (2600, down(KeyCode::Q)),
        (2700, up(KeyCode::Q)),
        (2800, down(KeyCode::Escape)),
        (2900, up(KeyCode::Escape)),
    ]
}

pub fn main() -> Result<()> {
    ::tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = Builder::new().build()?;

    // The host keeps its own handles on the readers, and feeds them events
    // as the platform reports them.
    let keyboard = Rc::new(RefCell::new(Keyboard::new()));
    let mouse = Rc::new(RefCell::new(Mouse::new()));
    let mut manager = InputManager::new(keyboard.clone(), mouse.clone());

    let hud = Hud::default();
    let mut hud_keys = ViewKeyboardHandler::new(&config);
    hud_keys.attach(hud.clone());
    let mut hud_mouse = ViewMouseHandler::new(&config);
    hud_mouse.attach(hud);

    let model = Rc::new(RefCell::new(GameModel::new()));

    manager
        .keyboard_handler_mut()
        .add(InputHandlerPriority::High, Rc::new(RefCell::new(hud_keys)));
    manager.keyboard_handler_mut().add(
        InputHandlerPriority::Normal,
        Rc::new(RefCell::new(game::input_handler(&model))),
    );
    manager
        .mouse_handler_mut()
        .add(InputHandlerPriority::High, Rc::new(RefCell::new(hud_mouse)));

    let mut pending = script().into_iter().peekable();
    let mut time = Duration::ZERO;

    while time <= MAX_RUNTIME && model.borrow().state() != GameState::Exit {
        while let Some((_, input)) =
            pending.next_if(|(at, _)| Duration::from_millis(*at) <= time)
        {
            match input {
                Input::Key(evt) => keyboard.borrow_mut().process_evt(evt),
                Input::Mouse(evt) => mouse.borrow_mut().process_evt(evt),
            }
        }

        let unclaimed = manager.update(time)?;
        if !unclaimed.is_empty() {
            trace!(?time, ?unclaimed, "Keys nobody wanted");
        }

        time += FRAME;
    }

    let model = model.borrow();
    info!(
        state = %model.state(),
        position = ?model.position(),
        elapsed = ?time,
        "Replay finished"
    );
    Ok(())
}
