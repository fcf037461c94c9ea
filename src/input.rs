use glam::Vec2;
use miniquad::KeyCode;

/// One of the four movement directions bound to WASD.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

impl Direction {
    /// Map a key to a movement direction, if it is one of W, A, S or D.
    pub fn from_keycode(keycode: KeyCode) -> Option<Direction> {
        match keycode {
            KeyCode::W => Some(Direction::Forward),
            KeyCode::S => Some(Direction::Back),
            KeyCode::A => Some(Direction::Left),
            KeyCode::D => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Which movement keys are currently held.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Forward => self.forward = held,
            Direction::Back => self.back = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }
}

/// Mouse state that gets passed through to the shader as-is.
#[derive(Copy, Clone, Debug, Default)]
pub struct MouseState {
    /// The current position of the mouse in window coordinates.
    pub position: Vec2,

    /// Whether any mouse button is down.
    pub button_down: bool,
}
