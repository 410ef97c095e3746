use crate::map::{MAP_HEIGHT, MAP_WIDTH};

pub const MAX_X: i32 = MAP_WIDTH as i32 - 1;
pub const MAX_Y: i32 = MAP_HEIGHT as i32 - 1;

/// Cell coordinates within one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Saturates both axes into `[0, 31]`.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0, MAX_X),
            y: self.y.clamp(0, MAX_Y),
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Local position on the active screen.
    pub pos: Position,
    /// Which screen of the world grid is active.
    pub screen_x: i32,
    pub screen_y: i32,
}

impl Player {
    pub fn new(screen: (i32, i32), pos: Position) -> Self {
        Self {
            pos: pos.clamped(),
            screen_x: screen.0,
            screen_y: screen.1,
        }
    }

    pub fn screen(&self) -> (i32, i32) {
        (self.screen_x, self.screen_y)
    }
}
