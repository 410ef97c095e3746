use crate::engine::entity::{MAX_X, MAX_Y, Player, Position};
use crate::map::grid::WorldGrid;

/// Local coordinate given on the axis just crossed, one cell inside the far edge.
pub const REENTRY_HIGH: i32 = MAX_Y - 1;
pub const REENTRY_LOW: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    South,
    West,
    East,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub heading: Heading,
    pub screen: (i32, i32),
    pub local: Position,
}

/// Finds the screen change triggered by standing on an edge, if any.
///
/// Edges are checked north, south, west, east and only the first match
/// applies. The player re-enters one cell inside the opposite edge.
pub fn check_transition(grid: &WorldGrid, screen: (i32, i32), local: Position) -> Option<Transition> {
    let (sx, sy) = screen;

    let (heading, screen, local) = if local.y == 0 && grid.contains(sx, sy - 1) {
        (Heading::North, (sx, sy - 1), Position::new(local.x, REENTRY_HIGH))
    } else if local.y == MAX_Y && grid.contains(sx, sy + 1) {
        (Heading::South, (sx, sy + 1), Position::new(local.x, REENTRY_LOW))
    } else if local.x == 0 && grid.contains(sx - 1, sy) {
        (Heading::West, (sx - 1, sy), Position::new(REENTRY_HIGH, local.y))
    } else if local.x == MAX_X && grid.contains(sx + 1, sy) {
        (Heading::East, (sx + 1, sy), Position::new(REENTRY_LOW, local.y))
    } else {
        return None;
    };

    Some(Transition { heading, screen, local })
}

impl Player {
    pub fn apply_transition(&mut self, t: &Transition) {
        self.screen_x = t.screen.0;
        self.screen_y = t.screen.1;
        self.pos = t.local;
    }
}
