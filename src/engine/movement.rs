use crate::engine::entity::Position;
use crate::map::Map;

pub const DEFAULT_MOVE_COOLDOWN: u32 = 5;

/// Resolves one step from `from` by `(dx, dy)` against the map's collision flags.
///
/// The target is clamped to the screen first. A blocked target falls back to
/// sliding along X (keeping Y), then along Y (keeping X), then to staying put.
pub fn resolve_move(map: &Map, from: Position, (dx, dy): (i32, i32)) -> Position {
    if dx == 0 && dy == 0 {
        return from;
    }

    let target = from.offset(dx, dy).clamped();
    let candidates = [
        target,
        Position::new(target.x, from.y),
        Position::new(from.x, target.y),
    ];

    candidates
        .into_iter()
        .find(|p| !map.is_blocked(p.x as usize, p.y as usize))
        .unwrap_or(from)
        .clamped()
}

/// Throttles movement to one step per `period` ticks.
#[derive(Debug, Clone)]
pub struct MoveCooldown {
    remaining: u32,
    period: u32,
}

impl MoveCooldown {
    pub fn new(period: u32) -> Self {
        Self {
            remaining: 0,
            period: period.max(1),
        }
    }

    /// Advances one tick; true when a move may be attempted this tick.
    pub fn tick(&mut self) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
        }
        self.remaining == 0
    }

    /// Called after an accepted move.
    pub fn arm(&mut self) {
        self.remaining = self.period;
    }
}

impl Default for MoveCooldown {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_COOLDOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::entity::{MAX_X, MAX_Y};
    use crate::map::tile::{Rgb, Tile};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn open_map() -> Map {
        Map::new(Tile::Passable, Rgb::BLACK, "")
    }

    fn map_with_blocks(cells: &[(usize, usize)]) -> Map {
        let mut map = open_map();
        for &(x, y) in cells {
            map.mark_blocked(x, y);
        }
        map
    }

    #[test]
    fn straight_move_onto_open_tile() {
        let map = open_map();
        assert_eq!(resolve_move(&map, Position::new(5, 5), (0, -1)), Position::new(5, 4));
        assert_eq!(resolve_move(&map, Position::new(5, 5), (1, 1)), Position::new(6, 6));
    }

    #[test]
    fn no_delta_means_no_move() {
        let map = map_with_blocks(&[(5, 5)]);
        assert_eq!(resolve_move(&map, Position::new(5, 5), (0, 0)), Position::new(5, 5));
    }

    #[test]
    fn diagonal_into_corner_prefers_x_slide() {
        let map = map_with_blocks(&[(6, 6)]);
        assert_eq!(resolve_move(&map, Position::new(5, 5), (1, 1)), Position::new(6, 5));
    }

    #[test]
    fn falls_back_to_y_slide_when_x_slide_blocked() {
        let map = map_with_blocks(&[(6, 6), (6, 5)]);
        assert_eq!(resolve_move(&map, Position::new(5, 5), (1, 1)), Position::new(5, 6));
    }

    #[test]
    fn fully_blocked_stays_put() {
        let map = map_with_blocks(&[(6, 6), (6, 5), (5, 6)]);
        assert_eq!(resolve_move(&map, Position::new(5, 5), (1, 1)), Position::new(5, 5));

        let map = map_with_blocks(&[(5, 4)]);
        assert_eq!(resolve_move(&map, Position::new(5, 5), (0, -1)), Position::new(5, 5));
    }

    #[test]
    fn edges_clamp_the_target() {
        let map = open_map();
        assert_eq!(resolve_move(&map, Position::new(0, 0), (-1, -1)), Position::new(0, 0));
        assert_eq!(resolve_move(&map, Position::new(31, 10), (1, 1)), Position::new(31, 11));
        assert_eq!(resolve_move(&map, Position::new(31, 31), (1, 1)), Position::new(31, 31));
    }

    #[test]
    fn position_never_leaves_the_screen() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let mut map = open_map();
        for _ in 0..200 {
            map.mark_blocked(rng.gen_range(0..32), rng.gen_range(0..32));
        }

        for _ in 0..2_000 {
            let mut pos = Position::new(rng.gen_range(0..=MAX_X), rng.gen_range(0..=MAX_Y));
            for _ in 0..50 {
                let delta = (rng.gen_range(-1..=1), rng.gen_range(-1..=1));
                pos = resolve_move(&map, pos, delta);
                assert!((0..=MAX_X).contains(&pos.x) && (0..=MAX_Y).contains(&pos.y), "{pos:?}");
            }
        }
    }

    #[test]
    fn cooldown_allows_one_step_every_period_ticks() {
        let mut cooldown = MoveCooldown::new(5);
        assert!(cooldown.tick());
        cooldown.arm();

        for _ in 0..4 {
            assert!(!cooldown.tick());
        }
        assert!(cooldown.tick());
    }

    #[test]
    fn zero_period_is_raised_to_one() {
        let mut cooldown = MoveCooldown::new(0);
        cooldown.arm();
        assert!(cooldown.tick());
    }
}
