use thiserror::Error;

use super::Map;

/// Handle into the grid's map storage. Several screens may share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("world grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("unknown map handle {0:?}")]
    UnknownMap(MapId),

    #[error("screen ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfGrid { x: i32, y: i32, width: usize, height: usize },
}

/// Lattice of screens indexed by `(screen_x, screen_y)`.
#[derive(Debug, Clone)]
pub struct WorldGrid {
    pub width: usize,
    pub height: usize,
    maps: Vec<Map>,
    cells: Vec<MapId>,
}

impl WorldGrid {
    pub fn new(width: usize, height: usize, maps: Vec<Map>, fill: MapId) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::EmptyGrid { width, height });
        }
        if fill.0 >= maps.len() {
            return Err(WorldError::UnknownMap(fill));
        }
        Ok(Self {
            width,
            height,
            maps,
            cells: vec![fill; width * height],
        })
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn cell(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y).then(|| y as usize * self.width + x as usize)
    }

    pub fn place(&mut self, x: i32, y: i32, id: MapId) -> Result<(), WorldError> {
        if id.0 >= self.maps.len() {
            return Err(WorldError::UnknownMap(id));
        }
        let cell = self.cell(x, y).ok_or(WorldError::OutOfGrid {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.cells[cell] = id;
        Ok(())
    }

    pub fn map_id(&self, x: i32, y: i32) -> Option<MapId> {
        self.cell(x, y).map(|c| self.cells[c])
    }

    pub fn map_at(&self, x: i32, y: i32) -> Option<&Map> {
        self.map_id(x, y).map(|id| &self.maps[id.0])
    }

    /// The map shown at a screen known to be inside the grid.
    ///
    /// Panics if the screen is outside the grid.
    pub fn screen(&self, x: i32, y: i32) -> &Map {
        match self.map_at(x, y) {
            Some(map) => map,
            None => panic!("screen ({x}, {y}) outside {}x{} grid", self.width, self.height),
        }
    }

    pub fn map_count(&self) -> usize {
        self.maps.len()
    }

    /// Number of screens pointing at `id`.
    pub fn share_count(&self, id: MapId) -> usize {
        self.cells.iter().filter(|&&c| c == id).count()
    }

    /// Mutable access to the map shown at one screen.
    ///
    /// A map shared with other screens is cloned first and only this screen
    /// is re-pointed at the copy, so edits never leak into other screens.
    pub fn map_for_edit(&mut self, x: i32, y: i32) -> Option<&mut Map> {
        let cell = self.cell(x, y)?;
        let id = self.cells[cell];
        if self.share_count(id) > 1 {
            let copy = self.maps[id.0].clone();
            self.maps.push(copy);
            let fresh = MapId(self.maps.len() - 1);
            self.cells[cell] = fresh;
            tracing::debug!(screen_x = x, screen_y = y, from = id.0, to = fresh.0, "detached shared map for editing");
            return Some(&mut self.maps[fresh.0]);
        }
        Some(&mut self.maps[id.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::tile::{Rgb, Tile};

    fn two_map_grid() -> WorldGrid {
        let empty = Map::new(Tile::Passable, Rgb::BLACK, "...");
        let path = Map::new(Tile::Passable, Rgb(0x2E1807), "path");
        let mut grid = WorldGrid::new(4, 3, vec![empty, path], MapId(0)).unwrap();
        grid.place(1, 2, MapId(1)).unwrap();
        grid
    }

    #[test]
    fn every_cell_starts_at_fill() {
        let grid = two_map_grid();
        assert_eq!(grid.map_id(0, 0), Some(MapId(0)));
        assert_eq!(grid.map_id(3, 2), Some(MapId(0)));
        assert_eq!(grid.map_id(1, 2), Some(MapId(1)));
        assert_eq!(grid.share_count(MapId(0)), 11);
    }

    #[test]
    fn lookups_outside_the_grid_are_none() {
        let grid = two_map_grid();
        assert!(grid.map_at(-1, 0).is_none());
        assert!(grid.map_at(4, 0).is_none());
        assert!(grid.map_at(0, 3).is_none());
    }

    #[test]
    fn rejects_bad_construction_and_placement() {
        let map = Map::new(Tile::Passable, Rgb::BLACK, "");
        assert!(matches!(
            WorldGrid::new(0, 4, vec![map.clone()], MapId(0)),
            Err(WorldError::EmptyGrid { .. })
        ));
        assert_eq!(
            WorldGrid::new(2, 2, vec![map], MapId(1)).unwrap_err(),
            WorldError::UnknownMap(MapId(1))
        );

        let mut grid = two_map_grid();
        assert_eq!(grid.place(0, 0, MapId(9)), Err(WorldError::UnknownMap(MapId(9))));
        assert!(matches!(grid.place(4, 0, MapId(0)), Err(WorldError::OutOfGrid { .. })));
    }

    #[test]
    fn editing_a_shared_map_copies_it() {
        let mut grid = two_map_grid();

        grid.map_for_edit(0, 0).unwrap().mark_blocked(5, 5);

        assert!(grid.map_at(0, 0).unwrap().is_blocked(5, 5));
        assert!(!grid.map_at(1, 0).unwrap().is_blocked(5, 5));
        assert_eq!(grid.map_count(), 3);
        assert_eq!(grid.share_count(MapId(0)), 10);

        // the detached copy is now unique, so further edits stay in place
        grid.map_for_edit(0, 0).unwrap().mark_blocked(6, 6);
        assert_eq!(grid.map_count(), 3);
    }

    #[test]
    fn editing_a_unique_map_mutates_in_place() {
        let mut grid = two_map_grid();
        grid.map_for_edit(1, 2).unwrap().mark_blocked(0, 0);
        assert_eq!(grid.map_count(), 2);
        assert!(grid.map_at(1, 2).unwrap().is_blocked(0, 0));
    }
}
