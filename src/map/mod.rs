pub mod asset;
pub mod grid;
pub mod tile;

use thiserror::Error;

use tile::{Rgb, Tile};

pub const MAP_WIDTH: usize = 32;
pub const MAP_HEIGHT: usize = 32;
pub const MAP_CELLS: usize = MAP_WIDTH * MAP_HEIGHT;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("expected {expected} tile flags, got {actual}")]
    TileCount { expected: usize, actual: usize },

    #[error("expected {expected} cell colors, got {actual}")]
    ColorCount { expected: usize, actual: usize },
}

/// One 32x32 screen: collision flags, display colors and a status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    tiles: Vec<Tile>,
    colors: Vec<Rgb>,
    pub description: String,
}

impl Map {
    pub fn new(fill: Tile, color: Rgb, description: impl Into<String>) -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            tiles: vec![fill; MAP_CELLS],
            colors: vec![color; MAP_CELLS],
            description: description.into(),
        }
    }

    pub fn from_parts(
        tiles: Vec<Tile>,
        colors: Vec<Rgb>,
        description: impl Into<String>,
    ) -> Result<Self, MapError> {
        if tiles.len() != MAP_CELLS {
            return Err(MapError::TileCount { expected: MAP_CELLS, actual: tiles.len() });
        }
        if colors.len() != MAP_CELLS {
            return Err(MapError::ColorCount { expected: MAP_CELLS, actual: colors.len() });
        }
        Ok(Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            tiles,
            colors,
            description: description.into(),
        })
    }

    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn tile(&self, x: usize, y: usize) -> Tile {
        self.tiles[self.idx(x, y)]
    }

    #[cfg(test)]
    pub fn color(&self, x: usize, y: usize) -> Rgb {
        self.colors[self.idx(x, y)]
    }

    #[cfg(test)]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        self.tile(x, y).is_blocked()
    }

    pub fn mark_blocked(&mut self, x: usize, y: usize) {
        let i = self.idx(x, y);
        self.tiles[i] = Tile::Blocked;
    }

    /// Tile flags as a `tiles: [...]` block that can be pasted into a world file.
    pub fn export_tiles(&self) -> String {
        let mut out = String::from("tiles: [\n");
        for row in self.tiles.chunks(self.width) {
            let line: Vec<String> = row.iter().map(|t| t.flag().to_string()).collect();
            out.push_str("    ");
            out.push_str(&line.join(", "));
            out.push_str(",\n");
        }
        out.push_str("],");
        out
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Pulls every integer between the brackets of an exported block.
    pub(crate) fn parse_export(text: &str) -> Vec<u8> {
        let start = text.find('[').expect("export opens a list") + 1;
        let end = text.rfind(']').expect("export closes the list");
        text[start..end]
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().expect("integer flag"))
            .collect()
    }

    #[test]
    fn from_parts_rejects_wrong_sizes() {
        let err = Map::from_parts(vec![Tile::Passable; 10], vec![Rgb::BLACK; MAP_CELLS], "x");
        assert_eq!(err, Err(MapError::TileCount { expected: MAP_CELLS, actual: 10 }));

        let err = Map::from_parts(vec![Tile::Passable; MAP_CELLS], vec![Rgb::BLACK; 1025], "x");
        assert_eq!(err, Err(MapError::ColorCount { expected: MAP_CELLS, actual: 1025 }));
    }

    #[test]
    fn index_is_row_major() {
        let map = Map::new(Tile::Passable, Rgb::BLACK, "");
        assert_eq!(map.idx(0, 0), 0);
        assert_eq!(map.idx(3, 3), 99);
        assert_eq!(map.idx(31, 31), 1023);
    }

    #[test]
    fn export_has_32_rows_of_32_flags() {
        let mut map = Map::new(Tile::Passable, Rgb::BLACK, "");
        map.mark_blocked(31, 0);

        let text = map.export_tiles();
        let rows: Vec<&str> = text.lines().filter(|l| l.starts_with("    ")).collect();
        assert_eq!(rows.len(), 32);
        assert!(rows.iter().all(|r| r.split(',').filter(|s| !s.trim().is_empty()).count() == 32));

        let flags = parse_export(&text);
        assert_eq!(flags.len(), MAP_CELLS);
        assert_eq!(flags[31], 1);
        assert_eq!(flags.iter().map(|&f| f as usize).sum::<usize>(), 1);
    }
}
