//! World files.
//!
//! Screens, their placement on the world grid and the starting point are
//! described in RON. Short lists stand in for uniform maps: an empty `tiles`
//! list is all passable, an empty `colors` list is filled with `fill` (or the
//! world background).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::grid::{MapId, WorldError, WorldGrid};
use super::tile::{Rgb, Tile};
use super::{MAP_CELLS, MAP_HEIGHT, MAP_WIDTH, Map, MapError};

const BUNDLED_WORLD: &str = include_str!("../../assets/world.ron");

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read world file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse world file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("map {name:?}: {source}")]
    Map { name: String, source: MapError },

    #[error("map {0:?} is defined more than once")]
    DuplicateMap(String),

    #[error("unknown map {0:?}")]
    UnknownMap(String),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error("start position ({x}, {y}) is outside the screen")]
    StartOutsideScreen { x: i32, y: i32 },
}

#[derive(Debug, Deserialize)]
struct WorldFile {
    background: Rgb,
    maps: Vec<MapEntry>,
    grid: GridEntry,
    start: StartEntry,
}

#[derive(Debug, Deserialize)]
struct MapEntry {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tiles: Vec<Tile>,
    #[serde(default)]
    colors: Vec<Rgb>,
    #[serde(default)]
    fill: Option<Rgb>,
}

#[derive(Debug, Deserialize)]
struct GridEntry {
    width: usize,
    height: usize,
    fill: String,
    #[serde(default)]
    screens: Vec<ScreenEntry>,
}

#[derive(Debug, Deserialize)]
struct ScreenEntry {
    x: i32,
    y: i32,
    map: String,
}

#[derive(Debug, Deserialize)]
struct StartEntry {
    screen_x: i32,
    screen_y: i32,
    player_x: i32,
    player_y: i32,
}

/// A validated world, ready to seed a session.
#[derive(Debug, Clone)]
pub struct LoadedWorld {
    pub grid: WorldGrid,
    pub background: Rgb,
    pub start_screen: (i32, i32),
    pub start_local: (i32, i32),
}

pub fn bundled_world() -> Result<LoadedWorld, AssetError> {
    parse_world(BUNDLED_WORLD)
}

pub fn load_world<P: AsRef<Path>>(path: P) -> Result<LoadedWorld, AssetError> {
    let contents = fs::read_to_string(path.as_ref())?;
    let world = parse_world(&contents)?;
    tracing::info!(path = %path.as_ref().display(), maps = world.grid.map_count(), "loaded world file");
    Ok(world)
}

pub fn parse_world(contents: &str) -> Result<LoadedWorld, AssetError> {
    let file: WorldFile = ron::from_str(contents)?;

    let mut ids: HashMap<String, MapId> = HashMap::new();
    let mut maps = Vec::with_capacity(file.maps.len());
    for entry in file.maps {
        if ids.contains_key(&entry.name) {
            return Err(AssetError::DuplicateMap(entry.name));
        }
        let map = build_map(&entry, file.background)
            .map_err(|source| AssetError::Map { name: entry.name.clone(), source })?;
        ids.insert(entry.name, MapId(maps.len()));
        maps.push(map);
    }

    let lookup = |name: &str| {
        ids.get(name)
            .copied()
            .ok_or_else(|| AssetError::UnknownMap(name.to_string()))
    };

    let fill = lookup(&file.grid.fill)?;
    let mut grid = WorldGrid::new(file.grid.width, file.grid.height, maps, fill)?;
    for screen in &file.grid.screens {
        grid.place(screen.x, screen.y, lookup(&screen.map)?)?;
    }

    let start = file.start;
    if !grid.contains(start.screen_x, start.screen_y) {
        return Err(WorldError::OutOfGrid {
            x: start.screen_x,
            y: start.screen_y,
            width: grid.width,
            height: grid.height,
        }
        .into());
    }
    let on_screen = |v: i32, len: usize| v >= 0 && (v as usize) < len;
    if !on_screen(start.player_x, MAP_WIDTH) || !on_screen(start.player_y, MAP_HEIGHT) {
        return Err(AssetError::StartOutsideScreen { x: start.player_x, y: start.player_y });
    }

    Ok(LoadedWorld {
        grid,
        background: file.background,
        start_screen: (start.screen_x, start.screen_y),
        start_local: (start.player_x, start.player_y),
    })
}

fn build_map(entry: &MapEntry, background: Rgb) -> Result<Map, MapError> {
    let fill = entry.fill.unwrap_or(background);
    if entry.tiles.is_empty() && entry.colors.is_empty() {
        return Ok(Map::new(Tile::Passable, fill, entry.description.clone()));
    }

    let tiles = if entry.tiles.is_empty() {
        vec![Tile::Passable; MAP_CELLS]
    } else {
        entry.tiles.clone()
    };
    let colors = if entry.colors.is_empty() {
        vec![fill; MAP_CELLS]
    } else {
        entry.colors.clone()
    };
    Map::from_parts(tiles, colors, entry.description.clone())
}
