use std::collections::VecDeque;

use crate::config::{GameConfig, MARK_COLOR};
use crate::engine::action::Action;
use crate::engine::edit::{EDIT_OFF_STATUS, EDIT_ON_STATUS, EditEvent, EditState};
use crate::engine::entity::{Player, Position};
use crate::engine::input::InputState;
use crate::engine::movement::{MoveCooldown, resolve_move};
use crate::engine::surface::Surface;
use crate::engine::transition::check_transition;
use crate::map::Map;
use crate::map::asset::LoadedWorld;
use crate::map::grid::WorldGrid;
use crate::map::tile::Rgb;

/// One running game session.
pub struct World {
    pub grid: WorldGrid,
    pub player: Player,
    pub input: InputState,
    pub edit: EditState,
    /// Last grid cell the pointer entered.
    pub pointer: Option<Position>,

    pub logs: VecDeque<String>,
    log_capacity: usize,

    cooldown: MoveCooldown,
    status: String,
    exports: Vec<String>,
    background: Rgb,
    player_color: Rgb,
}

impl World {
    pub fn new(loaded: LoadedWorld, config: &GameConfig) -> Self {
        let (lx, ly) = loaded.start_local;
        let player = Player::new(loaded.start_screen, Position::new(lx, ly));

        let mut world = Self {
            grid: loaded.grid,
            player,
            input: InputState::default(),
            edit: EditState::default(),
            pointer: None,

            logs: VecDeque::new(),
            log_capacity: config.log_capacity.max(1),

            cooldown: MoveCooldown::new(config.move_cooldown),
            status: String::new(),
            exports: Vec::new(),
            background: loaded.background,
            player_color: config.player_color,
        };

        world.status = world.current_map().description.clone();
        world.push_log("Move with WASD or arrow keys.");
        world.push_log("Press P to paint walls, P again to export.");
        world
    }

    pub fn current_map(&self) -> &Map {
        self.grid.screen(self.player.screen_x, self.player.screen_y)
    }

    #[cfg(test)]
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Tile exports produced so far, oldest first.
    pub fn exports(&self) -> &[String] {
        &self.exports
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > self.log_capacity {
            self.logs.pop_front();
        }
    }

    /// Input callbacks land here. Returns false once the session should stop.
    pub fn apply_action(&mut self, action: Action) -> bool {
        match action {
            Action::Press(button) => self.input.press(button),
            Action::Release(button) => self.input.release(button),
            Action::ToggleEdit => self.toggle_edit(),
            Action::PointerDown(x, y) => {
                if let Some(pos) = self.pointer_cell(x, y) {
                    if let Some(cell) = self.edit.pointer_down(pos) {
                        self.mark_cell(cell);
                    }
                }
            }
            Action::PointerEnter(x, y) => {
                if let Some(pos) = self.pointer_cell(x, y) {
                    if let Some(cell) = self.edit.pointer_enter(pos) {
                        self.mark_cell(cell);
                    }
                }
            }
            Action::PointerUp => self.edit.pointer_up(),
            Action::Quit => return false,
            Action::None => {}
        }
        true
    }

    /// One frame: erase with the map, run the rules, draw the avatar on top.
    pub fn tick(&mut self, surface: &mut impl Surface) {
        surface.blit(self.current_map());
        self.update();
        self.render(surface);
    }

    fn update(&mut self) {
        if self.cooldown.tick() {
            let delta = self.input.direction();
            if delta != (0, 0) {
                let from = self.player.pos;
                let to = resolve_move(self.current_map(), from, delta);
                if to != from {
                    self.player.pos = to;
                    self.cooldown.arm();
                    tracing::debug!(x = to.x, y = to.y, "player moved");
                }
            }
        }

        if let Some(t) = check_transition(&self.grid, self.player.screen(), self.player.pos) {
            self.player.apply_transition(&t);
            self.edit.clear_highlights();
            self.status = self.current_map().description.clone();
            tracing::info!(
                heading = ?t.heading,
                screen_x = t.screen.0,
                screen_y = t.screen.1,
                "entered screen"
            );
            self.push_log(format!("Entered screen ({}, {})", t.screen.0, t.screen.1));
        }
    }

    fn render(&self, surface: &mut impl Surface) {
        let pos = self.player.pos;
        surface.set_color(pos.x as usize, pos.y as usize, self.player_color);

        surface.clear_borders();
        for cell in self.edit.marked() {
            surface.set_border(cell.x as usize, cell.y as usize, Some(MARK_COLOR));
        }
        surface.set_status(&self.status);
    }

    fn pointer_cell(&mut self, x: i32, y: i32) -> Option<Position> {
        if !self.current_map().in_bounds(x, y) {
            return None;
        }
        let pos = Position::new(x, y);
        self.pointer = Some(pos);
        Some(pos)
    }

    fn mark_cell(&mut self, cell: Position) {
        let (sx, sy) = self.player.screen();
        if let Some(map) = self.grid.map_for_edit(sx, sy) {
            map.mark_blocked(cell.x as usize, cell.y as usize);
            tracing::debug!(x = cell.x, y = cell.y, screen_x = sx, screen_y = sy, "marked tile blocked");
        }
    }

    fn toggle_edit(&mut self) {
        match self.edit.toggle() {
            EditEvent::Entered => {
                self.status = EDIT_ON_STATUS.to_string();
                tracing::info!("edit mode on");
            }
            EditEvent::Exited => {
                self.status = EDIT_OFF_STATUS.to_string();
                let (sx, sy) = self.player.screen();
                let export = self.current_map().export_tiles();
                tracing::info!(screen_x = sx, screen_y = sy, "edit mode off, exported tiles:\n{export}");
                self.exports.push(export);
                self.push_log(format!("Exported tiles for screen ({sx}, {sy})."));
            }
        }
    }
}
