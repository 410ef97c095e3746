//! Runtime configuration.
//!
//! Defaults give a ~60 Hz tick and one step every
//! five ticks. Every value can be overridden through the environment (a
//! `.env` file is read first by `main`). Malformed values are ignored.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::movement::DEFAULT_MOVE_COOLDOWN;
use crate::map::tile::Rgb;

pub const PLAYER_COLOR: Rgb = Rgb(0x80C0B0);
pub const TEXT_COLOR: Rgb = Rgb(0xF0F0F0);
pub const MARK_COLOR: Rgb = Rgb(0xC0C0C0);

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub tick: Duration,
    pub move_cooldown: u32,
    /// Synthesized key release for terminals that only report presses.
    pub hold_timeout: Duration,
    pub world_path: Option<PathBuf>,
    pub export_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub player_color: Rgb,
    pub log_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(17),
            move_cooldown: DEFAULT_MOVE_COOLDOWN,
            hold_timeout: Duration::from_millis(500),
            world_path: None,
            export_path: None,
            log_dir: None,
            player_color: PLAYER_COLOR,
            log_capacity: 32,
        }
    }
}

impl GameConfig {
    /// Environment variables:
    /// - `HAUNTED_TICK_MS` - tick duration (default: 17)
    /// - `HAUNTED_MOVE_COOLDOWN` - ticks per step (default: 5)
    /// - `HAUNTED_HOLD_TIMEOUT_MS` - fallback key release (default: 500)
    /// - `HAUNTED_WORLD` - RON world file (default: bundled world)
    /// - `HAUNTED_EXPORT_PATH` - append edit exports here (default: unset)
    /// - `HAUNTED_LOG_DIR` - log directory (default: platform cache dir)
    /// - `HAUNTED_PLAYER_COLOR` - avatar color as hex (default: 80C0B0)
    /// - `HAUNTED_LOG_CAPACITY` - message log lines (default: 32)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let parse = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        if let Some(ms) = parse("HAUNTED_TICK_MS") {
            config.tick = Duration::from_millis(ms.max(1));
        }
        if let Some(ticks) = parse("HAUNTED_MOVE_COOLDOWN") {
            config.move_cooldown = ticks.clamp(1, u32::MAX as u64) as u32;
        }
        if let Some(ms) = parse("HAUNTED_HOLD_TIMEOUT_MS") {
            config.hold_timeout = Duration::from_millis(ms);
        }
        if let Some(cap) = parse("HAUNTED_LOG_CAPACITY") {
            config.log_capacity = (cap as usize).max(1);
        }
        if let Some(color) = lookup("HAUNTED_PLAYER_COLOR").and_then(|v| Rgb::parse_hex(&v)) {
            config.player_color = color;
        }

        config.world_path = read_path(&lookup, "HAUNTED_WORLD");
        config.export_path = read_path(&lookup, "HAUNTED_EXPORT_PATH");
        config.log_dir = read_path(&lookup, "HAUNTED_LOG_DIR");

        config
    }
}

fn read_path(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<PathBuf> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> GameConfig {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        GameConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_step_every_five_ticks_at_sixty_hz() {
        let config = config_from(&[]);
        assert_eq!(config.tick, Duration::from_millis(17));
        assert_eq!(config.move_cooldown, 5);
        assert_eq!(config.player_color, PLAYER_COLOR);
        assert!(config.world_path.is_none());
    }

    #[test]
    fn default_hold_outlasts_key_repeat_delay() {
        let config = config_from(&[]);
        assert_eq!(config.hold_timeout, Duration::from_millis(500));
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("HAUNTED_TICK_MS", "33"),
            ("HAUNTED_MOVE_COOLDOWN", "3"),
            ("HAUNTED_WORLD", "worlds/test.ron"),
            ("HAUNTED_PLAYER_COLOR", "#FF0000"),
        ]);
        assert_eq!(config.tick, Duration::from_millis(33));
        assert_eq!(config.move_cooldown, 3);
        assert_eq!(config.world_path, Some(PathBuf::from("worlds/test.ron")));
        assert_eq!(config.player_color, Rgb(0xFF0000));
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let config = config_from(&[
            ("HAUNTED_TICK_MS", "fast"),
            ("HAUNTED_PLAYER_COLOR", "teal"),
            ("HAUNTED_EXPORT_PATH", "  "),
        ]);
        assert_eq!(config.tick, Duration::from_millis(17));
        assert_eq!(config.player_color, PLAYER_COLOR);
        assert!(config.export_path.is_none());
    }

    #[test]
    fn zero_cooldown_is_raised_to_one_tick() {
        let config = config_from(&[("HAUNTED_MOVE_COOLDOWN", "0")]);
        assert_eq!(config.move_cooldown, 1);
    }
}
