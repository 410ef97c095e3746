use serde::{Deserialize, Serialize};

/// Collision flag for one cell. Serialized as the raw `0` / `1` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tile {
    #[default]
    Passable,
    Blocked,
}

impl Tile {
    pub fn flag(self) -> u8 {
        match self {
            Tile::Passable => 0,
            Tile::Blocked => 1,
        }
    }

    pub fn is_blocked(self) -> bool {
        self == Tile::Blocked
    }
}

impl TryFrom<u8> for Tile {
    type Error = String;

    fn try_from(flag: u8) -> Result<Self, Self::Error> {
        match flag {
            0 => Ok(Tile::Passable),
            1 => Ok(Tile::Blocked),
            other => Err(format!("tile flag must be 0 or 1, got {other}")),
        }
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> Self {
        tile.flag()
    }
}

/// 24-bit `0xRRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    #[cfg(test)]
    pub const BLACK: Rgb = Rgb(0x000000);

    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Parses `RRGGBB`, `#RRGGBB` or `0xRRGGBB`.
    pub fn parse_hex(s: &str) -> Option<Rgb> {
        let s = s.trim();
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_flags_accept_only_zero_and_one() {
        assert_eq!(Tile::try_from(0), Ok(Tile::Passable));
        assert_eq!(Tile::try_from(1), Ok(Tile::Blocked));
        assert!(Tile::try_from(2).is_err());
    }

    #[test]
    fn rgb_channels_and_hex_parsing() {
        let c = Rgb(0x80C0B0);
        assert_eq!((c.r(), c.g(), c.b()), (0x80, 0xC0, 0xB0));

        assert_eq!(Rgb::parse_hex("80C0B0"), Some(c));
        assert_eq!(Rgb::parse_hex("#80c0b0"), Some(c));
        assert_eq!(Rgb::parse_hex("0x80C0B0"), Some(c));
        assert_eq!(Rgb::parse_hex("80C0B"), None);
        assert_eq!(Rgb::parse_hex("zzzzzz"), None);
    }
}
