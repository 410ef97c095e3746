use crate::map::tile::Rgb;
use crate::map::{MAP_CELLS, MAP_WIDTH, Map};

/// Display the frame driver paints into.
pub trait Surface {
    /// Replaces every cell color with the map's colors.
    fn blit(&mut self, map: &Map);
    fn set_color(&mut self, x: usize, y: usize, color: Rgb);
    fn set_border(&mut self, x: usize, y: usize, border: Option<Rgb>);
    fn clear_borders(&mut self);
    fn set_status(&mut self, text: &str);
}

/// In-memory 32x32 surface drawn by the terminal renderer.
#[derive(Debug, Clone)]
pub struct Canvas {
    colors: Vec<Rgb>,
    borders: Vec<Option<Rgb>>,
    status: String,
}

impl Canvas {
    pub fn new(background: Rgb) -> Self {
        Self {
            colors: vec![background; MAP_CELLS],
            borders: vec![None; MAP_CELLS],
            status: String::new(),
        }
    }

    pub fn color(&self, x: usize, y: usize) -> Rgb {
        self.colors[y * MAP_WIDTH + x]
    }

    pub fn border(&self, x: usize, y: usize) -> Option<Rgb> {
        self.borders[y * MAP_WIDTH + x]
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

impl Surface for Canvas {
    fn blit(&mut self, map: &Map) {
        self.colors.copy_from_slice(map.colors());
    }

    fn set_color(&mut self, x: usize, y: usize, color: Rgb) {
        self.colors[y * MAP_WIDTH + x] = color;
    }

    fn set_border(&mut self, x: usize, y: usize, border: Option<Rgb>) {
        self.borders[y * MAP_WIDTH + x] = border;
    }

    fn clear_borders(&mut self) {
        self.borders.fill(None);
    }

    fn set_status(&mut self, text: &str) {
        if self.status != text {
            self.status = text.to_string();
        }
    }
}
