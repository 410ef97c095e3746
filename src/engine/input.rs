#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Interact,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Interact,
    ];

    pub fn slot(self) -> usize {
        match self {
            Button::Up => 0,
            Button::Down => 1,
            Button::Left => 2,
            Button::Right => 3,
            Button::Interact => 4,
        }
    }
}

/// Held / released flags for the five logical buttons.
#[derive(Debug, Clone)]
pub struct InputState {
    held: [bool; 5],
    #[cfg_attr(not(test), allow(dead_code))]
    released: [bool; 5],
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            held: [false; 5],
            released: [true; 5],
        }
    }
}

impl InputState {
    pub fn press(&mut self, button: Button) {
        self.held[button.slot()] = true;
    }

    pub fn release(&mut self, button: Button) {
        self.held[button.slot()] = false;
        self.released[button.slot()] = true;
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held[button.slot()]
    }

    #[cfg(test)]
    pub fn was_released(&self, button: Button) -> bool {
        self.released[button.slot()]
    }

    pub fn release_all(&mut self) {
        for b in Button::ALL {
            self.release(b);
        }
    }

    /// Unit delta from the held directions; opposite presses cancel out.
    pub fn direction(&self) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.is_held(Button::Up) {
            dy -= 1;
        }
        if self.is_held(Button::Down) {
            dy += 1;
        }
        if self.is_held(Button::Left) {
            dx -= 1;
        }
        if self.is_held(Button::Right) {
            dx += 1;
        }
        (dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_released_and_idle() {
        let input = InputState::default();
        assert_eq!(input.direction(), (0, 0));
        assert!(Button::ALL.iter().all(|&b| input.was_released(b) && !input.is_held(b)));
    }

    #[test]
    fn repeated_presses_are_idempotent() {
        let mut input = InputState::default();
        input.press(Button::Right);
        input.press(Button::Right);
        assert_eq!(input.direction(), (1, 0));

        input.release(Button::Right);
        assert_eq!(input.direction(), (0, 0));
        assert!(input.was_released(Button::Right));
    }

    #[test]
    fn opposites_cancel_and_orthogonals_combine() {
        let mut input = InputState::default();
        input.press(Button::Left);
        input.press(Button::Right);
        input.press(Button::Down);
        assert_eq!(input.direction(), (0, 1));

        input.release(Button::Left);
        assert_eq!(input.direction(), (1, 1));
    }

    #[test]
    fn interact_does_not_move() {
        let mut input = InputState::default();
        input.press(Button::Interact);
        assert!(input.is_held(Button::Interact));
        assert_eq!(input.direction(), (0, 0));
    }
}
