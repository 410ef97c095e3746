use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::engine::action::Action;
use crate::engine::input::Button;
use crate::tui::renderer::CELL_COLUMNS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Button(Button),
    ToggleEdit,
    Quit,
}

/// Returns true only for actual key presses (ignores repeats/releases).
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

pub fn binding(key: &KeyEvent) -> Option<Binding> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Binding::Quit),
            _ => None,
        };
    }

    let b = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Binding::Button(Button::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Binding::Button(Button::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Binding::Button(Button::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Binding::Button(Button::Right),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('x')
        | KeyCode::Char('X')
        | KeyCode::Char(' ')
        | KeyCode::Enter => Binding::Button(Button::Interact),
        KeyCode::Char('p') | KeyCode::Char('P') => Binding::ToggleEdit,
        KeyCode::Esc => Binding::Quit,
        _ => return None,
    };
    Some(b)
}

/// Key event to session action. Mode toggle and quit fire on the initial press only.
pub fn key_action(key: &KeyEvent) -> Action {
    match binding(key) {
        Some(Binding::Button(b)) if key.kind == KeyEventKind::Release => Action::Release(b),
        Some(Binding::Button(b)) => Action::Press(b),
        Some(Binding::ToggleEdit) if is_press(key) => Action::ToggleEdit,
        Some(Binding::Quit) if is_press(key) => Action::Quit,
        _ => Action::None,
    }
}

/// Grid cell under a terminal position inside the drawn map.
pub fn cell_at(map_area: Rect, column: u16, row: u16) -> Option<(i32, i32)> {
    let inside = column >= map_area.x
        && row >= map_area.y
        && column < map_area.x + map_area.width
        && row < map_area.y + map_area.height;
    if !inside {
        return None;
    }
    let x = (column - map_area.x) / CELL_COLUMNS;
    let y = row - map_area.y;
    Some((x as i32, y as i32))
}

pub fn mouse_action(mouse: &MouseEvent, map_area: Rect) -> Action {
    let cell = cell_at(map_area, mouse.column, mouse.row);
    match (mouse.kind, cell) {
        (MouseEventKind::Down(MouseButton::Left), Some((x, y))) => Action::PointerDown(x, y),
        (MouseEventKind::Drag(MouseButton::Left), Some((x, y)))
        | (MouseEventKind::Moved, Some((x, y))) => Action::PointerEnter(x, y),
        (MouseEventKind::Up(MouseButton::Left), _) => Action::PointerUp,
        _ => Action::None,
    }
}
