use crate::engine::input::Button;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Press(Button),
    Release(Button),
    ToggleEdit,

    PointerDown(i32, i32),
    PointerEnter(i32, i32),
    PointerUp,

    Quit,
    None,
}
