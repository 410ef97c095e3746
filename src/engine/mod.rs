pub mod action;
pub mod clock;
pub mod edit;
pub mod entity;
pub mod game_loop;
pub mod input;
pub mod movement;
pub mod surface;
pub mod transition;
pub mod world;
