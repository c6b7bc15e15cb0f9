pub mod game;
pub mod item_types;
pub mod position;
pub mod return_value;
pub mod time;
