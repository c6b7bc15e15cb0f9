pub mod creature;
pub mod item;
pub mod player;
pub mod spells;
