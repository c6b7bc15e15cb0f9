pub mod interface;
pub mod value;
