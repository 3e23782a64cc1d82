pub mod grid;
pub mod types;
