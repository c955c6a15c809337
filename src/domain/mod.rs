pub mod board;
pub mod geometry;
pub mod snake;
