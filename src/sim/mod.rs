pub mod event;
pub mod food;
pub mod state;
pub mod step;
