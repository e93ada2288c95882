pub mod controller;
pub mod ticker;

pub use controller::*;
