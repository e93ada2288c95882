pub mod app;
pub mod overlay;
pub mod timeline;
pub mod video_view;

#[cfg(test)]
mod app_test;

pub use app::*;
