pub mod config;
pub mod exporter;
pub mod session;

#[cfg(test)]
mod config_test;

pub use config::*;
pub use exporter::*;
pub use session::*;
