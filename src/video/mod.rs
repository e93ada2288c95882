pub mod ffmpeg_source;
pub mod frame;
pub mod probe;
pub mod source;

pub use ffmpeg_source::FfmpegSource;
pub use frame::*;
pub use source::*;

#[cfg(test)]
pub mod memory_source;
