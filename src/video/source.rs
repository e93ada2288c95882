use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::video::Frame;

pub const DEFAULT_FPS: f64 = 30.0;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("failed to open video {}: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },
    #[error("no video is open")]
    NotOpen,
    #[error("failed to decode frame: {0}")]
    Decode(String),
    #[error("decoder I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Properties of the opened video stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub frame_count: usize,
}

/// Clamps a possibly out-of-range frame index to `[0, frame_count - 1]`.
pub fn clamp_index(index: i64, frame_count: usize) -> usize {
    let last = frame_count.saturating_sub(1) as i64;
    index.clamp(0, last.max(0)) as usize
}

/// A frame-accurate video decoder.
///
/// Implementations own a single decoder handle. Reads are sequential; `seek_exact`
/// repositions and decodes the frame at the given index.
pub trait VideoSource {
    /// Opens `path`, releasing anything previously open.
    fn open(&mut self, path: &Path) -> Result<StreamInfo, VideoError>;

    fn release(&mut self);

    fn info(&self) -> Option<&StreamInfo>;

    /// Decodes the next sequential frame, or `None` at end of stream.
    fn read_next(&mut self) -> Result<Option<Frame>, VideoError>;

    /// Repositions to `index` (already in range) and decodes that frame.
    fn seek_exact(&mut self, index: usize) -> Result<Option<Frame>, VideoError>;

    fn is_open(&self) -> bool {
        self.info().is_some()
    }

    /// Clamps `index` into range, seeks there and decodes one frame.
    ///
    /// The index carried by the returned frame is where the decoder actually landed.
    fn seek(&mut self, index: i64) -> Result<Option<Frame>, VideoError> {
        let frame_count = self.info().ok_or(VideoError::NotOpen)?.frame_count;
        let target = clamp_index(index, frame_count);
        log::debug!("Seeking to frame {} (requested {})", target, index);
        self.seek_exact(target)
    }
}
