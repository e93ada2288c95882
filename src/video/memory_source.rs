use std::path::{Path, PathBuf};

use crate::video::source::{StreamInfo, VideoError, VideoSource};
use crate::video::Frame;

/// In-memory decoder producing small solid-colour frames, used by tests.
pub struct MemorySource {
    fps: f64,
    decodable_frames: usize,
    reported_frames: usize,
    fail_open: bool,
    info: Option<StreamInfo>,
    next_index: usize,
    pub opened: Vec<PathBuf>,
    pub seeks: Vec<usize>,
}

impl MemorySource {
    pub fn new(frame_count: usize) -> Self {
        Self {
            fps: 25.0,
            decodable_frames: frame_count,
            reported_frames: frame_count,
            fail_open: false,
            info: None,
            next_index: 0,
            opened: Vec::new(),
            seeks: Vec::new(),
        }
    }

    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Containers sometimes report more frames than can be decoded.
    pub fn with_reported_count(mut self, reported: usize) -> Self {
        self.reported_frames = reported;
        self
    }

    pub fn failing() -> Self {
        Self {
            fail_open: true,
            ..Self::new(0)
        }
    }

    fn decode(&mut self) -> Option<Frame> {
        if self.next_index >= self.decodable_frames {
            return None;
        }
        let index = self.next_index;
        let shade = (index % 256) as u8;
        self.next_index += 1;
        Frame::from_rgb24(index, 2, 2, vec![shade; 2 * 2 * 3])
    }
}

impl VideoSource for MemorySource {
    fn open(&mut self, path: &Path) -> Result<StreamInfo, VideoError> {
        self.release();
        if self.fail_open {
            return Err(VideoError::Open {
                path: path.to_path_buf(),
                reason: "not a video".to_string(),
            });
        }
        let info = StreamInfo {
            width: 2,
            height: 2,
            fps: self.fps,
            frame_count: self.reported_frames,
        };
        self.opened.push(path.to_path_buf());
        self.info = Some(info.clone());
        Ok(info)
    }

    fn release(&mut self) {
        self.info = None;
        self.next_index = 0;
    }

    fn info(&self) -> Option<&StreamInfo> {
        self.info.as_ref()
    }

    fn read_next(&mut self) -> Result<Option<Frame>, VideoError> {
        if self.info.is_none() {
            return Err(VideoError::NotOpen);
        }
        Ok(self.decode())
    }

    fn seek_exact(&mut self, index: usize) -> Result<Option<Frame>, VideoError> {
        if self.info.is_none() {
            return Err(VideoError::NotOpen);
        }
        self.seeks.push(index);
        self.next_index = index;
        Ok(self.decode())
    }
}
