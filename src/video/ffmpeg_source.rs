use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::video::probe::probe_video;
use crate::video::source::{StreamInfo, VideoError, VideoSource};
use crate::video::Frame;

/// Decodes frames by streaming rawvideo rgb24 out of an `ffmpeg` child process.
///
/// Sequential reads pull the next frame off the pipe. A seek kills the running
/// stream and starts a new one at the frame's timestamp.
pub struct FfmpegSource {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
    video_path: Option<PathBuf>,
    info: Option<StreamInfo>,
    stream: Option<Child>,
    next_index: usize,
}

impl FfmpegSource {
    pub fn new() -> Self {
        Self::with_binaries(PathBuf::from("ffmpeg"), PathBuf::from("ffprobe"))
    }

    pub fn with_binaries(ffmpeg: PathBuf, ffprobe: PathBuf) -> Self {
        Self {
            ffmpeg,
            ffprobe,
            video_path: None,
            info: None,
            stream: None,
            next_index: 0,
        }
    }

    fn frame_size(info: &StreamInfo) -> usize {
        info.width as usize * info.height as usize * 3
    }

    fn start_stream(&mut self, start_index: usize) -> Result<(), VideoError> {
        self.stop_stream();

        let path = self.video_path.as_ref().ok_or(VideoError::NotOpen)?;
        let info = self.info.as_ref().ok_or(VideoError::NotOpen)?;

        let mut cmd = Command::new(&self.ffmpeg);
        cmd.arg("-v").arg("quiet");
        if start_index > 0 {
            // Input-side seek; ffmpeg decodes forward to the exact timestamp
            let start_time = start_index as f64 / info.fps;
            cmd.arg("-ss").arg(format!("{:.6}", start_time));
        }
        cmd.arg("-i").arg(path)
            .args(["-map", "0:v:0", "-an", "-sn"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-"]);

        cmd.stdout(Stdio::piped())
            .stderr(Stdio::null())
            .stdin(Stdio::null());

        log::debug!("Starting ffmpeg stream at frame {}: {:?}", start_index, cmd);

        self.stream = Some(cmd.spawn()?);
        self.next_index = start_index;
        Ok(())
    }

    fn stop_stream(&mut self) {
        if let Some(mut process) = self.stream.take() {
            let _ = process.kill();
            let _ = process.wait();
        }
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, VideoError> {
        let info = self.info.as_ref().ok_or(VideoError::NotOpen)?;
        let (width, height) = (info.width, info.height);
        let frame_size = Self::frame_size(info);

        let Some(process) = self.stream.as_mut() else {
            return Ok(None);
        };
        let Some(stdout) = process.stdout.as_mut() else {
            return Err(VideoError::Decode("ffmpeg stdout is not piped".to_string()));
        };

        let mut data = vec![0u8; frame_size];
        match stdout.read_exact(&mut data) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                log::debug!("End of stream after frame {}", self.next_index);
                self.stop_stream();
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }

        let index = self.next_index;
        let frame = Frame::from_rgb24(index, width, height, data)
            .ok_or_else(|| VideoError::Decode(format!("frame {} has the wrong size", index)))?;
        self.next_index += 1;
        Ok(Some(frame))
    }
}

impl Default for FfmpegSource {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoSource for FfmpegSource {
    fn open(&mut self, path: &Path) -> Result<StreamInfo, VideoError> {
        self.release();

        let info = probe_video(&self.ffprobe, path)?;
        log::info!(
            "Opened {}: {}x{}, {:.3} fps, {} frames",
            path.display(),
            info.width,
            info.height,
            info.fps,
            info.frame_count
        );

        self.video_path = Some(path.to_path_buf());
        self.info = Some(info.clone());

        if let Err(e) = self.start_stream(0) {
            self.release();
            return Err(VideoError::Open {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }

        Ok(info)
    }

    fn release(&mut self) {
        self.stop_stream();
        self.video_path = None;
        self.info = None;
        self.next_index = 0;
    }

    fn info(&self) -> Option<&StreamInfo> {
        self.info.as_ref()
    }

    fn read_next(&mut self) -> Result<Option<Frame>, VideoError> {
        self.read_frame()
    }

    fn seek_exact(&mut self, index: usize) -> Result<Option<Frame>, VideoError> {
        self.start_stream(index)?;
        self.read_frame()
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        self.stop_stream();
    }
}
