use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::playback::ticker::{tick_period, Ticker};
use crate::video::{Frame, StreamInfo, VideoError, VideoSource, DEFAULT_FPS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing was due or nothing is playing.
    Idle,
    /// A new frame replaced the current one.
    Advanced,
    /// End of stream was reached and playback stopped.
    Ended,
}

/// Drives a `VideoSource` frame by frame.
///
/// Holds the single current frame, replaced wholesale on every read or seek.
pub struct PlaybackController<S: VideoSource> {
    source: S,
    video_path: Option<PathBuf>,
    state: PlaybackState,
    current_index: usize,
    current_frame: Option<Frame>,
    frame_generation: u64,
    scrubbing: bool,
    ticker: Ticker,
}

impl<S: VideoSource> PlaybackController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            video_path: None,
            state: PlaybackState::Stopped,
            current_index: 0,
            current_frame: None,
            frame_generation: 0,
            scrubbing: false,
            ticker: Ticker::new(tick_period(DEFAULT_FPS)),
        }
    }

    /// Opens a video and shows its first frame, paused.
    ///
    /// The previous video is released first, so a failure leaves nothing open.
    pub fn open(&mut self, path: &Path) -> Result<StreamInfo, VideoError> {
        self.release();

        let info = self.source.open(path)?;
        self.video_path = Some(path.to_path_buf());
        self.ticker.set_period(tick_period(info.fps));
        log::debug!("Tick period {:?} for {:.3} fps", self.ticker.period(), info.fps);

        // The source is positioned at frame 0 after opening
        let first = self.source.read_next()?;
        self.replace_frame(first);
        Ok(info)
    }

    pub fn release(&mut self) {
        self.pause();
        self.source.release();
        self.video_path = None;
        self.current_index = 0;
        self.replace_frame(None);
        self.scrubbing = false;
    }

    pub fn is_open(&self) -> bool {
        self.source.is_open()
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.current_frame.as_ref()
    }

    /// Bumped every time the current frame is replaced or cleared.
    pub fn frame_generation(&self) -> u64 {
        self.frame_generation
    }

    fn replace_frame(&mut self, frame: Option<Frame>) {
        if let Some(frame) = &frame {
            self.current_index = frame.index();
        }
        self.current_frame = frame;
        self.frame_generation += 1;
    }

    pub fn frame_count(&self) -> usize {
        self.source.info().map_or(0, |info| info.frame_count)
    }

    pub fn video_path(&self) -> Option<&Path> {
        self.video_path.as_deref()
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    #[cfg(test)]
    pub fn tick_period(&self) -> Duration {
        self.ticker.period()
    }

    /// Starts playback. Returns false if no video is open.
    pub fn play(&mut self, now: Instant) -> bool {
        if !self.is_open() {
            return false;
        }
        if !self.is_playing() {
            self.state = PlaybackState::Playing;
            self.ticker.start(now);
            log::debug!("Playback started at frame {}", self.current_index);
        }
        true
    }

    pub fn pause(&mut self) {
        if self.is_playing() {
            log::debug!("Playback paused at frame {}", self.current_index);
        }
        self.state = PlaybackState::Stopped;
        self.ticker.stop();
    }

    /// Flips between playing and paused; `None` when no video is open.
    pub fn toggle(&mut self, now: Instant) -> Option<PlaybackState> {
        if !self.is_open() {
            return None;
        }
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
        Some(self.state)
    }

    /// Pauses and jumps to `index`, clamped into range. Returns the index landed on.
    ///
    /// If nothing decodes at the target, the shown frame stays and the source is
    /// moved back to it so playback resumes from there.
    pub fn seek_to(&mut self, index: i64) -> Result<usize, VideoError> {
        self.pause();
        match self.source.seek(index)? {
            Some(frame) => self.replace_frame(Some(frame)),
            None if self.current_frame.is_some() => {
                log::warn!(
                    "No frame decoded at {}, staying on frame {}",
                    index,
                    self.current_index
                );
                if let Some(frame) = self.source.seek_exact(self.current_index)? {
                    self.replace_frame(Some(frame));
                }
            }
            None => {}
        }
        Ok(self.current_index)
    }

    pub fn step(&mut self, delta: i64) -> Result<usize, VideoError> {
        self.seek_to(self.current_index as i64 + delta)
    }

    /// Rewinds to the first frame and plays from there.
    pub fn restart(&mut self, now: Instant) -> Result<(), VideoError> {
        if !self.is_open() {
            return Ok(());
        }
        self.seek_to(0)?;
        self.play(now);
        Ok(())
    }

    pub fn begin_scrub(&mut self) {
        self.scrubbing = true;
        self.pause();
    }

    pub fn end_scrub(&mut self, index: i64) -> Result<usize, VideoError> {
        let result = if self.is_open() {
            self.seek_to(index)
        } else {
            Ok(self.current_index)
        };
        self.scrubbing = false;
        result
    }

    /// Advances one frame if playing.
    pub fn tick(&mut self) -> Result<TickOutcome, VideoError> {
        if !self.is_playing() {
            return Ok(TickOutcome::Idle);
        }

        match self.source.read_next() {
            Ok(Some(frame)) => {
                self.replace_frame(Some(frame));
                Ok(TickOutcome::Advanced)
            }
            Ok(None) => {
                log::info!("Reached end of video at frame {}", self.current_index);
                self.pause();
                Ok(TickOutcome::Ended)
            }
            Err(e) => {
                self.pause();
                Err(e)
            }
        }
    }

    /// Runs a tick if the timer is due.
    pub fn poll(&mut self, now: Instant) -> Result<TickOutcome, VideoError> {
        if self.ticker.poll(now) {
            self.tick()
        } else {
            Ok(TickOutcome::Idle)
        }
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.remaining(now)
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }
}
