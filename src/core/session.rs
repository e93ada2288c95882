use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

use crate::core::config::AppConfig;
use crate::core::exporter::{compute_next_index, save_frame, ExportError};
use crate::playback::{PlaybackController, PlaybackState, TickOutcome};
use crate::video::{StreamInfo, VideoError, VideoSource};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no frame to save")]
    NoFrame,
    #[error("please select a save directory first")]
    SaveDirRequired,
    #[error(transparent)]
    Video(#[from] VideoError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// The user-facing command surface: one method per command.
///
/// Every change to the persisted state is written back to `config_path` right away.
pub struct Session<S: VideoSource> {
    config: AppConfig,
    config_path: PathBuf,
    player: PlaybackController<S>,
}

impl<S: VideoSource> Session<S> {
    /// Loads the config at `config_path` and derives the next image number from
    /// the save directory.
    pub fn new(source: S, config_path: PathBuf) -> Self {
        let mut config = AppConfig::load_from(&config_path);
        config.next_image = match &config.save_dir {
            Some(dir) => compute_next_index(dir),
            None => 1,
        };
        log::debug!("Next image number: {}", config.next_image);

        Self {
            config,
            config_path,
            player: PlaybackController::new(source),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn player(&self) -> &PlaybackController<S> {
        &self.player
    }

    pub fn next_image(&self) -> u32 {
        self.config.next_image
    }

    pub fn save_dir(&self) -> Option<&Path> {
        self.config.save_dir.as_deref()
    }

    /// Reopens the last video if it still exists. Does not start playback.
    pub fn restore_last_video(&mut self) -> Option<Result<StreamInfo, SessionError>> {
        let path = self.config.last_video.clone().filter(|p| p.is_file())?;
        log::info!("Restoring last video: {}", path.display());
        Some(self.player.open(&path).map_err(SessionError::from))
    }

    pub fn open_video(&mut self, path: &Path) -> Result<StreamInfo, SessionError> {
        let info = self.player.open(path)?;
        self.config.last_video = Some(path.to_path_buf());
        self.persist();
        Ok(info)
    }

    pub fn set_save_dir(&mut self, dir: PathBuf) {
        self.config.next_image = compute_next_index(&dir);
        log::info!(
            "Save directory set to {} (next image {})",
            dir.display(),
            self.config.next_image
        );
        self.config.save_dir = Some(dir);
        self.persist();
    }

    pub fn toggle_playback(&mut self, now: Instant) -> Option<PlaybackState> {
        self.player.toggle(now)
    }

    pub fn restart(&mut self, now: Instant) -> Result<(), SessionError> {
        self.player.restart(now)?;
        Ok(())
    }

    pub fn step(&mut self, delta: i64) -> Result<(), SessionError> {
        if self.player.is_open() {
            self.player.step(delta)?;
        }
        Ok(())
    }

    pub fn seek(&mut self, index: i64) -> Result<(), SessionError> {
        if self.player.is_open() {
            self.player.seek_to(index)?;
        }
        Ok(())
    }

    pub fn begin_scrub(&mut self) {
        self.player.begin_scrub();
    }

    pub fn scrub_to(&mut self, index: i64) -> Result<(), SessionError> {
        self.seek(index)
    }

    pub fn end_scrub(&mut self, index: i64) -> Result<(), SessionError> {
        self.player.end_scrub(index)?;
        Ok(())
    }

    pub fn tick(&mut self, now: Instant) -> Result<TickOutcome, SessionError> {
        Ok(self.player.poll(now)?)
    }

    /// Saves the current frame as the next numbered image and advances the counter.
    pub fn save_current_frame(&mut self) -> Result<PathBuf, SessionError> {
        let frame = self.player.current_frame().ok_or(SessionError::NoFrame)?;
        let dir = self.config.save_dir.as_deref().ok_or(SessionError::SaveDirRequired)?;

        // Files may have been added behind our back; never reuse a number
        let index = self.config.next_image.max(compute_next_index(dir));
        let path = save_frame(frame, dir, index)?;

        self.config.next_image = index.saturating_add(1);
        self.persist();
        Ok(path)
    }

    /// Writes the config; failures are logged, never fatal.
    pub fn persist(&self) {
        if let Err(e) = self.config.save_to(&self.config_path) {
            log::error!("Failed to save config: {}", e);
        }
    }
}
