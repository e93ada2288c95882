use eframe::egui;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::core::{AppConfig, Session, SessionError};
use crate::gui::overlay::{Flash, GlyphOverlay, StatusMessage};
use crate::gui::timeline::{frame_label, TimelineAction, TimelineWidget};
use crate::gui::video_view::VideoView;
use crate::input::{route_click, take_shortcuts, Command, VideoClick};
use crate::playback::{PlaybackState, TickOutcome};
use crate::video::{FfmpegSource, VideoSource};

pub const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "avi", "mkv", "mov", "m4v", "webm"];

const CHIP_BLUE: egui::Color32 = egui::Color32::from_rgb(0x42, 0x87, 0xf5);
const CHIP_GREEN: egui::Color32 = egui::Color32::from_rgb(0x2e, 0xcc, 0x71);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A message the user has to dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub text: String,
}

impl Notice {
    fn info(title: &str, text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, title: title.to_string(), text: text.into() }
    }

    fn warning(title: &str, text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, title: title.to_string(), text: text.into() }
    }
}

pub struct FramePickerApp<S: VideoSource = FfmpegSource> {
    pub session: Session<S>,
    pub video_view: VideoView,
    pub timeline: TimelineWidget,
    pub overlay: GlyphOverlay,
    pub next_image_flash: Flash,
    pub status: StatusMessage,
    pub notice: Option<Notice>,
}

impl FramePickerApp<FfmpegSource> {
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let config_path = AppConfig::config_path();
        log::info!("Using config file {}", config_path.display());

        let mut app = Self::with_session(Session::new(FfmpegSource::new(), config_path));
        if let Some(Err(e)) = app.session.restore_last_video() {
            log::warn!("Could not reopen last video: {}", e);
            app.notice = Some(Notice::warning("Error", "Failed to open video."));
        }
        Ok(app)
    }
}

impl<S: VideoSource> FramePickerApp<S> {
    pub fn with_session(session: Session<S>) -> Self {
        Self {
            session,
            video_view: VideoView::new(),
            timeline: TimelineWidget::new(),
            overlay: GlyphOverlay::default(),
            next_image_flash: Flash::new(Duration::from_millis(300)),
            status: StatusMessage::new(Duration::from_secs(3)),
            notice: None,
        }
    }

    pub fn dispatch(&mut self, command: Command, now: Instant) {
        log::debug!("Command: {:?}", command);
        match command {
            Command::TogglePlayback => {
                if let Some(state) = self.session.toggle_playback(now) {
                    self.overlay.show(state, now);
                }
            }
            Command::Step(delta) => {
                let was_playing = self.session.player().is_playing();
                if let Err(e) = self.session.step(delta) {
                    self.report_error(e);
                }
                if was_playing {
                    self.overlay.show(PlaybackState::Stopped, now);
                }
            }
            Command::SaveFrame => self.save_frame(now),
        }
    }

    pub fn save_frame(&mut self, now: Instant) {
        match self.session.save_current_frame() {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.status.set(format!("Saved: {}", name), now);
                self.next_image_flash.trigger(now);
            }
            Err(SessionError::NoFrame) => {}
            Err(SessionError::SaveDirRequired) => {
                self.notice = Some(Notice::info(
                    "Save directory required",
                    "Please select a save directory first.",
                ));
            }
            Err(e) => {
                log::error!("Failed to save frame: {}", e);
                self.notice = Some(Notice::warning("Save failed", "Could not save image."));
            }
        }
    }

    pub fn open_video(&mut self, path: &Path, now: Instant) {
        match self.session.open_video(path) {
            Ok(_) => {
                self.status.set(format!("Opened: {}", path.display()), now);
            }
            Err(e) => {
                log::error!("Failed to open video {}: {}", path.display(), e);
                self.notice = Some(Notice::warning("Error", "Failed to open video."));
            }
        }
    }

    pub fn set_save_dir(&mut self, dir: PathBuf) {
        self.session.set_save_dir(dir);
    }

    fn apply_timeline(&mut self, action: TimelineAction, now: Instant) {
        let was_playing = self.session.player().is_playing();
        let result = match action {
            TimelineAction::BeginScrub => {
                self.session.begin_scrub();
                Ok(())
            }
            TimelineAction::ScrubTo(index) => self.session.scrub_to(index),
            TimelineAction::EndScrub(index) => self.session.end_scrub(index),
        };
        if let Err(e) = result {
            self.report_error(e);
        }
        if was_playing && !self.session.player().is_playing() {
            self.overlay.show(PlaybackState::Stopped, now);
        }
    }

    fn advance(&mut self, now: Instant) {
        match self.session.tick(now) {
            Ok(TickOutcome::Ended) => self.overlay.show(PlaybackState::Stopped, now),
            Ok(_) => {}
            Err(e) => {
                self.report_error(e);
                self.overlay.show(PlaybackState::Stopped, now);
            }
        }
    }

    fn report_error(&mut self, error: SessionError) {
        log::error!("{}", error);
        self.notice = Some(Notice::warning("Error", error.to_string()));
    }

    fn pick_video(&mut self, now: Instant) {
        let start_dir = self
            .session
            .config()
            .last_video
            .as_ref()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .or_else(dirs::home_dir);

        let mut dialog = rfd::FileDialog::new()
            .set_title("Select Video")
            .add_filter("Videos", &VIDEO_EXTENSIONS)
            .add_filter("All Files", &["*"]);
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }

        if let Some(path) = dialog.pick_file() {
            self.open_video(&path, now);
        }
    }

    fn pick_save_dir(&mut self) {
        let start_dir = self
            .session
            .save_dir()
            .map(Path::to_path_buf)
            .or_else(dirs::home_dir);

        let mut dialog = rfd::FileDialog::new().set_title("Select Save Directory");
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }

        if let Some(dir) = dialog.pick_folder() {
            self.set_save_dir(dir);
        }
    }

    /// The video that is actually open, not just the last one remembered.
    pub fn video_label(&self) -> String {
        self.session
            .player()
            .video_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "No video selected".to_string())
    }

    fn show_paths(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            if ui.button("🎞 Select Video").clicked() {
                self.pick_video(now);
            }
            ui.label(self.video_label());
        });

        ui.horizontal(|ui| {
            if ui.button("📁 Select Save Dir").clicked() {
                self.pick_save_dir();
            }
            let dir = self
                .session
                .save_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "No save directory".to_string());
            ui.label(dir);
        });
    }

    fn show_controls(&mut self, ui: &mut egui::Ui, now: Instant) {
        let player = self.session.player();
        let is_open = player.is_open();
        let is_playing = player.state() == PlaybackState::Playing;
        let (index, count, scrubbing) = (player.current_index(), player.frame_count(), player.is_scrubbing());

        for action in self.timeline.show(ui, index, count, scrubbing) {
            self.apply_timeline(action, now);
        }

        ui.horizontal(|ui| {
            ui.add_enabled_ui(is_open, |ui| {
                if ui.button("⏮ Reload").on_hover_text("Restart from the beginning").clicked() {
                    if let Err(e) = self.session.restart(now) {
                        self.report_error(e);
                    } else {
                        self.overlay.show(PlaybackState::Playing, now);
                    }
                }
                if ui.button("◀ Prev").clicked() {
                    self.dispatch(Command::Step(-1), now);
                }
                let (label, hover) = if is_playing { ("⏸", "Pause") } else { ("▶", "Play") };
                if ui.button(label).on_hover_text(hover).clicked() {
                    self.dispatch(Command::TogglePlayback, now);
                }
                if ui.button("Next ▶").clicked() {
                    self.dispatch(Command::Step(1), now);
                }
            });

            ui.separator();
            ui.label("Space: play/pause · ←/→: step · S or right click: save");
        });
    }

    fn show_status_bar(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            if let Some(text) = self.status.current(now) {
                ui.label(text);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let chip = if self.next_image_flash.is_active(now) { CHIP_GREEN } else { CHIP_BLUE };
                egui::Frame::none()
                    .fill(chip)
                    .rounding(egui::Rounding::same(6.0))
                    .inner_margin(egui::Margin::symmetric(6.0, 2.0))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(format!("Next image: {}", self.session.next_image()))
                                .color(egui::Color32::WHITE),
                        );
                    });

                let player = self.session.player();
                ui.label(frame_label(player.current_index(), player.frame_count()));
            });
        });
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                let icon = match notice.level {
                    NoticeLevel::Info => "ℹ",
                    NoticeLevel::Warning => "⚠",
                };
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(icon).size(20.0));
                    ui.label(notice.text.as_str());
                });
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.notice = None;
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        if self.overlay.visible(now).is_some() {
            ctx.request_repaint();
            return;
        }

        let wakeups = [
            self.session.player().time_until_tick(now),
            self.next_image_flash.remaining(now),
            self.status.remaining(now),
        ];
        if let Some(delay) = wakeups.into_iter().flatten().min() {
            ctx.request_repaint_after(delay);
        }
    }
}

impl<S: VideoSource> eframe::App for FramePickerApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // While a dialog is up, shortcuts stay with it
        if self.notice.is_none() {
            for command in take_shortcuts(ctx) {
                self.dispatch(command, now);
            }
        }

        self.advance(now);

        egui::TopBottomPanel::top("paths").show(ctx, |ui| {
            ui.add_space(4.0);
            self.show_paths(ui, now);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.show_status_bar(ui, now);
        });

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.show_controls(ui, now);
            ui.add_space(4.0);
        });

        let player = self.session.player();
        self.video_view.sync(ctx, player.current_frame(), player.frame_generation());

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let response = self.video_view.show(ui, self.overlay.visible(now));
                if self.notice.is_none() {
                    if response.clicked() {
                        self.dispatch(route_click(VideoClick::Primary), now);
                    } else if response.secondary_clicked() {
                        self.dispatch(route_click(VideoClick::Secondary), now);
                    }
                }
            });

        self.show_notice(ctx);
        self.schedule_repaint(ctx, now);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.session.persist();
    }
}
