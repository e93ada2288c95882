#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::time::{Duration, Instant};

    use crate::core::{AppConfig, Session};
    use crate::gui::app::{FramePickerApp, NoticeLevel};
    use crate::input::{route_click, Command, VideoClick};
    use crate::video::memory_source::MemorySource;

    struct TestApp {
        root: tempfile::TempDir,
        app: FramePickerApp<MemorySource>,
    }

    impl TestApp {
        fn config_path(&self) -> PathBuf {
            self.root.path().join("config.txt")
        }

        fn video_path(&self) -> PathBuf {
            self.root.path().join("clip.mp4")
        }

        fn save_dir(&self) -> PathBuf {
            self.root.path().join("frames")
        }
    }

    // Test helper to create an app backed by an in-memory source
    fn create_test_app(source: MemorySource) -> TestApp {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("clip.mp4"), b"").unwrap();
        let session = Session::new(source, root.path().join("config.txt"));
        TestApp {
            app: FramePickerApp::with_session(session),
            root,
        }
    }

    fn open_video(test: &mut TestApp, now: Instant) {
        let path = test.video_path();
        test.app.open_video(&path, now);
        assert!(test.app.notice.is_none());
    }

    #[test]
    fn test_new_app_has_no_notice() {
        let test = create_test_app(MemorySource::new(5));
        assert!(test.app.notice.is_none());
        assert_eq!(test.app.session.next_image(), 1);
        assert!(!test.app.session.player().is_open());
    }

    #[test]
    fn test_toggle_without_video_does_nothing() {
        let now = Instant::now();
        let mut test = create_test_app(MemorySource::new(5));

        test.app.dispatch(Command::TogglePlayback, now);

        assert!(!test.app.session.player().is_playing());
        assert!(test.app.overlay.visible(now).is_none());
        assert!(test.app.notice.is_none());
    }

    #[test]
    fn test_toggle_shows_glyph() {
        let now = Instant::now();
        let mut test = create_test_app(MemorySource::new(5));
        open_video(&mut test, now);

        test.app.dispatch(Command::TogglePlayback, now);
        assert!(test.app.session.player().is_playing());
        let (glyph, _) = test.app.overlay.visible(now + Duration::from_millis(200)).unwrap();
        assert_eq!(glyph, "▶");

        test.app.dispatch(Command::TogglePlayback, now);
        assert!(!test.app.session.player().is_playing());
        let (glyph, _) = test.app.overlay.visible(now + Duration::from_millis(200)).unwrap();
        assert_eq!(glyph, "⏸");
    }

    #[test]
    fn test_step_while_playing_pauses() {
        let now = Instant::now();
        let mut test = create_test_app(MemorySource::new(10));
        open_video(&mut test, now);
        test.app.dispatch(Command::TogglePlayback, now);

        test.app.dispatch(Command::Step(3), now);

        assert!(!test.app.session.player().is_playing());
        assert_eq!(test.app.session.player().current_index(), 3);
    }

    #[test]
    fn test_save_without_dir_shows_notice() {
        let now = Instant::now();
        let mut test = create_test_app(MemorySource::new(5));
        open_video(&mut test, now);

        test.app.dispatch(Command::SaveFrame, now);

        let notice = test.app.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.text, "Please select a save directory first.");
        assert_eq!(test.app.session.next_image(), 1);
        assert!(!test.app.next_image_flash.is_active(now));
    }

    #[test]
    fn test_save_without_frame_is_silent() {
        let now = Instant::now();
        let mut test = create_test_app(MemorySource::new(5));
        let dir = test.save_dir();
        test.app.set_save_dir(dir);

        test.app.dispatch(Command::SaveFrame, now);

        assert!(test.app.notice.is_none());
        assert_eq!(test.app.session.next_image(), 1);
    }

    #[test]
    fn test_save_updates_status_and_flash() {
        let now = Instant::now();
        let mut test = create_test_app(MemorySource::new(5));
        open_video(&mut test, now);
        let dir = test.save_dir();
        test.app.set_save_dir(dir.clone());

        test.app.dispatch(Command::SaveFrame, now);

        assert!(test.app.notice.is_none());
        assert!(dir.join("image_0001.png").is_file());
        assert_eq!(test.app.session.next_image(), 2);
        assert_eq!(test.app.status.current(now), Some("Saved: image_0001.png"));
        assert!(test.app.next_image_flash.is_active(now + Duration::from_millis(100)));
        assert!(!test.app.next_image_flash.is_active(now + Duration::from_millis(300)));
    }

    #[test]
    fn test_right_click_saves_without_changing_playback() {
        let now = Instant::now();
        let mut test = create_test_app(MemorySource::new(5));
        open_video(&mut test, now);
        let dir = test.save_dir();
        test.app.set_save_dir(dir.clone());
        test.app.dispatch(Command::TogglePlayback, now);

        test.app.dispatch(route_click(VideoClick::Secondary), now);

        assert!(test.app.session.player().is_playing());
        assert!(dir.join("image_0001.png").is_file());
    }

    #[test]
    fn test_left_click_toggles_playback() {
        let now = Instant::now();
        let mut test = create_test_app(MemorySource::new(5));
        open_video(&mut test, now);

        test.app.dispatch(route_click(VideoClick::Primary), now);

        assert!(test.app.session.player().is_playing());
    }

    #[test]
    fn test_write_failure_shows_save_failed_notice() {
        let now = Instant::now();
        let mut test = create_test_app(MemorySource::new(5));
        open_video(&mut test, now);
        let blocker = test.root.path().join("taken");
        std::fs::write(&blocker, b"").unwrap();
        test.app.set_save_dir(blocker);
        let before = test.app.session.next_image();

        test.app.dispatch(Command::SaveFrame, now);

        let notice = test.app.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.title, "Save failed");
        assert_eq!(test.app.session.next_image(), before);
        assert!(!test.app.next_image_flash.is_active(now));
    }

    #[test]
    fn test_video_label_shows_open_video_only() {
        let now = Instant::now();
        let mut test = create_test_app(MemorySource::new(5));
        assert_eq!(test.app.video_label(), "No video selected");

        open_video(&mut test, now);
        assert_eq!(test.app.video_label(), test.video_path().display().to_string());
    }

    #[test]
    fn test_failed_restore_leaves_no_video_label() {
        let root = tempfile::tempdir().unwrap();
        let video = root.path().join("old.mp4");
        std::fs::write(&video, b"").unwrap();
        let config_path = root.path().join("config.txt");
        let config = AppConfig {
            last_video: Some(video),
            ..AppConfig::default()
        };
        config.save_to(&config_path).unwrap();

        let mut app = FramePickerApp::with_session(Session::new(MemorySource::failing(), config_path));
        assert!(app.session.restore_last_video().unwrap().is_err());

        assert!(app.session.config().last_video.is_some());
        assert_eq!(app.video_label(), "No video selected");
    }

    #[test]
    fn test_failed_open_shows_notice_and_keeps_config() {
        let now = Instant::now();
        let mut test = create_test_app(MemorySource::failing());
        let path = test.video_path();

        test.app.open_video(&path, now);

        let notice = test.app.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.text, "Failed to open video.");
        assert_eq!(test.app.session.config().last_video, None);
    }

    #[test]
    fn test_open_persists_last_video() {
        let now = Instant::now();
        let mut test = create_test_app(MemorySource::new(5));
        open_video(&mut test, now);

        let saved = AppConfig::load_from(&test.config_path());
        assert_eq!(saved.last_video.as_deref(), Some(Path::new(&test.video_path())));
        assert!(test.app.status.current(now).is_some());
    }
}
