#[cfg(test)]
mod tests {

    use std::path::PathBuf;
    use crate::core::AppConfig;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert!(config.last_video.is_none());
        assert!(config.save_dir.is_none());
        assert_eq!(config.next_image, 0);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("does-not-exist.txt"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.txt");

        let config = AppConfig {
            last_video: Some(PathBuf::from("/videos/my clip=1.mp4")),
            save_dir: Some(PathBuf::from("/data/set #2")),
            next_image: 1234,
        };
        config.save_to(&path).expect("Failed to save config");

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_empty_values_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.txt");

        AppConfig::default().save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn test_save_writes_all_keys_with_header() {
        let config = AppConfig {
            last_video: None,
            save_dir: Some(PathBuf::from("out")),
            next_image: 7,
        };
        let text = config.render();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with('#'));
        assert_eq!(lines[1], "last_video=");
        assert_eq!(lines[2], "save_dir=out");
        assert_eq!(lines[3], "next_image=7");
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.txt");
        std::fs::write(&path, "stale=1\nlast_video=/old.mp4\nmore junk\n").unwrap();

        let config = AppConfig {
            next_image: 3,
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert!(!content.contains("/old.mp4"));
        assert_eq!(AppConfig::load_from(&path), config);
    }

    #[test]
    fn test_parse_ignores_comments_and_unknown_keys() {
        let text = "\
# comment line
   # indented comment
unknown=value
=no key
just some words

  last_video = /videos/a.mp4
save_dir=/out
next_image=42
";
        let config = AppConfig::parse(text);
        assert_eq!(config.last_video, Some(PathBuf::from("/videos/a.mp4")));
        assert_eq!(config.save_dir, Some(PathBuf::from("/out")));
        assert_eq!(config.next_image, 42);
    }

    #[test]
    fn test_bad_next_image_falls_back_to_zero() {
        assert_eq!(AppConfig::parse("next_image=abc").next_image, 0);
        assert_eq!(AppConfig::parse("next_image=-5").next_image, 0);
        assert_eq!(AppConfig::parse("next_image=").next_image, 0);

        let config = AppConfig::parse("save_dir=/out\nnext_image=12x");
        assert_eq!(config.next_image, 0);
        assert_eq!(config.save_dir, Some(PathBuf::from("/out")));
    }

    #[test]
    fn test_later_keys_win() {
        let config = AppConfig::parse("next_image=1\nnext_image=9");
        assert_eq!(config.next_image, 9);
    }

    #[test]
    fn test_config_path_location() {
        let path = AppConfig::config_path();
        assert!(path.ends_with("frame-picker/config.txt"));
    }
}
