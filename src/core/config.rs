use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const HEADER: &str = "# frame-picker settings";

const KEY_LAST_VIDEO: &str = "last_video";
const KEY_SAVE_DIR: &str = "save_dir";
const KEY_NEXT_IMAGE: &str = "next_image";

/// Persistent application state, stored as `key=value` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub last_video: Option<PathBuf>,
    pub save_dir: Option<PathBuf>,
    pub next_image: u32,
}

impl AppConfig {
    /// Reads the config at `path`. A missing or unreadable file gives the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config file at {}, starting with defaults", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => {
                log::info!("Loaded config from {}", path.display());
                Self::parse(&content)
            }
            Err(e) => {
                log::warn!("Failed to read config file at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses config text. Comments, malformed lines and unknown keys are skipped.
    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                KEY_LAST_VIDEO => config.last_video = non_empty_path(value),
                KEY_SAVE_DIR => config.save_dir = non_empty_path(value),
                KEY_NEXT_IMAGE => config.next_image = value.parse().unwrap_or(0),
                "" => {}
                other => log::debug!("Ignoring unknown config key: {}", other),
            }
        }

        config
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", HEADER);
        let _ = writeln!(out, "{}={}", KEY_LAST_VIDEO, display_path(&self.last_video));
        let _ = writeln!(out, "{}={}", KEY_SAVE_DIR, display_path(&self.save_dir));
        let _ = writeln!(out, "{}={}", KEY_NEXT_IMAGE, self.next_image);
        out
    }

    /// Overwrites the file at `path` with all keys.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| anyhow::anyhow!("Failed to create config directory {}: {}", parent.display(), e))?;
            }
        }
        std::fs::write(path, self.render())
            .map_err(|e| anyhow::anyhow!("Failed to write config file at {}: {}", path.display(), e))?;
        log::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("frame-picker")
            .join("config.txt")
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    (!value.is_empty()).then(|| PathBuf::from(value))
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}
