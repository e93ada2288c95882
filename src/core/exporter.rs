use image::ImageFormat;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

use crate::video::Frame;

/// Extensions counted when deriving the next image number.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create directory {}: {source}", .dir.display())]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

fn digit_runs() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"))
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Largest number embedded in the stem of any image file directly inside `dir`.
///
/// Returns 0 if the directory is missing, unreadable or holds no numbered images.
pub fn largest_number_in_dir(dir: &Path) -> u32 {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Cannot scan {}: {}", dir.display(), e);
            return 0;
        }
    };

    let mut largest = 0;
    for entry in entries.filter_map(|e| e.ok()) {
        // Symlinks are skipped, like directories
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        let path = entry.path();
        if !is_file || !is_image_file(&path) {
            continue;
        }

        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy()) else {
            continue;
        };
        for run in digit_runs().find_iter(&stem) {
            if let Ok(number) = run.as_str().parse::<u32>() {
                largest = largest.max(number);
            }
        }
    }

    largest
}

/// Next free image number for `dir`: one past the largest number already used.
pub fn compute_next_index(dir: &Path) -> u32 {
    largest_number_in_dir(dir).saturating_add(1)
}

pub fn frame_file_name(index: u32) -> String {
    format!("image_{:04}.png", index)
}

/// Writes `frame` as `image_NNNN.png` inside `dir`, creating `dir` if needed.
pub fn save_frame(frame: &Frame, dir: &Path, index: u32) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(frame_file_name(index));
    frame
        .image()
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

    log::info!("Saved frame {} to {}", frame.index(), path.display());
    Ok(path)
}
