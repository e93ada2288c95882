use serde::Deserialize;
use std::path::Path;
use std::process::Command;

use crate::video::source::{StreamInfo, VideoError, DEFAULT_FPS};

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    nb_frames: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Runs ffprobe on the first video stream of `path`.
pub fn probe_video(ffprobe: &Path, path: &Path) -> Result<StreamInfo, VideoError> {
    let output = Command::new(ffprobe)
        .arg("-v").arg("quiet")
        .arg("-print_format").arg("json")
        .arg("-show_format")
        .arg("-show_streams")
        .arg("-select_streams").arg("v:0")
        .arg(path)
        .output()
        .map_err(|e| open_error(path, format!("could not run {}: {}", ffprobe.display(), e)))?;

    if !output.status.success() {
        return Err(open_error(path, "ffprobe could not read the file".to_string()));
    }

    let json = String::from_utf8_lossy(&output.stdout);
    parse_probe_output(&json).map_err(|reason| open_error(path, reason))
}

fn open_error(path: &Path, reason: String) -> VideoError {
    VideoError::Open {
        path: path.to_path_buf(),
        reason,
    }
}

/// Extracts stream properties from ffprobe's JSON output.
pub fn parse_probe_output(json: &str) -> Result<StreamInfo, String> {
    let probe: ProbeOutput =
        serde_json::from_str(json).map_err(|e| format!("invalid ffprobe output: {}", e))?;

    let stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| "no video stream found".to_string())?;

    let (width, height) = match (stream.width, stream.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err("video stream has no dimensions".to_string()),
    };

    let fps = stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_frame_rate))
        .unwrap_or(DEFAULT_FPS);

    let frame_count = stream
        .nb_frames
        .as_deref()
        .and_then(|n| n.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .or_else(|| {
            let duration = stream
                .duration
                .as_deref()
                .and_then(parse_seconds)
                .or_else(|| probe.format.as_ref()?.duration.as_deref().and_then(parse_seconds))?;
            Some((duration * fps).round() as usize)
        })
        .unwrap_or(0);

    Ok(StreamInfo {
        width,
        height,
        fps,
        frame_count,
    })
}

/// Parses "30000/1001" or "25" style rates; zero or invalid rates give `None`.
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let fps = match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse().ok()?,
    };

    (fps.is_finite() && fps > 0.0).then_some(fps)
}

fn parse_seconds(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d > 0.0)
}
