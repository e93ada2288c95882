use std::time::{Duration, Instant};

use crate::playback::PlaybackState;

const FADE_IN: Duration = Duration::from_millis(120);
const HOLD_UNTIL: Duration = Duration::from_millis(450);
const FADE_OUT: Duration = Duration::from_millis(350);

/// Opacity of the play/pause glyph `elapsed` after it was shown.
pub fn glyph_opacity(elapsed: Duration) -> f32 {
    if elapsed < FADE_IN {
        elapsed.as_secs_f32() / FADE_IN.as_secs_f32()
    } else if elapsed < HOLD_UNTIL {
        1.0
    } else if elapsed < HOLD_UNTIL + FADE_OUT {
        1.0 - (elapsed - HOLD_UNTIL).as_secs_f32() / FADE_OUT.as_secs_f32()
    } else {
        0.0
    }
}

/// Centered ▶ / ⏸ glyph shown briefly when playback state changes.
#[derive(Debug, Default)]
pub struct GlyphOverlay {
    glyph: &'static str,
    shown_at: Option<Instant>,
}

impl GlyphOverlay {
    pub fn show(&mut self, state: PlaybackState, now: Instant) {
        self.glyph = match state {
            PlaybackState::Playing => "▶",
            PlaybackState::Stopped => "⏸",
        };
        self.shown_at = Some(now);
    }

    /// Glyph and opacity to draw, if still visible.
    pub fn visible(&self, now: Instant) -> Option<(&'static str, f32)> {
        let elapsed = now.saturating_duration_since(self.shown_at?);
        let opacity = glyph_opacity(elapsed);
        (opacity > 0.0).then_some((self.glyph, opacity))
    }
}

/// A flag that stays on for a fixed time after being triggered.
#[derive(Debug)]
pub struct Flash {
    duration: Duration,
    until: Option<Instant>,
}

impl Flash {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            until: None,
        }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.until = Some(now + self.duration);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.until
            .filter(|until| now < *until)
            .map(|until| until - now)
    }
}

/// Status bar text that disappears after a while.
#[derive(Debug)]
pub struct StatusMessage {
    text: String,
    timer: Flash,
}

impl StatusMessage {
    pub fn new(duration: Duration) -> Self {
        Self {
            text: String::new(),
            timer: Flash::new(duration),
        }
    }

    pub fn set(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.timer.trigger(now);
    }

    pub fn current(&self, now: Instant) -> Option<&str> {
        self.timer.is_active(now).then_some(self.text.as_str())
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }
}
