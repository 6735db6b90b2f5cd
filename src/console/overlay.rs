//! Timed dance animation shown over the whole screen by `act dance`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;

const BUILTIN_FRAMES: &str = r"
   \o/
    |
   / \
---
    o
   /|\
   / \
---
   \o
    |\
   / \
---
    o/
   /|
   / \
";

/// Splits ASCII art into frames on lines that contain only `---`.
pub fn parse_frames(text: &str) -> Vec<String> {
    let mut frames = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim() == "---" {
            frames.push(current.join("\n"));
            current.clear();
        } else {
            current.push(line);
        }
    }
    frames.push(current.join("\n"));
    frames
        .into_iter()
        .map(|frame| frame.trim_matches('\n').to_string())
        .filter(|frame| !frame.trim().is_empty())
        .collect()
}

pub fn builtin_frames() -> Vec<String> {
    parse_frames(BUILTIN_FRAMES)
}

/// Reads frames from `path`, or returns the built-in dancer.
pub fn load_frames(path: Option<&Path>) -> Result<Vec<String>> {
    let Some(path) = path else {
        return Ok(builtin_frames());
    };
    let frames = parse_frames(&fs::read_to_string(path)?);
    if frames.is_empty() {
        tracing::warn!(path = %path.display(), "dance file has no frames, using built-in");
        return Ok(builtin_frames());
    }
    Ok(frames)
}

#[derive(Debug, Clone)]
pub struct DanceOverlay {
    frames: Vec<String>,
    frame_interval: Duration,
    duration: Duration,
    /// Time left before auto-hide; `None` while hidden
    remaining: Option<Duration>,
    shown_for: Duration,
}

impl DanceOverlay {
    pub fn new(frames: Vec<String>, frame_interval: Duration, duration: Duration) -> Self {
        Self {
            frames,
            frame_interval,
            duration,
            remaining: None,
            shown_for: Duration::ZERO,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Shows the overlay for the full duration, restarting the countdown if
    /// it is already up.
    pub fn trigger(&mut self) {
        self.remaining = Some(self.duration);
        self.shown_for = Duration::ZERO;
    }

    pub fn advance(&mut self, delta: Duration) {
        if let Some(remaining) = self.remaining {
            let left = remaining.saturating_sub(delta);
            self.shown_for += delta;
            if left.is_zero() {
                self.remaining = None;
                self.shown_for = Duration::ZERO;
            } else {
                self.remaining = Some(left);
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    pub fn current_frame(&self) -> Option<&str> {
        if !self.is_visible() || self.frames.is_empty() {
            return None;
        }
        let step = self.frame_interval.as_millis().max(1);
        let index = (self.shown_for.as_millis() / step) as usize % self.frames.len();
        self.frames.get(index).map(String::as_str)
    }
}
