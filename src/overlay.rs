//! Debug log overlay shown in the bottom left corner of the screen.
//!
//! Everything in here is best effort: failures are swallowed so logging can never interrupt a frame.

use std::{
    collections::VecDeque,
    fmt::{Display, Write as _},
    fs::File,
    io::{LineWriter, Write as _},
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use glam::Vec2;
use rgb::RGBA8;

use crate::{
    backend::{Flip, FontRef, Renderer, TextDraw},
    config::BatchConfig,
};

/// Shown instead of a message that could not be formatted.
pub const PLACEHOLDER: &str = "ERROR: COULD NOT LOG MESSAGE";

/// Vertical distance between lines in pixels.
const LINE_HEIGHT: f32 = 20.0;

/// Rolling buffer of the last log messages, optionally mirrored to a file.
#[derive(Debug)]
pub struct DebugLog {
    /// Messages from old to new.
    lines: VecDeque<String>,
    /// Maximum amount of lines kept.
    capacity: usize,
    /// When `false` nothing is recorded.
    enabled: bool,
    /// File every message is appended to.
    file: Option<LineWriter<File>>,
}

impl DebugLog {
    /// Create an empty log.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum amount of lines to keep.
    /// * `enabled` - Whether messages are recorded at all.
    /// * `file` - Also write every message to this file as `[HH:MM:SS] message` with the time in UTC, when it can't be created only the overlay is used.
    #[must_use]
    pub fn new(capacity: usize, enabled: bool, file: Option<&Path>) -> Self {
        let file = file.and_then(|path| match File::create(path) {
            Ok(file) => Some(LineWriter::new(file)),
            Err(err) => {
                log::warn!("Could not create log file '{}': {err}", path.display());
                None
            }
        });

        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            enabled,
            file,
        }
    }

    /// Record a message, pushing out the oldest one when full.
    ///
    /// Ignored when the log is disabled.
    pub fn log(&mut self, message: impl Display) {
        if !self.enabled {
            return;
        }

        // A faulty `Display` implementation must not take the game down
        let mut line = String::new();
        if write!(line, "{message}").is_err() {
            line = PLACEHOLDER.to_owned();
        }

        log::info!("{line}");

        if let Some(file) = &mut self.file {
            // Not important enough to crash a game for
            let _ = writeln!(file, "[{}] {line}", wall_clock());
        }

        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Draw all lines in their own batch.
    ///
    /// Slots are stacked upwards from the bottom of the screen, so the newest line is the highest.
    pub fn draw(&self, font: FontRef, renderer: &mut dyn Renderer) {
        if !self.enabled || self.lines.is_empty() {
            return;
        }

        let viewport_height = renderer.viewport_height();

        renderer.begin(&BatchConfig::default());
        for (slot, line) in self.slots() {
            renderer.draw_text(&TextDraw {
                font,
                text: line,
                position: Vec2::new(0.0, LINE_HEIGHT.mul_add(-(slot as f32 + 1.0), viewport_height)),
                tint: RGBA8::new(255, 255, 255, 255),
                rotation: 0.0,
                origin: Vec2::ZERO,
                scale: 1.0,
                flip: Flip::NONE,
            });
        }
        renderer.end();
    }

    /// Lines with their slot, where slot `capacity - 1` is the newest message.
    pub fn slots(&self) -> impl Iterator<Item = (usize, &str)> {
        let first_slot = self.capacity - self.lines.len();

        self.lines
            .iter()
            .enumerate()
            .map(move |(index, line)| (first_slot + index, line.as_str()))
    }

    /// Messages from old to new.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Whether messages are recorded.
    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start or stop recording messages.
    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Remove all messages.
    #[inline]
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Current UTC time of day as `HH:MM:SS`.
fn wall_clock() -> String {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |since| since.as_secs())
        % 86_400;

    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    /// Display implementation that always fails.
    struct Broken;

    impl Display for Broken {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn oldest_line_is_pushed_out() {
        let mut log = DebugLog::new(3, true, None);
        for index in 0..5 {
            log.log(format_args!("line {index}"));
        }

        assert_eq!(log.lines().collect::<Vec<_>>(), ["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn newest_line_has_highest_slot() {
        let mut log = DebugLog::new(10, true, None);
        log.log("first");
        log.log("second");

        assert_eq!(log.slots().collect::<Vec<_>>(), [(8, "first"), (9, "second")]);
    }

    #[test]
    fn broken_message_is_replaced() {
        let mut log = DebugLog::new(10, true, None);
        log.log(Broken);

        assert_eq!(log.lines().collect::<Vec<_>>(), [PLACEHOLDER]);
    }

    #[test]
    fn disabled_log_ignores_messages() {
        let mut log = DebugLog::new(10, false, None);
        log.log("ignored");

        assert_eq!(log.lines().count(), 0);
    }

    #[test]
    fn messages_are_written_to_file() {
        let path = std::env::temp_dir().join(format!("sprig-log-{}.txt", std::process::id()));
        {
            let mut log = DebugLog::new(10, true, Some(&path));
            log.log("to the file");
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with('['));
        assert!(contents.trim_end().ends_with("] to the file"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unwritable_file_is_ignored() {
        let mut log = DebugLog::new(10, true, Some(Path::new("/nonexistent/dir/log.txt")));
        log.log("still shown");

        assert_eq!(log.lines().collect::<Vec<_>>(), ["still shown"]);
    }
}
