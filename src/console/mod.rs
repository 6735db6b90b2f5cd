//! The easter-egg command terminal.
//!
//! [`Interpreter`] owns the pending input line, the submitted-line history,
//! the result log and the terminal's visibility. Hosts feed it key and pointer
//! events and render whatever state it exposes.

pub mod audio;
pub mod command;
pub mod history;
pub mod overlay;
pub mod visibility;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{ConsoleConfig, ProfileConfig};

pub use audio::{AudioPlayer, ProcessPlayer};
pub use command::{Command, CommandResult, ResultKind};
pub use history::History;
pub use overlay::DanceOverlay;
pub use visibility::{Visibility, VisibilityEvent};

/// Lines printed above the result log; not part of it.
pub const BANNER: [&str; 2] = [
    "Welcome to the goofy aah terminal! Type 'help' for available commands or whatever.",
    "Press Escape to close.",
];

pub const HELP_TEXT: &str =
    "Available commands: help, clear, act dance, persona, stop, exit vim, flip coin, fortune, credits";

pub const FORTUNES: [&str; 6] = [
    "A beautiful, smart, and loving person will be coming into your life.",
    "Your code will change the world.",
    "The greatest risk is not taking one.",
    "You will refactor legacy code with zero bugs on the first try.",
    "Your pull request will be approved without any change requests.",
    "You will find that missing semicolon soon.",
];

pub const PERSONA_TEXT: &str = "DISTURBING THE PEAACEE";
pub const STOPPED_TEXT: &str = "No more persona :(";
pub const NOTHING_PLAYING_TEXT: &str = "No audio is currently playing dumbass";
pub const EXIT_VIM_TEXT: &str = "Cannot exit vim. You're stuck forever.";
pub const DANCE_TEXT: &str = "Dance party initiated! \u{1F389}";

pub struct Interpreter {
    input: String,
    history: History,
    results: Vec<CommandResult>,
    visibility: Visibility,
    overlay: DanceOverlay,
    audio: Box<dyn AudioPlayer>,
    rng: StdRng,
    credits: [String; 3],
}

impl Interpreter {
    pub fn new(
        profile: &ProfileConfig,
        overlay: DanceOverlay,
        audio: Box<dyn AudioPlayer>,
        rng: StdRng,
    ) -> Self {
        Self {
            input: String::new(),
            history: History::new(),
            results: Vec::new(),
            visibility: Visibility::Hidden,
            overlay,
            audio,
            rng,
            credits: [
                format!("\u{2728} Website by {} \u{2728}", profile.name),
                format!("Technologies: {}", profile.technologies),
                profile.inspiration.clone(),
            ],
        }
    }

    /// Builds the overlay from console settings with the given frames.
    pub fn overlay_from_config(config: &ConsoleConfig, frames: Vec<String>) -> DanceOverlay {
        DanceOverlay::new(
            frames,
            Duration::from_millis(config.dance_frame_ms),
            Duration::from_millis(config.dance_duration_ms),
        )
    }

    // ------------------------------------------------------------------------
    // Pending input
    // ------------------------------------------------------------------------

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Submits the pending line and clears it. Blank lines are ignored and
    /// left in place.
    pub fn submit_input(&mut self) -> Option<Command> {
        if self.input.trim().is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.input);
        self.submit(&line)
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Records `line` in history and runs the command it names.
    ///
    /// Unrecognised input is recorded but produces no result.
    pub fn submit(&mut self, line: &str) -> Option<Command> {
        if line.trim().is_empty() {
            return None;
        }
        self.history.push(line);

        match Command::parse(line) {
            Some(command) => {
                tracing::debug!(command = command.keyword(), "dispatching command");
                self.execute(command);
                Some(command)
            }
            None => {
                tracing::debug!(line, "unknown command ignored");
                None
            }
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Clear => self.results.clear(),
            Command::Help => self.push(CommandResult::text(HELP_TEXT)),
            Command::FlipCoin => {
                let side = if self.rng.gen_bool(0.5) { "Heads" } else { "Tails" };
                self.push(CommandResult::text(format!("Flipping coin... {side}!")));
            }
            Command::Fortune => {
                let fortune = FORTUNES.choose(&mut self.rng).copied().unwrap_or_default();
                self.push(CommandResult::text(format!("\u{1F52E} {fortune}")));
            }
            Command::ExitVim => self.push(CommandResult::error(EXIT_VIM_TEXT)),
            Command::Credits => {
                let credits: Vec<CommandResult> =
                    self.credits.iter().map(CommandResult::text).collect();
                self.results.extend(credits);
            }
            Command::Persona => match self.audio.play() {
                Ok(()) => self.push(CommandResult::text(PERSONA_TEXT)),
                Err(e) => {
                    tracing::warn!(error = %e, "persona playback failed");
                    self.push(CommandResult::error(format!("Could not start audio: {e}")));
                }
            },
            Command::Stop => {
                if self.audio.is_playing() {
                    self.audio.stop();
                    self.push(CommandResult::text(STOPPED_TEXT));
                } else {
                    self.push(CommandResult::text(NOTHING_PLAYING_TEXT));
                }
            }
            Command::ActDance => {
                self.overlay.trigger();
                self.push(CommandResult::gif(DANCE_TEXT, self.overlay.duration()));
            }
        }
    }

    fn push(&mut self, result: CommandResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[CommandResult] {
        &self.results
    }

    // ------------------------------------------------------------------------
    // History recall
    // ------------------------------------------------------------------------

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn recall_previous(&mut self) {
        if let Some(entry) = self.history.recall_previous() {
            self.input = entry.to_string();
        }
    }

    pub fn recall_next(&mut self) {
        match self.history.recall_next() {
            Some(entry) => self.input = entry.to_string(),
            None => self.input.clear(),
        }
    }

    // ------------------------------------------------------------------------
    // Visibility and timers
    // ------------------------------------------------------------------------

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    pub fn handle(&mut self, event: VisibilityEvent) {
        let next = self.visibility.reduce(event);
        if next != self.visibility {
            tracing::debug!(?event, ?next, "terminal visibility changed");
        }
        self.visibility = next;
    }

    pub fn overlay(&self) -> &DanceOverlay {
        &self.overlay
    }

    /// Advances the dance overlay's clock.
    pub fn advance(&mut self, delta: Duration) {
        self.overlay.advance(delta);
    }
}
