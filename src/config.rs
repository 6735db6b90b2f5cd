use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Who the portfolio introduces
    pub profile: ProfileConfig,

    /// Loading ring and progress timer
    pub loader: LoaderConfig,

    /// Easter-egg command terminal
    pub console: ConsoleConfig,

    /// Color configuration
    pub colors: ColorConfig,

    /// Keybindings configuration
    pub keys: KeyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub name: String,
    pub tagline: String,
    /// Shown by the `credits` command
    pub technologies: String,
    pub inspiration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub title: String,
    pub dot_count: usize,
    /// Ring radius in logical surface units
    pub base_radius: f64,
    pub dot_radius: f64,
    pub max_trail_length: usize,
    /// Radians per millisecond
    pub rotation_speed: f64,
    /// Fraction of `base_radius` the ring breathes by
    pub expansion_factor: f64,
    /// Logical edge length of the square drawing surface
    pub surface_size: f64,
    /// Device pixel density
    pub scale: f64,
    pub marker: String, // "braille", "dot", "block", "halfblock"
    pub frame_interval_ms: u64,
    pub tick_interval_ms: u64,
    /// Upper bound of the random progress step per tick
    pub max_increment: f64,
    pub settle_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub title: String,
    pub prompt: String,
    pub height: u16,
    /// Width as a percentage of the screen
    pub width_percent: u16,
    pub dance_duration_ms: u64,
    pub dance_frame_ms: u64,
    /// Optional text file of ASCII frames separated by `---` lines
    pub dance_frames: Option<PathBuf>,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Player executable; the audio file is appended after `args`
    pub command: String,
    pub args: Vec<String>,
    pub file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub foreground: String,
    pub background: String,
    pub border: String,
    pub accent: String,
    pub trail: String,
    pub trail_tail: String,
    pub glow: String,
    pub dot: String,
    pub gauge: String,
    pub text_result: String,
    pub gif_result: String,
    pub error_result: String,
    pub prompt: String,
    pub banner: String,
    pub title_modifier: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Quits only while the terminal is hidden
    pub quit: Vec<String>,
    /// Quits from anywhere
    pub force_quit: Vec<String>,
    pub toggle: Vec<String>,
    pub close: Vec<String>,
    pub history_up: Vec<String>,
    pub history_down: Vec<String>,
    pub submit: Vec<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Fady Damak".to_string(),
            tagline: "Developer. Tinkerer. Occasional dancer.".to_string(),
            technologies: "Rust, ratatui, crossterm, serde, tracing".to_string(),
            inspiration: "Inspired by my nerdy aah mind".to_string(),
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            title: "Loading Experience".to_string(),
            dot_count: 7,
            base_radius: 60.0,
            dot_radius: 4.0,
            max_trail_length: 15,
            rotation_speed: 0.0015,
            expansion_factor: 0.5,
            surface_size: 240.0,
            scale: 1.0,
            marker: "braille".to_string(),
            frame_interval_ms: 16,
            tick_interval_ms: 200,
            max_increment: 5.0,
            settle_delay_ms: 500,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            title: "Terminal".to_string(),
            prompt: "$".to_string(),
            height: 18,
            width_percent: 60,
            dance_duration_ms: 5000,
            dance_frame_ms: 150,
            dance_frames: None,
            audio: AudioConfig::default(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            command: "mpv".to_string(),
            args: vec!["--no-video".to_string(), "--really-quiet".to_string()],
            file: PathBuf::from("persona.mp3"),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            foreground: "white".to_string(),
            background: "black".to_string(),
            border: "darkgray".to_string(),
            accent: "#5a96ff".to_string(),
            trail: "#5a96ff".to_string(),
            trail_tail: "#1e64ff".to_string(),
            glow: "#6496ff".to_string(),
            dot: "#ffffff".to_string(),
            gauge: "blue".to_string(),
            text_result: "gray".to_string(),
            gif_result: "lightgreen".to_string(),
            error_result: "lightred".to_string(),
            prompt: "green".to_string(),
            banner: "darkgray".to_string(),
            title_modifier: vec!["bold".to_string()],
        }
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: vec!["q".to_string()],
            force_quit: vec!["Ctrl-c".to_string()],
            toggle: vec!["`".to_string()],
            close: vec!["Esc".to_string()],
            history_up: vec!["Up".to_string()],
            history_down: vec!["Down".to_string()],
            submit: vec!["Enter".to_string()],
        }
    }
}

impl Config {
    /// Rejects values the animator or progress timer cannot run with.
    pub fn validate(&self) -> Result<()> {
        let loader = &self.loader;
        if loader.dot_count == 0 {
            return Err(Error::invalid_config("loader.dot_count must be at least 1"));
        }
        if loader.max_trail_length == 0 {
            return Err(Error::invalid_config(
                "loader.max_trail_length must be at least 1",
            ));
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(loader.base_radius) || !positive(loader.dot_radius) {
            return Err(Error::invalid_config(
                "loader radii must be positive and finite",
            ));
        }
        if !positive(loader.surface_size) || !positive(loader.scale) {
            return Err(Error::invalid_config(
                "loader.surface_size and loader.scale must be positive and finite",
            ));
        }
        if !positive(loader.max_increment) {
            return Err(Error::invalid_config(
                "loader.max_increment must be positive and finite or progress never completes",
            ));
        }
        if !loader.rotation_speed.is_finite() || !loader.expansion_factor.is_finite() {
            return Err(Error::invalid_config(
                "loader.rotation_speed and loader.expansion_factor must be finite",
            ));
        }
        if loader.tick_interval_ms == 0 || loader.frame_interval_ms == 0 {
            return Err(Error::invalid_config("loader intervals must be non-zero"));
        }
        if self.console.dance_frame_ms == 0 || self.console.dance_duration_ms == 0 {
            return Err(Error::invalid_config(
                "console.dance_frame_ms and console.dance_duration_ms must be non-zero",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// CONFIG LOADING
// ============================================================================

pub fn get_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Loads the config from the default location, falling back to defaults
/// when it is missing, unreadable, or invalid.
pub fn load_config() -> Config {
    if let Some(config_path) = get_config_path() {
        if config_path.exists() {
            match load_config_from_path(&config_path) {
                Ok(config) => {
                    tracing::info!(path = %config_path.display(), "loaded config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %config_path.display(),
                        error = %e,
                        "failed to load config, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Writes the commented default config to `path`, creating parent directories.
pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, generate_default_config())?;
    Ok(())
}

pub fn generate_default_config() -> String {
    String::from(
        r##"## folio configuration file
## Place this file at ~/.config/folio/config.toml
## All fields are optional - defaults will be used for missing values

[profile]
name = "Fady Damak"
tagline = "Developer. Tinkerer. Occasional dancer."
technologies = "Rust, ratatui, crossterm, serde, tracing"
inspiration = "Inspired by my nerdy aah mind"

[loader]
title = "Loading Experience"
dot_count = 7
## Ring geometry in logical units of a square surface
base_radius = 60.0
dot_radius = 4.0
surface_size = 240.0
## Device pixel density; the canvas resolution is surface_size * scale
scale = 1.0
max_trail_length = 15
## Radians per millisecond
rotation_speed = 0.0015
expansion_factor = 0.5
marker = "braille"  ## Options: "braille", "dot", "block", "halfblock"
frame_interval_ms = 16
## Progress climbs by a random step in [0, max_increment] every tick
tick_interval_ms = 200
max_increment = 5.0
settle_delay_ms = 500

[console]
title = "Terminal"
prompt = "$"
height = 18
width_percent = 60
dance_duration_ms = 5000
dance_frame_ms = 150
## Optional ASCII animation, frames separated by a line containing only ---
## dance_frames = "~/.config/folio/dance.txt"

[console.audio]
## The file is appended after args
command = "mpv"
args = ["--no-video", "--really-quiet"]
file = "persona.mp3"

[colors]
## Standard: black, red, green, yellow, blue, magenta, cyan, gray, white
## Light variants: lightred, lightgreen, lightyellow, lightblue, lightmagenta, lightcyan
## Dark variants: darkgray
## Hex: "#RRGGBB"
foreground = "white"
background = "black"
border = "darkgray"
accent = "#5a96ff"
trail = "#5a96ff"
trail_tail = "#1e64ff"
glow = "#6496ff"
dot = "#ffffff"
gauge = "blue"
text_result = "gray"
gif_result = "lightgreen"
error_result = "lightred"
prompt = "green"
banner = "darkgray"
title_modifier = ["bold"]  ## Options: bold, italic, underlined, reversed, ...

[keys]
## Key names: "q", "Esc", "Enter", "Up", "Down", "Tab", "Backspace", "F1".."F12"
## Modifiers can be added with format: "Ctrl-q", "Alt-q", "Shift-Up"
quit = ["q"]
force_quit = ["Ctrl-c"]
toggle = ["`"]
close = ["Esc"]
history_up = ["Up"]
history_down = ["Down"]
submit = ["Enter"]
"##,
    )
}
