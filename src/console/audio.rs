//! Music for the `persona` command.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use crate::config::AudioConfig;
use crate::error::{Error, Result};

/// Handle to a single audio track owned by the terminal.
pub trait AudioPlayer {
    /// Starts playback. Calling it while already playing leaves the current
    /// playback running.
    fn play(&mut self) -> Result<()>;

    fn is_playing(&mut self) -> bool;

    /// Stops playback and rewinds, so the next `play` starts from the top.
    fn stop(&mut self);
}

/// Plays the track through an external player process.
#[derive(Debug)]
pub struct ProcessPlayer {
    command: String,
    args: Vec<String>,
    file: PathBuf,
    child: Option<Child>,
}

impl ProcessPlayer {
    pub fn new(command: impl Into<String>, args: Vec<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            args,
            file: file.into(),
            child: None,
        }
    }

    pub fn from_config(config: &AudioConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone(), config.file.clone())
    }
}

impl AudioPlayer for ProcessPlayer {
    fn play(&mut self) -> Result<()> {
        if self.is_playing() {
            return Ok(());
        }
        if self.command.is_empty() {
            return Err(Error::Audio {
                message: "no audio player configured".to_string(),
            });
        }

        let child = Command::new(&self.command)
            .args(&self.args)
            .arg(&self.file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Audio {
                message: format!("failed to execute {}: {}", self.command, e),
            })?;

        tracing::info!(
            command = %self.command,
            file = %self.file.display(),
            pid = child.id(),
            "audio started"
        );
        self.child = Some(child);
        Ok(())
    }

    fn is_playing(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                tracing::debug!(%status, "audio player exited");
                self.child = None;
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not query audio player");
                self.child = None;
                false
            }
        }
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                tracing::debug!(error = %e, "audio player already gone");
            }
            if let Err(e) = child.wait() {
                tracing::debug!(error = %e, "could not reap audio player");
            }
            tracing::info!("audio stopped");
        }
    }
}

impl Drop for ProcessPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}
