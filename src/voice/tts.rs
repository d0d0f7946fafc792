use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

pub const DEFAULT_PROGRAM: &str = "/usr/bin/say";
pub const DEFAULT_VOICE: &str = "Bahh";
pub const DEFAULT_QUALITY: u8 = 127;

/// Something that can read a message out loud.
pub trait Announcer {
    fn announce(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct TtsConfig {
    pub program: PathBuf,
    pub voice: Option<String>,
    pub quality: u8,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            voice: Some(DEFAULT_VOICE.to_string()),
            quality: DEFAULT_QUALITY,
        }
    }
}

pub struct TtsManager {
    config: TtsConfig,
}

fn is_say(program: &Path) -> bool {
    program.file_name().is_some_and(|name| name == "say")
}

impl TtsManager {
    pub fn new(config: TtsConfig) -> Self {
        Self { config }
    }

    /// Arguments passed to the speech program for `text`.
    ///
    /// macOS `say` gets the voice, quality and interactive flags; any other
    /// program only receives the text.
    pub fn args(&self, text: &str) -> Vec<OsString> {
        let mut args = Vec::new();
        if is_say(&self.config.program) {
            if let Some(voice) = &self.config.voice {
                args.push("-v".into());
                args.push(voice.into());
            }
            args.push("--quality".into());
            args.push(self.config.quality.to_string().into());
            args.push("-i".into());
        }
        args.push(text.into());
        args
    }
}

impl Announcer for TtsManager {
    fn announce(&self, text: &str) -> Result<()> {
        let program = &self.config.program;
        debug!(program = %program.display(), "Speaking advisory");

        // Wait for the speech to finish: the process exits right after.
        let status = Command::new(program)
            .args(self.args(text))
            .status()
            .with_context(|| format!("failed to execute {}", program.display()))?;
        if !status.success() {
            bail!("{} exited with {}", program.display(), status);
        }
        Ok(())
    }
}

/// Logs advisories instead of speaking them.
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn announce(&self, text: &str) -> Result<()> {
        info!("(muted) {}", text);
        Ok(())
    }
}
