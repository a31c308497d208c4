use crate::utils::log_msg;
use anyhow::{Context, Result};
use std::process::{Command, Stdio};

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const OPENER: &str = "xdg-open";

const PLAYER: &str = "ffplay";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    /// Play in a local video window.
    Play(String),
    /// Hand to the desktop's default handler (browser, image viewer, PDF reader).
    Open(String),
}

impl Launch {
    pub fn url(&self) -> &str {
        match self {
            Launch::Play(url) | Launch::Open(url) => url,
        }
    }

    fn command(&self) -> Command {
        match self {
            Launch::Play(url) => {
                let mut cmd = Command::new(PLAYER);
                cmd.args(["-autoexit", "-hide_banner", "-loglevel", "panic", url.as_str()]);
                cmd
            }
            Launch::Open(url) => {
                let mut cmd = Command::new(OPENER);
                cmd.arg(url);
                cmd
            }
        }
    }
}

/// Spawns the external program and returns without waiting for it.
pub fn launch(target: &Launch) -> Result<()> {
    let program = match target {
        Launch::Play(_) => PLAYER,
        Launch::Open(_) => OPENER,
    };
    log_msg("info", &format!("Launching {program} for {}", target.url()));

    target
        .command()
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to start {program}"))?;
    Ok(())
}
