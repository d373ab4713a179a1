/*!
 * System clipboard support
 *
 * Writes text to the clipboard by piping it to whichever clipboard
 * command the current platform provides. tmux is preferred when a
 * session is active, then the native mechanism for the platform.
 */

use std::env;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to spawn or drive the clipboard command
    #[error("Clipboard command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// No clipboard command is available on this system
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Known clipboard commands, in rough order of specificity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provider {
    Tmux,
    Wayland,
    Xsel,
    Xclip,
    MacOs,
    Windows,
    Termux,
}

impl Provider {
    fn command(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Provider::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Provider::Wayland => ("wl-copy", &[]),
            Provider::Xsel => ("xsel", &["-b", "-i"]),
            Provider::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Provider::MacOs => ("pbcopy", &[]),
            Provider::Windows => ("clip.exe", &[]),
            Provider::Termux => ("termux-clipboard-set", &[]),
        }
    }

    /// Candidate providers for the current platform, preferred first
    fn candidates() -> Vec<Provider> {
        let mut candidates = Vec::new();

        if env::var("TMUX").is_ok() {
            candidates.push(Provider::Tmux);
        }

        if cfg!(target_os = "macos") {
            candidates.push(Provider::MacOs);
        } else if cfg!(target_os = "windows") {
            candidates.push(Provider::Windows);
        } else if cfg!(target_os = "android") {
            candidates.push(Provider::Termux);
        } else {
            if env::var("WSL_DISTRO_NAME").is_ok() {
                candidates.push(Provider::Windows);
            }
            candidates.push(Provider::Wayland);
            candidates.push(Provider::Xsel);
            candidates.push(Provider::Xclip);
        }

        candidates
    }
}

/// Copy text to the system clipboard.
///
/// Picks the first available clipboard command for this platform and
/// pipes the text into it.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let provider = Provider::candidates()
        .into_iter()
        .find(|p| command_exists(p.command().0))
        .ok_or(ClipboardError::NoClipboardFound)?;

    let (cmd, args) = provider.command();
    pipe_to_command(cmd, args, text)
}

/// Whether `command` resolves somewhere on PATH
pub fn command_exists(command: &str) -> bool {
    let Ok(paths) = env::var("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| Path::new(&dir).join(command).is_file())
}

fn pipe_to_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let fail = |reason: String| ClipboardError::CommandFailed {
        command: cmd.to_string(),
        reason,
    };

    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| fail(format!("spawn failed: {}", e)))?;

    child
        .stdin
        .take()
        .ok_or_else(|| fail("stdin not available".to_string()))?
        .write_all(text.as_bytes())
        .map_err(|e| fail(format!("write failed: {}", e)))?;

    let status = child
        .wait()
        .map_err(|e| fail(format!("wait failed: {}", e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(fail(format!("exited with {}", status)))
    }
}
