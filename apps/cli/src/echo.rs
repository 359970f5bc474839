//! # Clipboard Echo
//!
//! Every recompute that changes the final price pushes the plain 2-decimal
//! figure at the system clipboard, so the number is ready to paste into a
//! listing without retyping. The write is fire-and-forget: a later
//! recompute never waits for an earlier copy, and a failed copy is a
//! transient notification, never an error that touches calculator state.

use std::process::Stdio;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Clipboard write failures. All of them are non-fatal.
#[derive(Debug, Error)]
pub enum EchoError {
    /// None of the platform clipboard tools could be started.
    #[error("no clipboard tool available (tried {0})")]
    NoTool(String),

    /// The clipboard tool started but reported failure.
    #[error("clipboard tool '{tool}' exited with {status}")]
    ToolFailed { tool: String, status: String },
}

// Candidate commands per platform, tried in order. The first one that
// starts and exits cleanly wins.
#[cfg(target_os = "macos")]
const CLIPBOARD_COMMANDS: &[&[&str]] = &[&["pbcopy"]];

#[cfg(target_os = "windows")]
const CLIPBOARD_COMMANDS: &[&[&str]] = &[&["clip"]];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CLIPBOARD_COMMANDS: &[&[&str]] = &[
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
];

/// The system clipboard, reached through the platform's copy tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// Writes `text` to the clipboard.
    pub async fn copy(&self, text: &str) -> Result<(), EchoError> {
        for command in CLIPBOARD_COMMANDS {
            match try_command(command, text).await {
                Ok(()) => return Ok(()),
                Err(err) => debug!(tool = command[0], %err, "clipboard candidate failed"),
            }
        }

        let tried = CLIPBOARD_COMMANDS
            .iter()
            .map(|c| c[0])
            .collect::<Vec<_>>()
            .join(", ");
        Err(EchoError::NoTool(tried))
    }
}

async fn try_command(command: &[&str], text: &str) -> Result<(), EchoError> {
    let mut child = Command::new(command[0])
        .args(&command[1..])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|_| EchoError::NoTool(command[0].to_string()))?;

    if let Some(mut stdin) = child.stdin.take() {
        if stdin.write_all(text.as_bytes()).await.is_err() {
            return Err(EchoError::ToolFailed {
                tool: command[0].to_string(),
                status: "broken pipe".to_string(),
            });
        }
        // Dropping stdin closes the pipe so the tool can finish.
    }

    let status = child.wait().await.map_err(|_| EchoError::ToolFailed {
        tool: command[0].to_string(),
        status: "wait failed".to_string(),
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(EchoError::ToolFailed {
            tool: command[0].to_string(),
            status: status.to_string(),
        })
    }
}

/// Spawns a fire-and-forget copy of `text` and returns its handle.
///
/// The caller may await the handle (one-shot runs do, before exiting) or
/// drop it (the interactive session does). Success and failure are both
/// surfaced as transient log lines, the terminal analog of a toast.
pub fn spawn_echo(text: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        match SystemClipboard.copy(&text).await {
            Ok(()) => info!("copied: {text}"),
            Err(err) => warn!("copy failed ({err})"),
        }
    })
}
