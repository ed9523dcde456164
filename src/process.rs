//! External process execution
//!
//! Every search, selector and viewer call goes through [`CommandRunner`] so
//! the orchestration can be driven by canned output in tests.

use crate::error::{Error, Result};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Standard output, lossily decoded as UTF-8
    pub stdout: String,
}

impl CommandOutput {
    /// Human readable exit status for diagnostics
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Capability to run external programs
pub trait CommandRunner {
    /// Run `argv` to completion, feeding `input` to its stdin when given.
    ///
    /// A program that cannot be found yields [`Error::CommandNotFound`];
    /// a nonzero exit is *not* an error at this level.
    fn run(&self, argv: &[String], input: Option<&str>) -> Result<CommandOutput>;

    /// Start `argv` without waiting for it to finish.
    fn spawn_detached(&self, argv: &[String]) -> Result<()>;
}

/// [`CommandRunner`] backed by `std::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(argv: &[String]) -> Result<Command> {
        let (program, args) = argv
            .split_first()
            .ok_or(Error::EmptyCommand { role: "external" })?;
        let mut cmd = Command::new(program);
        cmd.args(args);
        Ok(cmd)
    }
}

fn spawn_error(program: &str, err: std::io::Error) -> Error {
    if err.kind() == ErrorKind::NotFound {
        Error::CommandNotFound {
            program: program.to_string(),
        }
    } else {
        Error::Launch {
            program: program.to_string(),
            source: err,
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String], input: Option<&str>) -> Result<CommandOutput> {
        let mut cmd = Self::command(argv)?;
        cmd.stdout(Stdio::piped()).stderr(Stdio::inherit());
        cmd.stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        tracing::debug!(command = ?argv, "running");
        let mut child = cmd.spawn().map_err(|e| spawn_error(&argv[0], e))?;

        let stdin = child.stdin.take();
        // Feed stdin from its own thread while stdout is drained, so a filter
        // that writes as it reads cannot fill both pipes.
        let output = std::thread::scope(|scope| -> Result<std::process::Output> {
            let writer = match (input, stdin) {
                (Some(text), Some(mut stdin)) => Some(scope.spawn(move || {
                    // The selector may quit before consuming everything (e.g. ESC)
                    match stdin.write_all(text.as_bytes()) {
                        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                        other => other,
                    }
                })),
                _ => None,
            };

            let output = child.wait_with_output()?;
            if let Some(writer) = writer {
                match writer.join() {
                    Ok(written) => written?,
                    Err(_) => {
                        return Err(Error::Launch {
                            program: argv[0].clone(),
                            source: std::io::Error::other("stdin writer panicked"),
                        })
                    }
                }
            }
            Ok(output)
        })?;
        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    fn spawn_detached(&self, argv: &[String]) -> Result<()> {
        let mut cmd = Self::command(argv)?;
        cmd.stdin(Stdio::null());

        tracing::debug!(command = ?argv, "spawning detached");
        let child = cmd.spawn().map_err(|e| spawn_error(&argv[0], e))?;
        tracing::info!(pid = child.id(), program = %argv[0], "launched");
        Ok(())
    }
}

/// Show `message` as a desktop notification through `notify-send`.
///
/// Best effort: a missing `notify-send` or a failing daemon is ignored.
pub fn send_notification(message: &str) {
    let result = Command::new("notify-send")
        .arg("pdf-picker")
        .arg(message)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if let Err(e) = result {
        tracing::debug!(error = %e, "notify-send unavailable");
    }
}
