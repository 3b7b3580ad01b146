//! External command execution.
//!
//! Commands are always spawned directly from an argv vector. Nothing is
//! interpolated through a shell, so environment names and manifest paths
//! containing spaces or metacharacters reach the package manager unchanged.

use crate::error::{Result, SyncError};
use std::ffi::OsString;
use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Executable name or path.
    pub program: OsString,

    /// Arguments, passed verbatim.
    pub args: Vec<OsString>,
}

impl CommandLine {
    /// Create a command line with no arguments.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for command execution.
///
/// Both output streams are always captured.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,
}

impl CommandOptions {
    /// Options that run the command in `cwd`, or the inherited directory.
    pub fn captured(cwd: Option<PathBuf>) -> Self {
        Self { cwd }
    }
}

/// Output line from command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Callback for streaming output.
pub type OutputCallback<'a> = Box<dyn FnMut(OutputLine) + 'a>;

fn build(command: &CommandLine, options: &CommandOptions) -> Command {
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    cmd
}

fn spawn_error(command: &CommandLine, err: std::io::Error) -> SyncError {
    if err.kind() == std::io::ErrorKind::NotFound {
        SyncError::CommandNotFound {
            command: command.to_string(),
        }
    } else {
        SyncError::Io(err)
    }
}

/// Execute a command and wait for it to finish.
///
/// A non-zero exit is not an error here; callers decide via
/// [`CommandResult::success`]. Only a failure to spawn is an `Err`.
pub fn execute(command: &CommandLine, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    tracing::debug!("Executing: {}", command);

    let mut cmd = build(command, options);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd.output().map_err(|e| spawn_error(command, e))?;
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    tracing::debug!(
        "{} exited with {:?} after {:?}",
        command,
        output.status.code(),
        duration
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Execute a command, failing unless it exits with status 0.
///
/// Returns the captured stdout.
pub fn execute_checked(command: &CommandLine, options: &CommandOptions) -> Result<String> {
    let result = execute(command, options)?;
    if result.success {
        Ok(result.stdout)
    } else {
        Err(SyncError::CommandFailed {
            command: command.to_string(),
            code: result.exit_code,
            stderr: result.stderr,
        })
    }
}

/// Forward every line of `pipe` to `tx` until EOF and return the full text.
///
/// Lines are decoded lossily so invalid UTF-8 never stops the pipe from
/// being drained.
fn drain<R: Read>(
    pipe: R,
    tx: mpsc::Sender<OutputLine>,
    wrap: fn(String) -> OutputLine,
) -> String {
    let mut reader = BufReader::new(pipe);
    let mut output = String::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                let line = text.trim_end_matches(['\n', '\r']).to_string();
                output.push_str(&line);
                output.push('\n');
                let _ = tx.send(wrap(line));
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!("stopped reading command output: {}", e);
                break;
            }
        }
    }
    output
}

/// Execute a command with streaming output.
///
/// Each line is handed to `callback` as it arrives and is also collected
/// into the returned [`CommandResult`].
pub fn execute_streaming(
    command: &CommandLine,
    options: &CommandOptions,
    mut callback: OutputCallback<'_>,
) -> Result<CommandResult> {
    let start = Instant::now();
    tracing::debug!("Executing (streaming): {}", command);

    let mut cmd = build(command, options);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| spawn_error(command, e))?;

    let (stdout, stderr) = match (child.stdout.take(), child.stderr.take()) {
        (Some(out), Some(err)) => (out, err),
        _ => {
            let _ = child.kill();
            return Err(anyhow::anyhow!("failed to capture output of {}", command).into());
        }
    };

    let (tx, rx) = mpsc::channel();
    let tx_stdout = tx.clone();
    let tx_stderr = tx;

    let stdout_handle = thread::spawn(move || drain(stdout, tx_stdout, OutputLine::Stdout));
    let stderr_handle = thread::spawn(move || drain(stderr, tx_stderr, OutputLine::Stderr));

    for line in rx {
        callback(line);
    }

    let stdout_output = stdout_handle.join().unwrap_or_default();
    let stderr_output = stderr_handle.join().unwrap_or_default();

    let status = child.wait()?;
    let duration = start.elapsed();

    tracing::debug!(
        "{} exited with {:?} after {:?}",
        command,
        status.code(),
        duration
    );

    if status.success() {
        Ok(CommandResult::success(
            stdout_output,
            stderr_output,
            duration,
        ))
    } else {
        Ok(CommandResult::failure(
            status.code(),
            stdout_output,
            stderr_output,
            duration,
        ))
    }
}
