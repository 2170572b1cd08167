//! Output sink that optionally pipes through a pager.

use std::io::{self, IsTerminal, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

use tracing::{debug, warn};

use crate::config::is_test_env;

/// Pager used when `PAGER` is unset.
const DEFAULT_PAGER: &str = "less";

/// Options for `less`: quit if one screen, raw control chars, no init.
const LESS_OPTIONS: &str = "FSRX";

/// Where result lines are written.
pub enum OutputSink {
    /// Straight to standard output.
    Direct(io::Stdout),
    /// Into the stdin of a pager process.
    Paged(PagerProcess),
}

impl OutputSink {
    /// Write directly to standard output.
    #[must_use]
    pub fn direct() -> Self {
        Self::Direct(io::stdout())
    }

    /// Pick a sink for this process.
    ///
    /// Pages only on Unix, outside the test environment, and when stdout
    /// is a terminal. Falls back to direct output if no pager starts.
    #[must_use]
    pub fn detect() -> Self {
        if !should_page(io::stdout().is_terminal(), is_test_env()) {
            return Self::direct();
        }

        let command = pager_command();
        match Self::pager(&command) {
            Ok(sink) => sink,
            Err(e) => {
                warn!(pager = %command, error = %e, "Could not start pager, writing directly");
                Self::direct()
            }
        }
    }

    /// Spawn `command` as a pager.
    ///
    /// The command is run as a program first and through `sh -c` if that
    /// fails, so values like `less -R` work.
    pub fn pager(command: &str) -> io::Result<Self> {
        PagerProcess::spawn(command).map(Self::Paged)
    }

    /// Whether output goes through a pager.
    #[must_use]
    pub fn is_paged(&self) -> bool {
        matches!(self, Self::Paged(_))
    }

    /// Flush, close the pager's input and wait for it to exit.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Self::Direct(mut stdout) => stdout.flush(),
            Self::Paged(mut pager) => pager.close(),
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Direct(stdout) => stdout.write(buf),
            Self::Paged(pager) => pager.stdin()?.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Direct(stdout) => stdout.flush(),
            Self::Paged(pager) => pager.stdin()?.flush(),
        }
    }
}

/// A running pager fed through a pipe.
///
/// Dropping it closes the pipe and waits for the pager to exit.
pub struct PagerProcess {
    child: Child,
    stdin: Option<ChildStdin>,
}

impl PagerProcess {
    fn spawn(command: &str) -> io::Result<Self> {
        let mut child = match Self::command(Command::new(command)).spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!(pager = %command, error = %e, "Retrying pager through sh");
                let mut shell = Command::new("/bin/sh");
                shell.arg("-c").arg(command);
                Self::command(shell).spawn()?
            }
        };
        let stdin = child.stdin.take();
        debug!(pager = %command, pid = child.id(), "Started pager");
        Ok(Self { child, stdin })
    }

    fn command(mut command: Command) -> Command {
        command.env("LESS", LESS_OPTIONS).stdin(Stdio::piped());
        command
    }

    fn stdin(&mut self) -> io::Result<&mut ChildStdin> {
        self.stdin
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "pager input closed"))
    }

    fn close(&mut self) -> io::Result<()> {
        let Some(mut stdin) = self.stdin.take() else {
            return Ok(());
        };
        let flushed = match stdin.flush() {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            other => other,
        };
        drop(stdin);
        let status = self.child.wait()?;
        debug!(%status, "Pager exited");
        flushed
    }
}

impl Drop for PagerProcess {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            debug!(error = %e, "Failed to close pager");
        }
    }
}

/// Pager program from `PAGER`, defaulting to `less`.
#[must_use]
pub fn pager_command() -> String {
    std::env::var("PAGER")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PAGER.to_string())
}

/// Decide whether to page given the environment.
#[must_use]
pub fn should_page(stdout_is_terminal: bool, test_env: bool) -> bool {
    cfg!(unix) && stdout_is_terminal && !test_env
}
