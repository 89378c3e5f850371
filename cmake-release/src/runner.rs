//! External process execution
//!
//! Pipeline stages describe commands as [`Invocation`] values and hand them to
//! a [`ProcessRunner`]. [`SystemRunner`] spawns real processes; tests swap in
//! a recording fake.

use crate::error::{ReleaseError, Result};
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// A program, its arguments and the directory to run it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command
    }
}

/// Quote an argument the way a shell command line would need it
fn quote_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains([' ', '\t', '"']) {
        return arg.to_string();
    }
    format!("\"{}\"", arg.replace('"', "\\\""))
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote_arg(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", quote_arg(arg))?;
        }
        Ok(())
    }
}

/// Runs external commands; any non-zero exit is an error
pub trait ProcessRunner {
    /// Run to completion with inherited stdio
    fn run(&self, invocation: &Invocation) -> Result<()>;

    /// Run to completion and return stdout as text
    fn capture(&self, invocation: &Invocation) -> Result<String>;
}

/// [`ProcessRunner`] backed by `std::process::Command`
///
/// Prints each command line before running it so the last line of a failed
/// run names the failing command.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn announce(invocation: &Invocation) {
        println!("{}", invocation);
        let _ = io::stdout().flush();
        if let Some(cwd) = &invocation.cwd {
            debug!("  (in {})", cwd.display());
        }
    }

    fn spawn_error(invocation: &Invocation, source: io::Error) -> ReleaseError {
        ReleaseError::Spawn {
            program: invocation.program.display().to_string(),
            source,
        }
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        Self::announce(invocation);

        let status = invocation
            .command()
            .status()
            .map_err(|e| Self::spawn_error(invocation, e))?;

        if !status.success() {
            return Err(ReleaseError::CommandFailed {
                command: invocation.to_string(),
                status,
            });
        }
        Ok(())
    }

    fn capture(&self, invocation: &Invocation) -> Result<String> {
        Self::announce(invocation);

        let output = invocation
            .command()
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| Self::spawn_error(invocation, e))?;

        if !output.status.success() {
            return Err(ReleaseError::CommandFailed {
                command: invocation.to_string(),
                status: output.status,
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_whitespace() {
        let invocation = Invocation::new("/opt/my tools/cmake")
            .args(["-G", "Ninja", "-DCMAKE_C_FLAGS=", "-DFLAGS=-a -b"]);
        assert_eq!(
            invocation.to_string(),
            r#""/opt/my tools/cmake" -G Ninja -DCMAKE_C_FLAGS= "-DFLAGS=-a -b""#
        );
    }

    #[test]
    fn test_display_quotes_empty_and_quotes() {
        let invocation = Invocation::new("echo").arg("").arg(r#"say "hi""#);
        assert_eq!(invocation.to_string(), r#"echo "" "say \"hi\"""#);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_failure() {
        let result = SystemRunner.run(&Invocation::new("false"));
        match result {
            Err(ReleaseError::CommandFailed { command, status }) => {
                assert_eq!(command, "false");
                assert!(!status.success());
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_stdout() {
        let output = SystemRunner
            .capture(&Invocation::new("echo").arg("cmake version 3.18.1"))
            .unwrap();
        assert_eq!(output, "cmake version 3.18.1\n");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let result = SystemRunner.run(&Invocation::new("definitely-not-a-real-program-7f3a"));
        assert!(matches!(result, Err(ReleaseError::Spawn { .. })));
    }
}
