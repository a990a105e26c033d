//! Error types for rusage.

use std::io;

use nix::errno::Errno;
use thiserror::Error;

use crate::wait::ExitDisposition;

/// Main error type for measurement operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Direct spawn: the process could not be started at all.
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Shell strategy: the shell itself could not be spawned.
    #[error("failed to launch shell: {0}")]
    ShellLaunch(#[source] io::Error),

    /// Shell strategy: combined status 127. By historical convention this
    /// means the shell could not execute the command, even though 127 is
    /// also a value the command itself could have exited with.
    #[error("shell could not execute the command")]
    ShellCouldNotExec,

    /// The wait operation failed, independent of the child's behavior.
    #[error("wait failed: {0}")]
    Wait(#[source] Errno),

    #[error("getrusage failed: {0}")]
    Rusage(#[source] Errno),

    #[error("clock_gettime failed: {0}")]
    Clock(#[source] Errno),

    /// A launcher was handed a command form it does not implement.
    #[error("launcher does not support this command form")]
    SpecMismatch,

    #[error("io: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit code the tool should terminate with for this error.
    ///
    /// 127 is reserved for launch/wait infrastructure failures; 255 mirrors
    /// the `-1` return of `system()` when the shell cannot be spawned.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Launch { .. } | Error::ShellCouldNotExec | Error::Wait(_) => 127,
            Error::ShellLaunch(_) => 255,
            Error::Rusage(_) | Error::Clock(_) | Error::SpecMismatch | Error::Io(_) => 1,
        }
    }

    /// The terminal disposition this error implies for the command, if any.
    ///
    /// Launch-mechanism failures mean the command never ran at all, so they
    /// carry the distinguished [`ExitDisposition::LaunchFailed`] sentinel
    /// rather than an exit code of their own.
    pub fn disposition(&self) -> Option<ExitDisposition> {
        match self {
            Error::Launch { .. } | Error::ShellLaunch(_) | Error::ShellCouldNotExec => {
                Some(ExitDisposition::LaunchFailed)
            }
            Error::Wait(_)
            | Error::Rusage(_)
            | Error::Clock(_)
            | Error::SpecMismatch
            | Error::Io(_) => None,
        }
    }
}

/// Result type for measurement operations.
pub type Result<T> = std::result::Result<T, Error>;
