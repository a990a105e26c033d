//! Blocking wait for true child termination.
//!
//! A child suspended by a job-control signal (SIGTSTP, SIGSTOP) is reported
//! by `waitpid` as stopped, not terminated. The loop here re-issues the wait
//! on anything that is not a terminal state, so the measurement spans the
//! child's whole lifetime including any stopped intervals. Only a normal
//! exit or a fatal signal ends the loop.

use std::fmt;

use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::error::{Error, Result};

/// Terminal status of the measured process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDisposition {
    /// Normal exit with the given code.
    Exited(i32),
    /// Killed by a signal.
    Signaled { signal: Signal, core_dumped: bool },
    /// The launch mechanism itself failed; nothing ran, nothing to measure.
    LaunchFailed,
}

impl ExitDisposition {
    pub fn success(&self) -> bool {
        matches!(self, ExitDisposition::Exited(0))
    }
}

impl fmt::Display for ExitDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitDisposition::Exited(code) => write!(f, "exited with status {code}"),
            ExitDisposition::Signaled {
                signal,
                core_dumped: true,
            } => write!(f, "killed by {signal} (core dumped)"),
            ExitDisposition::Signaled { signal, .. } => write!(f, "killed by {signal}"),
            ExitDisposition::LaunchFailed => write!(f, "could not be launched"),
        }
    }
}

/// Block until `pid` has fully terminated.
///
/// Stopped and continued states re-enter the wait. A wait-level error is the
/// infrastructure's failure, not the child's, and is fatal to the run.
pub fn wait_for_termination(pid: Pid) -> Result<ExitDisposition> {
    let flags = WaitPidFlag::WUNTRACED | WaitPidFlag::WCONTINUED;
    loop {
        match waitpid(pid, Some(flags)).map_err(Error::Wait)? {
            WaitStatus::Exited(_, code) => return Ok(ExitDisposition::Exited(code)),
            WaitStatus::Signaled(_, signal, core_dumped) => {
                return Ok(ExitDisposition::Signaled {
                    signal,
                    core_dumped,
                })
            }
            status @ (WaitStatus::Stopped(..) | WaitStatus::Continued(..)) => {
                tracing::debug!(?status, "child not yet terminated, waiting again");
            }
            status => {
                tracing::debug!(?status, "non-terminal wait status, waiting again");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::{CommandSpec, DirectLauncher, Launched, Launcher};

    fn spawn(spec: CommandSpec) -> Pid {
        match DirectLauncher::new().launch(&spec).unwrap() {
            Launched::Handle(h) => h.pid(),
            Launched::Combined(_) => unreachable!("direct launcher returns a handle"),
        }
    }

    #[test]
    fn reports_normal_exit() {
        let pid = spawn(CommandSpec::direct("/bin/sh", ["-c", "exit 42"]));
        assert_eq!(wait_for_termination(pid).unwrap(), ExitDisposition::Exited(42));
    }

    #[test]
    fn reports_fatal_signal() {
        let pid = spawn(CommandSpec::direct("/bin/sh", ["-c", "kill -KILL $$"]));
        let disposition = wait_for_termination(pid).unwrap();
        assert_eq!(
            disposition,
            ExitDisposition::Signaled {
                signal: Signal::SIGKILL,
                core_dumped: false,
            }
        );
        assert!(!disposition.success());
    }

    #[test]
    fn survives_a_stop_resume_cycle() {
        // The child stops itself; a true termination must still be the only
        // thing that ends the wait.
        let pid = spawn(CommandSpec::direct(
            "/bin/sh",
            ["-c", "kill -STOP $$; exit 7"],
        ));
        nix::sys::signal::kill(pid, Signal::SIGCONT).ok();
        // Racy resume: keep nudging until the child is gone.
        let waiter = std::thread::spawn(move || wait_for_termination(pid));
        while !waiter.is_finished() {
            nix::sys::signal::kill(pid, Signal::SIGCONT).ok();
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert_eq!(waiter.join().unwrap().unwrap(), ExitDisposition::Exited(7));
    }

    #[test]
    fn display_is_stable() {
        assert_eq!(ExitDisposition::Exited(3).to_string(), "exited with status 3");
        assert_eq!(
            ExitDisposition::Signaled {
                signal: Signal::SIGTERM,
                core_dumped: false
            }
            .to_string(),
            "killed by SIGTERM"
        );
        assert_eq!(
            ExitDisposition::LaunchFailed.to_string(),
            "could not be launched"
        );
    }
}
