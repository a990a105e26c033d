//! Measurement driver.
//!
//! Sequences one invocation end to end: start clock → launch → wait →
//! snapshot usage → stop clock. Strictly sequential and blocking; the only
//! concurrency is the measured child itself running while the driver blocks
//! in the wait. Rendering is left to the caller so it can pick the text or
//! JSON reporter.

use crate::error::{Error, Result};
use crate::launch::{CommandSpec, Launched, Launcher};
use crate::session::{Measurement, MeasurementSession};
use crate::wait::{wait_for_termination, ExitDisposition};

/// Sentinel the shell uses for "could not execute the command". Ambiguous by
/// shell convention: a command may legitimately exit 127 too. Preserved
/// as-is for compatibility; the direct strategy has its own unambiguous
/// failure path instead.
const SHELL_EXEC_FAILURE: i32 = 127;

/// Driver over one configured launch strategy.
pub struct Driver {
    launcher: Box<dyn Launcher>,
}

impl Driver {
    pub fn new(launcher: Box<dyn Launcher>) -> Self {
        Self { launcher }
    }

    /// Run and measure one command.
    ///
    /// On success the measured program has terminated and been reaped, the
    /// usage snapshot covers it, and its terminal status is returned
    /// alongside the measurement. A launch or wait failure aborts with no
    /// measurement, since nothing meaningful ran.
    pub fn measure(&self, spec: &CommandSpec) -> Result<(Measurement, ExitDisposition)> {
        let session = MeasurementSession::begin()?;
        let disposition = match self.launcher.launch(spec)? {
            Launched::Combined(SHELL_EXEC_FAILURE) => return Err(Error::ShellCouldNotExec),
            Launched::Combined(code) => ExitDisposition::Exited(code),
            Launched::Handle(handle) => wait_for_termination(handle.pid())?,
        };
        let measurement = session.finish()?;
        tracing::debug!(%disposition, wall_secs = measurement.elapsed.as_secs_f64(), "measured");
        Ok((measurement, disposition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::{DirectLauncher, ShellLauncher};

    fn direct_driver() -> Driver {
        Driver::new(Box::new(DirectLauncher::new().quiet(true)))
    }

    #[test]
    fn shell_mode_treats_127_as_exec_failure() {
        let driver = Driver::new(Box::new(ShellLauncher::new().quiet(true)));
        let err = driver
            .measure(&CommandSpec::shell("exit 127"))
            .unwrap_err();
        assert!(matches!(err, Error::ShellCouldNotExec));
        assert_eq!(err.exit_code(), 127);
    }

    #[test]
    fn shell_mode_passes_other_codes_through() {
        let driver = Driver::new(Box::new(ShellLauncher::new().quiet(true)));
        let (_, disposition) = driver.measure(&CommandSpec::shell("exit 3")).unwrap();
        assert_eq!(disposition, ExitDisposition::Exited(3));
    }

    #[test]
    fn direct_mode_keeps_127_unambiguous() {
        // 127 from the program itself is just an exit code here; only spawn
        // failure is a launch failure.
        let (_, disposition) = direct_driver()
            .measure(&CommandSpec::direct("/bin/sh", ["-c", "exit 127"]))
            .unwrap();
        assert_eq!(disposition, ExitDisposition::Exited(127));
    }

    #[test]
    fn spawn_failure_yields_no_measurement() {
        let err = direct_driver()
            .measure(&CommandSpec::direct("/no/such/binary", Vec::<String>::new()))
            .unwrap_err();
        assert!(matches!(err, Error::Launch { .. }));
        assert_eq!(err.exit_code(), 127);
    }
}
