//! Process launchers.
//!
//! Two interchangeable launch strategies behind one trait, selected when the
//! driver is configured:
//!
//! - [`ShellLauncher`] hands the raw command string to `/bin/sh -c` and waits
//!   for the shell, yielding a single combined status the way `system()`
//!   does. The combined value conflates the command's exit code with shell
//!   failures; see [`Launched::Combined`].
//! - [`DirectLauncher`] spawns the executable from an explicit argv without
//!   any shell, so metacharacters are never interpreted. It returns a handle
//!   for the waiter to block on. By convention argv[0] is rewritten to the
//!   base name of the executable path.
//!
//! ## Example
//!
//! ```ignore
//! use rusage::{CommandSpec, DirectLauncher, Launcher};
//!
//! let spec = CommandSpec::direct("/bin/sleep", ["1"]);
//! let launched = DirectLauncher::new().launch(&spec)?;
//! ```

use std::ffi::{OsStr, OsString};
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::error::{Error, Result};

/// The command to measure. Immutable once built from CLI input.
#[derive(Debug, Clone)]
pub enum CommandSpec {
    /// A command line for the shell to interpret.
    Shell(String),
    /// An explicit executable plus argument vector, no shell involved.
    Direct {
        program: PathBuf,
        args: Vec<OsString>,
        /// `None` forwards the ambient environment unmodified.
        env: Option<Vec<(OsString, OsString)>>,
    },
}

impl CommandSpec {
    pub fn shell(cmd: impl Into<String>) -> Self {
        CommandSpec::Shell(cmd.into())
    }

    pub fn direct<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        CommandSpec::Direct {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: None,
        }
    }

    pub fn with_env(self, env: Vec<(OsString, OsString)>) -> Self {
        match self {
            CommandSpec::Direct { program, args, .. } => CommandSpec::Direct {
                program,
                args,
                env: Some(env),
            },
            shell => shell,
        }
    }

    /// Human-readable form for diagnostics.
    pub fn display(&self) -> String {
        match self {
            CommandSpec::Shell(cmd) => cmd.clone(),
            CommandSpec::Direct { program, args, .. } => {
                let mut s = program.display().to_string();
                for a in args {
                    s.push(' ');
                    s.push_str(&a.to_string_lossy());
                }
                s
            }
        }
    }
}

/// Outcome of a launch, before any measurement interpretation.
#[derive(Debug)]
pub enum Launched {
    /// Shell strategy: the shell already ran to completion. The value is the
    /// shell's exit code, which is the command's own exit code except for
    /// the ambiguous 127 sentinel.
    Combined(i32),
    /// Direct strategy: a live child for the waiter to block on.
    Handle(ChildHandle),
}

/// A spawned child awaiting termination.
#[derive(Debug)]
pub struct ChildHandle {
    child: Child,
}

impl ChildHandle {
    pub fn pid(&self) -> nix::unistd::Pid {
        nix::unistd::Pid::from_raw(self.child.id() as i32)
    }
}

/// Launch capability. Implementations are selected at configuration time,
/// one per deployment mode.
pub trait Launcher {
    fn launch(&self, spec: &CommandSpec) -> Result<Launched>;
}

/// Runs the command through `/bin/sh -c`, waiting for the shell in place.
#[derive(Debug, Default)]
pub struct ShellLauncher {
    quiet: bool,
}

impl ShellLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the command's stdout and stderr.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl Launcher for ShellLauncher {
    fn launch(&self, spec: &CommandSpec) -> Result<Launched> {
        let CommandSpec::Shell(cmdline) = spec else {
            return Err(Error::SpecMismatch);
        };
        let mut cmd = Command::new("/bin/sh");
        cmd.arg("-c").arg(cmdline);
        if self.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
        tracing::debug!(command = %cmdline, "launching via shell");
        let status = cmd.status().map_err(Error::ShellLaunch)?;
        // A shell killed by a signal has no exit code; fold it into the
        // combined value the way wait-status arithmetic does.
        let combined = status.code().unwrap_or_else(|| 128 + status.signal().unwrap_or(0));
        Ok(Launched::Combined(combined))
    }
}

/// Spawns the executable directly from its argument vector.
#[derive(Debug, Default)]
pub struct DirectLauncher {
    quiet: bool,
}

impl DirectLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the command's stdout and stderr.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl Launcher for DirectLauncher {
    fn launch(&self, spec: &CommandSpec) -> Result<Launched> {
        let CommandSpec::Direct { program, args, env } = spec else {
            return Err(Error::SpecMismatch);
        };
        let mut cmd = Command::new(program);
        cmd.arg0(arg_zero(program)).args(args);
        if let Some(env) = env {
            cmd.env_clear();
            cmd.envs(env.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str())));
        }
        if self.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
        tracing::debug!(program = %program.display(), args = args.len(), "spawning directly");
        let child = cmd.spawn().map_err(|source| Error::Launch {
            program: program.display().to_string(),
            source,
        })?;
        Ok(Launched::Handle(ChildHandle { child }))
    }
}

/// argv[0] for a direct spawn: the executable's base name, directory
/// components stripped.
fn arg_zero(program: &Path) -> &OsStr {
    program.file_name().unwrap_or_else(|| program.as_os_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arg_zero_strips_directories() {
        assert_eq!(arg_zero(Path::new("/usr/bin/sleep")), "sleep");
        assert_eq!(arg_zero(Path::new("sleep")), "sleep");
        assert_eq!(arg_zero(Path::new("./a/b/prog")), "prog");
    }

    #[test]
    fn spec_display_joins_args() {
        let spec = CommandSpec::direct("/bin/echo", ["a", "b"]);
        assert_eq!(spec.display(), "/bin/echo a b");
        let spec = CommandSpec::shell("echo a b");
        assert_eq!(spec.display(), "echo a b");
    }

    #[test]
    fn launchers_reject_mismatched_spec() {
        let shell_spec = CommandSpec::shell("true");
        let direct_spec = CommandSpec::direct("/bin/true", Vec::<String>::new());
        assert!(matches!(
            DirectLauncher::new().launch(&shell_spec),
            Err(Error::SpecMismatch)
        ));
        assert!(matches!(
            ShellLauncher::new().launch(&direct_spec),
            Err(Error::SpecMismatch)
        ));
    }

    #[test]
    fn with_env_only_applies_to_direct() {
        let env = vec![(OsString::from("K"), OsString::from("V"))];
        let spec = CommandSpec::direct("/bin/true", Vec::<String>::new()).with_env(env.clone());
        assert!(matches!(spec, CommandSpec::Direct { env: Some(_), .. }));
        let spec = CommandSpec::shell("true").with_env(env);
        assert!(matches!(spec, CommandSpec::Shell(_)));
    }
}
