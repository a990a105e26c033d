//! Measure the resource consumption of a single child process invocation.
//!
//! rusage runs one command, waits for it to terminate, and reports wall
//! time plus the OS resource-usage counters for reaped children: CPU time,
//! peak memory, page faults, block I/O, signals, IPC messages, and context
//! switches. It is a diagnostic wrapper, not a profiler; the numbers are
//! whatever the host kernel accounts for the terminated child.
//!
//! ## Example
//!
//! ```ignore
//! use rusage::{CommandSpec, DirectLauncher, Driver};
//!
//! let driver = Driver::new(Box::new(DirectLauncher::new()));
//! let (measurement, disposition) = driver.measure(&CommandSpec::direct("/bin/sleep", ["1"]))?;
//! rusage::write_report(&mut std::io::stderr().lock(), "", &measurement)?;
//! println!("child {disposition}");
//! ```
//!
//! The report goes to stderr only; stdout stays untouched for the measured
//! command's own output.

pub mod clock;
pub mod driver;
pub mod error;
pub mod launch;
pub mod report;
pub mod session;
pub mod usage;
pub mod wait;

pub use clock::{elapsed, Elapsed, Timestamp};
pub use driver::Driver;
pub use error::{Error, Result};
pub use launch::{ChildHandle, CommandSpec, DirectLauncher, Launched, Launcher, ShellLauncher};
pub use report::{write_json, write_report};
pub use session::{Measurement, MeasurementSession};
pub use usage::{collect_children_usage, UsageSnapshot};
pub use wait::{wait_for_termination, ExitDisposition};
