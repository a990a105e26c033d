//! One measurement bracket around one command invocation.
//!
//! A [`MeasurementSession`] captures the start timestamp when created and is
//! consumed exactly once by [`MeasurementSession::finish`], which snapshots
//! the children usage and stops the clock. The resulting [`Measurement`] is
//! what the reporter renders. Nothing here is shared or reused; one session
//! per tool invocation.

use crate::clock::{elapsed, Elapsed, Timestamp};
use crate::error::Result;
use crate::usage::{collect_children_usage, UsageSnapshot};

/// An in-progress measurement, holding only the start timestamp.
#[derive(Debug)]
pub struct MeasurementSession {
    start: Timestamp,
}

impl MeasurementSession {
    /// Start the clock.
    pub fn begin() -> Result<Self> {
        Ok(Self {
            start: Timestamp::now()?,
        })
    }

    /// End the measurement: snapshot children usage, then stop the clock.
    ///
    /// Must be called only after the measured child has been reaped, or the
    /// usage snapshot will not include it.
    pub fn finish(self) -> Result<Measurement> {
        let usage = collect_children_usage()?;
        let end = Timestamp::now()?;
        Ok(Measurement {
            elapsed: elapsed(self.start, end),
            usage,
        })
    }
}

/// A completed measurement, ready for reporting.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    pub elapsed: Elapsed,
    pub usage: UsageSnapshot,
}
