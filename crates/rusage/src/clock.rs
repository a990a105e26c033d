//! Wall-clock timestamps with microsecond resolution.
//!
//! The measurement brackets the child's lifetime with two [`Timestamp`]
//! captures and subtracts them field-wise. Keeping explicit second and
//! microsecond fields (instead of `std::time::Instant`) matches the report,
//! which prints wall time as fractional seconds at millisecond precision.

use nix::time::{clock_gettime, ClockId};

use crate::error::{Error, Result};

pub const MICROS_PER_SEC: i64 = 1_000_000;

/// A point in wall-clock time. Immutable once captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    secs: i64,
    /// Always in `[0, 1_000_000)`.
    micros: i64,
}

impl Timestamp {
    /// Capture the current wall-clock time.
    pub fn now() -> Result<Self> {
        let ts = clock_gettime(ClockId::CLOCK_REALTIME).map_err(Error::Clock)?;
        Ok(Self {
            secs: ts.tv_sec(),
            micros: ts.tv_nsec() / 1000,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(secs: i64, micros: i64) -> Self {
        Self { secs, micros }
    }
}

/// Elapsed wall time as a normalized (seconds, microseconds) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    pub secs: i64,
    /// Always in `[0, 1_000_000)`.
    pub micros: i64,
}

impl Elapsed {
    pub fn as_secs_f64(&self) -> f64 {
        self.secs as f64 + self.micros as f64 / MICROS_PER_SEC as f64
    }
}

/// Compute `end - start` field-wise.
///
/// When `end`'s microsecond field is smaller than `start`'s, one second is
/// borrowed into the microsecond difference so the result stays normalized.
/// Undefined for `end < start`; the driver only ever passes ordered pairs.
pub fn elapsed(start: Timestamp, end: Timestamp) -> Elapsed {
    let mut secs = end.secs - start.secs;
    let mut micros = end.micros;
    if micros < start.micros {
        micros += MICROS_PER_SEC;
        secs -= 1;
    }
    Elapsed {
        secs,
        micros: micros - start.micros,
    }
}
