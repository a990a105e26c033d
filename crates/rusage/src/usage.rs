//! Resource-usage snapshot for reaped children.
//!
//! A single `getrusage(RUSAGE_CHILDREN)` call, taken once after the measured
//! child has been waited on. The kernel folds a child's counters into the
//! parent's children-aggregate only at reap time, so calling earlier would
//! observe nothing. The counters are pass-through values from the host; the
//! only conversion applied anywhere is timeval to fractional seconds in the
//! report.

use nix::sys::resource::{getrusage, UsageWho};
use nix::sys::time::TimeValLike;
use serde::Serialize;

use crate::error::{Error, Result};

/// Aggregate counters for all terminated, reaped children of this process.
///
/// The serde names are the JSON report's key vocabulary; CPU times are
/// serialized by the report as fractional seconds instead of these raw
/// microsecond fields.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct UsageSnapshot {
    /// User-mode CPU time, microseconds.
    #[serde(skip)]
    pub user_time_us: i64,
    /// Kernel-mode CPU time, microseconds.
    #[serde(skip)]
    pub system_time_us: i64,
    /// Peak resident set size.
    #[serde(rename = "max rss")]
    pub max_rss: i64,
    /// Integral shared memory size.
    #[serde(rename = "integral shared memory")]
    pub shared_integral: i64,
    /// Integral unshared data size.
    #[serde(rename = "integral unshared data")]
    pub unshared_data_integral: i64,
    /// Integral unshared stack size.
    #[serde(rename = "integral unshared stack")]
    pub unshared_stack_integral: i64,
    /// Page reclaims (minor faults, serviced without I/O).
    #[serde(rename = "page reclaims")]
    pub minor_page_faults: i64,
    /// Page faults (major faults, required I/O).
    #[serde(rename = "page faults")]
    pub major_page_faults: i64,
    #[serde(rename = "swaps")]
    pub swaps: i64,
    #[serde(rename = "block reads")]
    pub block_reads: i64,
    #[serde(rename = "block writes")]
    pub block_writes: i64,
    #[serde(rename = "signals received")]
    pub signals_received: i64,
    #[serde(rename = "ipc sends")]
    pub ipc_messages_sent: i64,
    #[serde(rename = "ipc receives")]
    pub ipc_messages_received: i64,
    #[serde(rename = "voluntary context switches")]
    pub voluntary_context_switches: i64,
    #[serde(rename = "involuntary context switches")]
    pub involuntary_context_switches: i64,
}

impl UsageSnapshot {
    pub fn user_secs_f64(&self) -> f64 {
        self.user_time_us as f64 / 1e6
    }

    pub fn system_secs_f64(&self) -> f64 {
        self.system_time_us as f64 / 1e6
    }
}

/// Snapshot the children-aggregate resource counters.
///
/// Valid only after the children of interest have been reaped. A host error
/// here is fatal to the measurement; there is nothing sensible to report.
pub fn collect_children_usage() -> Result<UsageSnapshot> {
    let ru = getrusage(UsageWho::RUSAGE_CHILDREN).map_err(Error::Rusage)?;
    Ok(UsageSnapshot {
        user_time_us: ru.user_time().num_microseconds(),
        system_time_us: ru.system_time().num_microseconds(),
        max_rss: ru.max_rss(),
        shared_integral: ru.shared_integral(),
        unshared_data_integral: ru.unshared_data_integral(),
        unshared_stack_integral: ru.unshared_stack_integral(),
        minor_page_faults: ru.minor_page_faults(),
        major_page_faults: ru.major_page_faults(),
        swaps: ru.full_swaps(),
        block_reads: ru.block_reads(),
        block_writes: ru.block_writes(),
        signals_received: ru.signals(),
        ipc_messages_sent: ru.ipc_sends(),
        ipc_messages_received: ru.ipc_receives(),
        voluntary_context_switches: ru.voluntary_context_switches(),
        involuntary_context_switches: ru.involuntary_context_switches(),
    })
}
