//! Report rendering.
//!
//! The text report is 13 fixed lines in fixed order, each an aligned label
//! followed by its value(s), each optionally preceded by a caller-supplied
//! prefix. The layout deliberately mirrors the classic rusage listing so the
//! output stays diffable against OS tools, and downstream scripts may parse
//! it by label; treat it as a stable interface.
//!
//! ```text
//! Wall time (secs):        0.012
//! CPU time (secs):         user=0.002; system=0.004
//! Max resident set size:   1834
//! ...
//! Context switches:        voluntary=2; involuntary=0
//! ```

use std::io::Write;

use serde::Serialize;

use crate::session::Measurement;
use crate::usage::UsageSnapshot;

/// Write the labeled 13-line report, one line per item.
///
/// `prefix` is prepended verbatim to every line; pass `""` for none. Output
/// depends only on `measurement` and `prefix`, so repeated calls with the
/// same inputs produce byte-identical text.
pub fn write_report(
    w: &mut impl Write,
    prefix: &str,
    measurement: &Measurement,
) -> std::io::Result<()> {
    let ru = &measurement.usage;
    writeln!(
        w,
        "{prefix}Wall time (secs):        {:.3}",
        measurement.elapsed.as_secs_f64()
    )?;
    writeln!(
        w,
        "{prefix}CPU time (secs):         user={:.3}; system={:.3}",
        ru.user_secs_f64(),
        ru.system_secs_f64()
    )?;
    writeln!(w, "{prefix}Max resident set size:   {}", ru.max_rss)?;
    writeln!(w, "{prefix}Integral shared memory:  {}", ru.shared_integral)?;
    writeln!(w, "{prefix}Integral unshared data:  {}", ru.unshared_data_integral)?;
    writeln!(w, "{prefix}Integral unshared stack: {}", ru.unshared_stack_integral)?;
    writeln!(w, "{prefix}Page reclaims:           {}", ru.minor_page_faults)?;
    writeln!(w, "{prefix}Page faults:             {}", ru.major_page_faults)?;
    writeln!(w, "{prefix}Swaps:                   {}", ru.swaps)?;
    writeln!(
        w,
        "{prefix}Block I/Os:              input={}; output={}",
        ru.block_reads, ru.block_writes
    )?;
    writeln!(w, "{prefix}Signals received:        {}", ru.signals_received)?;
    writeln!(
        w,
        "{prefix}IPC messages:            sent={}; received={}",
        ru.ipc_messages_sent, ru.ipc_messages_received
    )?;
    writeln!(
        w,
        "{prefix}Context switches:        voluntary={}; involuntary={}",
        ru.voluntary_context_switches, ru.involuntary_context_switches
    )?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(rename = "wall time")]
    wall_secs: f64,
    #[serde(rename = "user time")]
    user_secs: f64,
    #[serde(rename = "system time")]
    system_secs: f64,
    #[serde(flatten)]
    usage: &'a UsageSnapshot,
}

/// Write the measurement as a pretty-printed JSON object.
pub fn write_json(w: &mut impl Write, measurement: &Measurement) -> std::io::Result<()> {
    let report = JsonReport {
        wall_secs: measurement.elapsed.as_secs_f64(),
        user_secs: measurement.usage.user_secs_f64(),
        system_secs: measurement.usage.system_secs_f64(),
        usage: &measurement.usage,
    };
    serde_json::to_writer_pretty(&mut *w, &report)?;
    writeln!(w)?;
    Ok(())
}
