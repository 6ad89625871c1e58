use std::{
    fmt::Write as _,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use super::{driver::Outcome, metrics::Report};
use crate::core::SliceRecord;

pub const CSV_HEADER: &str =
    "pid,burst_time,arrival_time,admitted_time,terminated_time,waiting_time,turnaround_time";

pub fn write_csv<W: Write>(report: &Report, mut out: W) -> io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for m in report.processes.values() {
        let admitted = m.admitted_time.map(|t| t.to_string()).unwrap_or_default();
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            m.id,
            m.burst_time,
            m.arrival_time,
            admitted,
            m.completion_time,
            m.waiting_time,
            m.turnaround_time
        )?;
    }
    out.flush()
}

pub fn write_csv_file(report: &Report, path: &Path) -> io::Result<()> {
    write_csv(report, BufWriter::new(File::create(path)?))
}

pub fn render_report(report: &Report) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "{:>6} {:>8} {:>6} {:>10} {:>8} {:>10}",
        "pid", "arrival", "burst", "completion", "waiting", "turnaround"
    );
    for m in report.processes.values() {
        let _ = writeln!(
            s,
            "{:>6} {:>8} {:>6} {:>10} {:>8} {:>10}",
            m.id, m.arrival_time, m.burst_time, m.completion_time, m.waiting_time, m.turnaround_time
        );
    }
    let _ = writeln!(s, "Avg. waiting time    : {:.4}", report.avg_waiting_time);
    let _ = writeln!(s, "Avg. turnaround time : {:.4}", report.avg_turnaround_time);
    let _ = writeln!(s, "Throughput           : {:.4}", report.throughput);
    let _ = writeln!(s, "Context switches     : {}", report.context_switches);
    s
}

/// One line per slice: `[start..end) P<id>`.
pub fn render_schedule(schedule: &[SliceRecord]) -> String {
    schedule
        .iter()
        .map(|r| format!("[{}..{}) P{}\n", r.start_tick, r.end_tick, r.process_id))
        .collect()
}

pub fn render_comparison(outcomes: &[Outcome]) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "{:<11} {:>12} {:>15} {:>9} {:>10}",
        "mode", "avg waiting", "avg turnaround", "switches", "throughput"
    );
    for o in outcomes {
        let _ = writeln!(
            s,
            "{:<11} {:>12.4} {:>15.4} {:>9} {:>10.4}",
            o.mode.as_str(),
            o.report.avg_waiting_time,
            o.report.avg_turnaround_time,
            o.report.context_switches,
            o.report.throughput
        );
    }
    s
}
