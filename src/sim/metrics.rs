use average::{Estimate, Mean};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{
    core::{Process, ProcessId, ProcessTable, SliceRecord, Ticks},
    error::{SimError, SimResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub admitted_time: Option<Ticks>,
    pub completion_time: Ticks,
    pub waiting_time: Ticks,
    pub turnaround_time: Ticks,
}

impl ProcessMetrics {
    fn from_process(p: &Process) -> SimResult<Self> {
        let completion_time = p.completion_time.ok_or(SimError::IncompleteSchedule(p.id))?;
        let turnaround_time = completion_time.checked_sub(p.arrival_time).ok_or_else(|| {
            SimError::invariant(format!(
                "process {} completed at {completion_time} before arriving at {}",
                p.id, p.arrival_time
            ))
        })?;
        let waiting_time = turnaround_time.checked_sub(p.burst_time).ok_or_else(|| {
            SimError::invariant(format!(
                "process {} turnaround {turnaround_time} shorter than burst {}",
                p.id, p.burst_time
            ))
        })?;

        Ok(Self {
            id: p.id,
            arrival_time: p.arrival_time,
            burst_time: p.burst_time,
            admitted_time: p.admitted_time,
            completion_time,
            waiting_time,
            turnaround_time,
        })
    }
}

pub fn compute_metrics(table: &ProcessTable) -> SimResult<BTreeMap<ProcessId, ProcessMetrics>> {
    table
        .iter()
        .map(|p| ProcessMetrics::from_process(p).map(|m| (p.id, m)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub processes: BTreeMap<ProcessId, ProcessMetrics>,
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    /// Completed processes per tick between first arrival and last completion.
    pub throughput: f64,
    pub makespan: Ticks,
    pub context_switches: usize,
}

pub fn summarize(table: &ProcessTable, schedule: &[SliceRecord]) -> SimResult<Report> {
    let processes = compute_metrics(table)?;

    let avg_waiting_time = avg(processes.values().map(|m| m.waiting_time as f64));
    let avg_turnaround_time = avg(processes.values().map(|m| m.turnaround_time as f64));

    let first_arrival = processes.values().map(|m| m.arrival_time).min().unwrap_or(0);
    let last_completion = processes
        .values()
        .map(|m| m.completion_time)
        .max()
        .unwrap_or(0);
    let makespan = last_completion - first_arrival;
    let throughput = if makespan == 0 {
        0.0
    } else {
        processes.len() as f64 / makespan as f64
    };

    Ok(Report {
        processes,
        avg_waiting_time,
        avg_turnaround_time,
        throughput,
        makespan,
        context_switches: context_switches(schedule),
    })
}

pub fn context_switches(schedule: &[SliceRecord]) -> usize {
    schedule
        .windows(2)
        .filter(|w| w[0].process_id != w[1].process_id)
        .count()
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}
