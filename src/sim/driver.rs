use serde::Serialize;
use tracing::info;

use super::{
    job::{ProcessSpec, build_table},
    metrics::{Report, summarize},
};
use crate::{
    core::{ProcessTable, SimEvent, SliceRecord, driver::SchedCore},
    error::SimResult,
    scheduler::{QuantumMode, QuantumStrategy},
};

/// One simulation run over a fixed process set.
pub struct Sim<Q: QuantumStrategy> {
    pub core: SchedCore<Q>,
    schedule: Vec<SliceRecord>,
}

impl<Q: QuantumStrategy> Sim<Q> {
    pub fn new(specs: &[ProcessSpec], strategy: Q) -> SimResult<Self> {
        let table = build_table(specs)?;
        Ok(Self::with_table(table, strategy))
    }

    pub fn with_table(table: ProcessTable, strategy: Q) -> Self {
        Self {
            core: SchedCore::new(table, strategy),
            schedule: Vec::new(),
        }
    }

    pub fn step(&mut self) -> SimResult<Vec<SimEvent>> {
        let events = self.core.step()?;
        self.schedule
            .extend(events.iter().filter_map(SimEvent::slice).copied());
        Ok(events)
    }

    pub fn run(&mut self) -> SimResult<&[SliceRecord]> {
        while !self.all_processes_completed() {
            self.step()?;
        }
        info!(
            strategy = self.core.strategy.name(),
            processes = self.table().len(),
            slices = self.schedule.len(),
            makespan = self.core.now(),
            "simulation complete"
        );
        Ok(&self.schedule)
    }

    // Consumer controls pacing and may stop early
    pub fn events(&mut self) -> Events<'_, Q> {
        Events {
            sim: self,
            buffered: Vec::new(),
            failed: false,
        }
    }

    pub fn restart(&mut self) {
        self.core.reset();
        self.schedule.clear();
    }

    pub fn all_processes_completed(&self) -> bool {
        self.core.is_finished()
    }

    pub fn schedule(&self) -> &[SliceRecord] {
        &self.schedule
    }

    pub fn table(&self) -> &ProcessTable {
        &self.core.ctx.table
    }

    pub fn report(&self) -> SimResult<Report> {
        summarize(self.table(), &self.schedule)
    }
}

pub struct Events<'a, Q: QuantumStrategy> {
    sim: &'a mut Sim<Q>,
    // Reversed so pop() yields in emission order
    buffered: Vec<SimEvent>,
    failed: bool,
}

impl<Q: QuantumStrategy> Iterator for Events<'_, Q> {
    type Item = SimResult<SimEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.buffered.pop() {
                return Some(Ok(event));
            }
            if self.failed || self.sim.all_processes_completed() {
                return None;
            }
            match self.sim.step() {
                Ok(mut events) => {
                    events.reverse();
                    self.buffered = events;
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub mode: QuantumMode,
    pub schedule: Vec<SliceRecord>,
    pub report: Report,
}

pub fn compare(specs: &[ProcessSpec]) -> SimResult<Vec<Outcome>> {
    let table = build_table(specs)?;
    QuantumMode::ALL
        .iter()
        .map(|&mode| {
            let mut sim = Sim::with_table(table.clone(), mode);
            sim.run()?;
            Ok(Outcome {
                mode,
                schedule: sim.schedule().to_vec(),
                report: sim.report()?,
            })
        })
        .collect()
}
