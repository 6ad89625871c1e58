use tracing::debug;

use super::{
    event::{SimEvent, SliceRecord},
    observer::Observer,
    state::{ProcessTable, SimCtx, Ticks},
};
use crate::{
    error::{SimError, SimResult},
    scheduler::QuantumStrategy,
};

/// The Round Robin loop over one process table.
pub struct SchedCore<Q: QuantumStrategy> {
    pub ctx: SimCtx,
    pub strategy: Q,
    observer: Observer,
}

impl<Q: QuantumStrategy> SchedCore<Q> {
    pub fn new(table: ProcessTable, strategy: Q) -> Self {
        Self {
            ctx: SimCtx::new(table),
            strategy,
            observer: Observer::new(),
        }
    }

    pub fn reset(&mut self) {
        self.ctx.reset();
        self.observer = Observer::new();
    }

    // Returns an empty Vec once finished
    pub fn step(&mut self) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        if self.ctx.is_finished() {
            return Ok(events);
        }

        self.ctx.admit_arrivals();

        if self.ctx.ready.is_empty() {
            // Nothing runnable yet; jump to the next arrival.
            let Some(next) = self.ctx.next_arrival() else {
                return Err(SimError::invariant(format!(
                    "{} unfinished processes but none queued or pending",
                    self.ctx.unfinished()
                )));
            };
            events.push(SimEvent::Idle {
                from: self.ctx.now,
                until: next,
            });
            self.ctx.advance_to(next);
            self.ctx.admit_arrivals();
        }

        let Some(slot) = self.ctx.pop_ready() else {
            return Err(SimError::invariant("ready queue empty after admission"));
        };

        let quantum = self.quantum()?;
        let (id, remaining_before) = {
            let p = self.ctx.table.process(slot);
            (p.id, p.remaining_time)
        };
        let slice = quantum.min(remaining_before);
        let start = self.ctx.now;

        let remaining = self.ctx.consume(slot, slice)?;
        self.ctx.advance_time(slice)?;
        let end = self.ctx.now;

        debug!(pid = id, start, slice, quantum, remaining, "slice");
        events.push(SimEvent::Slice {
            record: SliceRecord {
                process_id: id,
                start_tick: start,
                duration: slice,
                end_tick: end,
            },
            quantum,
            remaining,
        });

        if remaining == 0 {
            self.ctx.mark_completed(slot, end)?;
            events.push(SimEvent::Completed {
                process_id: id,
                tick: end,
            });
        } else {
            // Arrivals during the slice are queued ahead of the preempted process.
            self.ctx.admit_arrivals();
            self.ctx.requeue(slot);
            events.push(SimEvent::Preempted {
                process_id: id,
                tick: end,
                remaining,
            });
        }

        self.observer.observe(&self.ctx)?;
        Ok(events)
    }

    // Computed over the running process plus the ready queue, i.e. every
    // arrived, unfinished process at the current tick.
    fn quantum(&self) -> SimResult<Ticks> {
        let remaining = self.ctx.eligible_remaining();
        Ok(self.strategy.quantum(&remaining)?)
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn is_finished(&self) -> bool {
        self.ctx.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{ArithmeticMean, QuantumMode};

    fn core_for(rows: &[(u64, i64, i64)]) -> SchedCore<ArithmeticMean> {
        let mut table = ProcessTable::new();
        for &(id, arrival, burst) in rows {
            table.insert(id, arrival, burst).unwrap();
        }
        SchedCore::new(table, ArithmeticMean)
    }

    #[test]
    fn idle_gap_emits_marker_and_jumps_clock() {
        let mut core = core_for(&[(1, 4, 2)]);
        let events = core.step().unwrap();
        assert_eq!(events[0], SimEvent::Idle { from: 0, until: 4 });
        assert_eq!(
            events[1].slice().copied(),
            Some(SliceRecord {
                process_id: 1,
                start_tick: 4,
                duration: 2,
                end_tick: 6,
            })
        );
        assert!(core.is_finished());
        assert!(core.step().unwrap().is_empty());
    }

    #[test]
    fn arrivals_during_slice_queue_ahead_of_preempted() {
        // At t=0 eligible is {A:6, B:2} -> quantum 4, A runs 0..4 and C
        // arrives at 3, so the queue after requeue must be B, C, A.
        let mut core = core_for(&[(1, 0, 6), (2, 0, 2), (3, 3, 5)]);
        core.step().unwrap();
        let order: Vec<u64> = core
            .ctx
            .ready
            .iter()
            .map(|&s| core.ctx.table.process(s).id)
            .collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn works_with_runtime_selected_mode() {
        let mut table = ProcessTable::new();
        table.insert(1, 0, 2).unwrap();
        table.insert(2, 0, 8).unwrap();
        let mut core = SchedCore::new(table, QuantumMode::Harmonic);
        let events = core.step().unwrap();
        // harmonic mean of {2, 8} rounds to 3; P1 only needs 2
        assert_eq!(events[0].slice().map(|s| s.duration), Some(2));
    }
}
