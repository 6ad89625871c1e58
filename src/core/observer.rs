use rustc_hash::FxHashSet;

use super::state::{ProcessState, SimCtx, Ticks};
use crate::error::{SimError, SimResult};

/// Checks the run's structural invariants after every scheduling step.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    last_now: Ticks,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, ctx: &SimCtx) -> SimResult<()> {
        self.step += 1;

        if ctx.now < self.last_now {
            return Err(SimError::invariant(format!(
                "clock moved backwards from {} to {} at step {}",
                self.last_now, ctx.now, self.step
            )));
        }
        self.last_now = ctx.now;

        let mut seen = FxHashSet::default();
        for &slot in &ctx.ready {
            if !seen.insert(slot) {
                return Err(SimError::invariant(format!(
                    "slot {slot} appears twice in the ready queue"
                )));
            }
            let p = ctx.table.process(slot);
            if p.state != ProcessState::Ready {
                return Err(SimError::invariant(format!(
                    "process {} queued in state {:?}",
                    p.id, p.state
                )));
            }
            if p.arrival_time > ctx.now {
                return Err(SimError::invariant(format!(
                    "process {} queued before its arrival at {}",
                    p.id, p.arrival_time
                )));
            }
        }

        for p in ctx.table.iter() {
            if p.remaining_time > p.burst_time {
                return Err(SimError::invariant(format!(
                    "process {} has {} remaining of a {} burst",
                    p.id, p.remaining_time, p.burst_time
                )));
            }
            match (p.remaining_time, p.completion_time) {
                (0, None) => {
                    return Err(SimError::invariant(format!(
                        "process {} exhausted without a completion time",
                        p.id
                    )));
                }
                (r, Some(_)) if r > 0 => {
                    return Err(SimError::invariant(format!(
                        "process {} completed with {r} remaining",
                        p.id
                    )));
                }
                _ => {}
            }
        }

        let finished = ctx.table.iter().filter(|p| p.is_completed()).count();
        if finished + ctx.unfinished() != ctx.table.len() {
            return Err(SimError::invariant(format!(
                "{finished} finished + {} unfinished != {} processes",
                ctx.unfinished(),
                ctx.table.len()
            )));
        }

        Ok(())
    }
}
