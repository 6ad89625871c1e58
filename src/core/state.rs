use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use tracing::trace;

use crate::error::{InputError, SimError, SimResult};

pub type ProcessId = u64;
pub type Ticks = u64;
// Index into the process table Vec
pub type Slot = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    // Declared but not yet arrived
    Pending,
    Ready,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Process {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining_time: Ticks,
    pub admitted_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub state: ProcessState,
}

impl Process {
    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    processes: Vec<Process>,
    by_id: FxHashMap<ProcessId, Slot>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    // Signed so that malformed input is reported rather than wrapped
    pub fn insert(&mut self, id: ProcessId, arrival_time: i64, burst_time: i64) -> SimResult<Slot> {
        if burst_time <= 0 {
            return Err(InputError::NonPositiveBurst {
                id,
                burst: burst_time,
            }
            .into());
        }
        if arrival_time < 0 {
            return Err(InputError::NegativeArrival {
                id,
                arrival: arrival_time,
            }
            .into());
        }
        if self.by_id.contains_key(&id) {
            return Err(InputError::DuplicateId(id).into());
        }

        let slot = self.processes.len();
        self.processes.push(Process {
            id,
            arrival_time: arrival_time as Ticks,
            burst_time: burst_time as Ticks,
            remaining_time: burst_time as Ticks,
            admitted_time: None,
            completion_time: None,
            state: ProcessState::Pending,
        });
        self.by_id.insert(id, slot);

        Ok(slot)
    }

    pub fn get(&self, id: ProcessId) -> Option<&Process> {
        self.by_id.get(&id).map(|&slot| &self.processes[slot])
    }

    pub fn process(&self, slot: Slot) -> &Process {
        &self.processes[slot]
    }

    pub(crate) fn process_mut(&mut self, slot: Slot) -> &mut Process {
        &mut self.processes[slot]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Processes that have arrived by `tick` and are not yet finished.
    pub fn eligible_at(&self, tick: Ticks) -> impl Iterator<Item = &Process> {
        self.processes
            .iter()
            .filter(move |p| p.arrival_time <= tick && !p.is_completed())
    }

    pub(crate) fn reset(&mut self) {
        for p in &mut self.processes {
            p.remaining_time = p.burst_time;
            p.admitted_time = None;
            p.completion_time = None;
            p.state = ProcessState::Pending;
        }
    }
}

// KeyedPriorityQueue is a max-heap, so flip the (arrival, id) ordering
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct ArrivalKey(pub Ticks, pub ProcessId);

impl PartialOrd for ArrivalKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ArrivalKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.0, other.1).cmp(&(self.0, self.1))
    }
}

#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub table: ProcessTable,
    pub ready: VecDeque<Slot>,
    pub running: Option<Slot>,
    pending: KeyedPriorityQueue<Slot, ArrivalKey>,
    unfinished: usize,
}

impl SimCtx {
    pub fn new(table: ProcessTable) -> Self {
        let mut ctx = Self {
            now: 0,
            unfinished: table.len(),
            table,
            ready: VecDeque::new(),
            running: None,
            pending: KeyedPriorityQueue::new(),
        };
        ctx.fill_pending();
        ctx
    }

    fn fill_pending(&mut self) {
        for (slot, p) in self.table.processes.iter().enumerate() {
            self.pending.push(slot, ArrivalKey(p.arrival_time, p.id));
        }
    }

    pub fn reset(&mut self) {
        self.now = 0;
        self.table.reset();
        self.ready.clear();
        self.running = None;
        self.pending = KeyedPriorityQueue::new();
        self.unfinished = self.table.len();
        self.fill_pending();
    }

    pub fn advance_time(&mut self, delta: Ticks) -> SimResult<()> {
        self.now = self.now.checked_add(delta).ok_or_else(|| {
            SimError::invariant(format!("clock overflow advancing {} by {delta}", self.now))
        })?;
        Ok(())
    }

    pub fn advance_to(&mut self, tick: Ticks) {
        debug_assert!(tick >= self.now, "clock must not run backwards");
        self.now = tick;
    }

    pub fn admit_arrivals(&mut self) -> Vec<Slot> {
        let mut admitted = Vec::new();
        while let Some((_, key)) = self.pending.peek() {
            if key.0 > self.now {
                break;
            }
            let Some((slot, _)) = self.pending.pop() else {
                break;
            };

            let now = self.now;
            let p = self.table.process_mut(slot);
            p.state = ProcessState::Ready;
            p.admitted_time = Some(now);
            trace!(pid = p.id, tick = now, "admitted");

            self.ready.push_back(slot);
            admitted.push(slot);
        }
        admitted
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.pending.peek().map(|(_, key)| key.0)
    }

    pub fn pop_ready(&mut self) -> Option<Slot> {
        let slot = self.ready.pop_front()?;
        debug_assert!(self.running.is_none(), "CPU already running a process");

        self.running = Some(slot);
        self.table.process_mut(slot).state = ProcessState::Running;
        Some(slot)
    }

    // Running process first, then the ready queue in order
    pub fn eligible_remaining(&self) -> Vec<Ticks> {
        self.running
            .iter()
            .chain(self.ready.iter())
            .map(|&slot| self.table.process(slot).remaining_time)
            .collect()
    }

    pub fn consume(&mut self, slot: Slot, slice: Ticks) -> SimResult<Ticks> {
        if self.running != Some(slot) {
            return Err(SimError::invariant(format!(
                "slot {slot} charged while not running"
            )));
        }
        let p = self.table.process_mut(slot);
        if slice == 0 || slice > p.remaining_time {
            return Err(SimError::invariant(format!(
                "process {} charged {slice} ticks with {} remaining",
                p.id, p.remaining_time
            )));
        }
        p.remaining_time -= slice;
        Ok(p.remaining_time)
    }

    pub fn requeue(&mut self, slot: Slot) {
        debug_assert!(
            !self.ready.contains(&slot),
            "slot {slot} already present in ready queue"
        );
        self.running = None;
        self.table.process_mut(slot).state = ProcessState::Ready;
        self.ready.push_back(slot);
    }

    pub fn mark_completed(&mut self, slot: Slot, completion_time: Ticks) -> SimResult<()> {
        let p = self.table.process_mut(slot);
        if p.remaining_time != 0 || p.completion_time.is_some() {
            return Err(SimError::invariant(format!(
                "process {} completed with {} remaining (completion {:?})",
                p.id, p.remaining_time, p.completion_time
            )));
        }

        p.state = ProcessState::Completed;
        p.completion_time = Some(completion_time);
        self.running = None;
        self.unfinished -= 1;
        Ok(())
    }

    pub fn unfinished(&self) -> usize {
        self.unfinished
    }

    pub fn is_finished(&self) -> bool {
        self.unfinished == 0 && self.ready.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(ProcessId, i64, i64)]) -> ProcessTable {
        let mut t = ProcessTable::new();
        for &(id, arrival, burst) in rows {
            t.insert(id, arrival, burst).unwrap();
        }
        t
    }

    #[test]
    fn insert_rejects_bad_rows() {
        let mut t = table(&[(1, 0, 4)]);
        assert!(matches!(
            t.insert(2, 0, 0),
            Err(SimError::InvalidInput(InputError::NonPositiveBurst { id: 2, burst: 0 }))
        ));
        assert!(matches!(
            t.insert(3, -1, 2),
            Err(SimError::InvalidInput(InputError::NegativeArrival { id: 3, .. }))
        ));
        assert!(matches!(
            t.insert(1, 2, 2),
            Err(SimError::InvalidInput(InputError::DuplicateId(1)))
        ));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn lookup_and_eligibility() {
        let t = table(&[(7, 0, 4), (3, 5, 2)]);
        assert_eq!(t.get(3).map(|p| p.burst_time), Some(2));
        assert!(t.get(99).is_none());
        assert_eq!(t.eligible_at(0).map(|p| p.id).collect::<Vec<_>>(), vec![7]);
        assert_eq!(t.eligible_at(5).count(), 2);
    }

    #[test]
    fn admission_orders_by_arrival_then_id() {
        let mut ctx = SimCtx::new(table(&[(9, 1, 2), (4, 1, 2), (1, 0, 2), (2, 3, 1)]));
        let ids = |ctx: &SimCtx, slots: Vec<Slot>| {
            slots
                .into_iter()
                .map(|s| ctx.table.process(s).id)
                .collect::<Vec<_>>()
        };

        let first = ctx.admit_arrivals();
        assert_eq!(ids(&ctx, first), vec![1]);

        ctx.advance_to(2);
        let second = ctx.admit_arrivals();
        assert_eq!(ids(&ctx, second), vec![4, 9]);
        assert_eq!(ctx.next_arrival(), Some(3));
    }

    #[test]
    fn consume_rejects_overrun() {
        let mut ctx = SimCtx::new(table(&[(1, 0, 2)]));
        ctx.admit_arrivals();
        let slot = ctx.pop_ready().unwrap();
        assert!(matches!(
            ctx.consume(slot, 3),
            Err(SimError::InvariantViolation(_))
        ));
        assert_eq!(ctx.consume(slot, 2).unwrap(), 0);
    }

    #[test]
    fn clock_overflow_is_an_invariant_violation() {
        let mut ctx = SimCtx::new(table(&[(1, 0, 1)]));
        ctx.advance_to(Ticks::MAX - 1);
        assert!(ctx.advance_time(1).is_ok());
        assert!(matches!(
            ctx.advance_time(1),
            Err(SimError::InvariantViolation(_))
        ));
        assert_eq!(ctx.now, Ticks::MAX);
    }
}
