use serde::Serialize;

use crate::core::{ProcessId, Ticks};

/// One execution slice: the unit of the Schedule Record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SliceRecord {
    pub process_id: ProcessId,
    pub start_tick: Ticks,
    pub duration: Ticks,
    pub end_tick: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEvent {
    Slice {
        #[serde(flatten)]
        record: SliceRecord,
        quantum: Ticks,
        remaining: Ticks,
    },
    // CPU idle until the next arrival; never part of the Schedule Record
    Idle {
        from: Ticks,
        until: Ticks,
    },
    Preempted {
        process_id: ProcessId,
        tick: Ticks,
        remaining: Ticks,
    },
    Completed {
        process_id: ProcessId,
        tick: Ticks,
    },
}

impl SimEvent {
    pub fn slice(&self) -> Option<&SliceRecord> {
        match self {
            Self::Slice { record, .. } => Some(record),
            _ => None,
        }
    }
}
