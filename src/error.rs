use crate::core::{ProcessId, Ticks};
use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    // Fatal; the process table is left in its last-mutated state.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("schedule incomplete: process {0} has no completion time")]
    IncompleteSchedule(ProcessId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON workload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("process list is empty")]
    Empty,

    #[error("process {id} has non-positive burst time {burst}")]
    NonPositiveBurst { id: ProcessId, burst: i64 },

    #[error("process {id} has negative arrival time {arrival}")]
    NegativeArrival { id: ProcessId, arrival: i64 },

    #[error("duplicate process id {0}")]
    DuplicateId(ProcessId),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("quantum requested over an empty remaining-time set")]
    EmptyRemainingSet,

    #[error("remaining-time set contains a zero entry (position {0})")]
    ZeroRemaining(usize),

    #[error("quantum mode '{0}' is not one of arithmetic, geometric, harmonic")]
    UnknownMode(String),

    #[error("mean evaluated to a non-finite value over {0:?}")]
    NonFinite(Vec<Ticks>),
}

impl SimError {
    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
