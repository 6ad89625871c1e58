//! Round Robin CPU scheduling simulation with a dynamic time quantum
//! derived each cycle from the arithmetic, geometric or harmonic mean of
//! the eligible processes' remaining burst times.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod scheduler;
pub mod sim;

pub use crate::core::{ProcessId, SimEvent, SliceRecord, Ticks};
pub use error::{DomainError, InputError, SimError, SimResult};
pub use scheduler::{QuantumMode, QuantumStrategy, compute_quantum};
pub use sim::{ProcessSpec, Report, Sim, compare, compute_metrics};
