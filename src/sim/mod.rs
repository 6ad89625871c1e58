pub mod driver;
pub mod export;
pub mod job;
pub mod metrics;
pub mod workload;

pub use driver::{Events, Outcome, Sim, compare};
pub use job::{ProcessSpec, build_table};
pub use metrics::{ProcessMetrics, Report, compute_metrics};
