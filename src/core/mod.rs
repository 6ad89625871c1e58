pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::{SimEvent, SliceRecord};
pub use state::{ArrivalKey, Process, ProcessId, ProcessState, ProcessTable, SimCtx, Slot, Ticks};
