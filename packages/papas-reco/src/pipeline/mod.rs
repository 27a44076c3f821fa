//! Pipeline: event input, per-event state and batch execution

mod batch;
mod event;
mod input;

pub use batch::{load_config, reconstruct_events, EventResult};
pub use event::PapasEvent;
pub use input::{BlockInput, EdgeInput, EventInput};
