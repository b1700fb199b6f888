//! Domain events module.
//!
//! Provides domain event types and the sink trait for emitting events
//! after completed domain mutations. Embedding hosts implement the sink
//! to translate domain events into their own refresh actions.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
