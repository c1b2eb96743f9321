//! Message handling - From raw events to one reply per command

pub mod correlator;
pub mod dispatcher;
pub mod parser;

pub use correlator::{CorrelatedCommand, CorrelationState, EventCorrelator, TrackingMode};
pub use dispatcher::{CommandDispatcher, Reply, DEFAULT_RESPONSE};
pub use parser::CommandParser;
