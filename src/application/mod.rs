//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Errors: Bot, command, storage and config errors
//! - Messaging: Command parsing, event correlation, dispatching
//! - Services: Quote operations and the polling loop

pub mod errors;
pub mod services;
pub mod messaging;
