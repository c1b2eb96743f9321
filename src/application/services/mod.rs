//! Application services - Business logic orchestration

pub mod quote_service;
pub mod message_service;

pub use quote_service::{NamePolicy, QuoteService};
pub use message_service::MessageService;
