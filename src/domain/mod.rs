//! Domain layer - Core business objects with no infrastructure dependencies
//! 
//! This layer contains:
//! - Entities: Chat events, parsed commands, quotes, the user directory
//! - Traits: Abstractions for infrastructure (Bot transport, QuoteStore)

pub mod entities;
pub mod traits;
