//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod event;
pub mod command;
pub mod quote;

pub use user::{Member, UserDirectory};
pub use event::{ChatEvent, EventKind};
pub use command::{CommandKind, ParsedCommand};
pub use quote::{Quote, MAX_NAME_LEN, MAX_TEXT_LEN};
