use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest attributed name the quotes table accepts
pub const MAX_NAME_LEN: usize = 50;
/// Longest quote body the quotes table accepts
pub const MAX_TEXT_LEN: usize = 2000;

/// An attributed remark, owned by the quote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub name: String,
    pub text: String,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.text)
    }
}
