use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A workspace member as reported by the transport
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Known people in the workspace, with bot accounts filtered out.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    names: HashSet<String>,
    by_id: HashMap<String, String>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a member list, dropping anyone whose name is in `excluded`
    pub fn from_members<I>(members: I, excluded: &[String]) -> Self
    where
        I: IntoIterator<Item = Member>,
    {
        let mut directory = Self::new();
        for member in members {
            if excluded.iter().any(|e| e == &member.name) {
                continue;
            }
            directory.names.insert(member.name.clone());
            directory.by_id.insert(member.id, member.name);
        }
        directory
    }

    /// Exact, case-sensitive name check
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn display_name(&self, user_id: &str) -> Option<&str> {
        self.by_id.get(user_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_members_are_dropped() {
        let members = vec![
            Member::new("U1", "carol"),
            Member::new("U2", "slackbot"),
            Member::new("U3", "bob"),
        ];
        let directory = UserDirectory::from_members(members, &["slackbot".to_string()]);

        assert_eq!(directory.len(), 2);
        assert!(directory.contains("carol"));
        assert!(!directory.contains("slackbot"));
        assert!(!directory.contains("Carol"));
        assert_eq!(directory.display_name("U3"), Some("bob"));
        assert_eq!(directory.display_name("U2"), None);
    }
}
