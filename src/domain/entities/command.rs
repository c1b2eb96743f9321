/// A command recognized in chat text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Command word as typed, without the prefix
    pub name: String,
    /// `None` when nothing follows the command word
    pub argument: Option<String>,
}

impl ParsedCommand {
    pub fn new(name: impl Into<String>, argument: Option<String>) -> Self {
        Self {
            name: name.into(),
            argument,
        }
    }

    pub fn kind(&self) -> CommandKind {
        CommandKind::from_name(&self.name)
    }

    /// Number of whitespace-separated tokens in the argument
    pub fn arg_count(&self) -> usize {
        self.argument
            .as_deref()
            .map(|a| a.split_whitespace().count())
            .unwrap_or(0)
    }
}

/// Commands the bot knows how to route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Quote,
    Lookup,
    Grab,
    Unknown(String),
}

/// Routing table, checked in order against the lowercased command word
const ROUTES: &[(&str, CommandKind)] = &[
    ("quote", CommandKind::Quote),
    ("lookup", CommandKind::Lookup),
    ("grab", CommandKind::Grab),
];

impl CommandKind {
    /// Route by prefix, so `quotes` and `grabit` still hit their commands
    pub fn from_name(name: &str) -> Self {
        let lowered = name.to_lowercase();
        ROUTES
            .iter()
            .find(|(prefix, _)| lowered.starts_with(prefix))
            .map(|(_, kind)| kind.clone())
            .unwrap_or(CommandKind::Unknown(lowered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_is_prefix_and_case_insensitive() {
        assert_eq!(CommandKind::from_name("quote"), CommandKind::Quote);
        assert_eq!(CommandKind::from_name("QUOTES"), CommandKind::Quote);
        assert_eq!(CommandKind::from_name("LookUp"), CommandKind::Lookup);
        assert_eq!(CommandKind::from_name("grabit"), CommandKind::Grab);
        assert_eq!(CommandKind::from_name("Help"), CommandKind::Unknown("help".to_string()));
        // Prefix must be at the start
        assert_eq!(CommandKind::from_name("requote"), CommandKind::Unknown("requote".to_string()));
    }

    #[test]
    fn test_arg_count() {
        assert_eq!(ParsedCommand::new("quote", None).arg_count(), 0);
        assert_eq!(ParsedCommand::new("quote", Some("Bob".into())).arg_count(), 1);
        assert_eq!(ParsedCommand::new("quote", Some(" Bob  said hi".into())).arg_count(), 3);
    }
}
