use std::sync::Arc;
use crate::domain::entities::{UserDirectory, MAX_NAME_LEN, MAX_TEXT_LEN};
use crate::domain::traits::QuoteStore;
use crate::application::errors::CommandError;

/// Policy for names that are not in the user directory when adding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePolicy {
    /// Store whatever the first token is
    #[default]
    Verbatim,
    /// Reject names the directory doesn't know
    RequireKnown,
}

/// Quote operations, each producing the text to send back
pub struct QuoteService {
    store: Arc<dyn QuoteStore>,
    name_policy: NamePolicy,
}

impl QuoteService {
    pub fn new(store: Arc<dyn QuoteStore>) -> Self {
        Self {
            store,
            name_policy: NamePolicy::default(),
        }
    }

    pub fn with_name_policy(mut self, policy: NamePolicy) -> Self {
        self.name_policy = policy;
        self
    }

    /// Add `"<name> <text>"` as a quote
    pub fn add_quote(&self, text: &str, users: &UserDirectory) -> Result<String, CommandError> {
        let (name, body) = split_name(text)
            .ok_or_else(|| CommandError::InvalidArgs("Usage: quote <name> <text>".to_string()))?;

        if self.name_policy == NamePolicy::RequireKnown && !users.contains(name) {
            return Err(CommandError::UnknownUser(name.to_string()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(CommandError::InvalidArgs(format!(
                "Names can be at most {} characters.", MAX_NAME_LEN
            )));
        }
        if body.chars().count() > MAX_TEXT_LEN {
            return Err(CommandError::InvalidArgs(format!(
                "Quotes can be at most {} characters.", MAX_TEXT_LEN
            )));
        }

        let quote = self.store.insert(name, body)?;
        tracing::info!("Stored quote #{} for {}", quote.id, quote.name);
        Ok(format!("Quote added: {}", quote))
    }

    /// Random quote, restricted to one person when an argument is given
    pub fn get_quote(&self, argument: Option<&str>, users: &UserDirectory) -> Result<String, CommandError> {
        match argument.map(str::trim) {
            None | Some("") => Ok(self
                .store
                .random()?
                .map(|q| q.to_string())
                .unwrap_or_else(|| "No quotes found.".to_string())),
            Some(name) if users.contains(name) => self.random_for(name),
            Some(name) => Err(CommandError::UnknownUser(name.to_string())),
        }
    }

    /// Random quote for exactly one named person.
    ///
    /// Verbatim-stored names are looked up even when the directory doesn't know them.
    pub fn get_quote_by_lookup(&self, argument: &str, users: &UserDirectory) -> Result<String, CommandError> {
        let mut tokens = argument.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(name), None) if self.name_policy == NamePolicy::RequireKnown && !users.contains(name) => {
                Err(CommandError::UnknownUser(name.to_string()))
            }
            (Some(name), None) => self.random_for(name),
            (None, _) => Err(CommandError::InvalidArgs("Who should I look up?".to_string())),
            (Some(_), Some(_)) => Err(CommandError::InvalidArgs("Too many arguments provided".to_string())),
        }
    }

    fn random_for(&self, name: &str) -> Result<String, CommandError> {
        Ok(self
            .store
            .random_by_name(name)?
            .map(|q| q.to_string())
            .unwrap_or_else(|| format!("No quotes found for {}.", name)))
    }
}

/// Split off the first whitespace-delimited token, keeping the rest's inner spacing
fn split_name(text: &str) -> Option<(&str, &str)> {
    let text = text.trim();
    let (name, rest) = text.split_once(char::is_whitespace)?;
    let rest = rest.trim_start();
    if name.is_empty() || rest.is_empty() {
        return None;
    }
    Some((name, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Member;
    use crate::infrastructure::database::SqliteQuoteStore;

    fn service() -> QuoteService {
        QuoteService::new(Arc::new(SqliteQuoteStore::open_in_memory().unwrap()))
    }

    fn users() -> UserDirectory {
        UserDirectory::from_members(
            vec![Member::new("U1", "Alice"), Member::new("U2", "Bob")],
            &[],
        )
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("Alice said  hi"), Some(("Alice", "said  hi")));
        assert_eq!(split_name("  Alice   said hi "), Some(("Alice", "said hi")));
        assert_eq!(split_name("Alice"), None);
        assert_eq!(split_name(""), None);
    }

    #[test]
    fn test_add_then_lookup_round_trip() {
        let service = service();
        let users = users();
        let texts = ["said hi there", "likes tea", "is late again"];
        for text in texts {
            let response = service.add_quote(&format!("Alice {}", text), &users).unwrap();
            assert!(response.contains("Alice"));
            assert!(response.contains(text));
        }
        service.add_quote("Bob never said this", &users).unwrap();

        for _ in 0..10 {
            let response = service.get_quote_by_lookup("Alice", &users).unwrap();
            let body = response.strip_prefix("Alice: ").unwrap();
            assert!(texts.contains(&body), "unexpected {:?}", response);
        }
    }

    #[test]
    fn test_get_quote_on_empty_store() {
        let service = service();
        assert_eq!(service.get_quote(None, &users()).unwrap(), "No quotes found.");
        assert_eq!(service.get_quote(Some("Bob"), &users()).unwrap(), "No quotes found for Bob.");
    }

    #[test]
    fn test_get_quote_filters_by_known_name() {
        let service = service();
        let users = users();
        service.add_quote("Bob only quote", &users).unwrap();
        assert_eq!(service.get_quote(Some("Bob"), &users).unwrap(), "Bob: only quote");
        assert_eq!(service.get_quote(None, &users).unwrap(), "Bob: only quote");
        assert_eq!(service.get_quote(Some("Alice"), &users).unwrap(), "No quotes found for Alice.");
    }

    #[test]
    fn test_get_quote_unknown_name() {
        let err = service().get_quote(Some("Mallory"), &users()).unwrap_err();
        assert_eq!(err.response(), "I don't know anyone called Mallory.");
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let service = service();
        let users = users();
        service.add_quote("Bob hello", &users).unwrap();
        assert_eq!(service.get_quote_by_lookup("bob", &users).unwrap(), "No quotes found for bob.");
    }

    #[test]
    fn test_lookup_argument_shape() {
        let service = service();
        let err = service.get_quote_by_lookup("Bob extra", &users()).unwrap_err();
        assert_eq!(err.response(), "Too many arguments provided");
        assert!(matches!(
            service.get_quote_by_lookup("  ", &users()),
            Err(CommandError::InvalidArgs(_))
        ));
    }

    #[test]
    fn test_verbatim_policy_accepts_unknown_names() {
        let service = service();
        let response = service.add_quote("Stranger hello there", &users()).unwrap();
        assert_eq!(response, "Quote added: Stranger: hello there");
    }

    #[test]
    fn test_require_known_policy_rejects_unknown_names() {
        let service = service().with_name_policy(NamePolicy::RequireKnown);
        assert!(matches!(
            service.add_quote("Stranger hello", &users()),
            Err(CommandError::UnknownUser(name)) if name == "Stranger"
        ));
        assert!(service.add_quote("Alice hello", &users()).is_ok());
        assert!(matches!(
            service.get_quote_by_lookup("Stranger", &users()),
            Err(CommandError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_length_limits() {
        let service = service();
        let long_name = "n".repeat(MAX_NAME_LEN + 1);
        assert!(service.add_quote(&format!("{} hi", long_name), &users()).is_err());
        let long_text = "t".repeat(MAX_TEXT_LEN + 1);
        assert!(service.add_quote(&format!("Alice {}", long_text), &users()).is_err());
        let max_text = "t".repeat(MAX_TEXT_LEN);
        assert!(service.add_quote(&format!("Alice {}", max_text), &users()).is_ok());
    }
}
