//! Command parser - Recognizes `<prefix><word> [argument]` in chat text

use regex_lite::Regex;
use crate::domain::entities::ParsedCommand;
use crate::application::errors::ConfigError;

/// Parses chat text into commands
#[derive(Debug, Clone)]
pub struct CommandParser {
    prefix: String,
    pattern: Regex,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(ConfigError::InvalidValue("command prefix must not be empty".to_string()));
        }

        // Line-oriented: `.` stops at newlines, so multi-line text never parses
        let pattern = Regex::new(&format!(r"(?i)^{}(?P<body>.*)$", regex_lite::escape(&prefix)))
            .map_err(|e| ConfigError::InvalidValue(format!("command prefix {:?}: {}", prefix, e)))?;

        Ok(Self { prefix, pattern })
    }

    /// True when the text starts with the command prefix, command or not
    pub fn has_prefix(&self, text: &str) -> bool {
        text.starts_with(&self.prefix)
    }

    /// Parse text into a command. Ordinary chat text yields `None`.
    ///
    /// The command word is the longest run of Unicode letters, digits and
    /// underscores after the prefix; one following space is dropped and the
    /// rest of the line is the argument. A single trailing newline is ignored.
    pub fn parse(&self, text: &str) -> Option<ParsedCommand> {
        let text = text.strip_suffix('\n').unwrap_or(text);
        let body = self.pattern.captures(text)?.name("body")?.as_str();

        let word_end = body
            .char_indices()
            .find(|&(_, c)| !is_word_char(c))
            .map_or(body.len(), |(i, _)| i);
        if word_end == 0 {
            return None;
        }

        let (name, rest) = body.split_at(word_end);
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        let argument = Some(rest).filter(|a| !a.is_empty()).map(str::to_string);

        Some(ParsedCommand::new(name, argument))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> CommandParser {
        CommandParser::new("!").unwrap()
    }

    #[test]
    fn test_ordinary_text_is_not_a_command() {
        let parser = parser();
        for text in ["hello everyone", "", "quote Alice hi", " !quote", "what!quote"] {
            assert_eq!(parser.parse(text), None, "{:?}", text);
        }
    }

    #[test]
    fn test_command_with_argument() {
        let parser = parser();
        let cmd = parser.parse("!quote Alice said hi there").unwrap();
        assert_eq!(cmd.name, "quote");
        assert_eq!(cmd.argument.as_deref(), Some("Alice said hi there"));
    }

    #[test]
    fn test_command_without_argument() {
        let parser = parser();
        assert_eq!(parser.parse("!grab"), Some(ParsedCommand::new("grab", None)));
        // A trailing space is an empty argument, reported as none
        assert_eq!(parser.parse("!grab "), Some(ParsedCommand::new("grab", None)));
    }

    #[test]
    fn test_case_is_preserved() {
        let parser = parser();
        assert_eq!(parser.parse("!QuOtE").unwrap().name, "QuOtE");
    }

    #[test]
    fn test_only_a_single_space_is_consumed() {
        let parser = parser();
        let cmd = parser.parse("!quote  Bob").unwrap();
        assert_eq!(cmd.argument.as_deref(), Some(" Bob"));
    }

    #[test]
    fn test_double_prefix_and_multiline_do_not_match() {
        let parser = parser();
        assert_eq!(parser.parse("!!quote"), None);
        assert_eq!(parser.parse("!quote Bob line one\nline two"), None);
    }

    #[test]
    fn test_trailing_newline_is_ignored() {
        let parser = parser();
        assert_eq!(parser.parse("!grab\n"), Some(ParsedCommand::new("grab", None)));
        let cmd = parser.parse("!lookup Bob\n").unwrap();
        assert_eq!(cmd.argument.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_command_word_is_unicode() {
        let parser = parser();
        assert_eq!(parser.parse("!quoté"), Some(ParsedCommand::new("quoté", None)));
        let cmd = parser.parse("!zitat Jürgen sagt hallo").unwrap();
        assert_eq!(cmd.name, "zitat");
        assert_eq!(cmd.argument.as_deref(), Some("Jürgen sagt hallo"));
        // Punctuation ends the word and stays in the argument
        let cmd = parser.parse("!quote-me").unwrap();
        assert_eq!(cmd.name, "quote");
        assert_eq!(cmd.argument.as_deref(), Some("-me"));
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        assert!(CommandParser::new("").is_err());
    }

    #[test]
    fn test_custom_prefix_is_escaped() {
        let parser = CommandParser::new(".").unwrap();
        assert!(parser.parse(".lookup bob").is_some());
        assert_eq!(parser.parse("xlookup bob"), None);
        assert!(parser.has_prefix(".anything"));
    }
}
