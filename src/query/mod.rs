//! Query input handling
//!
//! Holds the search mode and the raw text a user typed, and gates searches
//! on a non-empty trimmed query.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What kind of identifier is being looked up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Email,
    Domain,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Email => "email",
            SearchMode::Domain => "domain",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(SearchMode::Email),
            "domain" => Ok(SearchMode::Domain),
            other => Err(format!("unknown search mode: {}", other)),
        }
    }
}

/// A search request handed to the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub mode: SearchMode,
    pub text: String,
}

impl SearchQuery {
    pub fn new(mode: SearchMode, text: impl Into<String>) -> Self {
        Self {
            mode,
            text: text.into(),
        }
    }

    pub fn email(text: impl Into<String>) -> Self {
        Self::new(SearchMode::Email, text)
    }

    pub fn domain(text: impl Into<String>) -> Self {
        Self::new(SearchMode::Domain, text)
    }

    /// Text with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    pub fn is_empty(&self) -> bool {
        self.trimmed().is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Err(ValidationError::EmptyQuery)
        } else {
            Ok(())
        }
    }
}

/// Input state behind the search box: current tab plus typed text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    mode: SearchMode,
    text: String,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Switch tabs. Has no effect on any search result already shown.
    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    /// Store input exactly as typed
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.text = value.into();
    }

    pub fn validate(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Build a query from the current input, rejecting blank text
    pub fn to_query(&self) -> Result<SearchQuery, ValidationError> {
        if !self.validate() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(SearchQuery::new(self.mode, self.text.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_is_verbatim() {
        let mut input = QueryInput::new();
        input.set_text("  alice@example.com ");
        assert_eq!(input.text(), "  alice@example.com ");
        assert!(input.validate());
    }

    #[test]
    fn test_blank_input_fails_validation() {
        let mut input = QueryInput::new();
        assert!(!input.validate());

        input.set_text(" \t\n ");
        assert!(!input.validate());
        assert_eq!(input.to_query(), Err(ValidationError::EmptyQuery));
    }

    #[test]
    fn test_mode_switch_keeps_text() {
        let mut input = QueryInput::new();
        input.set_text("example.com");
        input.set_mode(SearchMode::Domain);

        let query = input.to_query().unwrap();
        assert_eq!(query.mode, SearchMode::Domain);
        assert_eq!(query.text, "example.com");
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Email".parse::<SearchMode>(), Ok(SearchMode::Email));
        assert_eq!(" domain ".parse::<SearchMode>(), Ok(SearchMode::Domain));
        assert!("phone".parse::<SearchMode>().is_err());
    }

    #[test]
    fn test_query_trimmed() {
        let query = SearchQuery::domain("  example.com  ");
        assert_eq!(query.trimmed(), "example.com");
        assert!(query.validate().is_ok());
        assert!(SearchQuery::email("   ").validate().is_err());
    }
}
