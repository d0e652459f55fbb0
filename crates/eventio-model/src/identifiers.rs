use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

const COLLECTION_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]{0,127}$";

fn collection_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(COLLECTION_NAME_PATTERN).expect("invalid regex"))
}

/// Name of a collection inside an event (pattern: `[A-Za-z_][A-Za-z0-9_]{0,127}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionName(String);

impl CollectionName {
    /// Parses a validated collection name.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !collection_name_regex().is_match(&s) {
            return Err(ValidationError::PatternMismatch {
                field: "CollectionName",
                value: s,
            });
        }
        Ok(Self(s))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CollectionName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CollectionName> for String {
    fn from(value: CollectionName) -> Self {
        value.0
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_identifier_like_names() {
        for name in ["MCParticles", "_hits", "tracks2", "a"] {
            assert!(CollectionName::parse(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_malformed_names() {
        for name in ["", "2tracks", "with space", "dash-name", &"x".repeat(129)] {
            assert!(CollectionName::parse(name).is_err(), "{name}");
        }
    }

    #[test]
    fn deserialization_validates() {
        let ok: Result<CollectionName, _> = serde_json::from_str("\"hits\"");
        assert!(ok.is_ok());
        let bad: Result<CollectionName, _> = serde_json::from_str("\"bad name\"");
        assert!(bad.is_err());
    }
}
