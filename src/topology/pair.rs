// src/topology/pair.rs
//! Participant identities and the ordered pairs that address channels

use crate::utils::errors::{LabError, Result};
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

/// Identity of a participant, unique within one environment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Validate and build an identity
    ///
    /// Blank names (empty or whitespace-only) are rejected. The name is kept
    /// as given; only the emptiness check trims.
    pub fn parse(name: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(LabError::InvalidName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AgentId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for AgentId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for AgentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AgentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered `(from, to)` pair; `(a, b)` and `(b, a)` are different keys
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DirectedPair {
    pub from: AgentId,
    pub to: AgentId,
}

impl DirectedPair {
    pub fn new(from: impl Into<AgentId>, to: impl Into<AgentId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The same pair in the opposite direction
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }

    pub fn is_loopback(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for DirectedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_rejects_blank_names() {
        assert!(AgentId::parse("alice").is_ok());
        assert_eq!(AgentId::parse(""), Err(LabError::InvalidName(String::new())));
        assert!(matches!(AgentId::parse("   "), Err(LabError::InvalidName(_))));
        assert!(matches!(AgentId::parse("\t\n"), Err(LabError::InvalidName(_))));
    }

    #[test]
    fn test_parse_keeps_name_verbatim() {
        let id = AgentId::parse(" alice ").unwrap();
        assert_eq!(id.as_str(), " alice ");
    }

    #[test]
    fn test_pair_is_order_sensitive() {
        let ab = DirectedPair::new("a", "b");
        let ba = DirectedPair::new("b", "a");
        assert_ne!(ab, ba);
        assert_eq!(ab.reversed(), ba);

        let set: HashSet<_> = [ab.clone(), ba, ab].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_loopback() {
        assert!(DirectedPair::new("a", "a").is_loopback());
        assert!(!DirectedPair::new("a", "b").is_loopback());
    }
}
