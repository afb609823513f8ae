// src/interception/redirection_table.rs
//! Redirection tables for relayed links
//!
//! A relay installed between `a` and `b` rewrites the logical pair used by the
//! endpoints onto a physical channel that passes through the relay:
//!
//! ```text
//! outbound  (a, b) -> (a, m)      inbound  (a, b) -> (m, b)
//!           (b, a) -> (b, m)               (b, a) -> (m, a)
//! ```
//!
//! The tables are filled during setup and only read afterwards.

use crate::topology::pair::{AgentId, DirectedPair};
use std::collections::HashMap;
use tracing::debug;

/// A single redirection entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Pair as seen by the endpoints
    pub logical: DirectedPair,

    /// Pair of the channel actually used
    pub physical: DirectedPair,

    /// Relay sitting on the link
    pub relay: AgentId,
}

/// Outbound and inbound redirection tables
#[derive(Debug, Default)]
pub struct RedirectionTable {
    outbound: HashMap<DirectedPair, Redirect>,
    inbound: HashMap<DirectedPair, Redirect>,
}

impl RedirectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route all traffic between `a` and `b` through `relay`
    pub fn install(&mut self, a: &AgentId, b: &AgentId, relay: &AgentId) {
        let a2b = DirectedPair::new(a.clone(), b.clone());
        let b2a = a2b.reversed();

        debug!("Redirecting {} <-> {} through {}", a, b, relay);

        self.outbound.insert(
            a2b.clone(),
            Redirect {
                logical: a2b.clone(),
                physical: DirectedPair::new(a.clone(), relay.clone()),
                relay: relay.clone(),
            },
        );
        self.outbound.insert(
            b2a.clone(),
            Redirect {
                logical: b2a.clone(),
                physical: DirectedPair::new(b.clone(), relay.clone()),
                relay: relay.clone(),
            },
        );
        self.inbound.insert(
            a2b.clone(),
            Redirect {
                logical: a2b,
                physical: DirectedPair::new(relay.clone(), b.clone()),
                relay: relay.clone(),
            },
        );
        self.inbound.insert(
            b2a.clone(),
            Redirect {
                logical: b2a,
                physical: DirectedPair::new(relay.clone(), a.clone()),
                relay: relay.clone(),
            },
        );
    }

    /// Physical pair a `send` on `pair` goes to, if redirected
    pub fn outbound(&self, pair: &DirectedPair) -> Option<&DirectedPair> {
        self.outbound.get(pair).map(|r| &r.physical)
    }

    /// Physical pair a `receive` on `pair` reads from, if redirected
    pub fn inbound(&self, pair: &DirectedPair) -> Option<&DirectedPair> {
        self.inbound.get(pair).map(|r| &r.physical)
    }

    /// Whether traffic on the pair or its reverse is redirected
    pub fn is_intercepted(&self, pair: &DirectedPair) -> bool {
        self.outbound.contains_key(pair) || self.outbound.contains_key(&pair.reversed())
    }

    /// Relay installed on the link covering the pair
    pub fn relay_for(&self, pair: &DirectedPair) -> Option<&AgentId> {
        self.outbound
            .get(pair)
            .or_else(|| self.outbound.get(&pair.reversed()))
            .map(|r| &r.relay)
    }

    /// Entry whose relay sub-link is the pair or its reverse
    pub fn covering(&self, pair: &DirectedPair) -> Option<&Redirect> {
        let reversed = pair.reversed();
        self.outbound
            .values()
            .find(|r| r.physical == *pair || r.physical == reversed)
    }

    /// Number of logical pairs redirected
    pub fn len(&self) -> usize {
        self.outbound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty()
    }

    /// Outbound entries, sorted by logical pair
    pub fn redirects(&self) -> Vec<Redirect> {
        let mut redirects: Vec<_> = self.outbound.values().cloned().collect();
        redirects.sort_by(|a, b| a.logical.cmp(&b.logical));
        redirects
    }

    /// Human readable dump of both tables
    pub fn describe(&self) -> String {
        let mut output = String::new();

        let mut inbound: Vec<_> = self.inbound.values().collect();
        inbound.sort_by(|a, b| a.logical.cmp(&b.logical));

        for redirect in self.redirects() {
            output.push_str(&format!(
                "send    {} => {}\n",
                redirect.logical, redirect.physical
            ));
        }
        for redirect in inbound {
            output.push_str(&format!(
                "receive {} => {}\n",
                redirect.logical, redirect.physical
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installed() -> RedirectionTable {
        let mut table = RedirectionTable::new();
        table.install(&AgentId::from("a"), &AgentId::from("b"), &AgentId::from("m"));
        table
    }

    #[test]
    fn test_outbound_goes_to_relay() {
        let table = installed();
        assert_eq!(
            table.outbound(&DirectedPair::new("a", "b")),
            Some(&DirectedPair::new("a", "m"))
        );
        assert_eq!(
            table.outbound(&DirectedPair::new("b", "a")),
            Some(&DirectedPair::new("b", "m"))
        );
    }

    #[test]
    fn test_inbound_comes_from_relay() {
        let table = installed();
        assert_eq!(
            table.inbound(&DirectedPair::new("a", "b")),
            Some(&DirectedPair::new("m", "b"))
        );
        assert_eq!(
            table.inbound(&DirectedPair::new("b", "a")),
            Some(&DirectedPair::new("m", "a"))
        );
    }

    #[test]
    fn test_relay_traffic_is_not_redirected() {
        let table = installed();
        assert!(table.outbound(&DirectedPair::new("m", "b")).is_none());
        assert!(table.inbound(&DirectedPair::new("a", "m")).is_none());
        assert!(!table.is_intercepted(&DirectedPair::new("a", "m")));
    }

    #[test]
    fn test_relay_for_either_direction() {
        let table = installed();
        assert_eq!(
            table.relay_for(&DirectedPair::new("b", "a")).map(AgentId::as_str),
            Some("m")
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_covering_finds_relay_sub_links() {
        let table = installed();
        let covering = table.covering(&DirectedPair::new("m", "b")).unwrap();
        assert_eq!(covering.relay.as_str(), "m");
        assert_eq!(covering.logical, DirectedPair::new("b", "a"));
        assert!(table.covering(&DirectedPair::new("a", "b")).is_none());
    }

    #[test]
    fn test_describe_lists_both_tables() {
        let table = installed();
        let dump = table.describe();
        assert!(dump.contains("send    a -> b => a -> m"));
        assert!(dump.contains("receive b -> a => m -> a"));
    }
}
