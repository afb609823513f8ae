// src/topology/registry.rs
//! Channel registry
//!
//! Maps each directed pair to its dedicated channel. Channels are only ever
//! created here, in both directions at once, by the setup calls of the
//! environment. Lookups never create anything.

use crate::topology::channel::{Channel, ChannelStats, LinkKind};
use crate::topology::pair::{AgentId, DirectedPair};
use crate::utils::errors::{LabError, Result};
use std::collections::HashMap;
use tracing::debug;

/// Directed pair to channel mapping
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: HashMap<DirectedPair, Channel>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the two channels `(a, b)` and `(b, a)` of one link
    ///
    /// Fails with `DuplicateLink` if either direction already exists. A
    /// loopback link (`a == b`) is a single channel.
    pub fn create_link(&mut self, a: &AgentId, b: &AgentId, kind: LinkKind) -> Result<()> {
        let forward = DirectedPair::new(a.clone(), b.clone());
        if self.is_linked(&forward) {
            return Err(LabError::DuplicateLink {
                a: a.clone(),
                b: b.clone(),
            });
        }

        let backward = forward.reversed();
        debug!("Creating {:?} link {} <-> {}", kind, a, b);
        self.channels.insert(forward, Channel::new(kind));
        if !backward.is_loopback() {
            self.channels.insert(backward, Channel::new(kind));
        }
        Ok(())
    }

    /// Lookup the channel for an exact pair
    pub fn lookup(&self, pair: &DirectedPair) -> Option<&Channel> {
        self.channels.get(pair)
    }

    pub fn contains(&self, pair: &DirectedPair) -> bool {
        self.channels.contains_key(pair)
    }

    /// Whether a channel exists for the pair or its reverse
    pub fn is_linked(&self, pair: &DirectedPair) -> bool {
        self.contains(pair) || self.contains(&pair.reversed())
    }

    /// Kind of the link covering the pair in either direction
    pub fn link_kind(&self, pair: &DirectedPair) -> Option<LinkKind> {
        self.lookup(pair)
            .or_else(|| self.lookup(&pair.reversed()))
            .map(Channel::kind)
    }

    /// Number of channels (not links)
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Traffic counters of every channel, sorted by pair
    pub fn stats(&self) -> Vec<(DirectedPair, ChannelStats)> {
        let mut stats: Vec<_> = self
            .channels
            .iter()
            .map(|(pair, channel)| (pair.clone(), channel.stats()))
            .collect();
        stats.sort_by(|(a, _), (b, _)| a.cmp(b));
        stats
    }
}
