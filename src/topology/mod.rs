// src/topology/mod.rs
//! Channel topology
//!
//! - **Pair**: participant identities and ordered `(from, to)` keys
//! - **Channel**: unbounded blocking FIFO for one directed pair
//! - **Registry**: pair to channel mapping
//!
//! A [`Topology`] is the frozen result of the setup phase. It is shared
//! read-only by every participant thread; only the queues inside the channels
//! change while a run is in progress.

pub mod channel;
pub mod pair;
pub mod registry;

pub use channel::{Channel, ChannelStats, LinkKind};
pub use pair::{AgentId, DirectedPair};
pub use registry::ChannelRegistry;

use crate::interception::RedirectionTable;
use crate::utils::errors::{LabError, Result};
use bytes::Bytes;
use tracing::trace;

/// Immutable channel topology used while participants run
#[derive(Debug, Default)]
pub struct Topology {
    registry: ChannelRegistry,
    redirects: RedirectionTable,
}

impl Topology {
    pub fn new(registry: ChannelRegistry, redirects: RedirectionTable) -> Self {
        Self {
            registry,
            redirects,
        }
    }

    /// Enqueue a payload from `sender` to `receiver`
    ///
    /// Resolves through the outbound redirection table first. Never blocks.
    pub fn send(&self, sender: &AgentId, receiver: &AgentId, payload: Bytes) -> Result<()> {
        let logical = DirectedPair::new(sender.clone(), receiver.clone());
        let physical = self.redirects.outbound(&logical).unwrap_or(&logical);

        let channel = self
            .registry
            .lookup(physical)
            .ok_or_else(|| LabError::NoSuchLink {
                from: sender.clone(),
                to: receiver.clone(),
            })?;

        trace!("{} bytes on {} via {}", payload.len(), logical, physical);

        channel.push(payload).map_err(|_| LabError::ChannelClosed {
            from: physical.from.clone(),
            to: physical.to.clone(),
        })
    }

    /// Dequeue the next payload `sender` sent to `receiver`
    ///
    /// Resolves through the inbound redirection table first, then blocks until
    /// a payload is available.
    pub fn receive(&self, sender: &AgentId, receiver: &AgentId) -> Result<Bytes> {
        let logical = DirectedPair::new(sender.clone(), receiver.clone());
        let physical = self.redirects.inbound(&logical).unwrap_or(&logical);

        let channel = self
            .registry
            .lookup(physical)
            .ok_or_else(|| LabError::NoSuchLink {
                from: sender.clone(),
                to: receiver.clone(),
            })?;

        trace!("Waiting on {} via {}", logical, physical);

        channel.pop().ok_or_else(|| LabError::ChannelClosed {
            from: physical.from.clone(),
            to: physical.to.clone(),
        })
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }
}
