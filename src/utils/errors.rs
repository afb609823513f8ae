// src/utils/errors.rs
//! Error types for the lab environment
//!
//! Setup errors are returned synchronously from `add`, `connect` and `mitm`.
//! Runtime errors surface inside a participant's task, where they end that
//! participant only.

use crate::topology::pair::AgentId;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, LabError>;

/// Errors raised by the environment and its topology
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LabError {
    /// An identity is empty or whitespace-only
    #[error("names must not be empty or blank (got {0:?})")]
    InvalidName(String),

    /// `add` was called twice with the same identity
    #[error("agent with name '{0}' is already defined; all agents must be unique")]
    DuplicateName(AgentId),

    /// A setup call referenced an identity that was never added
    #[error("agent '{0}' does not exist")]
    NonExistentAgent(AgentId),

    /// `connect` on a pair that is already linked, in either direction
    #[error("there is already a link between '{a}' and '{b}'")]
    DuplicateLink { a: AgentId, b: AgentId },

    /// `mitm` on a pair that is already directly connected
    #[error("MITM error: agents '{a}' and '{b}' are already connected")]
    DirectLinkExists { a: AgentId, b: AgentId },

    /// A relay install collides with an existing link or relay
    #[error("MITM error: there is an existing link between '{a}', '{relay}' and '{b}'")]
    RelayLinkExists {
        a: AgentId,
        b: AgentId,
        relay: AgentId,
    },

    /// Neither a direct nor a redirected channel exists for the pair
    #[error("there is no connection between '{from}' and '{to}'")]
    NoSuchLink { from: AgentId, to: AgentId },

    /// The queue behind a channel was disconnected
    #[error("channel from '{from}' to '{to}' is closed")]
    ChannelClosed { from: AgentId, to: AgentId },

    /// The demo binary does not know the requested scenario
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl LabError {
    /// Whether the error is raised by a setup call (before `start`)
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            LabError::InvalidName(_)
                | LabError::DuplicateName(_)
                | LabError::NonExistentAgent(_)
                | LabError::DuplicateLink { .. }
                | LabError::DirectLinkExists { .. }
                | LabError::RelayLinkExists { .. }
        )
    }
}

impl From<config::ConfigError> for LabError {
    fn from(err: config::ConfigError) -> Self {
        LabError::Config(err.to_string())
    }
}
