// src/runtime/agent.rs
//! Participants and the context they run with
//!
//! A participant is a name plus a task. The task receives an
//! [`AgentContext`] bound to the participant's identity; `send` and
//! `receive` on the context are the participant's only interaction with the
//! rest of the network.
//!
//! ```no_run
//! use agentnet_lab::{Agent, Environment};
//!
//! let mut env = Environment::new();
//! env.add(Agent::new("alice", |ctx| {
//!     ctx.send("bob", "hello")?;
//!     Ok(())
//! }))?;
//! env.add(Agent::new("bob", |ctx| {
//!     let msg = ctx.receive_string("alice")?;
//!     ctx.print(format_args!("Got {}", msg));
//!     Ok(())
//! }))?;
//! env.connect("alice", "bob")?;
//! env.start();
//! # Ok::<(), agentnet_lab::LabError>(())
//! ```

use crate::runtime::console::Console;
use crate::topology::pair::AgentId;
use crate::topology::Topology;
use crate::utils::errors::Result;
use crate::utils::hex::to_hex;
use bytes::Bytes;
use std::fmt;
use std::fmt::Display;
use std::sync::Arc;

/// Work a participant performs once started
pub trait AgentTask: Send + 'static {
    fn run(self: Box<Self>, ctx: &AgentContext) -> anyhow::Result<()>;
}

impl<F> AgentTask for F
where
    F: FnOnce(&AgentContext) -> anyhow::Result<()> + Send + 'static,
{
    fn run(self: Box<Self>, ctx: &AgentContext) -> anyhow::Result<()> {
        (*self)(ctx)
    }
}

/// A named participant waiting to be registered
pub struct Agent {
    id: AgentId,
    task: Box<dyn AgentTask>,
}

impl Agent {
    /// Participant running a closure
    pub fn new<F>(name: impl Into<AgentId>, task: F) -> Self
    where
        F: FnOnce(&AgentContext) -> anyhow::Result<()> + Send + 'static,
    {
        Self {
            id: name.into(),
            task: Box::new(task),
        }
    }

    /// Participant running any [`AgentTask`]
    pub fn from_task(name: impl Into<AgentId>, task: impl AgentTask) -> Self {
        Self {
            id: name.into(),
            task: Box::new(task),
        }
    }

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    pub(crate) fn into_parts(self) -> (AgentId, Box<dyn AgentTask>) {
        (self.id, self.task)
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent").field("id", &self.id).finish_non_exhaustive()
    }
}

/// A participant's view of the network
#[derive(Debug, Clone)]
pub struct AgentContext {
    id: AgentId,
    topology: Arc<Topology>,
    console: Console,
}

impl AgentContext {
    pub(crate) fn new(id: AgentId, topology: Arc<Topology>, console: Console) -> Self {
        Self {
            id,
            topology,
            console,
        }
    }

    /// Identity of the participant this context belongs to
    pub fn id(&self) -> &AgentId {
        &self.id
    }

    /// Send a payload to `peer` (never blocks)
    pub fn send(&self, peer: &str, payload: impl Into<Bytes>) -> Result<()> {
        self.topology
            .send(&self.id, &AgentId::from(peer), payload.into())
    }

    /// Receive the next payload `peer` sent to this participant
    ///
    /// Blocks until a payload is available, without timeout.
    pub fn receive(&self, peer: &str) -> Result<Bytes> {
        self.topology.receive(&AgentId::from(peer), &self.id)
    }

    /// [`receive`](Self::receive), decoded as lossy UTF-8
    pub fn receive_string(&self, peer: &str) -> Result<String> {
        let payload = self.receive(peer)?;
        Ok(String::from_utf8_lossy(&payload).into_owned())
    }

    /// Print a line prefixed with this participant's identity
    pub fn print(&self, message: impl Display) {
        self.console.print(&self.id, message);
    }

    /// Uppercase hex rendering of `bytes`
    pub fn hex(&self, bytes: impl AsRef<[u8]>) -> String {
        to_hex(bytes)
    }
}
