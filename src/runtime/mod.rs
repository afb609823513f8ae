// src/runtime/mod.rs
//! Participant execution runtime
//!
//! This module provides the execution side of the lab:
//!
//! - **Environment**: participant registry, topology setup, run lifecycle
//! - **Agent**: a named participant and the context it runs with
//! - **Agent Runtime**: one thread per participant, fault containment
//! - **Console**: serialized participant output
//! - **Report**: per-participant outcomes and per-channel traffic
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    Environment                       │
//! │   add / connect / mitm        start(self)            │
//! └───────────────────────────────┬──────────────────────┘
//!                                 │ Arc<Topology>
//!        ┌────────────────────────┼────────────────────────┐
//!        ▼                        ▼                        ▼
//!   ┌──────────┐            ┌──────────┐            ┌──────────┐
//!   │ alice    │            │ bob      │            │ mallory  │
//!   │ thread   │            │ thread   │            │ thread   │
//!   └──────────┘            └──────────┘            └──────────┘
//!        send/receive → redirection tables → channel queues
//! ```

pub mod agent;
pub mod agent_runtime;
pub mod console;
pub mod environment;
pub mod report;

// Re-export commonly used types
pub use agent::{Agent, AgentContext, AgentTask};
pub use agent_runtime::{AgentRuntime, RuntimeHandle};
pub use console::{Console, ConsoleBuffer};
pub use environment::Environment;
pub use report::{AgentOutcome, AgentReport, ChannelReport, RunReport};
