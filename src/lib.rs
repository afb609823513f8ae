// src/lib.rs
//! AgentNet Lab
//!
//! A small, concurrent communication fabric for security-protocol exercises
//! (key exchange, man-in-the-middle attacks, authentication). Named
//! participants run on their own threads and exchange opaque byte messages
//! over named channels; a relay can be installed transparently between two
//! participants to observe and rewrite their traffic.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//!
//! - **topology**: participant identities, channels and the channel registry
//! - **interception**: redirection tables used by relays
//! - **runtime**: environment setup, participant threads, run reports
//! - **scenarios**: ready-made demo networks
//! - **observability**: tracing setup
//! - **utils**: errors, configuration and helpers
//!
//! # Example
//!
//! ```no_run
//! use agentnet_lab::{Agent, Environment};
//!
//! let mut env = Environment::new();
//! env.add(Agent::new("alice", |ctx| {
//!     ctx.send("bob", "from Alice")?;
//!     Ok(())
//! }))?;
//! env.add(Agent::new("mallory", |ctx| {
//!     let intercepted = ctx.receive("alice")?;
//!     ctx.print(format_args!("Intercepted {}", ctx.hex(&intercepted)));
//!     ctx.send("bob", intercepted)?;
//!     Ok(())
//! }))?;
//! env.add(Agent::new("bob", |ctx| {
//!     ctx.print(format_args!("Got {}", ctx.receive_string("alice")?));
//!     Ok(())
//! }))?;
//! env.mitm("alice", "bob", "mallory")?;
//!
//! let report = env.start();
//! assert!(report.all_completed());
//! # Ok::<(), agentnet_lab::LabError>(())
//! ```

// Public module exports
pub mod interception;
pub mod observability;
pub mod runtime;
pub mod scenarios;
pub mod topology;
pub mod utils;

// Re-export commonly used types
pub use runtime::{Agent, AgentContext, AgentOutcome, AgentTask, Console, Environment, RunReport};
pub use scenarios::Scenario;
pub use topology::{AgentId, DirectedPair};
pub use utils::config::LabConfig;
pub use utils::errors::{LabError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
