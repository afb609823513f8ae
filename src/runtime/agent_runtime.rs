// src/runtime/agent_runtime.rs
//! Agent runtime for participant lifecycle management
//!
//! Each participant runs on its own OS thread. The thread boundary is where
//! faults are contained:
//! - An error returned by the task ends that participant as `Failed`
//! - A panic inside the task ends that participant as `Panicked`
//!
//! Other participants keep running either way.

use crate::runtime::agent::{AgentContext, AgentTask};
use crate::runtime::report::{AgentOutcome, AgentReport};
use crate::topology::pair::AgentId;
use crate::utils::config::RuntimeConfig;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, info_span, Span};

/// Handle to a running participant
pub struct RuntimeHandle {
    id: AgentId,
    started_at: Instant,
    state: HandleState,
}

enum HandleState {
    Running(JoinHandle<TaskResult>),
    SpawnFailed(String),
}

struct TaskResult {
    outcome: AgentOutcome,
    elapsed: Duration,
}

/// Spawns participant threads
#[derive(Debug)]
pub struct AgentRuntime {
    config: RuntimeConfig,
}

impl AgentRuntime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    /// Start a participant's task on a dedicated thread
    ///
    /// `parent` is the span the participant's own span is nested in. A thread
    /// that cannot be spawned is reported as a failed participant when
    /// joined.
    pub fn spawn(&self, task: Box<dyn AgentTask>, ctx: AgentContext, parent: &Span) -> RuntimeHandle {
        let id = ctx.id().clone();
        let span = info_span!(parent: parent, "agent", id = %id);

        let mut builder =
            thread::Builder::new().name(format!("{}{}", self.config.thread_name_prefix, id));
        if let Some(stack_size) = self.config.stack_size {
            builder = builder.stack_size(stack_size);
        }

        let spawned = builder.spawn(move || {
            let _entered = span.enter();
            let started = Instant::now();
            debug!("Agent started");

            let outcome = match panic::catch_unwind(AssertUnwindSafe(|| task.run(&ctx))) {
                Ok(Ok(())) => {
                    debug!("Agent completed");
                    AgentOutcome::Completed
                }
                Ok(Err(e)) => {
                    error!("Agent task failed: {:#}", e);
                    AgentOutcome::Failed(format!("{:#}", e))
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!("Agent panicked: {}", message);
                    AgentOutcome::Panicked(message)
                }
            };

            TaskResult {
                outcome,
                elapsed: started.elapsed(),
            }
        });

        let state = match spawned {
            Ok(handle) => HandleState::Running(handle),
            Err(e) => {
                error!("Failed to spawn thread for agent {}: {}", id, e);
                HandleState::SpawnFailed(format!("failed to spawn thread: {}", e))
            }
        };

        RuntimeHandle {
            id,
            started_at: Instant::now(),
            state,
        }
    }
}

impl Default for AgentRuntime {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

impl RuntimeHandle {
    /// Wait for the participant to terminate
    pub fn join(self) -> AgentReport {
        let (outcome, elapsed) = match self.state {
            HandleState::SpawnFailed(reason) => (AgentOutcome::Failed(reason), Duration::ZERO),
            HandleState::Running(handle) => match handle.join() {
                Ok(result) => (result.outcome, result.elapsed),
                // Panic that escaped catch_unwind
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!("Agent {} panicked: {}", self.id, message);
                    (AgentOutcome::Panicked(message), self.started_at.elapsed())
                }
            },
        };

        AgentReport {
            id: self.id,
            outcome,
            elapsed,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
