// src/runtime/console.rs
//! Participant console
//!
//! Output of `AgentContext::print`, one `[<id>] <message>` line per call.
//! Lines from concurrently running participants never interleave.

use crate::topology::pair::AgentId;
use crate::utils::config::ConsoleConfig;
use parking_lot::Mutex;
use std::fmt::Display;
use std::io::Write;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone)]
enum Sink {
    Stdout,
    Muted,
    Buffer(Arc<Mutex<Vec<String>>>),
}

/// Where participant output goes
#[derive(Debug, Clone)]
pub struct Console {
    sink: Sink,
}

impl Console {
    pub fn stdout() -> Self {
        Self { sink: Sink::Stdout }
    }

    pub fn muted() -> Self {
        Self { sink: Sink::Muted }
    }

    /// Console that keeps lines in memory
    pub fn buffered() -> (Self, ConsoleBuffer) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let console = Self {
            sink: Sink::Buffer(Arc::clone(&lines)),
        };
        (console, ConsoleBuffer { lines })
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        if config.enabled {
            Self::stdout()
        } else {
            Self::muted()
        }
    }

    /// Write one line attributed to `id`
    pub fn print(&self, id: &AgentId, message: impl Display) {
        match &self.sink {
            Sink::Stdout => {
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                if let Err(e) = writeln!(out, "[{}] {}", id, message) {
                    warn!("Failed to write console line for {}: {}", id, e);
                }
            }
            Sink::Muted => {}
            Sink::Buffer(lines) => {
                lines.lock().push(format!("[{}] {}", id, message));
            }
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

/// Read side of a buffered console
#[derive(Debug, Clone)]
pub struct ConsoleBuffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl ConsoleBuffer {
    /// All lines written so far, in write order
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Lines written by one participant, without the `[<id>] ` prefix
    pub fn lines_of(&self, id: &str) -> Vec<String> {
        let prefix = format!("[{}] ", id);
        self.lines
            .lock()
            .iter()
            .filter_map(|line| line.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }
}
