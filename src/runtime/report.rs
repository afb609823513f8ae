// src/runtime/report.rs
//! Run report returned by `Environment::start`

use crate::topology::channel::ChannelStats;
use crate::topology::pair::{AgentId, DirectedPair};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// How a participant terminated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum AgentOutcome {
    /// The task returned `Ok`
    Completed,

    /// The task returned an error
    Failed(String),

    /// The task panicked
    Panicked(String),
}

impl AgentOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, AgentOutcome::Completed)
    }
}

impl fmt::Display for AgentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentOutcome::Completed => write!(f, "completed"),
            AgentOutcome::Failed(reason) => write!(f, "failed: {}", reason),
            AgentOutcome::Panicked(reason) => write!(f, "panicked: {}", reason),
        }
    }
}

/// Result of one participant
#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub id: AgentId,
    pub outcome: AgentOutcome,
    pub elapsed: Duration,
}

/// Traffic on one channel over the run
#[derive(Debug, Clone, Serialize)]
pub struct ChannelReport {
    pub pair: DirectedPair,
    pub stats: ChannelStats,
}

/// Everything `start` observed
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Unique ID of the run
    pub run_id: String,

    /// Wall time from start until the last participant terminated
    pub elapsed: Duration,

    /// Participants in registration order
    pub agents: Vec<AgentReport>,

    /// Channels sorted by pair
    pub channels: Vec<ChannelReport>,
}

impl RunReport {
    /// Whether every participant completed
    pub fn all_completed(&self) -> bool {
        self.agents.iter().all(|a| a.outcome.is_completed())
    }

    /// Participants that failed or panicked
    pub fn failures(&self) -> Vec<&AgentReport> {
        self.agents
            .iter()
            .filter(|a| !a.outcome.is_completed())
            .collect()
    }

    pub fn agent(&self, id: &str) -> Option<&AgentReport> {
        self.agents.iter().find(|a| a.id.as_str() == id)
    }

    pub fn channel(&self, from: &str, to: &str) -> Option<&ChannelStats> {
        self.channels
            .iter()
            .find(|c| c.pair.from.as_str() == from && c.pair.to.as_str() == to)
            .map(|c| &c.stats)
    }

    /// Total payloads sent over all channels
    pub fn messages_sent(&self) -> u64 {
        self.channels.iter().map(|c| c.stats.sent).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Multi-line human readable summary
    pub fn summary(&self) -> String {
        let mut output = format!(
            "run {} finished in {:?}: {}/{} agents completed, {} messages\n",
            self.run_id,
            self.elapsed,
            self.agents.len() - self.failures().len(),
            self.agents.len(),
            self.messages_sent()
        );

        for agent in &self.agents {
            output.push_str(&format!("  {:<12} {}\n", agent.id.as_str(), agent.outcome));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::channel::LinkKind;

    fn sample() -> RunReport {
        RunReport {
            run_id: "01TEST".to_string(),
            elapsed: Duration::from_millis(5),
            agents: vec![
                AgentReport {
                    id: AgentId::from("alice"),
                    outcome: AgentOutcome::Completed,
                    elapsed: Duration::from_millis(1),
                },
                AgentReport {
                    id: AgentId::from("bob"),
                    outcome: AgentOutcome::Panicked("boom".to_string()),
                    elapsed: Duration::from_millis(2),
                },
            ],
            channels: vec![ChannelReport {
                pair: DirectedPair::new("alice", "bob"),
                stats: ChannelStats {
                    kind: LinkKind::Direct,
                    sent: 3,
                    delivered: 2,
                    pending: 1,
                },
            }],
        }
    }

    #[test]
    fn test_failures() {
        let report = sample();
        assert!(!report.all_completed());
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].id.as_str(), "bob");
    }

    #[test]
    fn test_lookups() {
        let report = sample();
        assert!(report.agent("alice").unwrap().outcome.is_completed());
        assert!(report.agent("carol").is_none());
        assert_eq!(report.channel("alice", "bob").unwrap().pending, 1);
        assert!(report.channel("bob", "alice").is_none());
        assert_eq!(report.messages_sent(), 3);
    }

    #[test]
    fn test_json_export() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["agents"][1]["outcome"]["status"], "panicked");
        assert_eq!(value["agents"][1]["outcome"]["reason"], "boom");
        assert_eq!(value["channels"][0]["pair"]["from"], "alice");
        assert_eq!(value["channels"][0]["stats"]["kind"], "direct");
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary();
        assert!(summary.contains("1/2 agents completed, 3 messages"));
        assert!(summary.contains("panicked: boom"));
    }
}
