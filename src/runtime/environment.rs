// src/runtime/environment.rs
//! The environment: participant registry, topology setup and run lifecycle
//!
//! Setup and execution are two strictly sequential phases:
//!
//! ```text
//! Environment::new()
//!     ├─ add(agent)          ┐
//!     ├─ connect(a, b)       │ setup: &mut self, single threaded
//!     ├─ mitm(a, b, m)       ┘
//!     └─ start(self)  ──────── topology frozen into Arc<Topology>
//!            ├─ one thread per participant
//!            └─ join all → RunReport
//! ```
//!
//! `start` consumes the environment, so the topology cannot be changed once
//! participants are running.

use crate::interception::RedirectionTable;
use crate::runtime::agent::{Agent, AgentContext};
use crate::runtime::agent_runtime::{AgentRuntime, RuntimeHandle};
use crate::runtime::console::Console;
use crate::runtime::report::{AgentReport, ChannelReport, RunReport};
use crate::topology::channel::LinkKind;
use crate::topology::pair::{AgentId, DirectedPair};
use crate::topology::registry::ChannelRegistry;
use crate::topology::Topology;
use crate::utils::config::LabConfig;
use crate::utils::errors::{LabError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};
use ulid::Ulid;

/// Network of participants under construction
#[derive(Debug)]
pub struct Environment {
    /// Participants in registration order
    agents: Vec<Agent>,

    names: HashSet<AgentId>,
    registry: ChannelRegistry,
    redirects: RedirectionTable,
    runtime: AgentRuntime,
    console: Console,
}

impl Environment {
    /// Empty environment printing participant output to stdout
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            names: HashSet::new(),
            registry: ChannelRegistry::new(),
            redirects: RedirectionTable::new(),
            runtime: AgentRuntime::default(),
            console: Console::stdout(),
        }
    }

    /// Empty environment using the runtime and console settings of `config`
    pub fn with_config(config: &LabConfig) -> Self {
        Self {
            runtime: AgentRuntime::new(config.runtime.clone()),
            console: Console::from_config(&config.console),
            ..Self::new()
        }
    }

    /// Replace the console participants print to
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Register a participant
    pub fn add(&mut self, agent: Agent) -> Result<()> {
        let id = AgentId::parse(agent.id().as_str())?;
        if self.names.contains(&id) {
            return Err(LabError::DuplicateName(id));
        }

        debug!("Adding agent {}", id);
        self.names.insert(id);
        self.agents.push(agent);
        Ok(())
    }

    /// Link `a` and `b` directly, in both directions
    pub fn connect(&mut self, a: &str, b: &str) -> Result<()> {
        let a = AgentId::parse(a)?;
        let b = AgentId::parse(b)?;
        self.require_registered(&a)?;
        self.require_registered(&b)?;

        let pair = DirectedPair::new(a.clone(), b.clone());

        if let Some(relay) = self.redirects.relay_for(&pair) {
            return Err(LabError::RelayLinkExists {
                a,
                b,
                relay: relay.clone(),
            });
        }

        if self.registry.link_kind(&pair) == Some(LinkKind::Relay) {
            if let Some(redirect) = self.redirects.covering(&pair) {
                return Err(LabError::RelayLinkExists {
                    a: redirect.logical.from.clone(),
                    b: redirect.logical.to.clone(),
                    relay: redirect.relay.clone(),
                });
            }
        }

        self.registry.create_link(&a, &b, LinkKind::Direct)?;
        info!("Connected {} <-> {}", a, b);
        Ok(())
    }

    /// Install `relay` as a man in the middle on the link between `a` and `b`
    ///
    /// Creates the relay sub-links `(a, m)`, `(m, a)`, `(b, m)`, `(m, b)` and
    /// redirects the endpoints' traffic onto them. Either everything is
    /// installed or, on error, nothing is.
    pub fn mitm(&mut self, a: &str, b: &str, relay: &str) -> Result<()> {
        let a = AgentId::parse(a)?;
        let b = AgentId::parse(b)?;
        let m = AgentId::parse(relay)?;

        let a2b = DirectedPair::new(a.clone(), b.clone());
        if self.registry.is_linked(&a2b) {
            return Err(LabError::DirectLinkExists { a, b });
        }

        self.require_registered(&a)?;
        self.require_registered(&b)?;
        self.require_registered(&m)?;

        let relay_exists = || LabError::RelayLinkExists {
            a: a.clone(),
            b: b.clone(),
            relay: m.clone(),
        };

        if self.redirects.is_intercepted(&a2b) {
            return Err(relay_exists());
        }

        let sub_links = relay_sub_links(&a, &b, &m);
        if sub_links.iter().any(|link| self.registry.is_linked(link)) {
            return Err(relay_exists());
        }

        self.redirects.install(&a, &b, &m);
        for link in &sub_links {
            self.registry.create_link(&link.from, &link.to, LinkKind::Relay)?;
        }

        info!("Installed {} between {} and {}", m, a, b);
        Ok(())
    }

    /// Run every participant to termination
    ///
    /// Starts one thread per participant, in registration order, and returns
    /// once all of them have terminated. Failing or panicking participants
    /// are recorded in the report; they never abort the run. Participants
    /// blocked forever in `receive` keep this call blocked too.
    pub fn start(self) -> RunReport {
        let Environment {
            agents,
            registry,
            redirects,
            runtime,
            console,
            ..
        } = self;

        let run_id = Ulid::new().to_string();
        let span = info_span!("run", run_id = %run_id);
        let _entered = span.enter();

        info!(
            "Starting {} agents over {} channels ({} redirected pairs)",
            agents.len(),
            registry.len(),
            redirects.len()
        );
        if !redirects.is_empty() {
            debug!("Redirections:\n{}", redirects.describe());
        }

        let topology = Arc::new(Topology::new(registry, redirects));
        let started = Instant::now();

        let handles: Vec<RuntimeHandle> = agents
            .into_iter()
            .map(|agent| {
                let (id, task) = agent.into_parts();
                let ctx = AgentContext::new(id, Arc::clone(&topology), console.clone());
                runtime.spawn(task, ctx, &span)
            })
            .collect();

        let agents: Vec<AgentReport> = handles.into_iter().map(RuntimeHandle::join).collect();

        let channels = topology
            .registry()
            .stats()
            .into_iter()
            .map(|(pair, stats)| ChannelReport { pair, stats })
            .collect();

        let report = RunReport {
            run_id,
            elapsed: started.elapsed(),
            agents,
            channels,
        };

        for failure in report.failures() {
            warn!("Agent {} {}", failure.id, failure.outcome);
        }
        info!(
            "Run finished in {:?}, {} of {} agents completed",
            report.elapsed,
            report.agents.len() - report.failures().len(),
            report.agents.len()
        );

        report
    }

    /// Identities in registration order
    pub fn agent_ids(&self) -> impl Iterator<Item = &AgentId> {
        self.agents.iter().map(Agent::id)
    }

    pub fn contains_agent(&self, id: &str) -> bool {
        self.names.contains(id)
    }

    /// Whether a channel exists for exactly `(from, to)`
    pub fn has_channel(&self, from: &str, to: &str) -> bool {
        self.registry.contains(&DirectedPair::new(from, to))
    }

    pub fn channel_count(&self) -> usize {
        self.registry.len()
    }

    /// Relay installed between `a` and `b`, if any
    pub fn relay_between(&self, a: &str, b: &str) -> Option<&AgentId> {
        self.redirects.relay_for(&DirectedPair::new(a, b))
    }

    pub fn redirect_count(&self) -> usize {
        self.redirects.len()
    }

    fn require_registered(&self, id: &AgentId) -> Result<()> {
        if self.names.contains(id) {
            Ok(())
        } else {
            Err(LabError::NonExistentAgent(id.clone()))
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// The distinct links a relay install creates, as `(endpoint, relay)` pairs
fn relay_sub_links(a: &AgentId, b: &AgentId, m: &AgentId) -> Vec<DirectedPair> {
    let mut links: Vec<DirectedPair> = Vec::with_capacity(2);
    for endpoint in [a, b] {
        let link = DirectedPair::new(endpoint.clone(), m.clone());
        if !links.iter().any(|l| *l == link || l.reversed() == link) {
            links.push(link);
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::report::AgentOutcome;

    fn idle(name: &str) -> Agent {
        Agent::new(name, |_ctx| Ok(()))
    }

    fn with_agents(names: &[&str]) -> Environment {
        let mut env = Environment::new().with_console(Console::muted());
        for name in names {
            env.add(idle(name)).unwrap();
        }
        env
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut env = with_agents(&["alice"]);
        let err = env.add(idle("alice")).unwrap_err();
        assert_eq!(err, LabError::DuplicateName(AgentId::from("alice")));
        assert_eq!(env.agent_ids().count(), 1);
        assert!(env.contains_agent("alice"));
    }

    #[test]
    fn test_add_rejects_blank_names() {
        let mut env = with_agents(&[]);
        assert!(matches!(env.add(idle(" ")), Err(LabError::InvalidName(_))));
        assert!(matches!(env.add(idle("")), Err(LabError::InvalidName(_))));
        assert!(!env.contains_agent(" "));
        assert_eq!(env.agent_ids().count(), 0);
    }

    #[test]
    fn test_connect_creates_both_channels() {
        let mut env = with_agents(&["alice", "bob"]);
        env.connect("alice", "bob").unwrap();

        assert!(env.has_channel("alice", "bob"));
        assert!(env.has_channel("bob", "alice"));
        assert_eq!(env.channel_count(), 2);
    }

    #[test]
    fn test_connect_invalid_names() {
        let mut env = with_agents(&["alice"]);
        for (a, b) in [("alice", ""), ("", "alice"), ("alice", " "), (" ", "alice")] {
            assert!(matches!(env.connect(a, b), Err(LabError::InvalidName(_))));
        }
        assert_eq!(env.channel_count(), 0);
    }

    #[test]
    fn test_connect_unknown_agent() {
        let mut env = with_agents(&["alice"]);
        assert_eq!(
            env.connect("alice", "missing"),
            Err(LabError::NonExistentAgent(AgentId::from("missing")))
        );
        assert_eq!(
            env.connect("ghost", "alice"),
            Err(LabError::NonExistentAgent(AgentId::from("ghost")))
        );
    }

    #[test]
    fn test_connect_existing_either_direction() {
        let mut env = with_agents(&["alice", "bob"]);
        env.connect("bob", "alice").unwrap();

        assert!(matches!(
            env.connect("alice", "bob"),
            Err(LabError::DuplicateLink { .. })
        ));
        assert!(matches!(
            env.connect("bob", "alice"),
            Err(LabError::DuplicateLink { .. })
        ));
    }

    #[test]
    fn test_mitm_creates_relay_links_and_redirects() {
        let mut env = with_agents(&["a", "b", "m"]);
        env.mitm("a", "b", "m").unwrap();

        for (from, to) in [("a", "m"), ("m", "a"), ("b", "m"), ("m", "b")] {
            assert!(env.has_channel(from, to), "missing {} -> {}", from, to);
        }
        assert!(!env.has_channel("a", "b"));
        assert_eq!(env.channel_count(), 4);
        assert_eq!(env.redirect_count(), 2);
        assert_eq!(env.relay_between("b", "a").map(AgentId::as_str), Some("m"));
    }

    #[test]
    fn test_mitm_on_direct_link() {
        let mut env = with_agents(&["alice", "bob"]);
        env.connect("alice", "bob").unwrap();

        // Direct link check comes before the existence check
        assert!(matches!(
            env.mitm("alice", "bob", "ccc"),
            Err(LabError::DirectLinkExists { .. })
        ));
        assert!(matches!(
            env.mitm("bob", "alice", "ccc"),
            Err(LabError::DirectLinkExists { .. })
        ));
    }

    #[test]
    fn test_mitm_invalid_names() {
        let mut env = with_agents(&["a", "b"]);
        assert!(matches!(env.mitm("a", "b", " "), Err(LabError::InvalidName(_))));
        assert!(matches!(env.mitm("", "b", "a"), Err(LabError::InvalidName(_))));
    }

    #[test]
    fn test_mitm_unknown_relay() {
        let mut env = with_agents(&["a", "b"]);
        assert_eq!(
            env.mitm("a", "b", "m"),
            Err(LabError::NonExistentAgent(AgentId::from("m")))
        );
        assert_eq!(env.redirect_count(), 0);
    }

    #[test]
    fn test_mitm_colliding_with_relay_link_leaves_topology_unchanged() {
        let mut env = with_agents(&["alice", "mitm"]);
        env.connect("alice", "mitm").unwrap();

        let err = env.mitm("alice", "alice", "mitm").unwrap_err();
        assert!(matches!(err, LabError::RelayLinkExists { .. }));
        assert_eq!(env.channel_count(), 2);
        assert_eq!(env.redirect_count(), 0);
    }

    #[test]
    fn test_second_mitm_on_same_pair() {
        let mut env = with_agents(&["a", "b", "m", "n"]);
        env.mitm("a", "b", "m").unwrap();

        assert!(matches!(
            env.mitm("b", "a", "n"),
            Err(LabError::RelayLinkExists { .. })
        ));
        assert_eq!(env.channel_count(), 4);
        assert_eq!(env.relay_between("a", "b").map(AgentId::as_str), Some("m"));
    }

    #[test]
    fn test_connect_colliding_with_relay() {
        let mut env = with_agents(&["a", "b", "m"]);
        env.mitm("a", "b", "m").unwrap();

        assert!(matches!(
            env.connect("m", "a"),
            Err(LabError::RelayLinkExists { .. })
        ));
        assert!(matches!(
            env.connect("a", "b"),
            Err(LabError::RelayLinkExists { .. })
        ));
        assert_eq!(env.channel_count(), 4);
    }

    #[test]
    fn test_relay_sub_links_dedupe() {
        let a = AgentId::from("a");
        let m = AgentId::from("m");
        assert_eq!(relay_sub_links(&a, &a, &m).len(), 1);
        assert_eq!(relay_sub_links(&a, &AgentId::from("b"), &m).len(), 2);
    }

    #[test]
    fn test_start_with_no_agents() {
        let report = with_agents(&[]).start();
        assert!(report.agents.is_empty());
        assert!(report.all_completed());
    }

    #[test]
    fn test_start_runs_everyone_in_registration_order() {
        let env = with_agents(&["c", "a", "b"]);
        let report = env.start();

        let order: Vec<_> = report.agents.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
        assert!(report
            .agents
            .iter()
            .all(|a| a.outcome == AgentOutcome::Completed));
    }
}
