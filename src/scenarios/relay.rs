// src/scenarios/relay.rs
//! Two agents talking through a relay that rewrites their messages

use crate::runtime::{Agent, AgentContext, AgentTask, Environment};
use crate::utils::errors::Result;

/// Relay forwarding one message each way, upper-cased
#[derive(Debug, Clone)]
pub struct UppercaseRelay {
    pub first: String,
    pub second: String,
}

impl UppercaseRelay {
    fn forward(&self, ctx: &AgentContext, from: &str, to: &str) -> anyhow::Result<()> {
        let intercepted = ctx.receive_string(from)?;
        ctx.print(format_args!(
            "Forwarding '{}' from '{}' to '{}'",
            intercepted, from, to
        ));
        ctx.send(to, intercepted.to_uppercase())?;
        Ok(())
    }
}

impl AgentTask for UppercaseRelay {
    fn run(self: Box<Self>, ctx: &AgentContext) -> anyhow::Result<()> {
        self.forward(ctx, &self.first, &self.second)?;
        self.forward(ctx, &self.second, &self.first)?;
        ctx.print("Done");
        Ok(())
    }
}

/// Register `alice`, `bob` and `mallory`, with `mallory` relaying the
/// `alice`/`bob` link
pub fn install(env: &mut Environment) -> Result<()> {
    env.add(Agent::new("alice", |ctx| {
        ctx.send("bob", "from Alice")?;
        ctx.print(format_args!("Got '{}'", ctx.receive_string("bob")?));
        Ok(())
    }))?;

    env.add(Agent::new("bob", |ctx| {
        ctx.send("alice", "from Bob")?;
        ctx.print(format_args!("Got '{}'", ctx.receive_string("alice")?));
        Ok(())
    }))?;

    env.add(Agent::from_task(
        "mallory",
        UppercaseRelay {
            first: "alice".to_string(),
            second: "bob".to_string(),
        },
    ))?;

    env.mitm("alice", "bob", "mallory")?;
    Ok(())
}
