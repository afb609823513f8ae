// src/scenarios/faulty.rs
//! One agent failing mid-task next to one that runs to completion

use crate::runtime::{Agent, Environment};
use crate::utils::errors::Result;

/// Register `alice`, whose task fails after two lines, and `bob`, who prints
/// eight lines
pub fn install(env: &mut Environment) -> Result<()> {
    env.add(Agent::new("alice", |ctx| {
        ctx.print("AA");
        ctx.print("AA");
        anyhow::bail!("attempt to divide by zero");
    }))?;

    env.add(Agent::new("bob", |ctx| {
        for _ in 0..8 {
            ctx.print("BB");
        }
        Ok(())
    }))?;

    Ok(())
}
