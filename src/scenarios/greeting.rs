// src/scenarios/greeting.rs
//! Three fully connected agents greeting each other

use crate::runtime::{Agent, Environment};
use crate::utils::errors::Result;

/// Register `alice`, `bob` and `charlie` on `env` and connect every pair
///
/// Each agent sends `"from <Name>"` to both peers before reading, so no
/// agent waits on a message that is never sent.
pub fn install(env: &mut Environment) -> Result<()> {
    env.add(Agent::new("alice", |ctx| {
        ctx.send("bob", "from Alice")?;
        ctx.send("charlie", "from Alice")?;
        ctx.print(format_args!("Got {}", ctx.receive_string("bob")?));
        ctx.print(format_args!("Got {}", ctx.receive_string("charlie")?));
        Ok(())
    }))?;

    env.add(Agent::new("bob", |ctx| {
        ctx.send("alice", "from Bob")?;
        ctx.send("charlie", "from Bob")?;
        ctx.print(format_args!("Got {}", ctx.receive_string("alice")?));
        ctx.print(format_args!("Got {}", ctx.receive_string("charlie")?));
        Ok(())
    }))?;

    env.add(Agent::new("charlie", |ctx| {
        ctx.send("bob", "from Charlie")?;
        ctx.send("alice", "from Charlie")?;
        ctx.print(format_args!("Got {}", ctx.receive_string("alice")?));
        ctx.print(format_args!("Got {}", ctx.receive_string("bob")?));
        Ok(())
    }))?;

    env.connect("alice", "bob")?;
    env.connect("alice", "charlie")?;
    env.connect("charlie", "bob")?;
    Ok(())
}
