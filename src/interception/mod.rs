// src/interception/mod.rs
//! Transparent traffic interception
//!
//! A relay ("man in the middle") is installed by rewriting the pairs the two
//! endpoints use. Endpoint code stays unchanged:
//!
//! ```text
//! alice.send("bob")      → (alice, mallory) channel → mallory.receive("alice")
//! mallory.send("bob")    → (mallory, bob) channel   → bob.receive("alice")
//! ```

pub mod redirection_table;

pub use redirection_table::{Redirect, RedirectionTable};
