//! # rbmap - THE BINARY
//!
//! Library half of the rbmap command-line tool: argument handling, input
//! loading, pipeline driving and external enrichment. The deterministic
//! engine itself lives in `rbmap-core`.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 apps/rbmap (THE BINARY)              │
//! │                                                      │
//! │  ┌──────────┐   ┌───────────────┐   ┌────────────┐  │
//! │  │   CLI    │   │ file/stdin IO │   │ enrichment │  │
//! │  │  (clap)  │   │               │   │ (reqwest)  │  │
//! │  └────┬─────┘   └───────┬───────┘   └─────┬──────┘  │
//! │       └─────────────────┼─────────────────┘         │
//! │                         ▼                           │
//! │                 ┌───────────────┐                   │
//! │                 │  rbmap-core   │                   │
//! │                 │  (THE LOGIC)  │                   │
//! │                 └───────────────┘                   │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod enrich;
