//! Core modules for the missionctl pipeline.
//!
//! Data flows strictly forward: seed -> compose -> guard -> cosmic ->
//! audit, sequenced per (account, day) by the orchestrator. No module calls
//! back upstream.

pub mod audit;
pub mod compose;
pub mod config;
pub mod cosmic;
pub mod error;
pub mod guard;
pub mod orchestrator;
pub mod psych;
pub mod seed;
pub mod store;
pub mod time;
pub mod timeline;
