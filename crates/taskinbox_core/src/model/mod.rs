//! Domain model for the task inbox.
//!
//! # Responsibility
//! - Define the canonical `Task` record shared by the service, the HTTP
//!   adapter and the client mirror.
//! - Own title normalization so every entry point applies the same rule.
//!
//! # Invariants
//! - Every task is identified by a `TaskId` allocated by the repository.
//! - Titles are trimmed and never empty.

pub mod task;
