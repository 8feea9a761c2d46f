//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for tasks.
//! - Keep collection and identifier bookkeeping out of the service layer.
//!
//! # Invariants
//! - Repository writes validate task input before mutating storage.
//! - Repository APIs return semantic errors (`NotFound`) for missing targets.

pub mod task_repo;
