//! Client side of the task inbox.
//!
//! # Responsibility
//! - Talk to the task API over HTTP (`HttpTaskApi`).
//! - Keep a local, non-authoritative mirror of the task list (`TaskInbox`)
//!   that changes only after the server confirms an action.
//! - Project the mirror into a renderable view (`InboxView`).
//!
//! # Invariants
//! - The mirror is never updated from a locally computed guess; toggles and
//!   creates use the task returned by the server.
//! - A failed request leaves the mirror and the input untouched.

pub mod api;
pub mod error;
pub mod inbox;
pub mod view;

pub use api::{HttpTaskApi, TaskApi, DEFAULT_API_URL};
pub use error::ClientError;
pub use inbox::{ActionOutcome, TaskInbox};
pub use view::{InboxView, TaskRow, EMPTY_MESSAGE};
