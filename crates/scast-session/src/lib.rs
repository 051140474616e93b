//! Session-scoped job state store and poll scheduler.
//!
//! [`JobSession`] holds the single job the user is currently viewing and is
//! the only place that state is mutated. [`JobPoller`] drives repeated
//! fetches through the session until the job reaches a terminal status.

pub mod poller;
pub mod session;

pub use poller::{JobPoller, PollHandle, PollStep};
pub use session::{JobSession, JobView, SessionConfig};
