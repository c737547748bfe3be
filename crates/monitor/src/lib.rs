//! Session bootstrap and the fixed-interval refresh service.
//!
//! `Session` fetches and parses the account's positions once; the
//! `RefreshScheduler` then re-fetches quotes on a fixed interval,
//! recomputes the ordered classified rows, and republishes them to the
//! display sink until cancelled.

pub mod scheduler;
pub mod session;

pub use scheduler::{RefreshScheduler, SchedulerState};
pub use session::Session;
