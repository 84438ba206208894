//! Worker tasks that back the runtime orchestration.
//!
//! Each session owns one worker that serializes its turns; handles talk to
//! it over a command channel.

mod session;

pub(crate) use session::{Command, SessionWorker};
