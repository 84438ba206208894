//! Per-submission state machine.
//!
//! ```text
//! Idle ──begin──▶ Submitting ──commit──▶ Committed
//!   ▲                 │
//!   └──── dropped ────┘
//! ```
//!
//! Transitions use compare-and-swap, so at most one submission can be in
//! flight and a committed submission can never be repeated.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::traits::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SubmissionState {
    Idle = 0,
    Submitting = 1,
    Committed = 2,
}

impl SubmissionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => SubmissionState::Idle,
            1 => SubmissionState::Submitting,
            _ => SubmissionState::Committed,
        }
    }
}

/// Lock-free guard for one kind of ledger submission.
#[derive(Debug)]
pub struct SubmissionGuard {
    state: AtomicU8,
}

impl SubmissionGuard {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(SubmissionState::Idle as u8),
        }
    }

    pub fn state(&self) -> SubmissionState {
        SubmissionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Moves `Idle → Submitting`.
    ///
    /// The returned ticket moves the guard back to `Idle` when dropped,
    /// unless [`SubmissionTicket::commit`] is called first.
    pub fn begin(&self) -> Result<SubmissionTicket<'_>, LedgerError> {
        match self.state.compare_exchange(
            SubmissionState::Idle as u8,
            SubmissionState::Submitting as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => Ok(SubmissionTicket { guard: self }),
            Err(actual) => match SubmissionState::from_u8(actual) {
                SubmissionState::Committed => Err(LedgerError::AlreadyCommitted),
                _ => Err(LedgerError::SubmissionInFlight),
            },
        }
    }
}

impl Default for SubmissionGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that a submission is in flight.
#[must_use = "dropping the ticket immediately returns the guard to Idle"]
#[derive(Debug)]
pub struct SubmissionTicket<'a> {
    guard: &'a SubmissionGuard,
}

impl SubmissionTicket<'_> {
    /// Moves `Submitting → Committed`.
    pub fn commit(self) {
        self.guard
            .state
            .store(SubmissionState::Committed as u8, Ordering::Release);
        std::mem::forget(self);
    }
}

impl Drop for SubmissionTicket<'_> {
    fn drop(&mut self) {
        self.guard
            .state
            .store(SubmissionState::Idle as u8, Ordering::Release);
    }
}
