//! Run counters shared by all workers

use crate::worker::FetchOutcome;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic tallies for one run
#[derive(Debug, Default)]
pub struct RunCounters {
    dispatched: AtomicU64,
    succeeded: AtomicU64,
    invalid_response: AtomicU64,
    timed_out: AtomicU64,
    transport_failed: AtomicU64,
    persist_failed: AtomicU64,
}

impl RunCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "dispatched", "Counter incremented");
    }

    pub fn record(&self, outcome: &FetchOutcome) {
        let (counter, name) = match outcome {
            FetchOutcome::Success { .. } => (&self.succeeded, "succeeded"),
            FetchOutcome::InvalidResponse { .. } => (&self.invalid_response, "invalid_response"),
            FetchOutcome::Timeout => (&self.timed_out, "timed_out"),
            FetchOutcome::TransportError { .. } => (&self.transport_failed, "transport_failed"),
            FetchOutcome::PersistFailed { .. } => (&self.persist_failed, "persist_failed"),
        };
        counter.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = name, "Counter incremented");
    }

    pub fn snapshot(&self) -> RunSummary {
        RunSummary {
            total: self.dispatched.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            invalid_response: self.invalid_response.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            transport_failed: self.transport_failed.load(Ordering::Relaxed),
            persist_failed: self.persist_failed.load(Ordering::Relaxed),
        }
    }
}

/// Final tallies of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: u64,
    pub succeeded: u64,
    pub invalid_response: u64,
    pub timed_out: u64,
    pub transport_failed: u64,
    pub persist_failed: u64,
}

impl RunSummary {
    pub fn failed(&self) -> u64 {
        self.total.saturating_sub(self.succeeded)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={} succeeded={} invalid={} timeout={} transport={} persist={}",
            self.total,
            self.succeeded,
            self.invalid_response,
            self.timed_out,
            self.transport_failed,
            self.persist_failed
        )
    }
}
