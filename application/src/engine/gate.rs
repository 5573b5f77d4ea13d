//! Concurrency gate: process-wide admission control for outbound calls.
//!
//! Wraps a [`tokio::sync::Semaphore`], which queues waiters in FIFO order
//! and hands a released permit directly to the oldest waiter. A permit is
//! held by a [`GatePermit`] guard and given back when the guard drops, so
//! release happens exactly once on success, error, panic and cancellation
//! alike.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("Concurrency gate is closed")]
    Closed,
}

#[derive(Debug, Default)]
struct Counters {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

/// Bounded admission gate shared by every operation of one context.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    counters: Arc<Counters>,
}

impl ConcurrencyGate {
    /// Creates a gate with `capacity` permits (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Waits for a permit.
    pub async fn acquire(&self) -> Result<GatePermit, GateError> {
        if self.semaphore.available_permits() == 0 {
            debug!(
                "Concurrency gate saturated ({} in flight), waiting for a permit",
                self.in_flight()
            );
        }

        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| GateError::Closed)?;

        let now = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak.fetch_max(now, Ordering::SeqCst);

        Ok(GatePermit {
            _permit: permit,
            counters: Arc::clone(&self.counters),
        })
    }

    /// Runs `fut` while holding a permit.
    pub async fn run_with_permit<F, T>(&self, fut: F) -> Result<T, GateError>
    where
        F: Future<Output = T>,
    {
        let _permit = self.acquire().await?;
        Ok(fut.await)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Number of permits currently held.
    pub fn in_flight(&self) -> usize {
        self.counters.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of permits held at once since creation.
    pub fn peak_in_flight(&self) -> usize {
        self.counters.peak.load(Ordering::SeqCst)
    }
}

/// A held permit; dropping it releases the permit.
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
    counters: Arc<Counters>,
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
