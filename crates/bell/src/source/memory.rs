//! In-memory summary source
//!
//! Replays scripted responses. Used by tests and demos in place of a
//! live backend.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use super::SummarySource;
use crate::error::FetchError;
use crate::models::NotificationSnapshot;

type FetchResult = Result<NotificationSnapshot, FetchError>;

#[derive(Clone)]
struct Scripted {
    delay: Duration,
    result: FetchResult,
}

/// Summary source that replays queued responses in order
///
/// Once the queue runs dry the last response is repeated. A source that was
/// never scripted returns an empty snapshot.
#[derive(Default)]
pub struct InMemorySource {
    queue: Mutex<VecDeque<Scripted>>,
    last: Mutex<Option<Scripted>>,
    calls: AtomicUsize,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source that always answers with `snapshot`
    pub fn returning(snapshot: NotificationSnapshot) -> Self {
        let source = Self::new();
        source.push(Ok(snapshot));
        source
    }

    /// Queue a response delivered immediately
    pub fn push(&self, result: FetchResult) {
        self.push_delayed(Duration::ZERO, result);
    }

    /// Queue a response delivered after `delay`
    pub fn push_delayed(&self, delay: Duration, result: FetchResult) {
        lock(&self.queue).push_back(Scripted { delay, result });
    }

    /// Number of fetches issued so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> Scripted {
        if let Some(next) = lock(&self.queue).pop_front() {
            *lock(&self.last) = Some(next.clone());
            return next;
        }
        lock(&self.last).clone().unwrap_or(Scripted {
            delay: Duration::ZERO,
            result: Ok(NotificationSnapshot::default()),
        })
    }
}

#[async_trait]
impl SummarySource for InMemorySource {
    async fn fetch_summary(&self) -> FetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Scripted { delay, result } = self.next();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
