//! Countdown poll updater.
//!
//! Each startup poll owns a long-lived task that re-renders the poll
//! message's `Time Left` field once a minute until the poll expires, the
//! message goes away, or a supervisor cancels it. Tasks share no state
//! with each other; the only external resource a task touches is its own
//! message.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::countdown::format_countdown;

/// Interval between countdown re-renders.
pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Consecutive transient edit failures tolerated before giving up.
const MAX_TRANSIENT_FAILURES: u32 = 3;

/// Errors from a single edit attempt on the poll message.
#[derive(Debug, Error)]
pub enum PollEditError {
    /// The edit failed but the message should still exist (network error,
    /// rate limit). Worth tolerating for a tick or two.
    #[error("transient edit failure: {0}")]
    Transient(String),

    /// The message was deleted or is no longer reachable. No retry is
    /// meaningful.
    #[error("poll message gone: {0}")]
    Gone(String),
}

/// Terminal failures of an updater task, reported to its spawner.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("poll message gone: {0}")]
    MessageGone(String),

    #[error("gave up after {attempts} consecutive failed edits: {last}")]
    RenderFailed { attempts: u32, last: String },
}

/// How an updater task ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The countdown reached zero and the terminal `0s` render was
    /// committed.
    Expired,

    /// A supervisor cancelled the task before expiry.
    Cancelled,
}

/// The editable message a poll task owns.
///
/// Implementations replace the message's countdown field with the given
/// text and commit the edit; calling with the same value twice is safe.
#[async_trait]
pub trait CountdownTarget: Send + Sync {
    async fn render(&self, countdown: &str) -> Result<(), PollEditError>;
}

/// Drive one poll message's countdown until expiry or cancellation.
///
/// Remaining time is recomputed from the absolute end instant on every
/// tick, never decremented, so a delayed wakeup does not accumulate
/// drift. When the recomputed remainder is no longer positive the task
/// commits exactly one terminal `0s` render and exits with
/// [`PollOutcome::Expired`]; it never shows a negative countdown.
pub async fn run_countdown_poll<T: CountdownTarget>(
    target: T,
    initial_secs: i64,
    cancel: CancellationToken,
) -> Result<PollOutcome, PollError> {
    let end = Instant::now() + Duration::from_secs(initial_secs.max(0) as u64);
    let mut failures: u32 = 0;

    if initial_secs <= 0 {
        // Already expired on entry: commit the terminal state and stop.
        render_tolerant(&target, 0, &mut failures).await?;
        return Ok(PollOutcome::Expired);
    }

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(PollOutcome::Cancelled),
            _ = tokio::time::sleep(TICK_INTERVAL) => {}
        }

        let remaining = remaining_secs(end);
        render_tolerant(&target, remaining, &mut failures).await?;

        if remaining <= 0 {
            // The render above was the single terminal `0s` edit.
            return Ok(PollOutcome::Expired);
        }
    }
}

/// Signed seconds until `end`; negative once past it.
fn remaining_secs(end: Instant) -> i64 {
    let now = Instant::now();
    if now >= end {
        -((now - end).as_secs() as i64)
    } else {
        (end - now).as_secs() as i64
    }
}

async fn render_tolerant<T: CountdownTarget>(
    target: &T,
    remaining: i64,
    failures: &mut u32,
) -> Result<(), PollError> {
    match target.render(&format_countdown(remaining)).await {
        Ok(()) => {
            *failures = 0;
            Ok(())
        }
        Err(PollEditError::Gone(reason)) => Err(PollError::MessageGone(reason)),
        Err(PollEditError::Transient(reason)) => {
            *failures += 1;
            warn!(
                attempt = *failures,
                "countdown edit failed transiently: {}", reason
            );
            if *failures >= MAX_TRANSIENT_FAILURES {
                Err(PollError::RenderFailed {
                    attempts: *failures,
                    last: reason,
                })
            } else {
                Ok(())
            }
        }
    }
}

/// Supervision handle over every outstanding poll task.
///
/// The shutdown command cancels all of them so stale countdowns don't
/// keep editing messages for a server that is already down.
#[derive(Clone, Default)]
pub struct PollRegistry {
    tokens: Arc<Mutex<HashMap<u64, CancellationToken>>>,
}

impl PollRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a poll by message id; returns the token its task should
    /// select on.
    pub async fn register(&self, message_id: u64) -> CancellationToken {
        let token = CancellationToken::new();
        self.tokens.lock().await.insert(message_id, token.clone());
        token
    }

    /// Drop a finished poll's token.
    pub async fn remove(&self, message_id: u64) {
        self.tokens.lock().await.remove(&message_id);
    }

    /// Cancel every outstanding poll; returns how many were signalled.
    pub async fn cancel_all(&self) -> usize {
        let mut tokens = self.tokens.lock().await;
        let count = tokens.len();
        for (_, token) in tokens.drain() {
            token.cancel();
        }
        count
    }

    pub async fn active_count(&self) -> usize {
        self.tokens.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex as StdMutex;

    /// Records every render; can be scripted to fail.
    #[derive(Clone, Default)]
    struct RecordingTarget {
        renders: Arc<StdMutex<Vec<String>>>,
        // Pop-front script of failures injected before successes resume.
        failures: Arc<StdMutex<Vec<PollEditError>>>,
    }

    impl RecordingTarget {
        fn rendered(&self) -> Vec<String> {
            self.renders.lock().unwrap().clone()
        }

        fn fail_with(&self, errors: Vec<PollEditError>) {
            *self.failures.lock().unwrap() = errors;
        }
    }

    #[async_trait]
    impl CountdownTarget for RecordingTarget {
        async fn render(&self, countdown: &str) -> Result<(), PollEditError> {
            let mut failures = self.failures.lock().unwrap();
            if !failures.is_empty() {
                return Err(failures.remove(0));
            }
            drop(failures);
            self.renders.lock().unwrap().push(countdown.to_string());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_scenario_125_seconds() {
        let target = RecordingTarget::default();
        let outcome = run_countdown_poll(target.clone(), 125, CancellationToken::new())
            .await
            .unwrap();

        // Tick 1: 65s left. Tick 2: 5s left. Tick 3: past the end, one
        // terminal 0s render, then exit.
        assert_eq!(target.rendered(), vec!["1m 5s", "5s", "0s"]);
        assert_eq!(outcome, PollOutcome::Expired);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_renders_terminal_state_once() {
        let target = RecordingTarget::default();
        let outcome = run_countdown_poll(target.clone(), 0, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(target.rendered(), vec!["0s"]);
        assert_eq!(outcome, PollOutcome::Expired);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exact_tick_boundary() {
        let target = RecordingTarget::default();
        let outcome = run_countdown_poll(target.clone(), 120, CancellationToken::new())
            .await
            .unwrap();

        // At the second tick remaining is exactly 0: that render is the
        // terminal one and no fourth edit happens.
        assert_eq!(target.rendered(), vec!["1m", "0s"]);
        assert_eq!(outcome, PollOutcome::Expired);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_before_next_tick() {
        let target = RecordingTarget::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = run_countdown_poll(target.clone(), 600, cancel).await.unwrap();

        assert_eq!(outcome, PollOutcome::Cancelled);
        assert!(target.rendered().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_gone_terminates_immediately() {
        let target = RecordingTarget::default();
        target.fail_with(vec![PollEditError::Gone("404".into())]);

        let err = run_countdown_poll(target.clone(), 300, CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, PollError::MessageGone(_)));
        assert!(target.rendered().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_are_tolerated() {
        let target = RecordingTarget::default();
        target.fail_with(vec![
            PollEditError::Transient("edit 1".into()),
            PollEditError::Transient("edit 2".into()),
        ]);

        let outcome = run_countdown_poll(target.clone(), 240, CancellationToken::new())
            .await
            .unwrap();

        // The first two ticks fail transiently; later renders still land
        // and the poll reaches its terminal state.
        assert_eq!(outcome, PollOutcome::Expired);
        assert_eq!(target.rendered(), vec!["1m", "0s"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_transient_failures_become_terminal() {
        let target = RecordingTarget::default();
        target.fail_with(vec![
            PollEditError::Transient("edit 1".into()),
            PollEditError::Transient("edit 2".into()),
            PollEditError::Transient("edit 3".into()),
        ]);

        let err = run_countdown_poll(target.clone(), 3600, CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PollError::RenderFailed { attempts: 3, .. }
        ));
    }

    #[tokio::test]
    async fn test_registry_cancel_all() {
        let registry = PollRegistry::new();
        let a = registry.register(1).await;
        let b = registry.register(2).await;
        assert_eq!(registry.active_count().await, 2);

        let cancelled = registry.cancel_all().await;
        assert_eq!(cancelled, 2);
        assert!(a.is_cancelled());
        assert!(b.is_cancelled());
        assert_eq!(registry.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_registry_remove() {
        let registry = PollRegistry::new();
        let token = registry.register(7).await;
        registry.remove(7).await;

        assert_eq!(registry.active_count().await, 0);
        // Removal drops supervision without cancelling the task.
        assert!(!token.is_cancelled());
    }
}
