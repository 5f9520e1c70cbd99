//! Async helpers that let page time pass on the tokio clock.

use std::time::Duration;

use tokio::time::Instant;

use crate::session::PageSession;

/// Sleeps until `deadline`, or never returns when there is none. Meant for
/// one arm of a `tokio::select!` loop.
pub async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Lets `duration` elapse, running deferred sidebar work at each deadline
/// on the way. Returns how many deferred tasks ran.
pub async fn settle(session: &mut PageSession, duration: Duration) -> usize {
    let until = Instant::now() + duration;
    let mut fired = session.run_due_timers();
    while let Some(deadline) = session.next_deadline().filter(|deadline| *deadline <= until) {
        tokio::time::sleep_until(deadline).await;
        fired += session.run_due_timers();
    }
    tokio::time::sleep_until(until).await;
    fired
}
