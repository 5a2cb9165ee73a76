//! Suspension mechanism used for rate-limit cooldowns.
#![allow(clippy::future_not_send)]

use std::time::Duration;

/// Waits out a cooldown.
///
/// Injected into the client so tests can record cooldowns instead of
/// sleeping on the wall clock.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[trait_variant::make(Sleeper: Send)]
pub trait LocalSleeper {
    /// Suspends the calling task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Default sleeper backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
