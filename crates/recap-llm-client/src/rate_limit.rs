//! Fixed-window rate limiting for upstream classification calls.
//!
//! This is a fixed-window, admit-then-wait limiter: the call that breaches a
//! limit is itself counted before the wait, so short-term throughput can
//! burst above the nominal limit near window boundaries. That imprecision is
//! part of the contract; a sliding-window or token-bucket limiter would
//! change observable timing.

use std::time::Duration;

use tokio::time::Instant;
use tracing::info;

/// Accounting window for both the request and token budgets.
pub const WINDOW: Duration = Duration::from_secs(60);

/// Estimate the token volume of a prompt as its whitespace word count.
pub fn estimate_tokens(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Fixed-window request/token limiter.
///
/// One instance gates one upstream call site; pass it by `&mut` rather than
/// sharing it behind a global. Counters reset whenever the elapsed time since
/// the window start reaches the 60-second window.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    max_tokens: u32,
    request_count: u32,
    token_count: u32,
    window_start: Instant,
}

impl RateLimiter {
    /// Create a limiter with per-window request and token budgets.
    pub fn new(max_requests: u32, max_tokens: u32) -> Self {
        Self {
            max_requests,
            max_tokens,
            request_count: 0,
            token_count: 0,
            window_start: Instant::now(),
        }
    }

    /// Account for one upstream call, sleeping out the rest of the window
    /// when a budget is breached.
    ///
    /// This is the only suspension point in the curation pipeline. The
    /// limiter never fails; a zero or negative remaining wait is a no-op.
    pub async fn enforce(&mut self, tokens_estimate: u32) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.window_start);

        if elapsed >= WINDOW {
            self.request_count = 0;
            self.token_count = 0;
            self.window_start = now;
        }

        // The breaching call is itself counted.
        self.request_count += 1;
        self.token_count = self.token_count.saturating_add(tokens_estimate);

        if self.request_count > self.max_requests || self.token_count > self.max_tokens {
            let wait = WINDOW.saturating_sub(elapsed);
            if !wait.is_zero() {
                info!(
                    wait_secs = wait.as_secs_f64(),
                    requests = self.request_count,
                    tokens = self.token_count,
                    "Rate limit hit, sleeping until the window resets"
                );
                tokio::time::sleep(wait).await;
            }
            self.request_count = 0;
            self.token_count = 0;
            self.window_start = Instant::now();
        }
    }

    /// Requests counted in the current window.
    pub fn request_count(&self) -> u32 {
        self.request_count
    }

    /// Tokens counted in the current window.
    pub fn token_count(&self) -> u32 {
        self.token_count
    }
}
