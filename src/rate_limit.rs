// ABOUTME: Fixed-window rate limiter bounding generation attempts per time window
// ABOUTME: Check, increment and window reset share one mutex so the budget is never oversubscribed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! Fixed-window rate limiting.
//!
//! The limiter is an ordinary struct with injected configuration, never
//! ambient global state; tests construct as many independent instances as
//! they need. Acquisition is atomic: no two callers can both observe the
//! last free slot, and the window resets at most once per boundary because
//! the reset happens under the same lock as the increment.

use crate::config::RateLimitConfig;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::Mutex;
use std::time::Instant;

/// Snapshot of the limiter state, for headers and logging
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// Maximum requests allowed in the current window
    pub limit: u32,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// When the current window resets
    pub reset_at: DateTime<Utc>,
}

/// Mutable window state guarded by the limiter's mutex
#[derive(Debug)]
struct Window {
    count: u32,
    started: Instant,
}

/// Fixed-window rate limiter
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    window: Mutex<Window>,
}

impl RateLimiter {
    /// Create a limiter with the given capacity and window length
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            window: Mutex::new(Window {
                count: 0,
                started: Instant::now(),
            }),
        }
    }

    /// Try to consume one slot from the current window
    ///
    /// # Errors
    ///
    /// Returns [`AppError::rate_limit_exceeded`] when the window budget is
    /// spent. The caller should not retry before the window resets.
    pub fn try_acquire(&self) -> AppResult<()> {
        let mut window = self.lock();
        let now = Instant::now();

        if now.duration_since(window.started) >= self.config.window() {
            window.count = 0;
            window.started = now;
        }

        if window.count < self.config.capacity {
            window.count += 1;
            Ok(())
        } else {
            let reset_at = Self::reset_time(&window, self.config.window());
            Err(AppError::rate_limit_exceeded(
                self.config.capacity,
                reset_at,
            ))
        }
    }

    /// Current limiter status without consuming a slot
    #[must_use]
    pub fn status(&self) -> RateLimitStatus {
        let window = self.lock();
        let expired = window.started.elapsed() >= self.config.window();
        let used = if expired { 0 } else { window.count };
        RateLimitStatus {
            limit: self.config.capacity,
            remaining: self.config.capacity.saturating_sub(used),
            reset_at: if expired {
                Utc::now()
            } else {
                Self::reset_time(&window, self.config.window())
            },
        }
    }

    fn reset_time(window: &Window, length: std::time::Duration) -> DateTime<Utc> {
        let remaining = length.saturating_sub(window.started.elapsed());
        Utc::now()
            + ChronoDuration::from_std(remaining).unwrap_or_else(|_| ChronoDuration::seconds(0))
    }

    /// Lock the window, recovering the guard if a holder panicked
    fn lock(&self) -> std::sync::MutexGuard<'_, Window> {
        self.window.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
