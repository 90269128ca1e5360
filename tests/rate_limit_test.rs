// ABOUTME: Tests for the fixed-window rate limiter shared by all clients
// ABOUTME: Covers exhaustion, window reset, and status reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

mod common;

use recipe_genie_server::config::RateLimitConfig;
use recipe_genie_server::errors::ErrorCode;
use recipe_genie_server::rate_limit::RateLimiter;
use std::time::Duration;

#[test]
fn test_exactly_capacity_requests_succeed_in_one_window() {
    common::init_test_logging();
    let limiter = RateLimiter::new(RateLimitConfig {
        capacity: 30,
        window_secs: 60,
    });

    for _ in 0..30 {
        limiter.try_acquire().unwrap();
    }
    let err = limiter.try_acquire().unwrap_err();
    assert_eq!(err.code, ErrorCode::RateLimitExceeded);
    assert!(err.message.contains("30"));
}

#[test]
fn test_window_elapse_restores_full_capacity() {
    common::init_test_logging();
    let limiter = RateLimiter::new(RateLimitConfig {
        capacity: 2,
        window_secs: 1,
    });

    limiter.try_acquire().unwrap();
    limiter.try_acquire().unwrap();
    assert!(limiter.try_acquire().is_err());

    std::thread::sleep(Duration::from_millis(1100));

    limiter.try_acquire().unwrap();
    limiter.try_acquire().unwrap();
    assert!(limiter.try_acquire().is_err());
}

#[test]
fn test_status_tracks_remaining_capacity() {
    common::init_test_logging();
    let limiter = RateLimiter::new(RateLimitConfig {
        capacity: 5,
        window_secs: 60,
    });

    assert_eq!(limiter.status().remaining, 5);
    limiter.try_acquire().unwrap();
    limiter.try_acquire().unwrap();
    let status = limiter.status();
    assert_eq!(status.limit, 5);
    assert_eq!(status.remaining, 3);
}

#[test]
fn test_rejection_does_not_consume_capacity() {
    common::init_test_logging();
    let limiter = RateLimiter::new(RateLimitConfig {
        capacity: 1,
        window_secs: 1,
    });

    limiter.try_acquire().unwrap();
    for _ in 0..10 {
        assert!(limiter.try_acquire().is_err());
    }

    // Rejected attempts must not extend or refill the window
    std::thread::sleep(Duration::from_millis(1100));
    limiter.try_acquire().unwrap();
}
