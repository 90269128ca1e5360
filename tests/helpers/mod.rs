// ABOUTME: Shared integration test helpers
// ABOUTME: Currently just the Axum in-process request harness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

pub mod axum_test;
