// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for llmperf.
//!
//! Every client built here sends the same `llmperf/{version}` User-Agent so
//! load-test traffic is easy to pick out in server logs.

mod client;

pub use client::{builder, builder_with_timeout, user_agent};
