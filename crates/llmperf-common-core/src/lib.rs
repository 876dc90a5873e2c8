// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared contract between llmperf clients and the load-testing harness.
//!
//! The harness hands a [`RequestConfig`] to an [`LlmClient`] and receives a
//! [`RequestOutcome`]: the per-request [`RequestMetrics`], the generated text
//! and the original configuration.

pub mod client;
pub mod error;
pub mod metrics;
pub mod request;

pub use client::*;
pub use error::*;
pub use metrics::*;
pub use request::*;
