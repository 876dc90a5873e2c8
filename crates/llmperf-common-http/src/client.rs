// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Creates a client builder with the standard llmperf User-Agent header.
///
/// # Example
/// ```ignore
/// let client = llmperf_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a client builder with the standard User-Agent that bounds connecting
/// and each individual read by `timeout`.
///
/// There is no cap on the total request time, so a body that keeps streaming
/// can run past `timeout` as long as no single read stalls that long.
pub fn builder_with_timeout(timeout: Duration) -> ClientBuilder {
	builder().connect_timeout(timeout).read_timeout(timeout)
}

/// Returns the standard User-Agent string, `llmperf/{version}`.
pub fn user_agent() -> String {
	format!("llmperf/{}", env!("CARGO_PKG_VERSION"))
}
