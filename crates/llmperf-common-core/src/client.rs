// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::metrics::RequestOutcome;
use crate::request::RequestConfig;

/// Trait for clients driven by the load-testing harness.
///
/// Implementations hold no per-request state, so one instance can serve many
/// concurrent calls. Request failures are reported through the returned
/// metrics rather than as an `Err`.
#[async_trait]
pub trait LlmClient: Send + Sync {
	/// Issues one request and reduces its response into metrics.
	async fn llm_request(&self, request_config: RequestConfig) -> RequestOutcome;
}
