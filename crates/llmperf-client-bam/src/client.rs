// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! BAM chat API client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use llmperf_common_core::{LlmClient, LlmError, RequestConfig, RequestMetrics, RequestOutcome};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument, trace, warn};

use crate::reducer::ChunkReducer;
use crate::stream::NdjsonLines;
use crate::types::{BamChatRequest, BamClientError, BamConfig};

/// BAM API client.
///
/// Holds no per-request state; one instance can be shared across tasks.
/// Failures after construction are reported through the returned metrics.
pub struct BamClient {
	config: BamConfig,
	http_client: Client,
}

impl BamClient {
	pub fn new(config: BamConfig) -> Result<Self, BamClientError> {
		let http_client = llmperf_common_http::builder_with_timeout(config.timeout)
			.build()
			.map_err(|e| BamClientError::Http(e.to_string()))?;

		info!(
				base_url = %config.api_base,
				timeout_secs = config.timeout.as_secs(),
				"Initialized BAM client"
		);

		Ok(Self {
			config,
			http_client,
		})
	}

	/// Builds a client from `BAM_API_BASE` and `BAM_API_KEY`. Fails before any
	/// network I/O when either is missing.
	pub fn from_env() -> Result<Self, BamClientError> {
		Self::new(BamConfig::from_env()?)
	}

	pub fn config(&self) -> &BamConfig {
		&self.config
	}

	fn build_request(&self, body: &BamChatRequest) -> reqwest::RequestBuilder {
		let url = self.config.chat_url();

		trace!(
				url = %url,
				model = %body.model_id,
				"Building BAM request"
		);

		self.http_client
			.post(&url)
			.header("Content-Type", "application/json")
			.header(
				"Authorization",
				format!("Bearer {}", self.config.api_key.expose()),
			)
			.json(body)
	}

	/// Sends the request and feeds the body through `reducer`.
	///
	/// Returns the end-to-end latency on success.
	async fn stream_chat(
		&self,
		body: &BamChatRequest,
		reducer: &mut ChunkReducer,
	) -> Result<Duration, LlmError> {
		let response = self
			.build_request(body)
			.send()
			.await
			.map_err(|e| LlmError::transport(e.is_timeout(), e.to_string()))?;

		let status = response.status();
		if status != StatusCode::OK {
			debug!(status = %status, "Received error response from BAM");
			let body = response
				.text()
				.await
				.map_err(|e| LlmError::transport(e.is_timeout(), e.to_string()))?;
			return Err(LlmError::Status {
				code: status.as_u16(),
				body,
			});
		}

		let bytes = response
			.bytes_stream()
			.map_err(|e| LlmError::transport(e.is_timeout(), e.to_string()));
		let mut lines = std::pin::pin!(NdjsonLines::new(bytes));

		while let Some(line) = lines.next().await {
			reducer.observe(&line?, Instant::now())?;
		}

		Ok(reducer.end_to_end_latency(Instant::now()))
	}
}

#[async_trait]
impl LlmClient for BamClient {
	#[instrument(skip(self, request_config), fields(model = %request_config.model))]
	async fn llm_request(&self, request_config: RequestConfig) -> RequestOutcome {
		if request_config.sampling_params.is_some() {
			debug!("Sampling params are not forwarded to BAM");
		}

		let body = BamChatRequest::from_request_config(&request_config);
		let mut reducer = ChunkReducer::new(Instant::now());
		let result = self.stream_chat(&body, &mut reducer).await;

		let mut metrics = RequestMetrics::new(request_config.prompt.token_len);
		metrics.inter_token_latency_s = reducer.inter_token_latency().as_secs_f64();

		match result {
			Ok(end_to_end) => {
				metrics.end_to_end_latency_s = end_to_end.as_secs_f64();
				metrics = metrics.with_output_tokens(reducer.output_tokens());
				info!(
						chunks = reducer.chunk_count(),
						end_to_end_s = metrics.end_to_end_latency_s,
						text_len = reducer.generated_text().len(),
						"Request completed"
				);
			}
			Err(e) => {
				metrics = metrics.with_error(&e);
				warn!(
						error = %e,
						error_code = e.error_code(),
						chunks = reducer.chunk_count(),
						"Request failed"
				);
			}
		}

		RequestOutcome {
			metrics,
			generated_text: reducer.into_generated_text(),
			request_config,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_client_creation() {
		let config = BamConfig::new("https://bam.example.com", "test-api-key");
		let client = BamClient::new(config).unwrap();

		assert_eq!(
			client.config().chat_url(),
			"https://bam.example.com/v2/text/chat?version=2024-02-27"
		);
	}

	#[test]
	fn test_build_request_sets_auth_and_url() {
		let config = BamConfig::new("https://bam.example.com/", "test-api-key");
		let client = BamClient::new(config).unwrap();
		let body = BamChatRequest::from_request_config(&RequestConfig::new(
			"m",
			llmperf_common_core::Prompt::new("hi", 1),
		));

		let request = client.build_request(&body).build().unwrap();

		assert_eq!(request.method(), reqwest::Method::POST);
		assert_eq!(
			request.url().as_str(),
			"https://bam.example.com/v2/text/chat?version=2024-02-27"
		);
		assert_eq!(
			request.headers()["authorization"].to_str().unwrap(),
			"Bearer test-api-key"
		);
	}

	/// A client must be usable from many spawned tasks at once.
	#[test]
	fn test_client_is_send_and_sync() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<BamClient>();
	}
}
