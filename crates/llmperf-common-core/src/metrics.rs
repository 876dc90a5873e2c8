// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Per-request metrics reported back to the harness.

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::request::RequestConfig;

/// Metric names as they appear in serialized output.
pub mod keys {
	pub const ERROR_CODE: &str = "error_code";
	pub const ERROR_MSG: &str = "error_msg";
	pub const INTER_TOKEN_LAT: &str = "inter_token_latency_s";
	pub const TTFT: &str = "ttft_s";
	pub const E2E_LAT: &str = "end_to_end_latency_s";
	pub const REQ_OUTPUT_THROUGHPUT: &str = "request_output_throughput_token_per_s";
	pub const NUM_TOTAL_TOKENS: &str = "number_total_tokens";
	pub const NUM_OUTPUT_TOKENS: &str = "number_output_tokens";
	pub const NUM_INPUT_TOKENS: &str = "number_input_tokens";
}

/// Metrics for one request.
///
/// Failed requests still produce a record; callers check [`Self::is_error`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestMetrics {
	pub error_code: Option<i64>,
	pub error_msg: String,
	pub inter_token_latency_s: f64,
	pub ttft_s: f64,
	pub end_to_end_latency_s: f64,
	pub request_output_throughput_token_per_s: f64,
	pub number_total_tokens: u64,
	pub number_output_tokens: u64,
	pub number_input_tokens: u64,
}

impl RequestMetrics {
	/// An empty record for a request with `input_tokens` prompt tokens.
	pub fn new(input_tokens: u64) -> Self {
		Self {
			error_code: None,
			error_msg: String::new(),
			inter_token_latency_s: 0.0,
			ttft_s: 0.0,
			end_to_end_latency_s: 0.0,
			request_output_throughput_token_per_s: 0.0,
			number_total_tokens: input_tokens,
			number_output_tokens: 0,
			number_input_tokens: input_tokens,
		}
	}

	/// Records the output token count and the throughput derived from it.
	///
	/// A zero latency yields zero throughput.
	pub fn with_output_tokens(mut self, output_tokens: u64) -> Self {
		self.number_output_tokens = output_tokens;
		self.number_total_tokens = output_tokens + self.number_input_tokens;
		self.request_output_throughput_token_per_s = if self.end_to_end_latency_s > 0.0 {
			output_tokens as f64 / self.end_to_end_latency_s
		} else {
			0.0
		};
		self
	}

	/// Records the code and message of a failed request.
	pub fn with_error(mut self, error: &LlmError) -> Self {
		self.error_code = Some(error.error_code());
		self.error_msg = error.error_message();
		self
	}

	pub fn is_error(&self) -> bool {
		self.error_code.is_some()
	}
}

/// Everything a client hands back to the harness for one request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RequestOutcome {
	pub metrics: RequestMetrics,
	pub generated_text: String,
	pub request_config: RequestConfig,
}
