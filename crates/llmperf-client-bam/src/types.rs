// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! BAM API configuration and wire types.

use std::time::Duration;

use llmperf_common_config::{require_env, require_secret_env, RequiredEnvError, SecretString};
use llmperf_common_core::{RequestConfig, UNKNOWN_ERROR_CODE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const API_BASE_ENV: &str = "BAM_API_BASE";
pub const API_KEY_ENV: &str = "BAM_API_KEY";
pub const DEFAULT_API_VERSION: &str = "2024-02-27";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Errors that prevent a [`crate::BamClient`] from being built.
#[derive(Debug, Error)]
pub enum BamClientError {
	#[error("configuration error: {0}")]
	Config(#[from] RequiredEnvError),

	#[error("failed to build HTTP client: {0}")]
	Http(String),
}

/// Configuration for the BAM client.
#[derive(Debug, Clone)]
pub struct BamConfig {
	pub api_base: String,
	pub api_key: SecretString,
	pub api_version: String,
	/// Limit on connecting and on each read of the response; the stream as a
	/// whole is not capped.
	pub timeout: Duration,
}

impl BamConfig {
	pub fn new(api_base: impl Into<String>, api_key: impl Into<SecretString>) -> Self {
		Self {
			api_base: api_base.into(),
			api_key: api_key.into(),
			api_version: DEFAULT_API_VERSION.to_string(),
			timeout: DEFAULT_TIMEOUT,
		}
	}

	/// Loads `BAM_API_BASE` and `BAM_API_KEY` (or `BAM_API_KEY_FILE`).
	pub fn from_env() -> Result<Self, RequiredEnvError> {
		Self::from_env_vars(API_BASE_ENV, API_KEY_ENV)
	}

	/// Loads the base address and key from the named variables. Both must be
	/// set and non-empty.
	pub fn from_env_vars(base_var: &str, key_var: &str) -> Result<Self, RequiredEnvError> {
		let api_base = require_env(base_var)?;
		let api_key = require_secret_env(key_var)?;
		Ok(Self::new(api_base, api_key))
	}

	pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
		self.api_version = api_version.into();
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// The chat endpoint, `{base}/v2/text/chat?version={api_version}`.
	pub fn chat_url(&self) -> String {
		let separator = if self.api_base.ends_with('/') { "" } else { "/" };
		format!(
			"{}{separator}v2/text/chat?version={}",
			self.api_base, self.api_version
		)
	}
}

/// BAM chat request body.
#[derive(Debug, Clone, Serialize)]
pub struct BamChatRequest {
	pub model_id: String,
	pub messages: Vec<BamMessage>,
	pub parameters: BamParameters,
	pub moderations: BamModerations,
}

impl BamChatRequest {
	/// Wraps the prompt in an empty system turn plus a user turn, with fixed
	/// decoding parameters and moderation thresholds.
	pub fn from_request_config(config: &RequestConfig) -> Self {
		Self {
			model_id: config.model.clone(),
			messages: vec![
				BamMessage::new("system", ""),
				BamMessage::new("user", config.prompt.text.clone()),
			],
			parameters: BamParameters::default(),
			moderations: BamModerations::default(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BamMessage {
	pub role: String,
	pub content: String,
}

impl BamMessage {
	pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			role: role.into(),
			content: content.into(),
		}
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct BamParameters {
	pub decoding_method: String,
	pub repetition_penalty: f64,
	pub min_new_tokens: u32,
	pub max_new_tokens: u32,
}

impl Default for BamParameters {
	fn default() -> Self {
		Self {
			decoding_method: "greedy".to_string(),
			repetition_penalty: 1.2,
			min_new_tokens: 1,
			max_new_tokens: 1024,
		}
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct BamModerations {
	pub hap: ModerationThreshold,
	pub stigma: ModerationThreshold,
}

impl Default for BamModerations {
	fn default() -> Self {
		Self {
			hap: ModerationThreshold::both(0.75),
			stigma: ModerationThreshold::both(0.75),
		}
	}
}

/// Moderation threshold applied to the input, the output, or both.
#[derive(Debug, Clone, Serialize)]
pub struct ModerationThreshold {
	pub threshold: f64,
	pub input: bool,
	pub output: bool,
}

impl ModerationThreshold {
	pub fn both(threshold: f64) -> Self {
		Self {
			threshold,
			input: true,
			output: true,
		}
	}
}

/// One newline-delimited JSON object from the streamed response.
#[derive(Debug, Clone, Deserialize)]
pub struct BamChunk {
	#[serde(default)]
	pub results: Option<Vec<BamResult>>,
	#[serde(default)]
	pub error: Option<BamChunkError>,
}

impl BamChunk {
	/// `results[0].generated_text`, when present.
	pub fn generated_text(&self) -> Option<&str> {
		self.results
			.as_ref()
			.and_then(|results| results.first())
			.and_then(|result| result.generated_text.as_deref())
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct BamResult {
	#[serde(default)]
	pub generated_text: Option<String>,
}

/// Error object embedded in a streamed chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct BamChunkError {
	#[serde(default)]
	pub message: String,
	#[serde(default = "unknown_error_code")]
	pub code: i64,
}

fn unknown_error_code() -> i64 {
	UNKNOWN_ERROR_CODE
}
