// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Per-request configuration supplied by the harness.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prompt text paired with its precomputed token count.
///
/// Serialized as a `[text, token_len]` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, u64)", into = "(String, u64)")]
pub struct Prompt {
	pub text: String,
	pub token_len: u64,
}

impl Prompt {
	pub fn new(text: impl Into<String>, token_len: u64) -> Self {
		Self {
			text: text.into(),
			token_len,
		}
	}
}

impl From<(String, u64)> for Prompt {
	fn from((text, token_len): (String, u64)) -> Self {
		Self { text, token_len }
	}
}

impl From<Prompt> for (String, u64) {
	fn from(prompt: Prompt) -> Self {
		(prompt.text, prompt.token_len)
	}
}

/// Configuration for a single request issued by the harness.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
	pub model: String,
	pub prompt: Prompt,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sampling_params: Option<Map<String, Value>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub llm_api: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<Map<String, Value>>,
}

impl RequestConfig {
	pub fn new(model: impl Into<String>, prompt: Prompt) -> Self {
		Self {
			model: model.into(),
			prompt,
			sampling_params: None,
			llm_api: None,
			metadata: None,
		}
	}

	pub fn with_sampling_params(mut self, sampling_params: Map<String, Value>) -> Self {
		self.sampling_params = Some(sampling_params);
		self
	}

	pub fn with_llm_api(mut self, llm_api: impl Into<String>) -> Self {
		self.llm_api = Some(llm_api.into());
		self
	}

	pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
		self.metadata = Some(metadata);
		self
	}
}
