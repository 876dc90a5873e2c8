// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Reduces streamed chunks into timing samples and the latest generated text.

use std::time::{Duration, Instant};

use llmperf_common_core::LlmError;
use tracing::debug;

use crate::types::BamChunk;

/// Accumulates per-chunk state for one streamed request.
///
/// Every chunk carries the full text generated so far, so the running text is
/// replaced rather than appended. Gaps are measured on the monotonic clock
/// from the previous chunk, or from request start for the first one, which
/// makes their sum equal to the time of the last chunk.
#[derive(Debug)]
pub struct ChunkReducer {
	start: Instant,
	last_chunk_at: Option<Instant>,
	gaps: Vec<Duration>,
	generated_text: String,
}

impl ChunkReducer {
	pub fn new(start: Instant) -> Self {
		Self {
			start,
			last_chunk_at: None,
			gaps: Vec::new(),
			generated_text: String::new(),
		}
	}

	/// Folds one line of the response body in, received at `now`.
	///
	/// Blank lines are ignored. A chunk carrying an `error` object is returned
	/// as [`LlmError::Api`] and records no gap; the caller stops reading.
	pub fn observe(&mut self, line: &str, now: Instant) -> Result<(), LlmError> {
		let line = line.trim();
		if line.is_empty() {
			return Ok(());
		}

		debug!(chunk = line, "Received chunk");

		let chunk: BamChunk = serde_json::from_str(line)
			.map_err(|e| LlmError::InvalidResponse(format!("malformed chunk: {e}")))?;

		if chunk.results.is_none() && chunk.error.is_none() {
			return Err(LlmError::InvalidResponse(
				"chunk has neither results nor error".to_string(),
			));
		}

		if chunk.results.as_ref().is_some_and(Vec::is_empty) {
			return Err(LlmError::InvalidResponse(
				"chunk has an empty results list".to_string(),
			));
		}

		if let Some(text) = chunk.generated_text() {
			debug!(generated_text = text, "Extracted generated text");
			self.generated_text.clear();
			self.generated_text.push_str(text);
		}

		if let Some(error) = chunk.error {
			return Err(LlmError::Api {
				code: error.code,
				message: error.message,
			});
		}

		let previous = self.last_chunk_at.unwrap_or(self.start);
		self.gaps.push(now.saturating_duration_since(previous));
		self.last_chunk_at = Some(now);
		Ok(())
	}

	pub fn chunk_count(&self) -> usize {
		self.gaps.len()
	}

	pub fn gaps(&self) -> &[Duration] {
		&self.gaps
	}

	/// Sum of the gaps recorded so far.
	pub fn inter_token_latency(&self) -> Duration {
		self.gaps.iter().sum()
	}

	/// Time from request start to the last chunk, or to `stream_end` when the
	/// body carried no chunks.
	pub fn end_to_end_latency(&self, stream_end: Instant) -> Duration {
		self.last_chunk_at
			.unwrap_or(stream_end)
			.saturating_duration_since(self.start)
	}

	/// Output tokens attributed to this request.
	///
	/// Chunks carry cumulative text without token counts, so nothing is
	/// counted here and this is always zero. The harness recounts output
	/// tokens from the generated text with its own tokenizer.
	pub fn output_tokens(&self) -> u64 {
		0
	}

	pub fn generated_text(&self) -> &str {
		&self.generated_text
	}

	pub fn into_generated_text(self) -> String {
		self.generated_text
	}
}
