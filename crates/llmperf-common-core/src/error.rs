// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Error code recorded when a request fails without a structured error.
pub const UNKNOWN_ERROR_CODE: i64 = -1;

/// Errors that can occur while issuing a request and reading its stream.
///
/// Clients fold these into [`crate::RequestMetrics`] instead of returning them.
#[derive(Clone, Error, Debug, PartialEq)]
pub enum LlmError {
	#[error("HTTP error: {0}")]
	Http(String),

	#[error("Request timed out")]
	Timeout,

	#[error("HTTP status {code}: {body}")]
	Status { code: u16, body: String },

	#[error("API error {code}: {message}")]
	Api { code: i64, message: String },

	#[error("Invalid response: {0}")]
	InvalidResponse(String),
}

impl LlmError {
	/// Builds an error from a transport failure, keeping timeouts distinct.
	pub fn transport(is_timeout: bool, detail: impl Into<String>) -> Self {
		if is_timeout {
			LlmError::Timeout
		} else {
			LlmError::Http(detail.into())
		}
	}

	/// The code recorded in metrics for this failure.
	///
	/// Only failures that carried a code from the server report one; transport
	/// and parse failures fall back to [`UNKNOWN_ERROR_CODE`].
	pub fn error_code(&self) -> i64 {
		match self {
			LlmError::Status { code, .. } => i64::from(*code),
			LlmError::Api { code, .. } => *code,
			_ => UNKNOWN_ERROR_CODE,
		}
	}

	/// The message recorded in metrics for this failure.
	///
	/// Empty unless the server supplied one.
	pub fn error_message(&self) -> String {
		match self {
			LlmError::Status { body, .. } => body.clone(),
			LlmError::Api { message, .. } => message.clone(),
			_ => String::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_error_reports_http_code_and_body() {
		let err = LlmError::Status {
			code: 503,
			body: "overloaded".to_string(),
		};
		assert_eq!(err.error_code(), 503);
		assert_eq!(err.error_message(), "overloaded");
	}

	#[test]
	fn api_error_reports_payload_fields() {
		let err = LlmError::Api {
			code: 422,
			message: "bad model".to_string(),
		};
		assert_eq!(err.error_code(), 422);
		assert_eq!(err.error_message(), "bad model");
	}

	/// Failures without a server-provided code must record the unknown code
	/// and an empty message.
	#[test]
	fn unstructured_errors_use_defaults() {
		for err in [
			LlmError::Timeout,
			LlmError::Http("connection reset".to_string()),
			LlmError::InvalidResponse("expected value".to_string()),
		] {
			assert_eq!(err.error_code(), UNKNOWN_ERROR_CODE);
			assert!(err.error_message().is_empty());
		}
	}

	#[test]
	fn transport_keeps_timeouts_distinct() {
		assert_eq!(LlmError::transport(true, "ignored"), LlmError::Timeout);
		assert_eq!(
			LlmError::transport(false, "refused"),
			LlmError::Http("refused".to_string())
		);
	}
}
