// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Environment variable helpers.
//!
//! Secrets follow the `VAR` / `VAR_FILE` convention: when `VAR_FILE` is set
//! the value is read from that path (Docker and Kubernetes secret mounts),
//! otherwise `VAR` is used directly.

use std::path::PathBuf;
use std::{env, fs};

use thiserror::Error;

use crate::secret::SecretString;

/// Errors that can occur when reading a secret file.
#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Error returned when a required value is absent or blank.
#[derive(Debug, Error)]
pub enum RequiredEnvError {
	#[error("the environment variable {var} must be set")]
	Missing { var: String },

	#[error("the environment variable {var} is set but empty")]
	Empty { var: String },

	#[error(transparent)]
	Load(#[from] SecretEnvError),
}

/// Load a secret from `{var}_FILE` or `{var}`, in that order.
///
/// A single trailing newline is stripped from file contents. Returns
/// `Ok(None)` when neither variable is set.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path) = env::var(&file_var) {
		if path.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(path);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;
		let value = content.strip_suffix('\n').unwrap_or(&content);
		return Ok(Some(SecretString::from(value)));
	}

	Ok(env::var(var).ok().map(SecretString::from))
}

/// Read a required, non-empty plain value.
pub fn require_env(var: &str) -> Result<String, RequiredEnvError> {
	match env::var(var) {
		Ok(value) if value.is_empty() => Err(RequiredEnvError::Empty {
			var: var.to_string(),
		}),
		Ok(value) => Ok(value),
		Err(_) => Err(RequiredEnvError::Missing {
			var: var.to_string(),
		}),
	}
}

/// Read a required, non-empty secret via [`load_secret_env`].
pub fn require_secret_env(var: &str) -> Result<SecretString, RequiredEnvError> {
	match load_secret_env(var)? {
		Some(secret) if secret.expose().is_empty() => Err(RequiredEnvError::Empty {
			var: var.to_string(),
		}),
		Some(secret) => Ok(secret),
		None => Err(RequiredEnvError::Missing {
			var: var.to_string(),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	// Each test owns a unique variable name; tests run in parallel.

	#[test]
	fn require_env_reads_value() {
		let var = "LLMPERF_TEST_REQUIRE_ENV_SET";
		env::set_var(var, "https://bam.example.com");

		assert_eq!(require_env(var).unwrap(), "https://bam.example.com");

		env::remove_var(var);
	}

	#[test]
	fn require_env_rejects_missing() {
		let var = "LLMPERF_TEST_REQUIRE_ENV_MISSING";
		env::remove_var(var);

		assert!(matches!(
			require_env(var),
			Err(RequiredEnvError::Missing { var: v }) if v == var
		));
	}

	/// An empty value is as unusable as a missing one.
	#[test]
	fn require_env_rejects_empty() {
		let var = "LLMPERF_TEST_REQUIRE_ENV_EMPTY";
		env::set_var(var, "");

		assert!(matches!(require_env(var), Err(RequiredEnvError::Empty { .. })));

		env::remove_var(var);
	}

	#[test]
	fn secret_file_takes_precedence_and_strips_newline() {
		let var = "LLMPERF_TEST_SECRET_FILE_PRECEDENCE";
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "from-file").unwrap();

		env::set_var(var, "from-env");
		env::set_var(format!("{var}_FILE"), file.path().to_str().unwrap());

		let secret = require_secret_env(var).unwrap();
		assert_eq!(secret.expose(), "from-file");

		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn secret_reads_direct_value() {
		let var = "LLMPERF_TEST_SECRET_DIRECT";
		env::set_var(var, "direct-key");
		env::remove_var(format!("{var}_FILE"));

		assert_eq!(load_secret_env(var).unwrap().unwrap().expose(), "direct-key");

		env::remove_var(var);
	}

	#[test]
	fn secret_missing_is_none_or_error() {
		let var = "LLMPERF_TEST_SECRET_MISSING";
		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));

		assert!(load_secret_env(var).unwrap().is_none());
		assert!(matches!(
			require_secret_env(var),
			Err(RequiredEnvError::Missing { .. })
		));
	}

	#[test]
	fn secret_file_errors_surface() {
		let var = "LLMPERF_TEST_SECRET_BAD_FILE";
		env::set_var(format!("{var}_FILE"), "/nonexistent/llmperf/secret");

		assert!(matches!(
			require_secret_env(var),
			Err(RequiredEnvError::Load(SecretEnvError::Io { .. }))
		));

		env::set_var(format!("{var}_FILE"), "");
		assert!(matches!(
			load_secret_env(var),
			Err(SecretEnvError::EmptyPath { .. })
		));

		env::remove_var(format!("{var}_FILE"));
	}
}
