// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration primitives shared by llmperf crates.
//!
//! - [`Secret<T>`]: keeps credentials out of logs and debug output
//! - [`require_env`] / [`require_secret_env`]: load required values from the
//!   environment, with `*_FILE` support for secrets

pub mod env;
pub mod secret;

pub use env::{load_secret_env, require_env, require_secret_env, RequiredEnvError, SecretEnvError};
pub use secret::{Secret, SecretString, REDACTED};
