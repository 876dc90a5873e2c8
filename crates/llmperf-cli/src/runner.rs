// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Fans requests out over tokio tasks with bounded concurrency.

use std::sync::Arc;

use anyhow::{Context, Result};
use llmperf_common_core::{LlmClient, RequestConfig, RequestOutcome};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// Runs `num_requests` copies of `request_config`, at most `concurrency` at a
/// time, calling `on_outcome` as each finishes (completion order).
pub async fn run_requests<F>(
	client: Arc<dyn LlmClient>,
	request_config: RequestConfig,
	num_requests: usize,
	concurrency: usize,
	mut on_outcome: F,
) -> Result<Summary>
where
	F: FnMut(&RequestOutcome) -> Result<()>,
{
	let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
	let mut tasks = JoinSet::new();

	for index in 0..num_requests {
		let client = Arc::clone(&client);
		let semaphore = Arc::clone(&semaphore);
		let request_config = request_config.clone();

		tasks.spawn(async move {
			let _permit = semaphore
				.acquire_owned()
				.await
				.context("request semaphore closed")?;
			debug!(index, "Starting request");
			Ok::<_, anyhow::Error>(client.llm_request(request_config).await)
		});
	}

	let mut summary = Summary::default();
	while let Some(joined) = tasks.join_next().await {
		let outcome = joined.context("request task panicked")??;
		on_outcome(&outcome)?;
		summary.record(&outcome);
	}

	Ok(summary)
}

/// Totals across a run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Summary {
	pub completed: usize,
	pub errors: usize,
	total_end_to_end_s: f64,
}

impl Summary {
	pub fn record(&mut self, outcome: &RequestOutcome) {
		self.completed += 1;
		if outcome.metrics.is_error() {
			self.errors += 1;
		} else {
			self.total_end_to_end_s += outcome.metrics.end_to_end_latency_s;
		}
	}

	/// Mean end-to-end latency of successful requests, if there were any.
	pub fn mean_end_to_end_s(&self) -> Option<f64> {
		let successes = self.completed - self.errors;
		(successes > 0).then(|| self.total_end_to_end_s / successes as f64)
	}
}
