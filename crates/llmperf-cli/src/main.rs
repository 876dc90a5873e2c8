// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! llmperf - load-test driver for the BAM chat API.
//!
//! Reads `BAM_API_BASE` and `BAM_API_KEY` from the environment, issues the
//! requested number of streamed chat requests and prints one JSON object per
//! request on stdout. Logs go to stderr.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use llmperf_client_bam::{BamClient, BamConfig};
use llmperf_common_core::{LlmClient, Prompt, RequestConfig};

mod runner;

/// Load-test the BAM chat API
#[derive(Parser, Debug)]
#[command(name = "llmperf", version, about, long_about = None)]
struct Args {
	/// Model id to request
	#[arg(short, long, env = "LLMPERF_MODEL")]
	model: String,

	/// Prompt text
	#[arg(long, conflicts_with = "prompt_file", required_unless_present = "prompt_file")]
	prompt: Option<String>,

	/// Read the prompt text from a file
	#[arg(long)]
	prompt_file: Option<PathBuf>,

	/// Prompt length in tokens (defaults to the prompt's word count)
	#[arg(long)]
	prompt_tokens: Option<u64>,

	/// Total number of requests to send
	#[arg(short, long, default_value_t = 1)]
	num_requests: usize,

	/// Maximum requests in flight at once
	#[arg(short, long, default_value_t = 1)]
	concurrency: usize,

	/// Connect and per-read timeout in seconds (default 180)
	#[arg(long)]
	timeout_secs: Option<u64>,

	/// Log level, used when RUST_LOG is unset
	#[arg(short, long, default_value = "info")]
	log_level: String,

	/// Output logs as JSON
	#[arg(long)]
	json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing(&args.log_level, args.json_logs);

	let mut config = BamConfig::from_env().context("failed to load BAM configuration")?;
	if let Some(secs) = args.timeout_secs {
		config = config.with_timeout(Duration::from_secs(secs));
	}
	let client: Arc<dyn LlmClient> = Arc::new(BamClient::new(config)?);

	let prompt = load_prompt(&args)?;
	let request_config = RequestConfig::new(args.model.clone(), prompt).with_llm_api("bam");

	info!(
		model = %args.model,
		num_requests = args.num_requests,
		concurrency = args.concurrency,
		"Starting run"
	);

	let stdout = std::io::stdout();
	let summary = runner::run_requests(
		client,
		request_config,
		args.num_requests,
		args.concurrency,
		|outcome| {
			let line = serde_json::to_string(outcome).context("failed to serialize outcome")?;
			writeln!(stdout.lock(), "{line}").context("failed to write outcome")?;
			Ok(())
		},
	)
	.await?;

	info!(
		completed = summary.completed,
		errors = summary.errors,
		mean_end_to_end_s = ?summary.mean_end_to_end_s(),
		"Run finished"
	);

	Ok(())
}

fn init_tracing(log_level: &str, json: bool) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

	if json {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().json().with_writer(std::io::stderr))
			.init();
	} else {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().compact().with_writer(std::io::stderr))
			.init();
	}
}

fn load_prompt(args: &Args) -> Result<Prompt> {
	let text = match (&args.prompt, &args.prompt_file) {
		(Some(text), _) => text.clone(),
		(None, Some(path)) => std::fs::read_to_string(path)
			.with_context(|| format!("failed to read prompt file {}", path.display()))?,
		(None, None) => anyhow::bail!("either --prompt or --prompt-file is required"),
	};

	let token_len = args
		.prompt_tokens
		.unwrap_or_else(|| approximate_token_len(&text));
	Ok(Prompt::new(text, token_len))
}

/// Whitespace-separated word count, used when no token length is given.
fn approximate_token_len(text: &str) -> u64 {
	text.split_whitespace().count() as u64
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(extra: &[&str]) -> Args {
		let mut argv = vec!["llmperf", "--model", "ibm/granite"];
		argv.extend_from_slice(extra);
		Args::try_parse_from(argv).unwrap()
	}

	#[test]
	fn prompt_token_len_defaults_to_word_count() {
		let args = parse(&["--prompt", "tell me  a\nstory"]);
		let prompt = load_prompt(&args).unwrap();

		assert_eq!(prompt.text, "tell me  a\nstory");
		assert_eq!(prompt.token_len, 4);
	}

	#[test]
	fn explicit_prompt_tokens_win() {
		let args = parse(&["--prompt", "hi", "--prompt-tokens", "17"]);
		assert_eq!(load_prompt(&args).unwrap().token_len, 17);
	}

	#[test]
	fn prompt_can_come_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "from a file").unwrap();

		let args = parse(&["--prompt-file", file.path().to_str().unwrap()]);
		let prompt = load_prompt(&args).unwrap();

		assert_eq!(prompt.text, "from a file");
		assert_eq!(prompt.token_len, 3);
	}

	#[test]
	fn prompt_is_required() {
		let result = Args::try_parse_from(["llmperf", "--model", "m"]);
		assert!(result.is_err());
	}

	#[test]
	fn defaults_are_single_request() {
		let args = parse(&["--prompt", "hi"]);
		assert_eq!(args.num_requests, 1);
		assert_eq!(args.concurrency, 1);
		assert!(args.timeout_secs.is_none());
	}
}
