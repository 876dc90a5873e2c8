// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! BAM text-generation client for the llmperf harness.
//!
//! [`BamClient`] sends one streamed chat request per call and reduces the
//! newline-delimited JSON response into [`llmperf_common_core::RequestMetrics`].

mod client;
mod reducer;
mod stream;
mod types;

pub use client::BamClient;
pub use reducer::ChunkReducer;
pub use stream::NdjsonLines;
pub use types::*;
