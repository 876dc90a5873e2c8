// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Line splitter for newline-delimited JSON response bodies.

use bytes::Bytes;
use futures::Stream;
use llmperf_common_core::LlmError;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::trace;

pin_project! {
		/// Stream adapter that turns a body byte stream into trimmed, non-empty
		/// lines.
		///
		/// Lines may span network chunks; bytes are buffered until a `\n`
		/// arrives so multi-byte characters split across chunks decode intact.
		/// An unterminated final line is flushed when the body ends. After the
		/// first error the stream is exhausted.
		pub struct NdjsonLines<S> {
				#[pin]
				inner: S,
				buffer: Vec<u8>,
				// Bytes of `buffer` already known to hold no newline.
				scanned: usize,
				finished: bool,
		}
}

impl<S> NdjsonLines<S> {
	pub fn new(inner: S) -> Self {
		Self {
			inner,
			buffer: Vec::new(),
			scanned: 0,
			finished: false,
		}
	}
}

impl<S> Stream for NdjsonLines<S>
where
	S: Stream<Item = Result<Bytes, LlmError>>,
{
	type Item = Result<String, LlmError>;

	fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		let mut this = self.project();

		loop {
			if let Some(line) = take_line(this.buffer, this.scanned) {
				match line {
					Ok(line) if line.is_empty() => continue,
					Ok(line) => return Poll::Ready(Some(Ok(line))),
					Err(e) => {
						*this.finished = true;
						this.buffer.clear();
						return Poll::Ready(Some(Err(e)));
					}
				}
			}

			if *this.finished {
				return Poll::Ready(None);
			}

			match this.inner.as_mut().poll_next(cx) {
				Poll::Ready(Some(Ok(bytes))) => {
					trace!(bytes_len = bytes.len(), "Received body chunk");
					this.buffer.extend_from_slice(&bytes);
				}
				Poll::Ready(Some(Err(e))) => {
					*this.finished = true;
					this.buffer.clear();
					*this.scanned = 0;
					return Poll::Ready(Some(Err(e)));
				}
				Poll::Ready(None) => {
					*this.finished = true;
					let rest = std::mem::take(this.buffer);
					*this.scanned = 0;
					match decode_line(&rest) {
						Ok(line) if line.is_empty() => return Poll::Ready(None),
						other => return Poll::Ready(Some(other)),
					}
				}
				Poll::Pending => return Poll::Pending,
			}
		}
	}
}

/// Pops the first complete line, searching only bytes not seen by an earlier
/// call.
fn take_line(buffer: &mut Vec<u8>, scanned: &mut usize) -> Option<Result<String, LlmError>> {
	let Some(offset) = buffer[*scanned..].iter().position(|b| *b == b'\n') else {
		*scanned = buffer.len();
		return None;
	};
	let line: Vec<u8> = buffer.drain(..=*scanned + offset).collect();
	*scanned = 0;
	Some(decode_line(&line))
}

fn decode_line(raw: &[u8]) -> Result<String, LlmError> {
	std::str::from_utf8(raw)
		.map(|s| s.trim().to_string())
		.map_err(|e| LlmError::InvalidResponse(format!("Invalid UTF-8: {e}")))
}
