//! Decoding the provider's server-sent events into tokens, and encoding
//! tokens into the frames the browser reads.
//!
//! Upstream events look like
//! `data: {"choices":[{"delta":{"content":"Hi"}}]}` and end with
//! `data: [DONE]`. Chunks from the network may split a line (or a UTF-8
//! sequence) anywhere, so bytes are buffered until a newline arrives.
//!
//! An `{"error":{...}}` event, or a connection that closes before
//! `[DONE]`, is a failure: the browser gets the error frame rather than a
//! partial reply dressed up as a finished one.

use std::collections::VecDeque;

use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use idea_garden_core::sse;
use serde::Deserialize;

use crate::error::AiError;
use crate::provider::TokenStream;

/// One decoded upstream event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    Token(String),
    /// The provider reported a failure inside the stream.
    Error(String),
    Done,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    error: Option<StreamError>,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Debug, Default, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

/// Incremental line decoder for an upstream event stream.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes and return the events it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<SseEvent>, AiError> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(event) = decode_line(&String::from_utf8_lossy(&line))? {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Decode whatever is left once the connection closes.
    pub fn finish(&mut self) -> Result<Vec<SseEvent>, AiError> {
        let rest = std::mem::take(&mut self.buffer);
        Ok(decode_line(&String::from_utf8_lossy(&rest))?
            .into_iter()
            .collect())
    }
}

fn decode_line(line: &str) -> Result<Option<SseEvent>, AiError> {
    let line = line.trim();
    // Blank separators, comments and non-data fields carry no tokens.
    let Some(payload) = line.strip_prefix("data:") else {
        return Ok(None);
    };
    let payload = payload.trim();
    if payload == "[DONE]" {
        return Ok(Some(SseEvent::Done));
    }

    let chunk: StreamChunk =
        serde_json::from_str(payload).map_err(|e| AiError::Decode(e.to_string()))?;
    if let Some(error) = chunk.error {
        let message = error.message.unwrap_or_else(|| "unknown error".to_string());
        return Ok(Some(SseEvent::Error(message)));
    }
    let token = chunk
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect::<String>();

    Ok((!token.is_empty()).then_some(SseEvent::Token(token)))
}

struct DecodeState<S> {
    bytes: S,
    decoder: SseDecoder,
    pending: VecDeque<String>,
    /// `[DONE]` seen; later tokens are ignored.
    done: bool,
    /// Upstream error event, yielded after the tokens before it.
    failure: Option<AiError>,
    /// Connection closed.
    closed: bool,
}

impl<S> DecodeState<S> {
    fn absorb(&mut self, events: Vec<SseEvent>) {
        for event in events {
            if self.done || self.failure.is_some() {
                break;
            }
            match event {
                SseEvent::Token(token) => self.pending.push_back(token),
                SseEvent::Error(message) => self.failure = Some(AiError::Stream(message)),
                SseEvent::Done => self.done = true,
            }
        }
    }
}

/// Turn a raw byte stream into a stream of token deltas.
///
/// The stream ends at `[DONE]`. A transport, decode or upstream error is
/// yielded once and ends the stream, as is [`AiError::Truncated`] when the
/// connection closes before `[DONE]`.
pub fn decode_tokens<S, E>(bytes: S) -> TokenStream
where
    S: Stream<Item = Result<Vec<u8>, E>> + Send + Unpin + 'static,
    E: Into<AiError> + Send + 'static,
{
    let state = DecodeState {
        bytes,
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        done: false,
        failure: None,
        closed: false,
    };

    stream::unfold(Some(state), |state| async move {
        let mut state = state?;
        loop {
            if let Some(token) = state.pending.pop_front() {
                return Some((Ok(token), Some(state)));
            }
            if let Some(e) = state.failure.take() {
                return Some((Err(e), None));
            }
            if state.done {
                return None;
            }
            if state.closed {
                return Some((Err(AiError::Truncated), None));
            }

            let decoded = match state.bytes.next().await {
                Some(Ok(chunk)) => state.decoder.push(&chunk),
                Some(Err(e)) => return Some((Err(e.into()), None)),
                None => {
                    state.closed = true;
                    state.decoder.finish()
                }
            };
            match decoded {
                Ok(events) => state.absorb(events),
                Err(e) => return Some((Err(e), None)),
            }
        }
    })
    .boxed()
}

/// Encode a token stream as browser frames: one content frame per
/// non-empty token, then `[DONE]`. A failure mid-stream emits the error
/// frame instead of `[DONE]` and closes.
pub fn into_frames(tokens: TokenStream) -> BoxStream<'static, String> {
    stream::unfold(Some(tokens), |tokens| async move {
        let mut tokens = tokens?;
        loop {
            match tokens.next().await {
                Some(Ok(token)) if token.is_empty() => continue,
                Some(Ok(token)) => return Some((sse::content_frame(&token), Some(tokens))),
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Chat stream failed mid-response");
                    return Some((sse::error_frame(), None));
                }
                None => return Some((sse::DONE_FRAME.to_string(), None)),
            }
        }
    })
    .boxed()
}

/// The whole response when generation cannot start.
pub fn error_only() -> BoxStream<'static, String> {
    stream::once(async { sse::error_frame() }).boxed()
}
