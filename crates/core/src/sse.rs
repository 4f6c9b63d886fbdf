//! Frame format of the chat stream sent to the browser.
//!
//! Every frame is `data: <payload>\n\n`. Payloads are JSON objects carrying
//! either `content` or `error`, except the terminator `[DONE]`.

use serde::{Deserialize, Serialize};

pub const DONE_FRAME: &str = "data: [DONE]\n\n";
pub const STREAM_ERROR_MESSAGE: &str = "Failed to generate response";

const DATA_PREFIX: &str = "data: ";
const DONE_PAYLOAD: &str = "[DONE]";

#[derive(Debug, Serialize, Deserialize)]
struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn encode(payload: &Payload) -> String {
    // Serializing two optional strings cannot fail.
    let json = serde_json::to_string(payload).unwrap_or_default();
    format!("{DATA_PREFIX}{json}\n\n")
}

/// Frame carrying one token delta.
pub fn content_frame(token: &str) -> String {
    encode(&Payload {
        content: Some(token.to_string()),
        error: None,
    })
}

/// The single frame sent when generation fails.
pub fn error_frame() -> String {
    encode(&Payload {
        content: None,
        error: Some(STREAM_ERROR_MESSAGE.to_string()),
    })
}

/// A decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Content(String),
    Error(String),
    Done,
}

/// Decode a complete stream body. Lines that are not `data:` frames or
/// whose payload is not recognised are ignored.
pub fn parse_frames(body: &str) -> Vec<Frame> {
    body.split("\n\n")
        .filter_map(|chunk| chunk.trim().strip_prefix(DATA_PREFIX.trim_end()))
        .filter_map(|payload| {
            let payload = payload.trim();
            if payload == DONE_PAYLOAD {
                return Some(Frame::Done);
            }
            let parsed: Payload = serde_json::from_str(payload).ok()?;
            match (parsed.content, parsed.error) {
                (_, Some(error)) => Some(Frame::Error(error)),
                (Some(content), None) => Some(Frame::Content(content)),
                (None, None) => None,
            }
        })
        .collect()
}

/// Concatenate content frames up to `[DONE]`. `None` when the stream never
/// reached `[DONE]` or carried an error.
pub fn reassemble(body: &str) -> Option<String> {
    let mut text = String::new();
    for frame in parse_frames(body) {
        match frame {
            Frame::Content(token) => text.push_str(&token),
            Frame::Error(_) => return None,
            Frame::Done => return Some(text),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_frame_is_json_payload() {
        assert_eq!(content_frame("Hi"), "data: {\"content\":\"Hi\"}\n\n");
    }

    #[test]
    fn content_frame_escapes_newlines_and_quotes() {
        let frame = content_frame("line\n\"two\"");
        assert_eq!(frame, "data: {\"content\":\"line\\n\\\"two\\\"\"}\n\n");
        assert_eq!(frame.matches("\n\n").count(), 1);
    }

    #[test]
    fn error_frame_is_fixed() {
        assert_eq!(
            error_frame(),
            "data: {\"error\":\"Failed to generate response\"}\n\n"
        );
    }

    #[test]
    fn reassemble_joins_tokens_until_done() {
        let body = format!(
            "{}{}{}",
            content_frame("Hello"),
            content_frame(", world"),
            DONE_FRAME
        );
        assert_eq!(reassemble(&body).as_deref(), Some("Hello, world"));
        assert_eq!(parse_frames(&body).last(), Some(&Frame::Done));
    }

    #[test]
    fn reassemble_rejects_error_and_unterminated_streams() {
        let errored = format!("{}{}", content_frame("Hel"), error_frame());
        assert_eq!(reassemble(&errored), None);
        assert_eq!(reassemble(&content_frame("Hel")), None);
    }
}
