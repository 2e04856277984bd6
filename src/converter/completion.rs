//! # Completion Client
//!
//! Sends one user message to a chat-completions API and streams the answer
//! back to the terminal while it is being generated.
//!
//! The pieces are kept separate so each can be exercised on its own:
//!
//! - [`build_message`] wraps the user's text in the command's prompt
//! - [`SseFragments`] turns a server-sent-events body into text fragments
//! - [`collect_stream`] echoes fragments as they arrive and accumulates them
//! - [`clean_response`] strips whitespace and one layer of quotes
//! - [`OpenAiBackend`] ties them to a real HTTP request
//!
//! Reading is blocking and has no timeout. A read error part-way through
//! fails the call; whatever was already echoed stays on screen.

use crate::config::Settings;
use crate::error::{ConverterError, Result};
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::io::{self, BufRead, BufReader, Write};
use std::time::Duration;
use tracing::debug;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

const DATA_PREFIX: &str = "data:";
const DONE_MARKER: &str = "[DONE]";

/// Anything that can turn one user message into a reply.
pub trait ChatBackend {
    fn chat(&self, content: &str) -> Result<String>;
    fn name(&self) -> &str;
}

/// Combines a prompt template and the user's text into one message.
pub fn build_message(prompt: &str, text: &str) -> String {
    format!("{}: ```{}```", prompt, text)
}

/// Trims whitespace and removes a single pair of surrounding quote characters.
pub fn clean_response(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
    unquoted.trim().to_string()
}

/// Echoes each fragment to `out` as soon as it arrives and returns the
/// cleaned concatenation once the sequence ends.
pub fn collect_stream<I, W>(fragments: I, out: &mut W) -> Result<String>
where
    I: IntoIterator<Item = Result<String>>,
    W: Write,
{
    let mut accumulated = String::new();
    for fragment in fragments {
        let fragment = fragment?;
        out.write_all(fragment.as_bytes())?;
        out.flush()?;
        accumulated.push_str(&fragment);
    }
    writeln!(out)?;

    Ok(clean_response(&accumulated))
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Debug, Default, Deserialize)]
struct Delta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Blocking iterator over the text fragments of a streamed completion.
///
/// Yields `choices[0].delta.content` of every `data:` event and stops at
/// `data: [DONE]` or at the end of the body, whichever comes first.
pub struct SseFragments<R> {
    reader: R,
    done: bool,
}

impl<R: BufRead> SseFragments<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }

    fn next_fragment(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let Some(data) = line.trim().strip_prefix(DATA_PREFIX) else {
                // blank separators, comments and event/id fields
                continue;
            };
            let data = data.trim();
            if data == DONE_MARKER {
                return Ok(None);
            }

            let chunk: StreamChunk = serde_json::from_str(data)?;
            if let Some(err) = chunk.error {
                return Err(ConverterError::Completion(err.message));
            }
            match chunk.choices.into_iter().next().and_then(|c| c.delta.content) {
                Some(content) if !content.is_empty() => return Ok(Some(content)),
                _ => continue,
            }
        }
    }
}

impl<R: BufRead> Iterator for SseFragments<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_fragment() {
            Ok(Some(fragment)) => Some(Ok(fragment)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Streaming client for an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiBackend {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    url: String,
}

impl OpenAiBackend {
    /// Builds a client from settings, taking the key from `OPENAI_API_KEY`.
    ///
    /// A missing key is not checked here; the API rejects the request.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = env::var(API_KEY_ENV).unwrap_or_default();
        Self::new(settings, api_key)
    }

    pub fn new(settings: &Settings, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            url: settings.completions_url(),
        })
    }

    fn request_body(&self, content: &str) -> serde_json::Value {
        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "stream": true,
            "messages": [{
                "role": "user",
                "content": content
            }]
        })
    }
}

impl ChatBackend for OpenAiBackend {
    fn chat(&self, content: &str) -> Result<String> {
        debug!(url = %self.url, model = %self.model, "opening completion stream");
        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(content))
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body: serde_json::Value = resp.json().unwrap_or_default();
            let message = body["error"]["message"]
                .as_str()
                .unwrap_or("Unknown API error");
            return Err(ConverterError::Completion(format!(
                "OpenAI API error ({}): {}",
                status, message
            )));
        }

        let fragments = SseFragments::new(BufReader::new(resp));
        collect_stream(fragments, &mut io::stdout().lock())
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sse(fragments: &[&str]) -> String {
        let mut body = String::new();
        for f in fragments {
            let chunk = json!({"choices": [{"delta": {"content": f}, "index": 0}]});
            body.push_str(&format!("data: {}\n\n", chunk));
        }
        body.push_str("data: [DONE]\n\n");
        body
    }

    #[test]
    fn test_build_message() {
        assert_eq!(
            build_message("Correct and improve the following text", "helo"),
            "Correct and improve the following text: ```helo```"
        );
    }

    #[test]
    fn test_clean_response_strips_quotes() {
        assert_eq!(clean_response("\"Hello\""), "Hello");
        assert_eq!(clean_response("  \"Hello\"\n"), "Hello");
        assert_eq!(clean_response("\"\"Hi\"\""), "\"Hi\"");
        assert_eq!(clean_response("plain"), "plain");
    }

    #[test]
    fn test_collect_stream_concatenates_and_echoes() {
        let fragments = vec![
            Ok("Hel".to_string()),
            Ok("lo".to_string()),
            Ok(" world".to_string()),
        ];
        let mut out = Vec::new();

        let result = collect_stream(fragments, &mut out).unwrap();

        assert_eq!(result, "Hello world");
        assert_eq!(String::from_utf8(out).unwrap(), "Hello world\n");
    }

    #[test]
    fn test_collect_stream_keeps_partial_echo_on_error() {
        let fragments = vec![
            Ok("Hel".to_string()),
            Err(ConverterError::Completion("connection reset".into())),
            Ok("never".to_string()),
        ];
        let mut out = Vec::new();

        let err = collect_stream(fragments, &mut out).unwrap_err();

        assert!(err.to_string().contains("connection reset"));
        assert_eq!(String::from_utf8(out).unwrap(), "Hel");
    }

    #[test]
    fn test_sse_fragments_until_done() {
        let body = sse(&["Hel", "lo", " world"]) + "data: {\"choices\":[{\"delta\":{\"content\":\"late\"}}]}\n";
        let fragments: Vec<String> = SseFragments::new(Cursor::new(body))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(fragments, vec!["Hel", "lo", " world"]);
    }

    #[test]
    fn test_sse_fragments_skip_role_and_empty_deltas() {
        let body = concat!(
            ": keep-alive\n\n",
            "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
        );
        let fragments: Vec<String> = SseFragments::new(Cursor::new(body))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(fragments, vec!["ok"]);
    }

    #[test]
    fn test_sse_error_event() {
        let body = "data: {\"error\":{\"message\":\"quota exceeded\"}}\n\n";
        let mut fragments = SseFragments::new(Cursor::new(body));
        let err = fragments.next().unwrap().unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert!(fragments.next().is_none());
    }

    #[test]
    fn test_sse_malformed_chunk_is_error() {
        let body = "data: {not json\n\n";
        let mut fragments = SseFragments::new(Cursor::new(body));
        assert!(matches!(
            fragments.next(),
            Some(Err(ConverterError::Serialization(_)))
        ));
    }

    #[test]
    fn test_stream_end_to_end_with_quotes() {
        let body = sse(&["\"Hel", "lo\""]);
        let mut out = Vec::new();
        let result = collect_stream(SseFragments::new(Cursor::new(body)), &mut out).unwrap();
        assert_eq!(result, "Hello");
    }

    #[test]
    fn test_request_body() {
        let settings = Settings::default();
        let backend = OpenAiBackend::new(&settings, "sk-test").unwrap();
        let body = backend.request_body("hi");
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hi");
        assert_eq!(backend.name(), "openai");
    }
}
