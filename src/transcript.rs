//! Rendering of saved conversations.
//!
//! A transcript is a JSON array of `{ "role", "content" }` messages, or an
//! object holding that array under `messages`. Assistant turns go through
//! the full rendering pipeline; user turns are shown as escaped text.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TranscriptError;
use crate::render::{escape_html, render_message};

/// Conversation participant role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction message. Never rendered.
    System,
    User,
    Assistant,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    /// Text content. Null or absent for turns that carried only tool calls.
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptFile {
    Messages(Vec<Message>),
    Wrapped { messages: Vec<Message> },
}

/// Parse transcript JSON in either accepted shape.
pub fn parse_transcript(json: &str) -> Result<Vec<Message>, TranscriptError> {
    let messages = match serde_json::from_str::<TranscriptFile>(json)? {
        TranscriptFile::Messages(messages) => messages,
        TranscriptFile::Wrapped { messages } => messages,
    };
    Ok(messages)
}

/// Read and parse a transcript file.
pub fn load_transcript(path: &Path) -> Result<Vec<Message>, TranscriptError> {
    let text = std::fs::read_to_string(path)?;
    parse_transcript(&text)
}

/// Render every visible message, one `<div>` per message.
///
/// System messages and blank messages are skipped; a transcript with nothing
/// left to show is an error.
pub fn render_transcript(messages: &[Message]) -> Result<String, TranscriptError> {
    let rendered: Vec<String> = messages
        .iter()
        .filter_map(|message| {
            let content = message.content.as_deref()?;
            if content.trim().is_empty() {
                return None;
            }
            let body = match message.role {
                Role::System => return None,
                Role::User => render_user_text(content),
                Role::Assistant => render_message(content),
            };
            Some(format!(
                "<div class=\"message message-{}\">{body}</div>",
                message.role.as_str()
            ))
        })
        .collect();
    tracing::debug!(
        total = messages.len(),
        rendered = rendered.len(),
        "rendered transcript"
    );
    if rendered.is_empty() {
        return Err(TranscriptError::Empty);
    }
    Ok(rendered.join("\n"))
}

/// User text is shown as typed: escaped, with line breaks kept.
pub fn render_user_text(text: &str) -> String {
    let lines: Vec<String> = text.trim().lines().map(escape_html).collect();
    format!("<p>{}</p>", lines.join("<br>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(role: Role, content: &str) -> Message {
        Message {
            role,
            content: Some(content.to_string()),
        }
    }

    #[test]
    fn parses_bare_array() {
        let messages =
            parse_transcript(r#"[{"role":"user","content":"hi"},{"role":"assistant","content":null}]"#)
                .unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], msg(Role::User, "hi"));
        assert_eq!(messages[1].content, None);
    }

    #[test]
    fn parses_wrapped_object_and_missing_content() {
        let messages = parse_transcript(r#"{"messages":[{"role":"system"}]}"#).unwrap();
        assert_eq!(
            messages,
            vec![Message {
                role: Role::System,
                content: None
            }]
        );
    }

    #[test]
    fn unknown_role_is_a_json_error() {
        let err = parse_transcript(r#"[{"role":"robot","content":"x"}]"#).unwrap_err();
        assert!(matches!(err, TranscriptError::Json(_)), "got: {err}");
    }

    #[test]
    fn renders_user_and_assistant_messages() {
        let html = render_transcript(&[
            msg(Role::System, "be nice"),
            msg(Role::User, "is a < b?\nthanks"),
            msg(Role::Assistant, "**Yes**"),
        ])
        .unwrap();
        assert_eq!(
            html,
            "<div class=\"message message-user\"><p>is a &lt; b?<br>thanks</p></div>\n\
             <div class=\"message message-assistant\"><p><strong>Yes</strong></p></div>"
        );
    }

    #[test]
    fn blank_messages_are_skipped() {
        let html = render_transcript(&[msg(Role::User, "  "), msg(Role::Assistant, "ok")]).unwrap();
        assert!(!html.contains("message-user"), "{html}");
    }

    #[test]
    fn nothing_visible_is_empty_error() {
        let err = render_transcript(&[msg(Role::System, "x")]).unwrap_err();
        assert!(matches!(err, TranscriptError::Empty));
        assert!(matches!(render_transcript(&[]), Err(TranscriptError::Empty)));
    }
}
