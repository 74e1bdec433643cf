//! Slack wire types (Block Kit subset and slash-command payloads).

use serde::{Deserialize, Serialize};

/// Text object inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextObject {
    /// Formatting flavour.
    #[serde(rename = "type")]
    pub kind: TextKind,
    /// The text.
    pub text: String,
}

/// Text formatting flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Slack markdown.
    Mrkdwn,
    /// Plain text.
    PlainText,
}

impl TextObject {
    /// Markdown text.
    #[must_use]
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text: text.into(),
        }
    }

    /// Plain text.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::PlainText,
            text: text.into(),
        }
    }
}

/// A Block Kit layout block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Block {
    /// A text section.
    Section {
        /// Section text.
        text: TextObject,
    },
    /// A horizontal rule.
    Divider,
}

impl Block {
    /// A markdown section.
    #[must_use]
    pub fn section(text: impl Into<String>) -> Self {
        Self::Section {
            text: TextObject::mrkdwn(text),
        }
    }
}

/// Who sees a slash-command response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Everyone in the channel.
    InChannel,
    /// Only the caller.
    Ephemeral,
}

/// Body returned to Slack for a slash command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackResponse {
    /// Visibility.
    pub response_type: ResponseType,
    /// Fallback text for notifications.
    pub text: String,
    /// Message layout.
    pub blocks: Vec<Block>,
}

impl SlackResponse {
    /// Private receipt for a command whose result is posted by the webhook.
    #[must_use]
    pub fn acknowledgement() -> Self {
        let text = ":white_check_mark: Done, posted to the channel.".to_string();
        Self {
            response_type: ResponseType::Ephemeral,
            blocks: vec![Block::section(text.clone())],
            text,
        }
    }

    /// Whether the response is visible to the whole channel.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.response_type == ResponseType::InChannel
    }
}

/// Incoming-webhook payload.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookMessage<'a> {
    /// Fallback text.
    pub text: &'a str,
    /// Message layout.
    pub blocks: &'a [Block],
}

/// Form fields Slack posts for a slash command.
#[derive(Debug, Clone, Deserialize)]
pub struct SlashCommandForm {
    /// The command, including the leading slash.
    pub command: String,
    /// Everything typed after the command.
    #[serde(default)]
    pub text: String,
    /// Caller's user id.
    pub user_id: String,
    /// Caller's display name.
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Form fields for an options (autocomplete) request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionsForm {
    /// What the user has typed so far.
    #[serde(default)]
    pub value: String,
}

/// One autocomplete option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    /// Label.
    pub text: TextObject,
    /// Value sent back on selection.
    pub value: String,
}

/// Autocomplete response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsResponse {
    /// Matching options.
    pub options: Vec<OptionItem>,
}

impl OptionsResponse {
    /// Build options whose label and value are both the name.
    #[must_use]
    pub fn from_names(names: Vec<String>) -> Self {
        Self {
            options: names
                .into_iter()
                .map(|name| OptionItem {
                    text: TextObject::plain(name.clone()),
                    value: name,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_serialize_in_block_kit_shape() {
        let json = serde_json::to_value(vec![Block::section("*hi*"), Block::Divider]).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "type": "section", "text": { "type": "mrkdwn", "text": "*hi*" } },
                { "type": "divider" }
            ])
        );
    }

    #[test]
    fn options_use_plain_text_labels() {
        let json = serde_json::to_value(OptionsResponse::from_names(vec!["rust".into()])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "options": [{ "text": { "type": "plain_text", "text": "rust" }, "value": "rust" }]
            })
        );
    }
}
