//! Chat webhook embeds
//!
//! Embeds are posted as `{"embeds": [embed]}` to a Discord-compatible
//! webhook URL.

use reqwest::Client;
use serde::Serialize;

use super::RelayError;

pub const COLOUR_RED: u32 = 0xFF0000;
pub const COLOUR_GREEN: u32 = 0x00FF00;
pub const COLOUR_BLUE: u32 = 0x0000FF;

/// Embed author line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    /// Serialized as `null` when the author has no picture
    pub icon_url: Option<String>,
}

/// A single rich embed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
}

impl Embed {
    /// Blue embed with a title and description
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color: COLOUR_BLUE,
            url: None,
            author: None,
        }
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// Set the title link; empty URLs are ignored
    pub fn url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.url = (!url.is_empty()).then_some(url);
        self
    }

    /// Set the author line; empty names are ignored
    pub fn author(mut self, name: impl Into<String>, icon_url: Option<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.author = Some(EmbedAuthor { name, icon_url });
        }
        self
    }
}

#[derive(Serialize)]
struct WebhookMessage<'a> {
    embeds: [&'a Embed; 1],
}

/// Outbound chat webhook
#[derive(Clone)]
pub struct ChatWebhook {
    client: Client,
    url: Option<String>,
}

impl ChatWebhook {
    pub fn new(client: Client, url: Option<String>) -> Self {
        Self { client, url }
    }

    /// Post one embed.
    ///
    /// # Errors
    ///
    /// Fails when no webhook URL is configured, the request cannot be sent,
    /// or the webhook answers with an error status.
    pub async fn send(&self, embed: &Embed) -> Result<(), RelayError> {
        let url = self
            .url
            .as_deref()
            .ok_or(RelayError::NotConfigured { what: "ASANA_WEBHOOK" })?;

        tracing::debug!(title = %embed.title, "sending embed");
        self.client
            .post(url)
            .json(&WebhookMessage { embeds: [embed] })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
