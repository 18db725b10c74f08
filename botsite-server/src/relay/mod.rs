//! Third-party webhook relays
//!
//! Asana task-tracker events are translated into chat embeds and posted to
//! the configured chat webhook.

pub mod asana;
pub mod discord;
pub mod json;

use serde_json::Value;

use botsite_core::SiteConfig;

pub use asana::{AsanaClient, AsanaDelivery, AsanaEvent};
pub use discord::{ChatWebhook, Embed, COLOUR_BLUE, COLOUR_GREEN, COLOUR_RED};

use json::json_block;

/// Relay error type
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("{what} is not configured")]
    NotConfigured { what: &'static str },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field '{field}' in {context}")]
    Missing {
        field: &'static str,
        context: &'static str,
    },
}

/// Asana → chat relay
#[derive(Clone)]
pub struct AsanaRelay {
    asana: AsanaClient,
    webhook: ChatWebhook,
}

impl AsanaRelay {
    pub fn new(asana: AsanaClient, webhook: ChatWebhook) -> Self {
        Self { asana, webhook }
    }

    /// Build the relay from site config, sharing one HTTP client.
    pub fn from_config(config: &SiteConfig, client: reqwest::Client) -> Self {
        Self::new(
            AsanaClient::new(
                client.clone(),
                config.asana.api_url.clone(),
                config.asana.token.clone(),
            ),
            ChatWebhook::new(client, config.asana.webhook_url.clone()),
        )
    }

    /// Announce a completed webhook handshake
    pub async fn confirm_hook(&self) -> Result<(), RelayError> {
        self.webhook
            .send(&Embed::new("Asana", "Hook added").color(COLOUR_GREEN))
            .await
    }

    /// Handle every event of a delivery.
    ///
    /// A failing event is reported to the chat webhook and does not stop
    /// the remaining events.
    pub async fn handle_events(&self, events: &[Value]) {
        for event in events {
            if let Err(err) = self.handle_event(event).await {
                tracing::warn!(error = %err, "failed to handle asana event");
                let report = Embed::new(
                    "Error during webhook",
                    format!("Failed to handle webhook: {}\n\n{}", err, json_block(event)),
                )
                .color(COLOUR_RED);

                if let Err(err) = self.webhook.send(&report).await {
                    tracing::error!(error = %err, "fatal error sending webhook");
                }
            }
        }
    }

    /// Dispatch one raw event by its `type`
    pub async fn handle_event(&self, raw: &Value) -> Result<(), RelayError> {
        let event: AsanaEvent = serde_json::from_value(raw.clone())?;
        match event.kind.as_str() {
            "story" => self.story(&event).await,
            _ => self.unknown(&event).await,
        }
    }

    async fn story(&self, event: &AsanaEvent) -> Result<(), RelayError> {
        let raw_story = self.asana.story(&event.resource).await?;
        let story: asana::Story = serde_json::from_value(raw_story.clone())?;

        if story.kind == "comment" && event.action == "added" {
            let parent = event.parent.as_ref().ok_or(RelayError::Missing {
                field: "parent",
                context: "comment event",
            })?;
            let user_id = event.user.as_ref().ok_or(RelayError::Missing {
                field: "user",
                context: "comment event",
            })?;

            let task = self.asana.task(parent).await?;
            let user = self.asana.user(user_id).await?;
            // Only the first project is linked
            let project = task.projects.first().ok_or(RelayError::Missing {
                field: "projects",
                context: "task",
            })?;

            let project_id = project.id().ok_or(RelayError::Missing {
                field: "id",
                context: "project",
            })?;

            let photo = user.photo.and_then(|p| p.image_128x128);
            let author = story.created_by.map(|c| c.name).unwrap_or_default();

            let embed = Embed::new(format!("Comment: {}", project.name), story.text)
                .color(COLOUR_GREEN)
                .url(format!("https://app.asana.com/0/{}/{}", project_id, parent))
                .author(author, photo);
            self.webhook.send(&embed).await
        } else {
            let embed = Embed::new(
                format!("Unknown story action/type: {}/{}", event.action, story.kind),
                json_block(&raw_story),
            );
            self.webhook.send(&embed).await
        }
    }

    async fn unknown(&self, event: &AsanaEvent) -> Result<(), RelayError> {
        let fields = serde_json::to_value(event)?;
        let embed = Embed::new("Unknown event", json_block(&fields));
        self.webhook.send(&embed).await
    }
}
