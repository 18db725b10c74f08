//! Asana REST client and webhook payload types

use std::fmt;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RelayError;

/// Asana identifier; legacy numeric ids and string gids both appear
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AsanaId {
    Num(u64),
    Str(String),
}

impl fmt::Display for AsanaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{}", n),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// One entry of a webhook delivery's `events` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsanaEvent {
    pub resource: AsanaId,
    pub parent: Option<AsanaId>,
    pub created_at: Value,
    pub user: Option<AsanaId>,
    pub action: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of a webhook delivery
#[derive(Debug, Deserialize)]
pub struct AsanaDelivery {
    #[serde(default)]
    pub events: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Named {
    pub name: String,
}

/// Fields of a story the relay reads
#[derive(Debug, Deserialize)]
pub struct Story {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    pub created_by: Option<Named>,
}

/// Project reference; legacy payloads carry `id`, newer ones only `gid`
#[derive(Debug, Deserialize)]
pub struct Project {
    pub id: Option<AsanaId>,
    pub gid: Option<AsanaId>,
    pub name: String,
}

impl Project {
    /// `id` when present, otherwise `gid`
    pub fn id(&self) -> Option<&AsanaId> {
        self.id.as_ref().or(self.gid.as_ref())
    }
}

#[derive(Debug, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
pub struct Photo {
    pub image_128x128: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AsanaUser {
    pub photo: Option<Photo>,
}

/// Read-only Asana API client
#[derive(Clone)]
pub struct AsanaClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl AsanaClient {
    pub fn new(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token,
        }
    }

    /// Raw story JSON; kept untyped so unknown stories can be echoed whole
    pub async fn story(&self, id: &AsanaId) -> Result<Value, RelayError> {
        self.fetch("stories", id).await
    }

    pub async fn task(&self, id: &AsanaId) -> Result<Task, RelayError> {
        Ok(serde_json::from_value(self.fetch("tasks", id).await?)?)
    }

    pub async fn user(&self, id: &AsanaId) -> Result<AsanaUser, RelayError> {
        Ok(serde_json::from_value(self.fetch("users", id).await?)?)
    }

    /// GET `{base}/{collection}/{id}`, unwrapping the `data` envelope
    async fn fetch(&self, collection: &str, id: &AsanaId) -> Result<Value, RelayError> {
        let url = format!("{}/{}/{}", self.base_url, collection, id);
        tracing::debug!(%url, "fetching asana resource");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let body: Value = request.send().await?.error_for_status()?.json().await?;
        Ok(unwrap_data(body))
    }
}

fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
