//! Tag records stored for the bot's `tag` command

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum length for tag names
const MAX_TAG_NAME_LEN: usize = 100;

/// Validated tag name: trimmed, non-empty, at most 100 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagName(String);

impl TagName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "tag_name" });
        }

        if s.chars().count() > MAX_TAG_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "tag_name",
                max: MAX_TAG_NAME_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stored tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub tag_name: String,
    pub tag_content: String,
    pub tag_category: Option<String>,
}

/// Body of `POST /tag`; every field is optional until validated
#[derive(Debug, Default, Deserialize)]
pub struct TagPayload {
    pub tag_name: Option<String>,
    pub tag_content: Option<String>,
    pub tag_category: Option<String>,
}

impl TryFrom<TagPayload> for Tag {
    type Error = ValidationError;

    fn try_from(payload: TagPayload) -> Result<Self, Self::Error> {
        let name = TagName::new(payload.tag_name.as_deref().unwrap_or_default())?;

        let content = payload.tag_content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "tag_content",
            });
        }

        let category = payload
            .tag_category
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty());

        Ok(Tag {
            tag_name: name.0,
            tag_content: content,
            tag_category: category,
        })
    }
}
