//! In-process store for tests and database-less development

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DbError, SiteStore};
use crate::models::{Tag, TagName, UserRole, WriteSummary};

/// Store backed by maps behind async locks
#[derive(Default)]
pub struct MemoryStore {
    tags: RwLock<BTreeMap<String, Tag>>,
    users: RwLock<HashMap<i64, i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current role of a user, if stored
    pub async fn role_of(&self, user_id: i64) -> Option<i64> {
        self.users.read().await.get(&user_id).copied()
    }
}

#[async_trait]
impl SiteStore for MemoryStore {
    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn list_tag_names(&self) -> Result<Vec<String>, DbError> {
        Ok(self.tags.read().await.keys().cloned().collect())
    }

    async fn get_tag(&self, name: &TagName) -> Result<Option<Tag>, DbError> {
        Ok(self.tags.read().await.get(name.as_str()).cloned())
    }

    async fn upsert_tag(&self, tag: &Tag) -> Result<(), DbError> {
        self.tags
            .write()
            .await
            .insert(tag.tag_name.clone(), tag.clone());
        Ok(())
    }

    async fn upsert_users(&self, users: &[UserRole]) -> Result<WriteSummary, DbError> {
        let mut stored = self.users.write().await;
        let mut summary = WriteSummary::default();

        for user in users {
            match stored.insert(user.user_id, user.role) {
                None => summary.inserted += 1,
                Some(previous) if previous == user.role => summary.unchanged += 1,
                Some(_) => summary.replaced += 1,
            }
        }

        Ok(summary)
    }
}
