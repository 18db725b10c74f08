//! User role assignments pushed by the bot

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ValidationError;

/// One user's role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRole {
    pub user_id: i64,
    pub role: i64,
}

/// Outcome counts of a bulk upsert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub inserted: u64,
    pub replaced: u64,
    pub unchanged: u64,
}

/// Validate the body of `POST /user`.
///
/// The body must be a JSON array of objects carrying integer `user_id` and
/// `role` fields. Anything else is rejected as a whole.
pub fn parse_user_roles(body: Value) -> Result<Vec<UserRole>, ValidationError> {
    let Value::Array(items) = body else {
        return Err(ValidationError::InvalidFormat {
            field: "users",
            reason: "expected a JSON array of {user_id, role} objects",
        });
    };

    items
        .into_iter()
        .map(|item| {
            let user_id = item.get("user_id").and_then(Value::as_i64).ok_or(
                ValidationError::InvalidFormat {
                    field: "user_id",
                    reason: "expected an integer",
                },
            )?;
            let role = item.get("role").and_then(Value::as_i64).ok_or(
                ValidationError::InvalidFormat {
                    field: "role",
                    reason: "expected an integer",
                },
            )?;
            Ok(UserRole { user_id, role })
        })
        .collect()
}
