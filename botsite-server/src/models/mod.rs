//! Domain models with validation at construction
//!
//! Request payloads are validated when converted into these types.
//! Invalid input returns ValidationError, not panic.

pub mod tag;
pub mod user;
pub mod validation;

pub use tag::{Tag, TagName, TagPayload};
pub use user::{parse_user_roles, UserRole, WriteSummary};
pub use validation::ValidationError;
