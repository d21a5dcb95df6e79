use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account holder.
///
/// The password hash never leaves the domain layer; the REST boundary maps
/// this to `shared::UserProfile`, which has no hash field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
