use time::OffsetDateTime;

/// A bearer-token session.
///
/// Sessions are persisted so a server restart does not sign users out.
/// Expired rows are treated as absent and cleaned up on touch.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl Session {
    /// Whether the session has expired as of the given instant
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}
