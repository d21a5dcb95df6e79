use anyhow::Context;
use chrono::Utc;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::models::{Session, User};
use crate::storage::{SessionRepository, UserRepository};
use shared::{SignInRequest, SignUpRequest, UserProfile};

/// Service for accounts and bearer-token sessions.
///
/// Every protected operation in the system starts here: the REST layer
/// resolves the caller's token to a `User` through `authenticate` and passes
/// the user ID explicitly into the other services. There is no ambient
/// notion of "the current user" anywhere below this layer.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    sessions: SessionRepository,
    session_ttl: Duration,
}

impl AuthService {
    /// Create a new AuthService issuing sessions with the given lifetime
    pub fn new(users: UserRepository, sessions: SessionRepository, session_ttl_days: i64) -> Self {
        Self {
            users,
            sessions,
            session_ttl: Duration::days(session_ttl_days),
        }
    }

    /// Create a new account and sign it in
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<(User, Session), DomainError> {
        let email = normalize_email(&request.email);
        info!("Signing up user: email={}", email);

        self.validate_sign_up(&request)?;

        if self.users.get_user_by_email(&email).await?.is_some() {
            warn!("Sign-up rejected, email already registered: {}", email);
            return Err(DomainError::validation(
                "An account with this email already exists",
            ));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .context("Failed to hash password")?;

        let now = Utc::now();
        let user = User {
            id: UserProfile::generate_id(now.timestamp_millis() as u64),
            name: request.name.trim().to_string(),
            email,
            password_hash,
            created_at: now,
        };

        self.users.store_user(&user).await?;
        let session = self.issue_session(&user.id).await?;

        info!("Created user {} with ID: {}", user.email, user.id);

        Ok((user, session))
    }

    /// Sign in to an existing account.
    ///
    /// An unknown email fails exactly like a wrong password; accounts are
    /// only ever created through `sign_up`.
    pub async fn sign_in(&self, request: SignInRequest) -> Result<(User, Session), DomainError> {
        let email = normalize_email(&request.email);
        info!("Signing in user: email={}", email);

        let user = match self.users.get_user_by_email(&email).await? {
            Some(user) => user,
            None => {
                warn!("Sign-in failed, no account for email: {}", email);
                return Err(DomainError::Unauthorized);
            }
        };

        let password_matches = bcrypt::verify(&request.password, &user.password_hash)
            .context("Failed to verify password")?;
        if !password_matches {
            warn!("Sign-in failed, wrong password for user: {}", user.id);
            return Err(DomainError::Unauthorized);
        }

        let session = self.issue_session(&user.id).await?;

        info!("Signed in user {} with ID: {}", user.email, user.id);

        Ok((user, session))
    }

    /// Revoke a session token
    pub async fn sign_out(&self, token: &str) -> Result<(), DomainError> {
        let removed = self.sessions.delete_session(token).await?;
        if removed {
            info!("Signed out session");
        }
        Ok(())
    }

    /// Resolve a bearer token to its user.
    ///
    /// Missing, expired, and dangling sessions all collapse into
    /// `Unauthorized`; expired rows are deleted on the way out.
    pub async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let session = self
            .sessions
            .get_session(token)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        if session.is_expired_at(OffsetDateTime::now_utc()) {
            warn!("Rejecting expired session for user: {}", session.user_id);
            self.sessions.delete_session(token).await?;
            return Err(DomainError::Unauthorized);
        }

        self.users
            .get_user(&session.user_id)
            .await?
            .ok_or(DomainError::Unauthorized)
    }

    /// Issue a fresh session for a user
    async fn issue_session(&self, user_id: &str) -> Result<Session, DomainError> {
        let now = OffsetDateTime::now_utc();

        // Opportunistic cleanup while we are here
        let swept = self.sessions.delete_expired(now).await?;
        if swept > 0 {
            info!("Removed {} expired sessions", swept);
        }

        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            expires_at: now + self.session_ttl,
        };

        self.sessions.store_session(&session).await?;

        Ok(session)
    }

    /// Validate sign-up request
    fn validate_sign_up(&self, request: &SignUpRequest) -> Result<(), DomainError> {
        // Validate name
        if request.name.trim().is_empty() {
            return Err(DomainError::validation("Name cannot be empty"));
        }

        if request.name.len() > 100 {
            return Err(DomainError::validation("Name cannot exceed 100 characters"));
        }

        // Validate email shape
        validate_email(&normalize_email(&request.email))?;

        // Validate password; bcrypt ignores everything past 72 bytes
        if request.password.len() < 6 {
            return Err(DomainError::validation(
                "Password must be at least 6 characters",
            ));
        }

        if request.password.len() > 72 {
            return Err(DomainError::validation(
                "Password cannot exceed 72 characters",
            ));
        }

        Ok(())
    }
}

/// Canonical form of an email address for storage and lookup
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate email format
fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(DomainError::validation("Email cannot be empty"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(DomainError::validation("Email cannot contain whitespace"));
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(DomainError::validation("Email address is not valid"));
    }

    Ok(())
}
