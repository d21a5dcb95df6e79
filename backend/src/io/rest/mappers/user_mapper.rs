//! backend/src/io/rest/mappers/user_mapper.rs

use crate::domain::models::{Session, User};
use shared::{CurrentUserResponse, SessionResponse, UserProfile};

/// Mapper to convert domain users and sessions into shared DTOs.
pub struct UserMapper;

impl UserMapper {
    /// Converts a domain User to its public profile DTO.
    ///
    /// The password hash stays behind; no DTO carries it.
    pub fn to_dto(user: User) -> UserProfile {
        UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
        }
    }

    pub fn to_session_response(user: User, session: Session) -> SessionResponse {
        SessionResponse {
            token: session.token,
            user: Self::to_dto(user),
        }
    }

    pub fn to_current_user_response(user: User) -> CurrentUserResponse {
        CurrentUserResponse {
            user: Self::to_dto(user),
        }
    }
}
