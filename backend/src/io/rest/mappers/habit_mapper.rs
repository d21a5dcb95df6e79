//! backend/src/io/rest/mappers/habit_mapper.rs

use crate::domain::models::Habit as DomainHabit;
use shared::{Habit as SharedHabit, HabitListResponse, HabitResponse};

/// Mapper to convert domain Habit models into shared DTOs.
pub struct HabitMapper;

impl HabitMapper {
    /// Converts a domain Habit model to a shared Habit DTO.
    pub fn to_dto(domain: DomainHabit) -> SharedHabit {
        SharedHabit {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            color: domain.color,
            description: domain.description,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_habit_response(domain: DomainHabit, message: &str) -> HabitResponse {
        HabitResponse {
            habit: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_habit_list_dto(domain_habits: Vec<DomainHabit>) -> HabitListResponse {
        HabitListResponse {
            habits: domain_habits.into_iter().map(Self::to_dto).collect(),
        }
    }
}
