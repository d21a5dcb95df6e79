//! backend/src/io/rest/mappers/log_mapper.rs

use super::HabitMapper;
use crate::domain::models::{
    Habit as DomainHabit, HabitLog as DomainHabitLog, ToggleOutcome as DomainToggleOutcome,
};
use shared::{date_key, HabitLog as SharedHabitLog, LogEntry, LogListResponse, ToggleOutcome};

/// Mapper to convert domain HabitLog models into shared DTOs.
pub struct LogMapper;

impl LogMapper {
    /// Converts a domain HabitLog model to a shared HabitLog DTO.
    ///
    /// The canonical UTC-midnight instant collapses back into its day key on
    /// the way out; clients only ever see YYYY-MM-DD.
    pub fn to_dto(domain: DomainHabitLog) -> SharedHabitLog {
        SharedHabitLog {
            id: domain.id,
            habit_id: domain.habit_id,
            user_id: domain.user_id,
            date: date_key::date_to_key(domain.date.date_naive()),
            notes: domain.notes,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_outcome_dto(domain: DomainToggleOutcome) -> ToggleOutcome {
        match domain {
            DomainToggleOutcome::Logged(log) => ToggleOutcome::Logged(Self::to_dto(log)),
            DomainToggleOutcome::Cleared { log_id } => ToggleOutcome::Cleared { log_id },
        }
    }

    pub fn to_log_list_dto(entries: Vec<(DomainHabitLog, DomainHabit)>) -> LogListResponse {
        LogListResponse {
            entries: entries
                .into_iter()
                .map(|(log, habit)| LogEntry {
                    log: Self::to_dto(log),
                    habit: HabitMapper::to_dto(habit),
                })
                .collect(),
        }
    }
}
