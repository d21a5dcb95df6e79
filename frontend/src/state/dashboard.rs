//! # Dashboard State Module
//!
//! This module contains the client-side state behind the habit dashboard.
//!
//! ## Responsibilities:
//! - Holding the signed-in user's habits and log cache
//! - The optimistic day-toggle flow against the server
//! - Month focus for calendar navigation
//!
//! ## Purpose:
//! The dashboard applies every flip locally before the server answers, so
//! the UI never waits on a round trip; the server's answer then confirms
//! the flip or rolls it back. All server traffic goes through the
//! `HabitGateway` seam so this logic is testable with a scripted fake.

use chrono::Utc;
use tracing::warn;

use super::log_store::HabitLogStore;
use crate::services::{ClientError, HabitGateway};
use shared::{
    CalendarFocusDate, CalendarMonth, CreateHabitRequest, DeleteHabitResponse, Habit, HabitLog,
    ToggleLogRequest, ToggleOutcome,
};

/// Outcome of a dashboard toggle, including the local-only no-op case
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleResult {
    /// The day is now logged
    Logged(HabitLog),
    /// The day's log was cleared
    Cleared { log_id: String },
    /// The habit is not in local state (deleted moments ago); nothing was
    /// flipped and the server was not contacted
    UnknownHabit,
}

/// Client-side state for the habit dashboard
pub struct DashboardState<G: HabitGateway> {
    gateway: G,
    habits: Vec<Habit>,
    log_store: HabitLogStore,
    focus: CalendarFocusDate,
}

impl<G: HabitGateway> DashboardState<G> {
    /// Create a dashboard focused on the current month, with no data loaded
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            habits: Vec::new(),
            log_store: HabitLogStore::new(),
            focus: CalendarFocusDate::default(),
        }
    }

    /// Rebuild local state from the server
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.habits = self.gateway.list_habits().await?;
        let entries = self.gateway.list_logs().await?;
        self.log_store
            .replace_all(entries.into_iter().map(|entry| entry.log).collect());
        Ok(())
    }

    /// The habits as the server last reported them, newest first
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// The local log cache
    pub fn log_store(&self) -> &HabitLogStore {
        &self.log_store
    }

    /// The month the calendar is focused on
    pub fn focus(&self) -> CalendarFocusDate {
        self.focus.clone()
    }

    pub fn set_focus(&mut self, month: u32, year: u32) {
        self.focus = CalendarFocusDate { month, year };
    }

    pub fn go_previous_month(&mut self) {
        self.focus = self.focus.previous_month();
    }

    pub fn go_next_month(&mut self) {
        self.focus = self.focus.next_month();
    }

    /// Create a habit and add it to local state
    pub async fn create_habit(&mut self, request: CreateHabitRequest) -> Result<Habit, ClientError> {
        let habit = self.gateway.create_habit(request).await?;
        // Server lists newest first
        self.habits.insert(0, habit.clone());
        Ok(habit)
    }

    /// Delete a habit; its cached logs go with it
    pub async fn delete_habit(
        &mut self,
        habit_id: &str,
    ) -> Result<DeleteHabitResponse, ClientError> {
        let response = self.gateway.delete_habit(habit_id).await?;
        self.habits.retain(|h| h.id != habit_id);
        self.log_store.remove_habit(habit_id);
        Ok(response)
    }

    /// Flip a habit's completion for a day.
    ///
    /// The flip is applied locally first, then confirmed against the server;
    /// on failure the pre-toggle state is restored exactly and the error
    /// surfaced. The server does its own keyed lookup, so the outcome lands
    /// on its current state even if this cache was stale.
    ///
    /// Two overlapping toggles of the same (habit, day) pair are not queued
    /// or locked against each other; the second flip races the first one's
    /// resolution and local state can briefly disagree with the server until
    /// the next refresh.
    pub async fn toggle_log(
        &mut self,
        habit_id: &str,
        date: &str,
        notes: Option<String>,
    ) -> Result<ToggleResult, ClientError> {
        let habit = match self.habits.iter().find(|h| h.id == habit_id) {
            Some(habit) => habit.clone(),
            None => {
                warn!("Ignoring toggle for unknown habit: {}", habit_id);
                return Ok(ToggleResult::UnknownHabit);
            }
        };

        // Phase one: flip locally so the UI reflects the intent immediately
        let removed = self
            .log_store
            .remove_by_habit_and_day(habit_id, date)
            .map_err(ClientError::ConsistencyFault)?;

        let provisional_id = match &removed {
            Some(_) => None,
            None => {
                let now = Utc::now();
                let provisional = HabitLog {
                    id: HabitLog::generate_provisional_id(now.timestamp_millis() as u64),
                    habit_id: habit.id.clone(),
                    user_id: habit.user_id.clone(),
                    date: date.to_string(),
                    notes: notes.clone(),
                    created_at: now.to_rfc3339(),
                };
                let id = provisional.id.clone();
                self.log_store.upsert(provisional);
                Some(id)
            }
        };

        // Phase two: the server performs its own keyed flip
        let request = ToggleLogRequest {
            habit_id: habit.id.clone(),
            date: date.to_string(),
            notes,
        };
        match self.gateway.toggle_log(request).await {
            Ok(ToggleOutcome::Logged(log)) => {
                if let Some(id) = &provisional_id {
                    self.log_store.remove(id);
                }
                self.log_store.upsert(log.clone());
                Ok(ToggleResult::Logged(log))
            }
            Ok(ToggleOutcome::Cleared { log_id }) => {
                // If we had inserted, the server side was stale-ahead of us
                // and cleared instead; drop the provisional to match it
                if let Some(id) = &provisional_id {
                    self.log_store.remove(id);
                }
                Ok(ToggleResult::Cleared { log_id })
            }
            Err(error) => {
                // Restore the exact pre-toggle state and surface the error
                if let Some(id) = &provisional_id {
                    self.log_store.remove(id);
                }
                if let Some(log) = removed {
                    self.log_store.upsert(log);
                }
                Err(error)
            }
        }
    }

    /// Fetch the focused month's calendar from the server
    pub async fn calendar_month(&self) -> Result<CalendarMonth, ClientError> {
        self.gateway
            .calendar_month(self.focus.month, self.focus.year)
            .await
    }
}
