//! # Log Store Module
//!
//! This module contains the client-side cache of habit log entries.
//!
//! ## Responsibilities:
//! - Keyed lookups by habit and day for the toggle flow
//! - Per-day and per-habit views for rendering
//! - Local cascade when a habit is deleted
//!
//! ## Purpose:
//! The dashboard flips days optimistically, so it needs a local mirror of
//! the server's log table it can mutate and, on failure, restore. Pure
//! in-memory; no I/O.

use shared::HabitLog;

/// In-memory store of the signed-in user's habit logs
#[derive(Debug, Clone, Default)]
pub struct HabitLogStore {
    logs: Vec<HabitLog>,
}

impl HabitLogStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything and start over from a server snapshot
    pub fn replace_all(&mut self, logs: Vec<HabitLog>) {
        self.logs = logs;
    }

    /// Insert a log, replacing any existing entry with the same ID
    pub fn upsert(&mut self, log: HabitLog) {
        match self.logs.iter_mut().find(|l| l.id == log.id) {
            Some(existing) => *existing = log,
            None => self.logs.push(log),
        }
    }

    /// Remove a log by ID, returning it if it was present
    pub fn remove(&mut self, log_id: &str) -> Option<HabitLog> {
        let index = self.logs.iter().position(|l| l.id == log_id)?;
        Some(self.logs.remove(index))
    }

    /// Remove the log for a (habit, day) pair, returning it if one existed.
    ///
    /// Refuses to pick when more than one entry matches; the cache no longer
    /// mirrors the server and nothing is removed.
    pub fn remove_by_habit_and_day(
        &mut self,
        habit_id: &str,
        date: &str,
    ) -> Result<Option<HabitLog>, String> {
        let id = match self.find_by_habit_and_day(habit_id, date)? {
            Some(log) => log.id.clone(),
            None => return Ok(None),
        };
        Ok(self.remove(&id))
    }

    /// Remove every log of a habit, returning how many went away
    pub fn remove_habit(&mut self, habit_id: &str) -> usize {
        let before = self.logs.len();
        self.logs.retain(|l| l.habit_id != habit_id);
        before - self.logs.len()
    }

    /// All logs recorded on a day
    pub fn logs_on(&self, date: &str) -> Vec<&HabitLog> {
        self.logs.iter().filter(|l| l.date == date).collect()
    }

    /// All logs of one habit
    pub fn logs_for_habit(&self, habit_id: &str) -> Vec<&HabitLog> {
        self.logs.iter().filter(|l| l.habit_id == habit_id).collect()
    }

    /// The log for a (habit, day) pair.
    ///
    /// At most one entry may match; finding more means the cache no longer
    /// mirrors the server and the caller must not flip blindly.
    pub fn find_by_habit_and_day(
        &self,
        habit_id: &str,
        date: &str,
    ) -> Result<Option<&HabitLog>, String> {
        let mut matches = self
            .logs
            .iter()
            .filter(|l| l.habit_id == habit_id && l.date == date);

        let first = matches.next();
        if matches.next().is_some() {
            return Err(format!(
                "Found more than one log for habit {} on {}",
                habit_id, date
            ));
        }

        Ok(first)
    }

    /// Whether a habit is logged on a day
    pub fn is_logged(&self, habit_id: &str, date: &str) -> bool {
        self.logs
            .iter()
            .any(|l| l.habit_id == habit_id && l.date == date)
    }

    /// Number of cached logs
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    /// Whether the store holds nothing
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}
