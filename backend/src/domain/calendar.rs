//! Calendar domain logic for the habit tracker.
//!
//! Builds the month view that the dashboard renders: a Sunday-start grid of
//! whole weeks where every cell is a real calendar date. Cells that fall
//! before the first of the month or after its last day belong to the
//! neighboring months and are marked as leading or trailing days rather
//! than left blank, so logs recorded on them still show up.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;
use tracing::debug;

use shared::{date_key, CalendarDay, CalendarDayType, CalendarMonth, HabitLog};

/// Calendar service that handles all calendar-related date math
#[derive(Clone)]
pub struct CalendarService;

impl CalendarService {
    /// Create a new CalendarService instance
    pub fn new() -> Self {
        Self
    }

    /// Every date shown in a month's view, in grid order.
    ///
    /// The grid starts on the Sunday on or before the 1st and runs in whole
    /// weeks through the last day of the month, so its length is always a
    /// multiple of seven. Returns `None` when month/year do not name a real
    /// calendar month.
    pub fn month_grid(&self, month: u32, year: u32) -> Option<Vec<NaiveDate>> {
        let first = NaiveDate::from_ymd_opt(year as i32, month, 1)?;
        let leading = first.weekday().num_days_from_sunday();
        let total = leading + self.days_in_month(month, year);
        let cells = ((total + 6) / 7) * 7;

        let start = first - Duration::days(leading as i64);
        Some(
            (0..cells)
                .map(|offset| start + Duration::days(offset as i64))
                .collect(),
        )
    }

    /// Generate a calendar month view with habit log data.
    ///
    /// Logs are expected to cover the whole grid range, not just the month
    /// itself; a log on a leading or trailing day lands in that cell.
    pub fn generate_calendar_month(
        &self,
        month: u32,
        year: u32,
        logs: Vec<HabitLog>,
    ) -> Option<CalendarMonth> {
        let grid = self.month_grid(month, year)?;
        let first = NaiveDate::from_ymd_opt(year as i32, month, 1)?;

        debug!(
            "Generating calendar for {}/{}: {} cells, {} logs",
            month,
            year,
            grid.len(),
            logs.len()
        );

        let logs_by_day = self.group_logs_by_day(&logs);

        let days = grid
            .into_iter()
            .map(|date| {
                let key = date_key::date_to_key(date);
                let day_type = if date < first {
                    CalendarDayType::LeadingDay
                } else if date.month() == month && date.year() == year as i32 {
                    CalendarDayType::MonthDay
                } else {
                    CalendarDayType::TrailingDay
                };

                CalendarDay {
                    day: date.day(),
                    logs: logs_by_day.get(&key).cloned().unwrap_or_default(),
                    date: key,
                    day_type,
                }
            })
            .collect();

        Some(CalendarMonth {
            month,
            year,
            days,
            first_day_of_week: self.first_day_of_month(month, year),
        })
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: u32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: u32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the first day of month (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, month: u32, year: u32) -> u32 {
        if let Some(date) = NaiveDate::from_ymd_opt(year as i32, month, 1) {
            // chrono's weekday(): Monday = 1, ..., Sunday = 7
            // Our format: Sunday = 0, Monday = 1, ..., Saturday = 6
            date.weekday().num_days_from_sunday()
        } else {
            // Invalid date, fallback to 0 (Sunday)
            0
        }
    }

    /// Group logs by their day key
    fn group_logs_by_day(&self, logs: &[HabitLog]) -> HashMap<String, Vec<HabitLog>> {
        let mut logs_by_day: HashMap<String, Vec<HabitLog>> = HashMap::new();

        for log in logs {
            logs_by_day
                .entry(log.date.clone())
                .or_insert_with(Vec::new)
                .push(log.clone());
        }

        logs_by_day
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_log(id: &str, date: &str) -> HabitLog {
        HabitLog {
            id: id.to_string(),
            habit_id: "habit::1702517000000".to_string(),
            user_id: "user::1702516000000".to_string(),
            date: date.to_string(),
            notes: None,
            created_at: "2024-03-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_days_in_month() {
        let service = CalendarService::new();

        // Test regular months
        assert_eq!(service.days_in_month(1, 2025), 31); // January
        assert_eq!(service.days_in_month(4, 2025), 30); // April
        assert_eq!(service.days_in_month(2, 2025), 28); // February (non-leap)
        assert_eq!(service.days_in_month(2, 2024), 29); // February (leap year)
    }

    #[test]
    fn test_is_leap_year() {
        let service = CalendarService::new();

        assert!(!service.is_leap_year(2025)); // Regular year
        assert!(service.is_leap_year(2024)); // Divisible by 4
        assert!(!service.is_leap_year(1900)); // Divisible by 100 but not 400
        assert!(service.is_leap_year(2000)); // Divisible by 400
    }

    #[test]
    fn test_first_day_of_month() {
        let service = CalendarService::new();

        assert_eq!(service.first_day_of_month(3, 2024), 5); // March 2024 starts Friday
        assert_eq!(service.first_day_of_month(2, 2015), 0); // February 2015 starts Sunday
    }

    #[test]
    fn test_month_grid_pads_to_whole_weeks() {
        let service = CalendarService::new();

        // March 2024: 5 leading days + 31 month days + 6 trailing days
        let grid = service.month_grid(3, 2024).expect("Failed to build grid");
        assert_eq!(grid.len(), 42);
        assert_eq!(grid[0], NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert_eq!(grid[41], NaiveDate::from_ymd_opt(2024, 4, 6).unwrap());
    }

    #[test]
    fn test_month_grid_without_padding() {
        let service = CalendarService::new();

        // February 2015 starts on a Sunday and is exactly four weeks long
        let grid = service.month_grid(2, 2015).expect("Failed to build grid");
        assert_eq!(grid.len(), 28);
        assert_eq!(grid[0], NaiveDate::from_ymd_opt(2015, 2, 1).unwrap());
        assert_eq!(grid[27], NaiveDate::from_ymd_opt(2015, 2, 28).unwrap());
    }

    #[test]
    fn test_month_grid_covers_every_month_day_once() {
        let service = CalendarService::new();

        // Leap year plus a regular year exercises every month length
        for year in [2024_u32, 2025] {
            for month in 1..=12 {
                let grid = service.month_grid(month, year).expect("Failed to build grid");
                assert_eq!(grid.len() % 7, 0, "{}/{} is not whole weeks", month, year);

                // Consecutive, so no gaps and no duplicates
                for pair in grid.windows(2) {
                    assert_eq!(pair[1] - pair[0], Duration::days(1));
                }

                let month_days: Vec<_> = grid
                    .iter()
                    .filter(|d| d.month() == month && d.year() == year as i32)
                    .collect();
                assert_eq!(
                    month_days.len(),
                    service.days_in_month(month, year) as usize,
                    "{}/{} is missing days",
                    month,
                    year
                );
                assert_eq!(month_days[0].day(), 1);

                // The grid opens on a Sunday
                assert_eq!(grid[0].weekday().num_days_from_sunday(), 0);
            }
        }
    }

    #[test]
    fn test_month_grid_rejects_invalid_months() {
        let service = CalendarService::new();

        assert!(service.month_grid(0, 2024).is_none());
        assert!(service.month_grid(13, 2024).is_none());
    }

    #[test]
    fn test_generate_calendar_month() {
        let service = CalendarService::new();

        let logs = vec![
            create_test_log("habitlog::1", "2024-03-10"),
            create_test_log("habitlog::2", "2024-02-29"),
            create_test_log("habitlog::3", "2024-04-01"),
        ];

        let calendar = service
            .generate_calendar_month(3, 2024, logs)
            .expect("Failed to generate calendar");

        assert_eq!(calendar.month, 3);
        assert_eq!(calendar.year, 2024);
        assert_eq!(calendar.days.len(), 42);
        assert_eq!(calendar.first_day_of_week, 5);

        // A log inside the month lands on its cell
        let day_10 = calendar
            .days
            .iter()
            .find(|d| d.date == "2024-03-10")
            .expect("Missing cell");
        assert_eq!(day_10.day_type, CalendarDayType::MonthDay);
        assert_eq!(day_10.logs.len(), 1);
        assert_eq!(day_10.logs[0].id, "habitlog::1");

        // Leading and trailing cells are real dates and carry their logs
        let leading = calendar
            .days
            .iter()
            .find(|d| d.date == "2024-02-29")
            .expect("Missing cell");
        assert_eq!(leading.day_type, CalendarDayType::LeadingDay);
        assert_eq!(leading.day, 29);
        assert_eq!(leading.logs.len(), 1);

        let trailing = calendar
            .days
            .iter()
            .find(|d| d.date == "2024-04-01")
            .expect("Missing cell");
        assert_eq!(trailing.day_type, CalendarDayType::TrailingDay);
        assert_eq!(trailing.logs.len(), 1);
    }

    #[test]
    fn test_generate_calendar_month_groups_multiple_logs() {
        let service = CalendarService::new();

        let logs = vec![
            create_test_log("habitlog::1", "2024-03-10"),
            create_test_log("habitlog::2", "2024-03-10"),
        ];

        let calendar = service
            .generate_calendar_month(3, 2024, logs)
            .expect("Failed to generate calendar");

        let day_10 = calendar
            .days
            .iter()
            .find(|d| d.date == "2024-03-10")
            .expect("Missing cell");
        assert_eq!(day_10.logs.len(), 2);
    }
}
