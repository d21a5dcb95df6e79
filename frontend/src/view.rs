//! # Month View Module
//!
//! Renders a calendar month as a text grid for the terminal. Cells from
//! the adjacent months are shown with a dot prefix so the whole-week
//! padding is visible but never mistaken for the focused month.

use shared::{CalendarDayType, CalendarMonth, Habit};

/// Render a month as a Sunday-first grid with completion marks.
///
/// A `*` marks a day with at least one log. When `habit_filter` names a
/// habit, marks and summary lines are restricted to that habit.
pub fn render_month(
    calendar: &CalendarMonth,
    habits: &[Habit],
    habit_filter: Option<&str>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        month_name(calendar.month),
        calendar.year
    ));
    out.push_str(&header_row());

    for week in calendar.days.chunks(7) {
        let row: String = week.iter().map(|day| render_cell(day, habit_filter)).collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }

    let month_days = calendar
        .days
        .iter()
        .filter(|day| day.day_type == CalendarDayType::MonthDay)
        .count();
    let mut summary = String::new();
    for habit in habits {
        if let Some(filter) = habit_filter {
            if habit.id != filter {
                continue;
            }
        }
        let logged_days = calendar
            .days
            .iter()
            .filter(|day| day.day_type == CalendarDayType::MonthDay)
            .filter(|day| day.logs.iter().any(|log| log.habit_id == habit.id))
            .count();
        summary.push_str(&format!(
            "{}: {} of {} days\n",
            habit.name, logged_days, month_days
        ));
    }
    if !summary.is_empty() {
        out.push('\n');
        out.push_str(&summary);
    }

    out
}

fn header_row() -> String {
    let labels = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
    let row: String = labels.iter().map(|label| format!("{:>4} ", label)).collect();
    format!("{}\n", row.trim_end())
}

/// One 5-column cell: right-aligned day label plus a mark column
fn render_cell(day: &shared::CalendarDay, habit_filter: Option<&str>) -> String {
    let logged = match habit_filter {
        Some(habit_id) => day.logs.iter().any(|log| log.habit_id == habit_id),
        None => !day.logs.is_empty(),
    };
    let mark = if logged { '*' } else { ' ' };
    let label = match day.day_type {
        CalendarDayType::MonthDay => day.day.to_string(),
        _ => format!(".{}", day.day),
    };
    format!("{:>4}{}", label, mark)
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
