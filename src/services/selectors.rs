//! Derived views and statistics over a task snapshot.
//!
//! Everything here is a pure projection of the slice it is given: no I/O, no
//! logging, no failure path. Views borrow from the snapshot and keep its order.
//!
//! "Due today" and "due soon" use calendar-day boundaries in the time zone of
//! `now`, while "overdue" compares against the exact instant.

use chrono::{DateTime, Days, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::domain::filters::TaskFilters;
use crate::domain::stats::{TaskStats, UNCATEGORIZED_KEY};
use crate::domain::task::Task;

/// Window used for `completed_this_week`.
pub const COMPLETED_WINDOW_DAYS: i64 = 7;

pub fn filter_tasks<'a>(tasks: &'a [Task], filters: &TaskFilters) -> Vec<&'a Task> {
    let term = filters.search_term();
    tasks
        .iter()
        .filter(|t| filters.matches_with_term(t, term.as_deref()))
        .collect()
}

pub fn tasks_by_category<'a>(tasks: &'a [Task], category_id: Option<&str>) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| t.category_id.as_deref() == category_id)
        .collect()
}

pub fn completed_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.is_completed).collect()
}

pub fn pending_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| !t.is_completed).collect()
}

pub fn due_today_at<'a, Tz: TimeZone>(tasks: &'a [Task], now: &DateTime<Tz>) -> Vec<&'a Task> {
    let today = now.date_naive();
    let start = start_of_day(&now.timezone(), today);
    let end = start_of_day(&now.timezone(), add_days(today, 1));
    pending_due(tasks, |due| due >= start && due < end)
}

pub fn due_today(tasks: &[Task]) -> Vec<&Task> {
    due_today_at(tasks, &Local::now())
}

/// Pending tasks due between the start of today and the start of the day
/// `days` calendar days ahead, both ends inclusive.
pub fn due_soon_at<'a, Tz: TimeZone>(
    tasks: &'a [Task],
    days: u32,
    now: &DateTime<Tz>,
) -> Vec<&'a Task> {
    let today = now.date_naive();
    let start = start_of_day(&now.timezone(), today);
    let end = start_of_day(&now.timezone(), add_days(today, days));
    pending_due(tasks, |due| due >= start && due <= end)
}

pub fn due_soon(tasks: &[Task], days: u32) -> Vec<&Task> {
    due_soon_at(tasks, days, &Local::now())
}

pub fn overdue_at<'a, Tz: TimeZone>(tasks: &'a [Task], now: &DateTime<Tz>) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.is_overdue_at(now)).collect()
}

pub fn overdue(tasks: &[Task]) -> Vec<&Task> {
    overdue_at(tasks, &Utc::now())
}

pub fn task_stats_at<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> TaskStats {
    let now = now.with_timezone(&Utc);
    let week_ago = now - Duration::days(COMPLETED_WINDOW_DAYS);

    let mut stats = TaskStats {
        total: tasks.len(),
        ..Default::default()
    };

    for task in tasks {
        if task.is_completed {
            stats.completed += 1;
            // A completed row without a timestamp is skipped rather than trusted.
            if task
                .completed_at
                .is_some_and(|at| at >= week_ago && at <= now)
            {
                stats.completed_this_week += 1;
            }
        } else {
            stats.pending += 1;
        }

        if task.is_overdue_at(&now) {
            stats.overdue += 1;
        }

        stats.by_priority.record(task.priority);

        let key = match task.category_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => UNCATEGORIZED_KEY,
        };
        *stats.by_category.entry(key.to_string()).or_insert(0) += 1;
    }

    stats.completion_rate = completion_rate(stats.completed, stats.total);
    stats
}

pub fn task_stats(tasks: &[Task]) -> TaskStats {
    task_stats_at(tasks, &Utc::now())
}

fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

fn pending_due<F>(tasks: &[Task], in_window: F) -> Vec<&Task>
where
    F: Fn(DateTime<Utc>) -> bool,
{
    tasks
        .iter()
        .filter(|t| !t.is_completed)
        .filter(|t| t.due_date.is_some_and(&in_window))
        .collect()
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// First instant of `date` in `tz`, as UTC. When local midnight falls in a
/// DST gap the first valid local time after it is used.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=96)
        .map(|step| midnight + Duration::minutes(15 * step))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}
