use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::task::Priority;

/// Key used in `by_category` for tasks without a category.
pub const UNCATEGORIZED_KEY: &str = "uncategorized";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriorityBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl PriorityBreakdown {
    pub fn record(&mut self, priority: Priority) {
        match priority {
            Priority::Low => self.low += 1,
            Priority::Medium => self.medium += 1,
            Priority::High => self.high += 1,
        }
    }

    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
        }
    }
}

/// Aggregate summary over a task collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub completion_rate: f64,
    pub by_priority: PriorityBreakdown,
    pub by_category: BTreeMap<String, usize>,
    pub completed_this_week: usize,
    /// Always 0. Consecutive-day streaks are not tracked.
    pub streak: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(TaskStats::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "total": 0,
                "completed": 0,
                "pending": 0,
                "overdue": 0,
                "completionRate": 0.0,
                "byPriority": { "low": 0, "medium": 0, "high": 0 },
                "byCategory": {},
                "completedThisWeek": 0,
                "streak": 0
            })
        );
    }

    #[test]
    fn test_priority_breakdown() {
        let mut breakdown = PriorityBreakdown::default();
        breakdown.record(Priority::High);
        breakdown.record(Priority::High);
        breakdown.record(Priority::Low);

        assert_eq!(breakdown.get(Priority::High), 2);
        assert_eq!(breakdown.get(Priority::Medium), 0);
        assert_eq!(breakdown.get(Priority::Low), 1);
    }
}
