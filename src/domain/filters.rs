use serde::{Deserialize, Serialize};

use super::task::{Priority, Task};

/// Category constraint. `Uncategorized` is an explicit filter for tasks with
/// no category and is not the same as `Any`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    Any,
    Uncategorized,
    Category(String),
}

impl CategoryFilter {
    pub fn is_any(&self) -> bool {
        matches!(self, CategoryFilter::Any)
    }

    pub fn matches(&self, category_id: Option<&str>) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Uncategorized => category_id.is_none(),
            CategoryFilter::Category(id) => category_id == Some(id.as_str()),
        }
    }
}

impl From<Option<String>> for CategoryFilter {
    fn from(category_id: Option<String>) -> Self {
        match category_id {
            Some(id) => CategoryFilter::Category(id),
            None => CategoryFilter::Uncategorized,
        }
    }
}

/// Client-held predicate set. `None` on a field means no constraint on that
/// dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskFilters {
    pub category: CategoryFilter,
    pub priority: Option<Priority>,
    pub is_completed: Option<bool>,
    pub search: Option<String>,
}

impl TaskFilters {
    pub fn is_empty(&self) -> bool {
        self.category.is_any()
            && self.priority.is_none()
            && self.is_completed.is_none()
            && self.search_term().is_none()
    }

    /// Applies the dimensions `update` names and keeps the rest.
    pub fn merge(&mut self, update: TaskFiltersUpdate) {
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(is_completed) = update.is_completed {
            self.is_completed = is_completed;
        }
        if let Some(search) = update.search {
            self.search = search;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Lowercased search needle, or `None` when search is absent or empty.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub(crate) fn matches_with_term(&self, task: &Task, term: Option<&str>) -> bool {
        self.category.matches(task.category_id.as_deref())
            && self.priority.is_none_or(|p| task.priority == p)
            && self.is_completed.is_none_or(|c| task.is_completed == c)
            && term.is_none_or(|needle| task.matches_search(needle))
    }
}

/// Partial change to [`TaskFilters`]. An outer `None` leaves that dimension
/// as it is, `Some(None)` (or `Some(CategoryFilter::Any)`) drops the
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFiltersUpdate {
    pub category: Option<CategoryFilter>,
    pub priority: Option<Option<Priority>>,
    pub is_completed: Option<Option<bool>>,
    pub search: Option<Option<String>>,
}
