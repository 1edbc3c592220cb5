use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Fields a client supplies when creating a task. Identity, ownership and
/// timestamps are assigned by the repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateTaskInput {
    pub category_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl CreateTaskInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Partial update. Nullable columns use a nested option: `None` leaves the
/// field alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_at: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl TaskUpdate {
    /// Completion change carrying its matching `completed_at`.
    pub fn completion(is_completed: bool, at: DateTime<Utc>) -> Self {
        Self {
            is_completed: Some(is_completed),
            completed_at: Some(is_completed.then_some(at)),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the update to `task` as of `now`. Completion state and
    /// `completed_at` are settled together so they never disagree.
    pub fn apply(&self, task: &mut Task, now: DateTime<Utc>) {
        if let Some(category_id) = &self.category_id {
            task.category_id = category_id.clone();
        }
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(reminder_at) = self.reminder_at {
            task.reminder_at = reminder_at;
        }
        if let Some(tags) = &self.tags {
            task.tags = tags.clone();
        }

        let completed = self.is_completed.unwrap_or(task.is_completed);
        task.completed_at = match (completed, self.completed_at) {
            (false, _) => None,
            (true, Some(Some(at))) => Some(at),
            (true, _) if task.is_completed => task.completed_at.or(Some(now)),
            (true, _) => Some(now),
        };
        task.is_completed = completed;
        task.touch(now);
    }
}

impl Task {
    pub fn new(user_id: String, title: String) -> Self {
        Self::from_input(
            Uuid::new_v4().to_string(),
            user_id,
            CreateTaskInput::new(title),
            Utc::now(),
        )
    }

    /// Builds a stored record from client input, stamping identity and
    /// creation time.
    pub fn from_input(
        id: String,
        user_id: String,
        input: CreateTaskInput,
        now: DateTime<Utc>,
    ) -> Self {
        let completed_at = if input.is_completed {
            input.completed_at.or(Some(now))
        } else {
            None
        };

        Self {
            id,
            user_id,
            category_id: input.category_id,
            title: input.title,
            description: input.description,
            is_completed: input.is_completed,
            priority: input.priority,
            due_date: input.due_date,
            reminder_at: input.reminder_at,
            tags: input.tags,
            created_at: now,
            updated_at: now,
            completed_at,
        }
    }

    pub fn set_completed(&mut self, completed: bool, at: DateTime<Utc>) {
        if completed != self.is_completed {
            self.is_completed = completed;
            self.completed_at = completed.then_some(at);
        }
        self.touch(at);
    }

    pub fn toggle_complete(&mut self) {
        self.set_completed(!self.is_completed, Utc::now());
    }

    pub fn add_tag(&mut self, tag: String) {
        self.tags.push(tag);
        self.touch(Utc::now());
    }

    /// Removes every occurrence of `tag`.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        let removed = self.tags.len() != before;
        if removed {
            self.touch(Utc::now());
        }
        removed
    }

    pub fn is_overdue_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        if self.is_completed {
            return false;
        }
        let now = now.with_timezone(&Utc);
        self.due_date.is_some_and(|due| due < now)
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(&Utc::now())
    }

    /// Case-insensitive match of an already lowercased needle against the
    /// title, the description and each tag.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at.max(self.created_at);
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
