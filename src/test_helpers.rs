// Test helpers for integration testing

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::task::{Priority, Task};
use crate::repository::InMemoryRepository;
use crate::services::TaskStore;

pub const TEST_USER_ID: &str = "test-user";

pub struct TestContext {
    pub repository: Arc<InMemoryRepository>,
}

impl TestContext {
    pub fn new_for_test() -> Self {
        let repository = Arc::new(InMemoryRepository::new(TEST_USER_ID));
        Self { repository }
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let repository = Arc::new(InMemoryRepository::with_data(TEST_USER_ID, tasks, Vec::new()));
        Self { repository }
    }

    pub fn store(&self) -> TaskStore<InMemoryRepository> {
        TaskStore::new(self.repository.clone())
    }
}

/// Fixture task created a month before `now`.
pub fn task_at(title: &str, now: DateTime<Utc>) -> Task {
    let mut task = Task::new(TEST_USER_ID.to_string(), title.to_string());
    task.created_at = now - chrono::Duration::days(30);
    task.updated_at = task.created_at;
    task
}

pub fn due_task(title: &str, due: DateTime<Utc>, now: DateTime<Utc>) -> Task {
    let mut task = task_at(title, now);
    task.due_date = Some(due);
    task
}

pub fn completed_task(title: &str, completed_at: DateTime<Utc>, now: DateTime<Utc>) -> Task {
    let mut task = task_at(title, now);
    task.set_completed(true, completed_at);
    task
}

pub fn prioritized_task(title: &str, priority: Priority, now: DateTime<Utc>) -> Task {
    let mut task = task_at(title, now);
    task.priority = priority;
    task
}
