use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::task_repository::{RepositoryResult, TaskRepository};
use crate::domain::category::{Category, CategoryUpdate, CreateCategoryInput};
use crate::domain::task::{CreateTaskInput, Task, TaskUpdate};
use crate::domain::task_validation::TaskValidator;
use crate::services::error_handling::TaskStoreError;

#[derive(Default)]
struct Tables {
    tasks: Vec<Task>,
    categories: Vec<Category>,
}

/// Backend stand-in holding rows in memory. Reads only return rows owned by
/// `user_id`, like row-level security on the hosted backend. Used by tests and
/// by the snapshot binary.
pub struct InMemoryRepository {
    user_id: String,
    tables: Mutex<Tables>,
}

impl InMemoryRepository {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            tables: Mutex::new(Tables::default()),
        }
    }

    /// Seeds existing rows as if they had been fetched from the backend.
    pub fn with_data(
        user_id: impl Into<String>,
        tasks: Vec<Task>,
        categories: Vec<Category>,
    ) -> Self {
        let repo = Self::new(user_id);
        {
            let mut tables = repo.tables.lock();
            tables.tasks = tasks;
            tables.categories = categories;
        }
        repo
    }

    pub fn task_count(&self) -> usize {
        self.tables.lock().tasks.len()
    }
}

#[async_trait]
impl TaskRepository for InMemoryRepository {
    async fn fetch_tasks(&self) -> RepositoryResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tables
            .lock()
            .tasks
            .iter()
            .filter(|t| t.user_id == self.user_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn create_task(&self, input: CreateTaskInput) -> RepositoryResult<Task> {
        TaskValidator::validate_new(&input)?;

        let task = Task::from_input(
            Uuid::new_v4().to_string(),
            self.user_id.clone(),
            input,
            Utc::now(),
        );
        debug!(task_id = %task.id, "Inserted task");
        self.tables.lock().tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &str, update: TaskUpdate) -> RepositoryResult<Task> {
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(TaskStoreError::Validation {
                field: "title".to_string(),
                reason: "Task title cannot be empty".to_string(),
            });
        }

        let mut tables = self.tables.lock();
        let task = tables
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskStoreError::task_not_found(id))?;

        update.apply(task, Utc::now());
        debug!(task_id = %id, "Updated task");
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &str) -> RepositoryResult<()> {
        let mut tables = self.tables.lock();
        let before = tables.tasks.len();
        tables.tasks.retain(|t| t.id != id);
        if tables.tasks.len() == before {
            return Err(TaskStoreError::task_not_found(id));
        }
        debug!(task_id = %id, "Deleted task");
        Ok(())
    }

    async fn fetch_categories(&self) -> RepositoryResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .tables
            .lock()
            .categories
            .iter()
            .filter(|c| c.user_id == self.user_id)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn create_category(&self, input: CreateCategoryInput) -> RepositoryResult<Category> {
        if input.name.trim().is_empty() {
            return Err(TaskStoreError::Validation {
                field: "name".to_string(),
                reason: "Category name cannot be empty".to_string(),
            });
        }

        let category = Category::from_input(
            Uuid::new_v4().to_string(),
            self.user_id.clone(),
            input,
            Utc::now(),
        );
        self.tables.lock().categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: &str,
        update: CategoryUpdate,
    ) -> RepositoryResult<Category> {
        let mut tables = self.tables.lock();
        let category = tables
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| TaskStoreError::category_not_found(id))?;

        update.apply(category);
        Ok(category.clone())
    }

    /// Tasks pointing at the deleted category become uncategorized.
    async fn delete_category(&self, id: &str) -> RepositoryResult<()> {
        let mut tables = self.tables.lock();
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        if tables.categories.len() == before {
            return Err(TaskStoreError::category_not_found(id));
        }

        let now = Utc::now();
        for task in tables
            .tasks
            .iter_mut()
            .filter(|t| t.category_id.as_deref() == Some(id))
        {
            TaskUpdate {
                category_id: Some(None),
                ..Default::default()
            }
            .apply(task, now);
        }
        Ok(())
    }
}
