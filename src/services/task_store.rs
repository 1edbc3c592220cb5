use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::category::{Category, CategoryUpdate, CreateCategoryInput};
use crate::domain::filters::{TaskFilters, TaskFiltersUpdate};
use crate::domain::stats::TaskStats;
use crate::domain::task::{CreateTaskInput, Task, TaskUpdate};
use crate::domain::task_validation::TaskValidator;
use crate::repository::TaskRepository;
use crate::services::error_handling::TaskStoreError;
use crate::services::selectors;

/// Local cache of the signed-in user's tasks and categories plus the
/// client-side filter state. Mutations go through the repository first and
/// the cache is only touched once the backend has answered.
pub struct TaskStore<R: TaskRepository> {
    repository: Arc<R>,
    pub tasks: Vec<Task>,
    pub categories: Vec<Category>,
    pub filters: TaskFilters,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<R: TaskRepository> TaskStore<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            tasks: Vec::new(),
            categories: Vec::new(),
            filters: TaskFilters::default(),
            is_loading: false,
            error: None,
        }
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub async fn fetch_tasks(&mut self) -> Result<(), TaskStoreError> {
        self.is_loading = true;
        self.error = None;

        let result = self.repository.fetch_tasks().await;
        self.is_loading = false;

        match result {
            Ok(tasks) => {
                info!(count = tasks.len(), "Fetched tasks");
                self.tasks = tasks;
                Ok(())
            }
            Err(e) => Err(self.record("fetch tasks", e)),
        }
    }

    pub async fn create_task(&mut self, input: CreateTaskInput) -> Result<Task, TaskStoreError> {
        if let Err(e) = TaskValidator::validate_new(&input) {
            return Err(self.record("create task", e.into()));
        }

        let result = self.repository.create_task(input).await;
        match result {
            Ok(task) => {
                debug!(task_id = %task.id, title = %task.title, "Created task");
                self.tasks.insert(0, task.clone());
                Ok(task)
            }
            Err(e) => Err(self.record("create task", e)),
        }
    }

    pub async fn update_task(
        &mut self,
        id: &str,
        update: TaskUpdate,
    ) -> Result<(), TaskStoreError> {
        let result = self.repository.update_task(id, update).await;
        match result {
            Ok(updated) => {
                debug!(task_id = %id, "Updated task");
                self.replace_task(updated);
                Ok(())
            }
            Err(e) => Err(self.record("update task", e)),
        }
    }

    pub async fn delete_task(&mut self, id: &str) -> Result<(), TaskStoreError> {
        let result = self.repository.delete_task(id).await;
        match result {
            Ok(()) => {
                debug!(task_id = %id, "Deleted task");
                self.tasks.retain(|t| t.id != id);
                Ok(())
            }
            Err(e) => Err(self.record("delete task", e)),
        }
    }

    /// Flips completion and sends the matching `completed_at` in the same
    /// update. Unknown ids are ignored.
    pub async fn toggle_complete(&mut self, id: &str) -> Result<(), TaskStoreError> {
        let Some(task) = self.task(id) else {
            warn!(task_id = %id, "Toggle requested for task not in cache");
            return Ok(());
        };

        let update = TaskUpdate::completion(!task.is_completed, Utc::now());
        self.update_task(id, update).await
    }

    pub async fn fetch_categories(&mut self) -> Result<(), TaskStoreError> {
        let result = self.repository.fetch_categories().await;
        match result {
            Ok(categories) => {
                info!(count = categories.len(), "Fetched categories");
                self.categories = categories;
                Ok(())
            }
            Err(e) => Err(self.record("fetch categories", e)),
        }
    }

    pub async fn create_category(
        &mut self,
        input: CreateCategoryInput,
    ) -> Result<Category, TaskStoreError> {
        let result = self.repository.create_category(input).await;
        match result {
            Ok(category) => {
                debug!(category_id = %category.id, name = %category.name, "Created category");
                self.categories.push(category.clone());
                Ok(category)
            }
            Err(e) => Err(self.record("create category", e)),
        }
    }

    pub async fn update_category(
        &mut self,
        id: &str,
        update: CategoryUpdate,
    ) -> Result<(), TaskStoreError> {
        let result = self.repository.update_category(id, update).await;
        match result {
            Ok(updated) => {
                if let Some(slot) = self.categories.iter_mut().find(|c| c.id == id) {
                    *slot = updated;
                }
                Ok(())
            }
            Err(e) => Err(self.record("update category", e)),
        }
    }

    pub async fn delete_category(&mut self, id: &str) -> Result<(), TaskStoreError> {
        let result = self.repository.delete_category(id).await;
        match result {
            Ok(()) => {
                debug!(category_id = %id, "Deleted category");
                self.categories.retain(|c| c.id != id);
                Ok(())
            }
            Err(e) => Err(self.record("delete category", e)),
        }
    }

    pub fn set_filters(&mut self, update: TaskFiltersUpdate) {
        self.filters.merge(update);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn filtered_tasks(&self) -> Vec<&Task> {
        selectors::filter_tasks(&self.tasks, &self.filters)
    }

    pub fn tasks_by_category(&self, category_id: Option<&str>) -> Vec<&Task> {
        selectors::tasks_by_category(&self.tasks, category_id)
    }

    pub fn due_today(&self) -> Vec<&Task> {
        selectors::due_today(&self.tasks)
    }

    pub fn due_soon(&self, days: u32) -> Vec<&Task> {
        selectors::due_soon(&self.tasks, days)
    }

    pub fn overdue(&self) -> Vec<&Task> {
        selectors::overdue(&self.tasks)
    }

    pub fn completed_tasks(&self) -> Vec<&Task> {
        selectors::completed_tasks(&self.tasks)
    }

    pub fn pending_tasks(&self) -> Vec<&Task> {
        selectors::pending_tasks(&self.tasks)
    }

    pub fn stats(&self) -> TaskStats {
        selectors::task_stats(&self.tasks)
    }

    fn replace_task(&mut self, updated: Task) {
        match self.tasks.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => *slot = updated,
            None => warn!(task_id = %updated.id, "Updated task missing from cache"),
        }
    }

    fn record(&mut self, operation: &str, err: TaskStoreError) -> TaskStoreError {
        error!(operation = %operation, error = %err, "Task store operation failed");
        self.error = Some(err.to_string());
        err
    }
}
