use async_trait::async_trait;
use mockall::automock;

use crate::domain::category::{Category, CategoryUpdate, CreateCategoryInput};
use crate::domain::task::{CreateTaskInput, Task, TaskUpdate};
use crate::services::error_handling::TaskStoreError;

pub type RepositoryResult<T> = Result<T, TaskStoreError>;

/// Round-trips to the backend that owns tasks and categories. Every mutating
/// call returns the record as the backend stored it.
#[automock]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks of the signed-in user, newest first.
    async fn fetch_tasks(&self) -> RepositoryResult<Vec<Task>>;

    async fn create_task(&self, input: CreateTaskInput) -> RepositoryResult<Task>;

    /// Applies `update` and stamps `updated_at`.
    async fn update_task(&self, id: &str, update: TaskUpdate) -> RepositoryResult<Task>;

    async fn delete_task(&self, id: &str) -> RepositoryResult<()>;

    /// All categories of the signed-in user, ordered by name.
    async fn fetch_categories(&self) -> RepositoryResult<Vec<Category>>;

    async fn create_category(&self, input: CreateCategoryInput) -> RepositoryResult<Category>;

    async fn update_category(&self, id: &str, update: CategoryUpdate)
    -> RepositoryResult<Category>;

    async fn delete_category(&self, id: &str) -> RepositoryResult<()>;
}
