pub mod memory_repository;
pub mod task_repository;

pub use memory_repository::InMemoryRepository;
pub use task_repository::{MockTaskRepository, RepositoryResult, TaskRepository};
