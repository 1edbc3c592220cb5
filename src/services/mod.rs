pub mod error_handling;
pub mod selectors;
mod task_store;

pub use error_handling::TaskStoreError;
pub use task_store::TaskStore;
