pub mod category;
pub mod filters;
pub mod stats;
pub mod task;
pub mod task_validation;
