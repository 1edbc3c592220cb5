use chrono::{Duration, Utc};
use std::sync::Arc;

use taskview::domain::category::CreateCategoryInput;
use taskview::domain::filters::{CategoryFilter, TaskFiltersUpdate};
use taskview::domain::task::{CreateTaskInput, Priority, TaskUpdate};
use taskview::repository::{MockTaskRepository, TaskRepository};
use taskview::services::{TaskStore, TaskStoreError};
use taskview::test_helpers::{TEST_USER_ID, TestContext, due_task, task_at};

#[tokio::test]
async fn test_fetch_populates_cache_newest_first() {
    let now = Utc::now();
    let mut older = task_at("Older", now);
    older.created_at = now - Duration::days(5);
    older.updated_at = older.created_at;
    let mut newer = task_at("Newer", now);
    newer.created_at = now - Duration::days(1);
    newer.updated_at = newer.created_at;

    let ctx = TestContext::with_tasks(vec![older, newer]);
    let mut store = ctx.store();

    store.fetch_tasks().await.unwrap();

    assert!(!store.is_loading);
    assert!(store.error.is_none());
    let titles: Vec<&str> = store.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Newer", "Older"]);
}

#[tokio::test]
async fn test_full_task_lifecycle() {
    let ctx = TestContext::new_for_test();
    let mut store = ctx.store();

    let mut input = CreateTaskInput::new("Write tests");
    input.priority = Priority::High;
    input.tags = vec!["dev".to_string()];
    let task = store.create_task(input).await.unwrap();
    assert_eq!(task.user_id, TEST_USER_ID);

    store
        .update_task(
            &task.id,
            TaskUpdate {
                description: Some(Some("Cover the store".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    store.toggle_complete(&task.id).await.unwrap();

    let cached = store.task(&task.id).unwrap().clone();
    assert_eq!(cached.description.as_deref(), Some("Cover the store"));
    assert!(cached.is_completed);
    assert!(cached.completed_at.is_some());
    assert!(cached.updated_at >= cached.created_at);

    // Cache and backend agree after the round-trips.
    let remote = ctx.repository.fetch_tasks().await.unwrap();
    assert_eq!(remote, vec![cached]);

    let stats = store.stats();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.completed_this_week, 1);
    assert!((stats.completion_rate - 100.0).abs() < 1e-9);

    store.delete_task(&task.id).await.unwrap();
    assert!(store.tasks.is_empty());
    assert_eq!(ctx.repository.task_count(), 0);
}

#[tokio::test]
async fn test_store_views_and_filters() {
    let now = Utc::now();
    let ctx = TestContext::with_tasks(vec![
        due_task("Overdue bill", now - Duration::days(2), now),
        due_task("Far future", now + Duration::days(60), now),
        task_at("Loose end", now),
    ]);
    let mut store = ctx.store();
    store.fetch_tasks().await.unwrap();

    let work = store
        .create_category(CreateCategoryInput::new("Work", "#6366F1", "briefcase"))
        .await
        .unwrap();
    let mut input = CreateTaskInput::new("Standup notes");
    input.category_id = Some(work.id.clone());
    store.create_task(input).await.unwrap();

    assert_eq!(store.overdue().len(), 1);
    assert_eq!(store.overdue()[0].title, "Overdue bill");
    assert!(store.due_soon(7).iter().all(|t| t.title != "Far future"));
    assert_eq!(store.pending_tasks().len(), 4);
    assert!(store.completed_tasks().is_empty());
    assert_eq!(store.tasks_by_category(Some(&work.id)).len(), 1);
    assert_eq!(store.tasks_by_category(None).len(), 3);

    store.set_filters(TaskFiltersUpdate {
        category: Some(CategoryFilter::Uncategorized),
        priority: Some(Some(Priority::High)),
        ..Default::default()
    });
    store.set_filters(TaskFiltersUpdate {
        search: Some(Some("LOOSE".to_string())),
        ..Default::default()
    });
    assert!(store.filtered_tasks().is_empty());

    // Dropping the priority constraint keeps category and search.
    store.set_filters(TaskFiltersUpdate {
        priority: Some(None),
        ..Default::default()
    });
    assert_eq!(store.filters.priority, None);
    assert_eq!(store.filters.category, CategoryFilter::Uncategorized);
    let filtered = store.filtered_tasks();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title, "Loose end");

    let stats = store.stats();
    assert_eq!(stats.by_category.get(&work.id), Some(&1));
    assert_eq!(stats.by_category.get("uncategorized"), Some(&3));
}

#[tokio::test]
async fn test_deleting_unknown_task_records_error() {
    let ctx = TestContext::new_for_test();
    let mut store = ctx.store();

    let err = store.delete_task("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.error.as_deref(), Some("Task not found: missing"));
}

#[tokio::test]
async fn test_create_failure_does_not_touch_cache() {
    let mut mock = MockTaskRepository::new();
    mock.expect_create_task()
        .times(1)
        .returning(|_| Err(TaskStoreError::repository("create task", "quota exceeded")));

    let mut store = TaskStore::new(Arc::new(mock));
    let err = store
        .create_task(CreateTaskInput::new("Anything"))
        .await
        .unwrap_err();

    assert_eq!(err, TaskStoreError::repository("create task", "quota exceeded"));
    assert!(store.tasks.is_empty());
    assert_eq!(
        store.error.as_deref(),
        Some("Failed to create task: quota exceeded")
    );
}

#[tokio::test]
async fn test_toggle_sends_completion_with_timestamp() {
    let now = Utc::now();
    let mut cached = task_at("Cached", now);
    cached.id = "t1".to_string();
    let mut completed = cached.clone();
    completed.set_completed(true, now);
    let response = completed.clone();

    let mut mock = MockTaskRepository::new();
    mock.expect_update_task()
        .withf(|id, update| {
            id == "t1"
                && update.is_completed == Some(true)
                && matches!(update.completed_at, Some(Some(_)))
        })
        .times(1)
        .returning(move |_, _| Ok(response.clone()));

    let mut store = TaskStore::new(Arc::new(mock));
    store.tasks = vec![cached];

    store.toggle_complete("t1").await.unwrap();
    assert_eq!(store.tasks, vec![completed]);
}
