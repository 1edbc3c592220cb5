use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskview::config::StoreConfig;
use taskview::domain::category::Category;
use taskview::domain::stats::TaskStats;
use taskview::domain::task::Task;
use taskview::domain::task_validation::TaskValidator;
use taskview::repository::InMemoryRepository;
use taskview::services::TaskStore;

#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct Report<'a> {
    stats: TaskStats,
    due_today: Vec<&'a Task>,
    due_soon: Vec<&'a Task>,
    overdue: Vec<&'a Task>,
}

struct Args {
    snapshot: PathBuf,
    due_soon_days: Option<u32>,
}

fn parse_args() -> Result<Args> {
    let mut snapshot = None;
    let mut due_soon_days = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--due-soon-days" => {
                let value = args.next().context("--due-soon-days needs a value")?;
                due_soon_days = Some(value.parse().context("--due-soon-days must be a number")?);
            }
            _ if snapshot.is_none() => snapshot = Some(PathBuf::from(arg)),
            other => bail!("Unexpected argument: {}", other),
        }
    }

    let snapshot = snapshot.context("Usage: taskview <snapshot.json> [--due-soon-days N]")?;
    Ok(Args {
        snapshot,
        due_soon_days,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = StoreConfig::load()?;

    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let content = std::fs::read_to_string(&args.snapshot)
        .with_context(|| format!("Failed to read {}", args.snapshot.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&content).context("Invalid snapshot JSON")?;

    for task in &snapshot.tasks {
        if let Err(e) = TaskValidator::validate(task) {
            tracing::warn!(task_id = %task.id, error = %e, "Snapshot task violates data contract");
        }
    }

    // Without an explicit owner, read the snapshot as the first task's owner.
    let user_id = snapshot
        .user_id
        .or_else(|| snapshot.tasks.first().map(|t| t.user_id.clone()))
        .unwrap_or_default();
    let foreign = snapshot.tasks.iter().filter(|t| t.user_id != user_id).count();
    if foreign > 0 {
        tracing::warn!(
            user_id = %user_id,
            count = foreign,
            "Ignoring tasks owned by other users"
        );
    }

    let repository = Arc::new(InMemoryRepository::with_data(
        user_id,
        snapshot.tasks,
        snapshot.categories,
    ));
    let mut store = TaskStore::new(repository);
    store.fetch_tasks().await?;
    store.fetch_categories().await?;

    let days = args.due_soon_days.unwrap_or(config.due_soon_days);
    let report = Report {
        stats: store.stats(),
        due_today: store.due_today(),
        due_soon: store.due_soon(days),
        overdue: store.overdue(),
    };
    info!(
        total = report.stats.total,
        categories = store.categories.len(),
        "Snapshot loaded"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
