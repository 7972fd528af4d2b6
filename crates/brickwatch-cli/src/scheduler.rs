//! Recurring poll job.
//!
//! The poll state sits behind a [`tokio::sync::Mutex`]. A tick that finds it
//! locked is skipped, so cycles never overlap and late ticks do not queue.

use std::sync::Arc;
use std::time::Duration;

use brickwatch_core::CatalogConfig;
use brickwatch_notify::Notifier;
use brickwatch_scraper::CatalogScraper;
use brickwatch_store::CategoryStore;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::poll::{poll_all, PollSummary};

/// Everything one poll cycle reads or mutates.
pub(crate) struct PollState<N> {
    pub scraper: CatalogScraper,
    pub catalog: CatalogConfig,
    pub store: CategoryStore,
    pub notifier: N,
}

/// Runs one cycle unless another is in progress.
///
/// Returns `None` when the cycle was skipped.
pub(crate) async fn run_cycle<N: Notifier + Sync>(
    state: &Mutex<PollState<N>>,
) -> Option<PollSummary> {
    let Ok(mut guard) = state.try_lock() else {
        tracing::warn!("scheduler: previous poll still running; skipping tick");
        return None;
    };
    let PollState {
        scraper,
        catalog,
        store,
        notifier,
    } = &mut *guard;
    Some(poll_all(scraper, catalog, store, notifier).await)
}

/// Builds and starts the scheduler with a poll job every `interval_minutes`.
///
/// The returned [`JobScheduler`] must be kept alive; dropping it stops the
/// job.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised, the
/// job cannot be registered, or the scheduler fails to start.
pub(crate) async fn build_scheduler<N>(
    state: Arc<Mutex<PollState<N>>>,
    interval_minutes: u64,
) -> Result<JobScheduler, JobSchedulerError>
where
    N: Notifier + Send + Sync + 'static,
{
    let scheduler = JobScheduler::new().await?;
    register_poll_job(&scheduler, state, interval_minutes).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_poll_job<N>(
    scheduler: &JobScheduler,
    state: Arc<Mutex<PollState<N>>>,
    interval_minutes: u64,
) -> Result<(), JobSchedulerError>
where
    N: Notifier + Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_minutes.saturating_mul(60));

    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let state = Arc::clone(&state);

        Box::pin(async move {
            tracing::info!("scheduler: starting poll cycle");
            if let Some(summary) = run_cycle(&state).await {
                tracing::info!(
                    new = summary.total_new(),
                    notified = summary.total_notified(),
                    "scheduler: poll cycle complete"
                );
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(interval_minutes, "scheduler: poll job registered");
    Ok(())
}
