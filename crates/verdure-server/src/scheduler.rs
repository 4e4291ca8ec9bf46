//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! recurring catalog cache refresh, so a cold cache or an upstream outage
//! never leaves `/grocery-items` and `/daily-offers` with nothing to serve.

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::api::catalog::{build_daily_offers, build_grocery_items};
use crate::api::AppState;

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    state: AppState,
    schedule: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_catalog_refresh_job(&scheduler, state, schedule).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_catalog_refresh_job(
    scheduler: &JobScheduler,
    state: AppState,
    schedule: &str,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let state = state.clone();

        Box::pin(async move {
            tracing::info!("scheduler: refreshing catalog caches");
            run_catalog_refresh(&state).await;
            tracing::info!("scheduler: catalog cache refresh complete");
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// Rebuilds both catalog caches through the same path the request handlers
/// use. A failed build leaves the previous cached value untouched.
async fn run_catalog_refresh(state: &AppState) {
    match build_grocery_items(state).await {
        Ok(items) => tracing::info!(count = items.len(), "scheduler: grocery catalog refreshed"),
        Err(e) => tracing::warn!(error = %e, "scheduler: grocery catalog refresh produced nothing"),
    }

    match build_daily_offers(state).await {
        Ok(offers) => tracing::info!(count = offers.len(), "scheduler: daily offers refreshed"),
        Err(e) => tracing::warn!(error = %e, "scheduler: daily offers refresh produced nothing"),
    }
}
