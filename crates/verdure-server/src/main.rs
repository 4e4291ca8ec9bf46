mod api;
mod identity;
mod middleware;
mod scheduler;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState, CatalogSettings},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(verdure_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = verdure_db::PoolConfig::from_app_config(&config);
    let pool = verdure_db::connect_pool(&config.database_url, pool_config).await?;
    verdure_db::run_migrations(&pool).await?;

    let food = Arc::new(verdure_produce::FoodFactsClient::new(
        &config.food_api_base_url,
        config.http_request_timeout_secs,
        &config.http_user_agent,
        config.http_max_retries,
        config.http_retry_backoff_base_secs,
    )?);

    let images = match &config.unsplash_access_key {
        Some(key) => Some(Arc::new(verdure_produce::ImageSearchClient::new(
            &config.image_api_base_url,
            key,
            config.http_request_timeout_secs,
            &config.http_user_agent,
        )?)),
        None => {
            tracing::warn!("UNSPLASH_ACCESS_KEY not set; catalog images fall back to placeholder");
            None
        }
    };

    let recipes = match &config.spoonacular_api_key {
        Some(key) => Some(Arc::new(verdure_recipes::SpoonacularClient::with_base_url(
            key,
            config.http_request_timeout_secs,
            &config.http_user_agent,
            &config.recipe_api_base_url,
        )?)),
        None => {
            tracing::warn!("SPOONACULAR_API_KEY not set; meal recommendations unavailable");
            None
        }
    };

    let state = AppState {
        pool,
        food,
        images,
        recipes,
        settings: Arc::new(CatalogSettings {
            page_size: config.catalog_page_size,
            placeholder_image_url: config.image_placeholder_url.clone(),
        }),
    };

    let _scheduler =
        scheduler::build_scheduler(state.clone(), &config.catalog_refresh_schedule).await?;

    let auth = AuthState::from_config(&config)?;
    let app = build_app(state, auth, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
