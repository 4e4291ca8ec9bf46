use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub food_api_base_url: String,
    pub image_api_base_url: String,
    pub recipe_api_base_url: String,
    pub identity_base_url: String,
    pub unsplash_access_key: Option<String>,
    pub spoonacular_api_key: Option<String>,
    pub identity_api_key: Option<String>,
    pub http_request_timeout_secs: u64,
    pub http_user_agent: String,
    pub http_max_retries: u32,
    pub http_retry_backoff_base_secs: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub catalog_page_size: u32,
    pub image_placeholder_url: String,
    pub catalog_refresh_schedule: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("food_api_base_url", &self.food_api_base_url)
            .field("image_api_base_url", &self.image_api_base_url)
            .field("recipe_api_base_url", &self.recipe_api_base_url)
            .field("identity_base_url", &self.identity_base_url)
            .field(
                "unsplash_access_key",
                &self.unsplash_access_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "spoonacular_api_key",
                &self.spoonacular_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "identity_api_key",
                &self.identity_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("http_request_timeout_secs", &self.http_request_timeout_secs)
            .field("http_user_agent", &self.http_user_agent)
            .field("http_max_retries", &self.http_max_retries)
            .field(
                "http_retry_backoff_base_secs",
                &self.http_retry_backoff_base_secs,
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("catalog_page_size", &self.catalog_page_size)
            .field("image_placeholder_url", &self.image_placeholder_url)
            .field("catalog_refresh_schedule", &self.catalog_refresh_schedule)
            .finish()
    }
}
