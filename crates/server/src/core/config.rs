//! Bloglist server configuration

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::auth::AuthManager;
use crate::core::store::JsonBlogStore;

/// Configuration for the Bloglist server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Root data directory (users database lives here)
    pub data_dir: PathBuf,
    /// Directory holding one JSON document per blog
    pub blogs_dir: PathBuf,
    /// Port to listen on
    pub port: u16,
    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,
    /// Session lifetime in days
    pub session_ttl_days: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let data_dir = std::env::var("BLOGLIST_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("bloglist_data"));

        Self {
            blogs_dir: data_dir.join("blogs"),
            data_dir,
            port: env_or("PORT", 3003),
            bcrypt_cost: env_or("BCRYPT_COST", bcrypt::DEFAULT_COST),
            session_ttl_days: env_or("SESSION_TTL_DAYS", 30),
        }
    }
}

impl ServerConfig {
    /// Create config with custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        let base = base_dir.into();
        config.blogs_dir = base.join("blogs");
        config.data_dir = base;
        config
    }

    /// Path of the SQLite users database
    pub fn users_db_path(&self) -> PathBuf {
        self.data_dir.join("users.sqlite")
    }

    /// Ensure all directories exist
    pub async fn ensure_dirs(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        tokio::fs::create_dir_all(&self.blogs_dir).await?;
        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub store: Arc<JsonBlogStore>,
    pub auth: Arc<AuthManager>,
}

impl AppState {
    /// Open the blog store and users database described by `config`
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        config.ensure_dirs().await?;

        let auth = Arc::new(AuthManager::new(&config).await?);
        let store = Arc::new(JsonBlogStore::new(config.clone()).await?);

        Ok(Self {
            config,
            store,
            auth,
        })
    }
}
