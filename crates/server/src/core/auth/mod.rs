//! Authentication Module
//!
//! Handles user registration, login, and session management.
//! User data is stored in SQLite at `<data_dir>/users.sqlite`.

pub mod handlers;
pub mod middleware;

use anyhow::{Context, Result};
use bcrypt::{hash, verify};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::str::FromStr;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::config::ServerConfig;
use crate::core::error::Error;

/// Minimum length for both usernames and passwords
pub const MIN_CREDENTIAL_LEN: usize = 3;

/// User record stored in database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Public user info (no sensitive data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// Session token for authenticated requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

type UserRow = (String, String, String, String);

/// Timestamps are stored as RFC 3339 text; anything else is a corrupt row
fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>> {
    value.parse().map_err(|e| {
        warn!("[Auth] Corrupt {} value {:?}: {}", column, value, e);
        anyhow::anyhow!("Corrupt {} value {:?} in users database", column, value)
    })
}

fn user_info_from_row((id, username, name, created_at): UserRow) -> Result<UserInfo> {
    Ok(UserInfo {
        created_at: parse_timestamp("users.created_at", &created_at)?,
        id,
        username,
        name,
    })
}

/// Auth manager handles all authentication
pub struct AuthManager {
    pool: SqlitePool,
    bcrypt_cost: u32,
    session_ttl: chrono::Duration,
    /// In-memory session cache
    sessions: RwLock<HashMap<String, Session>>,
}

impl AuthManager {
    /// Open (or create) the users database and its tables
    pub async fn new(config: &ServerConfig) -> Result<Self> {
        let db_path = config.users_db_path();
        let options = SqliteConnectOptions::from_str(&format!(
            "sqlite://{}",
            db_path.to_string_lossy().replace('\\', "/")
        ))?
        .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open users database {:?}", db_path))?;

        let manager = Self {
            pool,
            bcrypt_cost: config.bcrypt_cost,
            session_ttl: chrono::Duration::days(config.session_ttl_days),
            sessions: RwLock::new(HashMap::new()),
        };

        manager.init_db().await?;

        info!("[Auth] Initialized at {:?}", db_path);

        Ok(manager)
    }

    async fn init_db(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                last_login TEXT,
                is_active INTEGER DEFAULT 1
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Register a new user
    pub async fn signup(&self, username: String, name: String, password: String) -> Result<User> {
        if username.chars().count() < MIN_CREDENTIAL_LEN {
            return Err(Error::Validation(format!(
                "username must be at least {} characters long",
                MIN_CREDENTIAL_LEN
            ))
            .into());
        }
        if password.chars().count() < MIN_CREDENTIAL_LEN {
            return Err(Error::Validation(format!(
                "password must be at least {} characters long",
                MIN_CREDENTIAL_LEN
            ))
            .into());
        }

        let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
            .bind(&username)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(Error::UsernameTaken.into());
        }

        let password_hash =
            hash(&password, self.bcrypt_cost).context("Failed to hash password")?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            username,
            name,
            password_hash,
            created_at: Utc::now(),
            last_login: None,
            is_active: true,
        };

        let inserted = sqlx::query(
            "INSERT INTO users (id, username, name, password_hash, created_at, is_active) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.created_at.to_rfc3339())
        .bind(user.is_active)
        .execute(&self.pool)
        .await;

        // A concurrent signup can win the race between the lookup and the insert
        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                warn!("[Auth] Username {} taken during signup", user.username);
                return Err(Error::UsernameTaken.into());
            }
            Err(e) => return Err(e.into()),
        }

        info!("[Auth] User registered: {} ({})", user.username, user.id);

        Ok(user)
    }

    /// Login user and create session
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, Session)> {
        let row: Option<(String, String, String, String, String)> = sqlx::query_as(
            "SELECT id, username, name, password_hash, created_at FROM users WHERE username = ? AND is_active = 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some((user_id, username, name, password_hash, created_at)) = row else {
            warn!("[Auth] Login attempt for unknown user {}", username);
            return Err(Error::LoginFail.into());
        };

        let valid = verify(password, &password_hash).context("Failed to verify password")?;
        if !valid {
            warn!("[Auth] Failed login attempt for {}", username);
            return Err(Error::LoginFail.into());
        }

        let now = Utc::now();
        sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(now.to_rfc3339())
            .bind(&user_id)
            .execute(&self.pool)
            .await?;

        let session = self.create_session(&user_id).await?;

        let user = User {
            id: user_id,
            username,
            name,
            password_hash: String::new(), // Don't return hash
            created_at: parse_timestamp("users.created_at", &created_at)?,
            last_login: Some(now),
            is_active: true,
        };

        info!("[Auth] User logged in: {}", user.username);

        Ok((user, session))
    }

    async fn create_session(&self, user_id: &str) -> Result<Session> {
        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            expires_at: now + self.session_ttl,
        };

        self.prune_expired_sessions(now).await?;

        sqlx::query(
            "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.token)
        .bind(&session.user_id)
        .bind(session.created_at.to_rfc3339())
        .bind(session.expires_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());

        Ok(session)
    }

    /// Drop sessions that expired at or before `now` from the cache and the database
    async fn prune_expired_sessions(&self, now: DateTime<Utc>) -> Result<()> {
        let removed = {
            let mut sessions = self.sessions.write().await;
            let before = sessions.len();
            sessions.retain(|_, session| session.expires_at > now);
            before - sessions.len()
        };

        sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now.to_rfc3339())
            .execute(&self.pool)
            .await?;

        if removed > 0 {
            debug!("[Auth] Pruned {} expired cached sessions", removed);
        }

        Ok(())
    }

    /// Resolve a session token to the user it belongs to
    pub async fn validate_session(&self, token: &str) -> Result<UserInfo> {
        let cached = self.sessions.read().await.get(token).cloned();

        let (user_id, expires_at) = match cached {
            Some(session) => (session.user_id, session.expires_at),
            None => {
                let row: Option<(String, String)> =
                    sqlx::query_as("SELECT user_id, expires_at FROM sessions WHERE token = ?")
                        .bind(token)
                        .fetch_optional(&self.pool)
                        .await?;
                let (user_id, expires_at) =
                    row.ok_or_else(|| anyhow::Error::new(Error::AuthFailInvalidToken))?;
                (user_id, parse_timestamp("sessions.expires_at", &expires_at)?)
            }
        };

        if expires_at <= Utc::now() {
            self.sessions.write().await.remove(token);
            return Err(Error::AuthFailInvalidToken.into());
        }

        self.find_user(&user_id)
            .await?
            .ok_or_else(|| Error::AuthFailInvalidToken.into())
    }

    /// Logout user (invalidate session)
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.sessions.write().await.remove(token);

        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        info!("[Auth] Session invalidated");

        Ok(())
    }

    /// Active user by id; `Ok(None)` when no such user exists
    pub async fn find_user(&self, user_id: &str) -> Result<Option<UserInfo>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, name, created_at FROM users WHERE id = ? AND is_active = 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(user_info_from_row).transpose()
    }

    /// Users keyed by id, for populating blog owners
    pub async fn users_by_id(&self) -> Result<HashMap<String, UserInfo>> {
        Ok(self
            .list_users()
            .await?
            .into_iter()
            .map(|user| (user.id.clone(), user))
            .collect())
    }

    /// List all active users
    pub async fn list_users(&self) -> Result<Vec<UserInfo>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT id, username, name, created_at FROM users WHERE is_active = 1 ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(user_info_from_row).collect()
    }
}
