use crate::auth::repo::{InMemoryUserRepo, PgUserRepo, UserRepo};
use crate::auth::services::AuthService;
use crate::config::AppConfig;
#[cfg(test)]
use crate::config::{parse_origins, SecurityConfig, DEFAULT_CORS_ORIGINS};
use crate::forms::repo::{FormRepo, InMemoryFormRepo, PgFormRepo};
use crate::forms::services::FormService;
use anyhow::Context;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// `None` when running on the in-memory stores.
    pub db: Option<PgPool>,
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
    pub forms: FormService,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        if config.uses_memory_store() {
            tracing::warn!("DATABASE_URL is memory:, data lives only as long as the process");
            return Ok(Self::in_memory(config));
        }

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        Ok(Self::from_parts(
            Some(db.clone()),
            config,
            Arc::new(PgUserRepo::new(db.clone())),
            Arc::new(PgFormRepo::new(db)),
        ))
    }

    pub fn from_parts(
        db: Option<PgPool>,
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepo>,
        forms: Arc<dyn FormRepo>,
    ) -> Self {
        Self {
            db,
            config,
            auth: AuthService::new(users),
            forms: FormService::new(forms),
        }
    }

    pub fn in_memory(config: Arc<AppConfig>) -> Self {
        Self::from_parts(
            None,
            config,
            Arc::new(InMemoryUserRepo::default()),
            Arc::new(InMemoryFormRepo::default()),
        )
    }

    /// In-memory state with default settings, for tests.
    #[cfg(test)]
    pub fn fake() -> Self {
        Self::fake_with(SecurityConfig::default())
    }

    #[cfg(test)]
    pub fn fake_with(security: SecurityConfig) -> Self {
        let config = Arc::new(AppConfig {
            database_url: "memory:".into(),
            database_max_connections: 1,
            cors_allowed_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            security,
        });
        Self::in_memory(config)
    }
}
