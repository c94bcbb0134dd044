use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// How the request gate treats protected paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateMode {
    /// Protected paths are classified and logged but not enforced.
    Off,
    /// Protected paths require HTTP Basic credentials of a stored user.
    Basic,
}

impl FromStr for GateMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "" => Ok(GateMode::Off),
            "basic" => Ok(GateMode::Basic),
            other => anyhow::bail!("unknown AUTH_GATE mode '{other}' (expected off|basic)"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub gate: GateMode,
    pub public_prefixes: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            gate: GateMode::Off,
            public_prefixes: vec!["/auth".into(), "/health".into()],
        }
    }
}

impl SecurityConfig {
    /// `/auth` matches `/auth` and `/auth/...`, never `/authors`.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_prefixes.iter().any(|prefix| {
            path == prefix
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub cors_allowed_origins: Vec<String>,
    pub security: SecurityConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let database_max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(v) => v
                .parse::<u32>()
                .with_context(|| format!("invalid DATABASE_MAX_CONNECTIONS '{v}'"))?,
            Err(_) => 10,
        };
        let cors_allowed_origins = parse_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
        );
        let gate = std::env::var("AUTH_GATE")
            .map(|v| v.parse::<GateMode>())
            .unwrap_or(Ok(GateMode::Off))?;

        Ok(Self {
            database_url,
            database_max_connections,
            cors_allowed_origins,
            security: SecurityConfig {
                gate,
                ..SecurityConfig::default()
            },
        })
    }

    /// `memory:` selects the in-process stores instead of Postgres.
    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with("memory:")
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
