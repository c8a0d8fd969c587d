use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string, or `memory://` for the in-process store.
    pub database_url: String,
    /// Shared bearer secret for every write endpoint. Loaded once, never mutated.
    pub admin_token: String,
    pub uploads_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            admin_token: require_env("ADMIN_TOKEN")?,
            uploads_dir: std::env::var("UPLOADS_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with("memory://")
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_url(url: &str) -> Config {
        Config {
            database_url: url.to_string(),
            admin_token: "token".to_string(),
            uploads_dir: "uploads".into(),
            port: 4000,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_memory_store_selected_by_scheme() {
        assert!(config_with_url("memory://").uses_memory_store());
        assert!(!config_with_url("postgres://localhost/portfolio").uses_memory_store());
    }
}
