use std::env;

use serde::{Deserialize, Serialize};

use crate::error::PitstopError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_required(key: &str) -> Result<String, PitstopError> {
    env_opt(key).ok_or_else(|| PitstopError::Config(format!("{} is not set", key)))
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub supabase: SupabaseConfig,
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    ///
    /// Missing `SUPABASE_URL` or `SUPABASE_SERVICE_ROLE_KEY` is fatal.
    pub fn from_env() -> Result<Self, PitstopError> {
        Ok(Self {
            supabase: SupabaseConfig::from_env()?,
            schedule: ScheduleConfig::from_env(),
        })
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  supabase:  url={}", self.supabase.url);
        tracing::info!("  schedule:  daily at {}", self.schedule.run_at);
    }
}

// ── Supabase backend ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Service-role key; bypasses row-level security, never logged.
    pub service_role_key: String,
}

impl SupabaseConfig {
    fn from_env() -> Result<Self, PitstopError> {
        Ok(Self {
            url: env_required("SUPABASE_URL")?,
            service_role_key: env_required("SUPABASE_SERVICE_ROLE_KEY")?,
        })
    }
}

// ── Schedule ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Daily run time as local wall-clock "HH:MM".
    pub run_at: String,
}

impl ScheduleConfig {
    fn from_env() -> Self {
        Self {
            run_at: env_or("CRON_TIME", "08:00"),
        }
    }
}
