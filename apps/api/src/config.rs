use anyhow::{Context, Result};

const DEFAULT_TASK_ENDPOINT: &str =
    "https://clovastudio.stream.ntruss.com/v2/tasks/00vpqbzj/chat-completions";
const DEFAULT_CHAT_ENDPOINT: &str =
    "https://clovastudio.stream.ntruss.com/v3/chat-completions/HCX-007";
const DEFAULT_ROADMAP_SERVICE_URL: &str = "http://localhost:8000";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub ncp_api_key: String,
    /// Tuned generation task used to predict a career label from skills.
    pub task_endpoint: String,
    /// HCX-007 chat endpoint used for narrative recommendations.
    pub chat_endpoint: String,
    pub roadmap_service_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            ncp_api_key: require_env("NCP_API_KEY")?,
            task_endpoint: env_or("NCP_CLOVASTUDIO_TUNING_ENDPOINT", DEFAULT_TASK_ENDPOINT),
            chat_endpoint: env_or("HCX_007_URL", DEFAULT_CHAT_ENDPOINT),
            roadmap_service_url: env_or("ROADMAP_SERVICE_URL", DEFAULT_ROADMAP_SERVICE_URL)
                .trim_end_matches('/')
                .to_string(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
