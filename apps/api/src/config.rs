use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::screening::skills::SkillVocabulary;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Origins allowed by CORS, e.g. the dashboard on `localhost:3000`.
    pub allowed_origins: Vec<String>,
    /// Request body cap for `/analyze` (all uploaded resumes together).
    pub max_upload_bytes: usize,
    /// Newline-separated vocabulary replacing the built-in skill list.
    pub skills_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process
    /// environment in production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a non-negative integer")?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            allowed_origins,
            max_upload_bytes,
            skills_file: lookup("SKILLS_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// The vocabulary from `SKILLS_FILE`, or the built-in list.
    pub fn load_vocabulary(&self) -> Result<SkillVocabulary> {
        match &self.skills_file {
            Some(path) => SkillVocabulary::from_file(path),
            None => Ok(SkillVocabulary::default()),
        }
    }
}
