//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use std::env;

/// Default storage bucket for blog media uploads.
pub const DEFAULT_MEDIA_BUCKET: &str = "blog_media";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Base URL of the managed backend (REST, RPC and storage live under it)
    pub supabase_url: String,
    /// Frontend URL, used for CORS and login redirects
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Storage bucket receiving uploaded images
    pub media_bucket: String,
    /// How long a looked-up operator role stays cached
    pub role_cache_ttl_secs: u64,

    // --- Secrets ---
    /// Project API key sent with every backend request
    pub supabase_anon_key: String,
    /// HS256 secret the backend's auth service signs sessions with
    pub jwt_secret: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            supabase_url: env::var("SUPABASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_URL"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            media_bucket: env::var("MEDIA_BUCKET")
                .unwrap_or_else(|_| DEFAULT_MEDIA_BUCKET.to_string()),
            role_cache_ttl_secs: env::var("ROLE_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),

            supabase_anon_key: env::var("SUPABASE_ANON_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            jwt_secret: env::var("SUPABASE_JWT_SECRET")
                .map_err(|_| ConfigError::Missing("SUPABASE_JWT_SECRET"))?
                .trim()
                .as_bytes()
                .to_vec(),
        })
    }

    /// Config for tests. Points the backend at `supabase_url`.
    pub fn test_default() -> Self {
        Self {
            supabase_url: "http://127.0.0.1:9".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            media_bucket: DEFAULT_MEDIA_BUCKET.to_string(),
            role_cache_ttl_secs: 300,
            supabase_anon_key: "test_anon_key".to_string(),
            jwt_secret: b"test_jwt_secret_32_bytes_minimum!".to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
