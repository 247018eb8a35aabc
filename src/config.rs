use std::env;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_IMGBB_API_URL: &str = "https://api.imgbb.com";
pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
/// ImgBB rejects anything above 32 MB, so there is no point buffering more.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Process-wide settings, read once at startup and handed to the service
/// constructors. Nothing in the request path touches the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub imgbb_api_key: Option<String>,
    pub imgbb_api_url: String,
    pub groq_api_key: Option<String>,
    pub groq_api_url: String,
    pub groq_model: String,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Expects `.env` to have been loaded already.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = non_empty("PORT")
            .and_then(|p| p.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let max_upload_bytes = non_empty("MAX_UPLOAD_BYTES")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Self {
            port,
            imgbb_api_key: non_empty("IMGBB_API_KEY"),
            imgbb_api_url: non_empty("IMGBB_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_IMGBB_API_URL.to_string()),
            groq_api_key: non_empty("GROQ_API_KEY"),
            groq_api_url: non_empty("GROQ_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GROQ_API_URL.to_string()),
            groq_model: non_empty("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            max_upload_bytes,
        }
    }

    /// Logs a warning for every secret that is missing. The process still
    /// starts; the affected route answers with a 500 until the key is set.
    pub fn warn_missing_keys(&self) {
        if self.imgbb_api_key.is_none() {
            log::warn!("⚠️ IMGBB_API_KEY not set, /upload will fail");
        }
        if self.groq_api_key.is_none() {
            log::warn!("⚠️ GROQ_API_KEY not set, /analyze will fail");
        }
    }
}
