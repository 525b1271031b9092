use std::time::Duration;

use anyhow::Context;

/// Console configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Base URL of the REST API (default: `http://localhost:3000`).
    pub api_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Logical viewport width used to paginate lists (default: `1280`).
    pub viewport_width: u32,
    /// Emit JSON log lines instead of text.
    pub json_logs: bool,
}

impl ConsoleConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `PROJDESK_API_URL`              | `http://localhost:3000` |
    /// | `PROJDESK_REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `PROJDESK_VIEWPORT_WIDTH`       | `1280`                  |
    /// | `LOG_FORMAT`                    | `text`                  |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("PROJDESK_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "http://localhost:3000".into());

        let request_timeout_secs: u64 = lookup("PROJDESK_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .trim()
            .parse()
            .context("PROJDESK_REQUEST_TIMEOUT_SECS must be a valid u64")?;

        let viewport_width: u32 = lookup("PROJDESK_VIEWPORT_WIDTH")
            .unwrap_or_else(|| "1280".into())
            .trim()
            .parse()
            .context("PROJDESK_VIEWPORT_WIDTH must be a valid u32")?;

        let json_logs = lookup("LOG_FORMAT").is_some_and(|f| f.trim().eq_ignore_ascii_case("json"));

        Ok(Self {
            api_url,
            request_timeout_secs,
            viewport_width,
            json_logs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
