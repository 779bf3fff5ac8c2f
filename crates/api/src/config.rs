/// Default API endpoint when `CIRCONUS_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "https://api.circonus.com/v2";

/// Default application name sent in `X-Circonus-App-Name`.
pub const DEFAULT_APP_NAME: &str = "circonus-api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable was not set or was empty.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable was set but could not be parsed.
    #[error("{name} is invalid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base API URL; resource paths are appended to it.
    pub url: String,
    /// API token sent in `X-Circonus-Auth-Token`.
    pub token_key: String,
    /// Application name registered with the token.
    pub token_app: String,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Build a config for `token_key` with every other field defaulted.
    pub fn new(token_key: impl Into<String>) -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            token_key: token_key.into(),
            token_app: DEFAULT_APP_NAME.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the base URL. A bare host is expanded, see [`normalize_url`].
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = normalize_url(url);
        self
    }

    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.token_app = app.into();
        self
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                     | Default                        |
    /// |-----------------------------|--------------------------------|
    /// | `CIRCONUS_API_URL`          | `https://api.circonus.com/v2`  |
    /// | `CIRCONUS_API_TOKEN`        | (required)                     |
    /// | `CIRCONUS_API_APP`          | `circonus-api`                 |
    /// | `CIRCONUS_API_TIMEOUT_SECS` | `30`                           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let token_key = get("CIRCONUS_API_TOKEN").ok_or(ConfigError::Missing("CIRCONUS_API_TOKEN"))?;

        let url = get("CIRCONUS_API_URL")
            .map(|u| normalize_url(&u))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token_app = get("CIRCONUS_API_APP").unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        // Must be a positive number of seconds.
        let request_timeout_secs = match get("CIRCONUS_API_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "CIRCONUS_API_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            url,
            token_key,
            token_app,
            request_timeout_secs,
        })
    }
}

/// Expand a bare host (`api.example.com`) to `https://<host>/v2` and strip
/// any trailing slash so paths can be appended directly.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    let expanded = if url.contains("://") || url.contains('/') {
        url.to_string()
    } else {
        format!("https://{url}/v2")
    };
    expanded.trim_end_matches('/').to_string()
}
