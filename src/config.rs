use std::path::PathBuf;

/// Daemon settings, read from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Workspace directory to open before the first request.
    pub workspace: Option<PathBuf>,
    /// `tracing` filter directive for stderr logging.
    pub log_filter: String,
    /// Fixed shuffle seed; unset means a fresh entropy seed per process.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace: None,
            log_filter: "info".to_string(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            workspace: non_empty("EXAMSEATD_WORKSPACE").map(PathBuf::from).or(default.workspace),
            log_filter: non_empty("EXAMSEATD_LOG").unwrap_or(default.log_filter),
            seed: non_empty("EXAMSEATD_SEED").and_then(|v| v.parse().ok()).or(default.seed),
        }
    }
}
