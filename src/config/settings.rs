use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_ENV: &str = "SPIRAL_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "SPIRAL_API_TIMEOUT_SECS";

/// One day in epoch milliseconds
pub const DAY_MS: i64 = 86_400_000;

// 2025-01-01T00:00:00Z and 2025-12-31T00:00:00Z
const DEFAULT_WINDOW_START_MS: i64 = 1_735_689_600_000;
const DEFAULT_WINDOW_END_MS: i64 = 1_767_139_200_000;

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: "SpiralStats/0.1",
            timeout_secs: 30,
        }
    }
}

impl ApiSettings {
    /// Read the API address from the environment, keeping defaults for anything unset
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let base_url = lookup(BASE_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.base_url);
        let timeout_secs = lookup(TIMEOUT_ENV)
            .and_then(|secs| secs.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Self {
            base_url,
            timeout_secs,
            ..defaults
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct ChartSettings {
    /// Window shown while no history is loaded
    pub default_window_start_ms: i64,
    pub default_window_end_ms: i64,
    /// Narrowest window a user adjustment may leave behind
    pub min_window_ms: i64,
    pub sample_count: usize,
    /// Standard deviations either side of mu drawn as the skill band
    pub band_z: f64,
    /// Standard deviations of padding around the density plot
    pub domain_sigmas: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            default_window_start_ms: DEFAULT_WINDOW_START_MS,
            default_window_end_ms: DEFAULT_WINDOW_END_MS,
            min_window_ms: DAY_MS,
            sample_count: 1000,
            band_z: 3.0,
            domain_sigmas: 4.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub default_mu: f64,
    pub default_sigma: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            default_mu: 25.0,
            default_sigma: 25.0 / 3.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub chart: ChartSettings,
    pub rating: RatingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            chart: ChartSettings::default(),
            rating: RatingSettings::default(),
        }
    }
}

impl AppConfig {
    /// Defaults, with the API address taken from the environment
    pub fn new() -> Self {
        Self {
            api: ApiSettings::from_env(),
            chart: ChartSettings::default(),
            rating: RatingSettings::default(),
        }
    }
}
