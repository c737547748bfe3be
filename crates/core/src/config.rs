//! Viewer configuration types.

use serde::{Deserialize, Serialize};

/// What the refresh scheduler does with a failed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Log the failure, keep the last published rows, wait for the next
    /// interval.
    #[default]
    SkipTick,
    /// Stop the scheduler and surface the error to the caller.
    Halt,
}

/// Refresh loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Milliseconds between refresh ticks.
    pub refresh_interval_ms: u64,
    /// Bound on a single quote fetch.
    pub fetch_timeout_secs: u64,
    pub fault_policy: FaultPolicy,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 3000,
            fetch_timeout_secs: 10,
            fault_policy: FaultPolicy::default(),
        }
    }
}

/// TD Ameritrade connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TdSettings {
    pub base_url: String,
    /// OAuth access token. Usually supplied via `OPTVIEWER_TD__ACCESS_TOKEN`
    /// rather than the config file.
    pub access_token: String,
    pub timeout_secs: u64,
}

impl Default for TdSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.tdameritrade.com/v1".to_string(),
            access_token: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub viewer: ViewerConfig,
    pub td: TdSettings,
}
