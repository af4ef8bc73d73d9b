//! Listing and dashboard configuration.

use serde::{Deserialize, Serialize};

/// Settings for category listings and the dashboard summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Categories per page in list views.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Number of recent categories shown on the dashboard.
    #[serde(default = "default_dashboard_recent")]
    pub dashboard_recent: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            dashboard_recent: default_dashboard_recent(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}

fn default_dashboard_recent() -> u64 {
    5
}
