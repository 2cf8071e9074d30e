//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

/// Tour plugin configuration.
#[derive(Debug, Clone)]
pub struct TourConfig {
    /// Plugin name, matched against the per-meeting client settings document.
    pub plugin_name: String,
    /// Directory holding the locale message bundles (`en.json`, `pt_BR.json`, ...).
    pub locales_dir: PathBuf,
    /// Delay between opening the relevant panels and starting the tour,
    /// giving layout a chance to settle. No cancellation path.
    pub settle_delay: Duration,
    /// Icon hint for the registered menu entry.
    pub menu_icon: String,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            plugin_name: "TourPlugin".to_string(),
            locales_dir: PathBuf::from("./locales"),
            settle_delay: Duration::from_secs(1),
            menu_icon: "presentation".to_string(),
        }
    }
}
