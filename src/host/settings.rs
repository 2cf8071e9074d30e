//! Remote per-meeting client settings.
//!
//! The host exposes the meeting's client settings document as a
//! subscription; this plugin only cares about its own entry under
//! `public.plugins`, which carries the "know more" link URLs by topic.

use serde::Deserialize;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::error::SettingsError;

/// "Know more" link URLs, keyed by topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TopicUrls {
    #[serde(default)]
    pub general: Option<String>,
    #[serde(default)]
    pub screenshare: Option<String>,
    #[serde(default)]
    pub whiteboard: Option<String>,
}

/// This plugin's settings block inside the client settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PluginSettings {
    #[serde(default)]
    pub url: Option<TopicUrls>,
}

impl PluginSettings {
    /// The configured link URLs, or empty defaults when unset.
    pub fn urls(&self) -> TopicUrls {
        self.url.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub settings: Option<PluginSettings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicSettings {
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientSettingsJson {
    #[serde(default)]
    pub public: Option<PublicSettings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeetingClientSettings {
    #[serde(rename = "clientSettingsJson", default)]
    pub client_settings_json: ClientSettingsJson,
}

/// Shape of one client-settings subscription result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientSettingsResult {
    #[serde(rename = "meeting_clientSettings", default)]
    pub meeting_client_settings: Vec<MeetingClientSettings>,
}

impl ClientSettingsResult {
    pub fn parse(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Find the settings block for the plugin named `plugin_name`.
    pub fn plugin_settings(&self, plugin_name: &str) -> Option<PluginSettings> {
        self.meeting_client_settings
            .first()?
            .client_settings_json
            .public
            .as_ref()?
            .plugins
            .iter()
            .find(|p| p.name.as_deref() == Some(plugin_name))?
            .settings
            .clone()
    }
}

/// Host-side handle pushing settings updates into the subscription.
#[derive(Debug)]
pub struct SettingsPublisher {
    plugin_name: String,
    tx: watch::Sender<Option<PluginSettings>>,
}

impl SettingsPublisher {
    /// Publish a new subscription result; extracts this plugin's block.
    pub fn publish(&self, result: &ClientSettingsResult) {
        let settings = result.plugin_settings(&self.plugin_name);
        if settings.is_none() {
            tracing::debug!(plugin = %self.plugin_name, "No plugin settings in update");
        }
        // Receivers may all be gone between tours; that is not an error.
        let _ = self.tx.send(settings);
    }
}

/// Plugin-side subscription to the current settings.
#[derive(Debug, Clone)]
pub struct SettingsSubscription {
    rx: watch::Receiver<Option<PluginSettings>>,
}

impl SettingsSubscription {
    /// Latest published settings, if any meeting update carried them.
    pub fn current(&self) -> Option<PluginSettings> {
        self.rx.borrow().clone()
    }

    /// The configured link URLs, empty when nothing is configured yet.
    pub fn urls(&self) -> TopicUrls {
        self.current().map(|s| s.urls()).unwrap_or_default()
    }

    /// Stream of settings updates.
    pub fn into_stream(self) -> WatchStream<Option<PluginSettings>> {
        WatchStream::new(self.rx)
    }
}

/// Create a publisher/subscription pair for `plugin_name`.
pub fn settings_channel(plugin_name: impl Into<String>) -> (SettingsPublisher, SettingsSubscription) {
    let (tx, rx) = watch::channel(None);
    (
        SettingsPublisher {
            plugin_name: plugin_name.into(),
            tx,
        },
        SettingsSubscription { rx },
    )
}
