//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub timings: TimingsConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub categorizer: CategorizerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Platform descriptors that replace (same name) or extend the built-in table.
    #[serde(default)]
    pub platforms: Vec<PlatformDescriptor>,
}

impl Config {
    /// Built-in platforms with this configuration's overrides applied.
    pub fn effective_platforms(&self) -> Vec<PlatformDescriptor> {
        crate::platforms::merge_platforms(crate::platforms::builtin_platforms(), &self.platforms)
    }
}

/// Browser connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote debugging endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// URL substring selecting the tab to attach to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_match: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_match: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9222".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// Settle delays of the batch runner, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingsConfig {
    /// Wait after opening an item's contextual menu.
    #[serde(default = "default_menu_settle")]
    pub menu_settle_ms: u64,

    /// Wait after choosing a menu entry, before looking for the confirmation.
    #[serde(default = "default_action_settle")]
    pub action_settle_ms: u64,

    /// Wait after finishing an item, before the next one.
    #[serde(default = "default_item_settle")]
    pub item_settle_ms: u64,
}

impl TimingsConfig {
    pub fn menu_settle(&self) -> Duration {
        Duration::from_millis(self.menu_settle_ms)
    }

    pub fn action_settle(&self) -> Duration {
        Duration::from_millis(self.action_settle_ms)
    }

    pub fn item_settle(&self) -> Duration {
        Duration::from_millis(self.item_settle_ms)
    }

    /// All delays zero. Used by tests and dry runs.
    pub fn immediate() -> Self {
        Self {
            menu_settle_ms: 0,
            action_settle_ms: 0,
            item_settle_ms: 0,
        }
    }
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            menu_settle_ms: default_menu_settle(),
            action_settle_ms: default_action_settle(),
            item_settle_ms: default_item_settle(),
        }
    }
}

fn default_menu_settle() -> u64 {
    500
}

fn default_action_settle() -> u64 {
    500
}

fn default_item_settle() -> u64 {
    1000
}

/// Gesture interpretation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Pointer travel below which a press counts as a click, not a drag.
    #[serde(default = "default_click_threshold")]
    pub click_threshold_px: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            click_threshold_px: default_click_threshold(),
        }
    }
}

fn default_click_threshold() -> f64 {
    4.0
}

/// Display language for toolbar and prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

/// Injected UI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub language: Language,
}

/// Remote categorization endpoint (OpenAI-compatible chat completions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizerConfig {
    /// Absent means categorization is unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_categorizer_timeout")]
    pub timeout_secs: u64,
}

impl Default for CategorizerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model: default_model(),
            timeout_secs: default_categorizer_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_categorizer_timeout() -> u64 {
    20
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    /// Also write a daily-rolling log file under `~/.chatsweep/logs`.
    #[serde(default = "default_true")]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: default_true(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

/// DOM query descriptors for one host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDescriptor {
    pub name: String,

    /// Host names served by this platform; subdomains match too.
    pub hosts: Vec<String>,

    /// Sidebar container receiving the entry-point toggle.
    pub container_selector: String,

    /// One selectable history row.
    pub item_selector: String,

    /// Title text inside a row.
    pub title_selector: String,

    /// Contextual-menu trigger inside a row.
    pub menu_button_selector: String,

    /// Candidate contextual-menu entries, queried document-wide.
    pub delete_action_selector: String,

    /// Candidate confirmation buttons, queried document-wide.
    pub confirm_selector: String,

    /// Stable attribute on the row used as its identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_attribute: Option<String>,

    #[serde(default = "default_delete_labels")]
    pub delete_labels: Vec<String>,

    #[serde(default = "default_confirm_labels")]
    pub confirm_labels: Vec<String>,

    #[serde(default = "default_move_labels")]
    pub move_labels: Vec<String>,

    /// Menu triggers only render while the row is hovered.
    #[serde(default)]
    pub hover_before_menu: bool,
}

impl PlatformDescriptor {
    /// True when `host` is one of this platform's hosts or a subdomain of one.
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
        self.hosts.iter().any(|h| {
            let h = h.to_ascii_lowercase();
            host == h || host.ends_with(&format!(".{}", h))
        })
    }
}

pub(crate) fn default_delete_labels() -> Vec<String> {
    vec!["delete".to_string(), "删除".to_string()]
}

pub(crate) fn default_confirm_labels() -> Vec<String> {
    vec![
        "delete".to_string(),
        "confirm".to_string(),
        "删除".to_string(),
        "确认".to_string(),
    ]
}

pub(crate) fn default_move_labels() -> Vec<String> {
    vec![
        "move".to_string(),
        "add to project".to_string(),
        "移动".to_string(),
    ]
}
