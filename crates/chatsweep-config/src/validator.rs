//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, PlatformDescriptor};

/// Settle delays above this are probably a unit mistake.
const MAX_REASONABLE_SETTLE_MS: u64 = 10_000;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_timings(config, &mut result);
        Self::validate_selection(config, &mut result);
        Self::validate_categorizer(config, &mut result);
        Self::validate_logging(config, &mut result);
        Self::validate_platforms(config, &mut result);

        Ok(result)
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if !is_http_url(&config.browser.endpoint) {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "endpoint must be an http:// or https:// URL",
            ));
        }

        if config.browser.request_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "browser.request_timeout_secs",
                "request_timeout_secs must be greater than 0",
            ));
        }
    }

    fn validate_timings(config: &Config, result: &mut ValidationResult) {
        let timings = &config.timings;
        for (name, value) in [
            ("menu_settle_ms", timings.menu_settle_ms),
            ("action_settle_ms", timings.action_settle_ms),
            ("item_settle_ms", timings.item_settle_ms),
        ] {
            let path = format!("timings.{}", name);
            if value == 0 {
                result.add_warning(ValidationWarning::new(
                    path,
                    "settle delay is 0, the host page will likely not keep up",
                ));
            } else if value > MAX_REASONABLE_SETTLE_MS {
                result.add_warning(ValidationWarning::new(
                    path,
                    format!("settle delay is very high (>{} ms)", MAX_REASONABLE_SETTLE_MS),
                ));
            }
        }
    }

    fn validate_selection(config: &Config, result: &mut ValidationResult) {
        let threshold = config.selection.click_threshold_px;
        if !threshold.is_finite() || threshold < 0.0 {
            result.add_error(ValidationError::new(
                "selection.click_threshold_px",
                "click_threshold_px must be a non-negative number",
            ));
        }
    }

    fn validate_categorizer(config: &Config, result: &mut ValidationResult) {
        let Some(endpoint) = &config.categorizer.endpoint else {
            return;
        };

        if !is_http_url(endpoint) {
            result.add_error(ValidationError::new(
                "categorizer.endpoint",
                "endpoint must be an http:// or https:// URL",
            ));
        }

        if config.categorizer.api_key.is_none() {
            result.add_warning(ValidationWarning::new(
                "categorizer.api_key",
                "API key is not set, requests will be sent unauthenticated",
            ));
        }

        if config.categorizer.timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "categorizer.timeout_secs",
                "timeout_secs must be greater than 0",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, valid_levels
                ),
            ));
        }
    }

    fn validate_platforms(config: &Config, result: &mut ValidationResult) {
        for (i, platform) in config.platforms.iter().enumerate() {
            if config.platforms[..i].iter().any(|p| p.name == platform.name) {
                result.add_error(ValidationError::new(
                    format!("platforms[{}].name", i),
                    format!("Platform '{}' is defined more than once", platform.name),
                ));
            }
        }

        for platform in config.effective_platforms() {
            Self::validate_platform(&platform, result);
        }
    }

    fn validate_platform(platform: &PlatformDescriptor, result: &mut ValidationResult) {
        let prefix = format!("platforms.{}", platform.name);

        if platform.name.trim().is_empty() {
            result.add_error(ValidationError::new("platforms", "Platform name cannot be empty"));
        }

        if platform.hosts.iter().all(|h| h.trim().is_empty()) {
            result.add_error(ValidationError::new(
                format!("{}.hosts", prefix),
                "Platform must list at least one host",
            ));
        }

        for (field, value) in [
            ("container_selector", &platform.container_selector),
            ("item_selector", &platform.item_selector),
            ("title_selector", &platform.title_selector),
            ("menu_button_selector", &platform.menu_button_selector),
            ("delete_action_selector", &platform.delete_action_selector),
            ("confirm_selector", &platform.confirm_selector),
        ] {
            if value.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.{}", prefix, field),
                    "Selector cannot be empty",
                ));
            }
        }

        if platform.delete_labels.iter().all(|l| l.trim().is_empty()) {
            result.add_error(ValidationError::new(
                format!("{}.delete_labels", prefix),
                "At least one delete label is required",
            ));
        }

        if platform.confirm_labels.iter().all(|l| l.trim().is_empty()) {
            result.add_warning(ValidationWarning::new(
                format!("{}.confirm_labels", prefix),
                "No confirm labels, deletions will never be confirmed",
            ));
        }

        if platform.move_labels.iter().all(|l| l.trim().is_empty()) {
            result.add_warning(ValidationWarning::new(
                format!("{}.move_labels", prefix),
                "No move labels, batch move is unavailable",
            ));
        }
    }
}

fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
