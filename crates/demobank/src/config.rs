//! Suite configuration.
//!
//! Layers, lowest precedence first: built-in defaults, an optional YAML file
//! named by `DEMOBANK_CONFIG`, then individual `DEMOBANK_*` environment
//! variables. Credentials are configured once here and injected into the
//! fixture layer; scenarios never re-declare them.

use crate::result::{E2eError, E2eResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root URL of the application under test
pub const DEFAULT_BASE_URL: &str = "https://demo-bank.vercel.app/";

/// Environment variable naming the YAML config file
pub const CONFIG_PATH_ENV: &str = "DEMOBANK_CONFIG";

/// Login credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Identifier typed into `#login_id`
    pub user_id: String,
    /// Password typed into `#login_password`
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            user_id: "TestUser".to_string(),
            password: "TestPass".to_string(),
        }
    }
}

impl Credentials {
    /// Create a credential pair
    #[must_use]
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }
}

/// Browser launch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run in headless mode
    pub headless: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            chromium_path: None,
            viewport_width: 1280,
            viewport_height: 900,
            sandbox: true,
        }
    }
}

/// Bounded waits, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Auto-wait bound for locator actions and assertions
    pub action_ms: u64,
    /// Bound for navigation and load-state waits
    pub navigation_ms: u64,
    /// Polling interval while waiting
    pub poll_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            action_ms: 5_000,
            navigation_ms: 30_000,
            poll_ms: 50,
        }
    }
}

/// Complete suite configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Root URL opened by the `OpenSite` fixture
    pub base_url: String,
    /// Known-good credentials used by `SignIn`
    pub credentials: Credentials,
    /// Browser launch settings
    pub browser: BrowserSettings,
    /// Wait bounds
    pub timeouts: Timeouts,
    /// Where failure screenshots go (None = disabled)
    pub artifacts_dir: Option<PathBuf>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: Credentials::default(),
            browser: BrowserSettings::default(),
            timeouts: Timeouts::default(),
            artifacts_dir: None,
        }
    }
}

impl SuiteConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load defaults, then the file named by `DEMOBANK_CONFIG`, then env overrides
    pub fn load() -> E2eResult<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> E2eResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> E2eResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            E2eError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Apply `DEMOBANK_*` overrides from a key lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> E2eResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DEMOBANK_BASE_URL") {
            self.base_url = url;
        }
        if let Some(user) = lookup("DEMOBANK_USER") {
            self.credentials.user_id = user;
        }
        if let Some(password) = lookup("DEMOBANK_PASSWORD") {
            self.credentials.password = password;
        }
        if let Some(headless) = lookup("DEMOBANK_HEADLESS") {
            self.browser.headless = parse_bool("DEMOBANK_HEADLESS", &headless)?;
        }
        if let Some(path) = lookup("CHROMIUM_PATH") {
            self.browser.chromium_path = Some(path);
        }
        if let Some(ms) = lookup("DEMOBANK_TIMEOUT_MS") {
            self.timeouts.action_ms = ms.trim().parse().map_err(|_| {
                E2eError::config(format!("DEMOBANK_TIMEOUT_MS is not a number: {ms}"))
            })?;
        }
        if let Some(dir) = lookup("DEMOBANK_ARTIFACTS") {
            self.artifacts_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// Reject configurations no scenario could run with
    pub fn validate(&self) -> E2eResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(E2eError::config("base_url is empty"));
        }
        if self.credentials.user_id.is_empty() || self.credentials.password.is_empty() {
            return Err(E2eError::config("credentials must not be empty"));
        }
        if self.timeouts.action_ms == 0 || self.timeouts.navigation_ms == 0 {
            return Err(E2eError::config("timeouts must be positive"));
        }
        if self.timeouts.poll_ms == 0 {
            return Err(E2eError::config("poll interval must be positive"));
        }
        Ok(())
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set credentials
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set wait bounds
    #[must_use]
    pub const fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.browser.headless = headless;
        self
    }

    /// Set the failure screenshot directory
    #[must_use]
    pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = Some(dir.into());
        self
    }
}

fn parse_bool(key: &str, value: &str) -> E2eResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(E2eError::config(format!("{key} is not a boolean: {other}"))),
    }
}
