//! TOML Configuration File Support
//!
//! Centralized configuration loading for the shell, from a TOML file at
//! `~/.config/samvaad/shell.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # XDG Base Directory Compliance
//!
//! - `$XDG_CONFIG_HOME/samvaad/shell.toml` (typically `~/.config/samvaad/shell.toml`)
//!
//! # Example Configuration
//!
//! ```toml
//! [navigation]
//! breakpoint_px = 1024
//! noise_threshold_px = 0
//! near_top_px = 50
//!
//! [carousel]
//! autoplay = true
//! autoplay_interval_ms = 3000
//! index_policy = "clamp"
//! slides_to_show = 3
//! responsive = [
//!     { below_px = 1024, slides_to_show = 2 },
//!     { below_px = 640, slides_to_show = 1 },
//! ]
//!
//! [content]
//! title = "MUN Conference 2026"
//! nav = [{ label = "Home" }, { label = "Register", path = "/signup" }]
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::carousel::{CarouselConfig, IndexPolicy, ResponsiveRule};
use crate::content::{CarouselItem, Member, NavEntry, SiteContent};
use crate::navigation::NavigationConfig;
use crate::shell::ShellConfig;

/// Environment variable for the layout breakpoint (pixels)
pub const ENV_BREAKPOINT: &str = "SAMVAAD_BREAKPOINT";
/// Environment variable for the scroll noise threshold (pixels)
pub const ENV_NOISE_THRESHOLD: &str = "SAMVAAD_NOISE_THRESHOLD";
/// Environment variable for the near-top threshold (pixels)
pub const ENV_NEAR_TOP: &str = "SAMVAAD_NEAR_TOP";
/// Environment variable for the autoplay interval (milliseconds)
pub const ENV_AUTOPLAY_MS: &str = "SAMVAAD_AUTOPLAY_MS";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Navigation section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationToml {
    /// Compact/desktop breakpoint in pixels
    pub breakpoint_px: Option<u32>,

    /// Scroll deltas at or below this are ignored
    pub noise_threshold_px: Option<f64>,

    /// Offsets below this always show the header
    pub near_top_px: Option<f64>,
}

/// Carousel section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselToml {
    /// Whether autoplay runs
    pub autoplay: Option<bool>,

    /// Autoplay interval in milliseconds
    pub autoplay_interval_ms: Option<u64>,

    /// `strict` or `clamp`
    pub index_policy: Option<IndexPolicy>,

    /// Slides in view on wide viewports
    pub slides_to_show: Option<usize>,

    /// Responsive overrides; replaces the default table when present
    pub responsive: Option<Vec<ResponsiveRule>>,
}

/// Navigation entry in the content section; `path` is derived when omitted
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavEntryToml {
    /// Visible label
    pub label: String,
    /// Route override
    pub path: Option<String>,
}

impl From<NavEntryToml> for NavEntry {
    fn from(entry: NavEntryToml) -> Self {
        match entry.path {
            Some(path) => NavEntry::new(entry.label, path),
            None => NavEntry::from_label(entry.label),
        }
    }
}

/// Content section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentToml {
    /// Hero headline
    pub title: Option<String>,

    /// About heading
    pub about_heading: Option<String>,

    /// About body
    pub about: Option<String>,

    /// Navigation entries
    pub nav: Option<Vec<NavEntryToml>>,

    /// Committee carousel items
    pub committees: Option<Vec<CarouselItem>>,

    /// Secretariat members
    pub secretariat: Option<Vec<Member>>,

    /// Footer line
    pub footer: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellToml {
    /// Navigation configuration section
    pub navigation: NavigationToml,

    /// Carousel configuration section
    pub carousel: CarouselToml,

    /// Content overrides
    pub content: ContentToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved configuration for a shell instance
///
/// Use [`load_config`] to load configuration with proper priority handling.
#[derive(Clone, Debug)]
pub struct ShellConfigFile {
    /// Controller settings
    pub shell: ShellConfig,

    /// Page content
    pub content: SiteContent,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for ShellConfigFile {
    fn default() -> Self {
        Self {
            shell: ShellConfig::default(),
            content: SiteContent::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ShellConfigFile {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for a zero breakpoint, a zero
    /// autoplay interval, zero slides in view, or negative or non-finite
    /// scroll thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let nav = &self.shell.navigation;
        let carousel = &self.shell.carousel;

        if nav.breakpoint_px == 0 {
            return Err(ConfigError::ValidationError(
                "breakpoint_px must be greater than 0".to_string(),
            ));
        }
        for (name, value) in [
            ("noise_threshold_px", nav.scroll.noise_threshold),
            ("near_top_px", nav.scroll.near_top),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if carousel.interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "autoplay_interval_ms must be greater than 0".to_string(),
            ));
        }
        if carousel.slides_to_show == 0
            || carousel.responsive.iter().any(|r| r.slides_to_show == 0)
        {
            return Err(ConfigError::ValidationError(
                "slides_to_show must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/samvaad/shell.toml` or
/// `~/.config/samvaad/shell.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("samvaad").join("shell.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if the
/// resulting values fail validation. A missing config file is not an error.
pub fn load_config() -> Result<ShellConfigFile, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path, reading the process environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if validation fails.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ShellConfigFile, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<ShellConfigFile, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ShellConfigFile::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ShellToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env);
    config.validate()?;

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut ShellConfigFile, toml: ShellToml) {
    config.shell.navigation = NavigationConfig::from_toml(&toml.navigation);
    config.shell.carousel = CarouselConfig::from_toml(&toml.carousel);

    let content = &mut config.content;
    let overrides = toml.content;
    if let Some(title) = overrides.title {
        content.title = title;
    }
    if let Some(heading) = overrides.about_heading {
        content.about_heading = heading;
    }
    if let Some(about) = overrides.about {
        content.about = about;
    }
    if let Some(nav) = overrides.nav {
        content.nav = nav.into_iter().map(NavEntry::from).collect();
    }
    if let Some(committees) = overrides.committees {
        content.committees = committees;
    }
    if let Some(secretariat) = overrides.secretariat {
        content.secretariat = secretariat;
    }
    if let Some(footer) = overrides.footer {
        content.footer = footer;
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config<F>(config: &mut ShellConfigFile, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(bp) = env(ENV_BREAKPOINT).and_then(|v| v.parse::<u32>().ok()) {
        config.shell.navigation.breakpoint_px = bp;
        config.source = ConfigSource::Env;
    }
    if let Some(noise) = env(ENV_NOISE_THRESHOLD).and_then(|v| v.parse::<f64>().ok()) {
        config.shell.navigation.scroll.noise_threshold = noise;
        config.source = ConfigSource::Env;
    }
    if let Some(near_top) = env(ENV_NEAR_TOP).and_then(|v| v.parse::<f64>().ok()) {
        config.shell.navigation.scroll.near_top = near_top;
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = env(ENV_AUTOPLAY_MS).and_then(|v| v.parse::<u64>().ok()) {
        config.shell.carousel.interval = Duration::from_millis(ms);
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Breakpoint override (pixels)
    pub breakpoint_px: Option<u32>,

    /// Noise threshold override (pixels)
    pub noise_threshold_px: Option<f64>,

    /// Autoplay interval override (milliseconds)
    pub autoplay_interval_ms: Option<u64>,

    /// Autoplay on/off override
    pub autoplay: Option<bool>,

    /// Index policy override
    pub index_policy: Option<IndexPolicy>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set breakpoint override
    #[must_use]
    pub fn with_breakpoint_px(mut self, px: u32) -> Self {
        self.breakpoint_px = Some(px);
        self
    }

    /// Set noise threshold override
    #[must_use]
    pub fn with_noise_threshold_px(mut self, px: f64) -> Self {
        self.noise_threshold_px = Some(px);
        self
    }

    /// Set autoplay interval override
    #[must_use]
    pub fn with_autoplay_interval_ms(mut self, ms: u64) -> Self {
        self.autoplay_interval_ms = Some(ms);
        self
    }

    /// Set autoplay override
    #[must_use]
    pub fn with_autoplay(mut self, enabled: bool) -> Self {
        self.autoplay = Some(enabled);
        self
    }

    /// Set index policy override
    #[must_use]
    pub fn with_index_policy(mut self, policy: IndexPolicy) -> Self {
        self.index_policy = Some(policy);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.breakpoint_px.is_none()
            && self.noise_threshold_px.is_none()
            && self.autoplay_interval_ms.is_none()
            && self.autoplay.is_none()
            && self.index_policy.is_none()
    }

    /// Apply overrides to a configuration and re-validate it
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if an override is out of range.
    pub fn apply(&self, config: &mut ShellConfigFile) -> Result<(), ConfigError> {
        if self.is_empty() {
            return Ok(());
        }
        config.source = ConfigSource::Cli;

        if let Some(bp) = self.breakpoint_px {
            config.shell.navigation.breakpoint_px = bp;
        }
        if let Some(noise) = self.noise_threshold_px {
            config.shell.navigation.scroll.noise_threshold = noise;
        }
        if let Some(ms) = self.autoplay_interval_ms {
            config.shell.carousel.interval = Duration::from_millis(ms);
        }
        if let Some(enabled) = self.autoplay {
            config.shell.carousel.autoplay = enabled;
        }
        if let Some(policy) = self.index_policy {
            config.shell.carousel.index_policy = policy;
        }
        config.validate()
    }
}

impl NavigationConfig {
    /// Breakpoint and thresholds straight from a TOML section, over defaults
    #[must_use]
    pub fn from_toml(section: &NavigationToml) -> Self {
        let mut config = Self::default();
        if let Some(bp) = section.breakpoint_px {
            config.breakpoint_px = bp;
        }
        if let Some(noise) = section.noise_threshold_px {
            config.scroll.noise_threshold = noise;
        }
        if let Some(near_top) = section.near_top_px {
            config.scroll.near_top = near_top;
        }
        config
    }
}

impl CarouselConfig {
    /// Carousel settings straight from a TOML section, over defaults
    #[must_use]
    pub fn from_toml(section: &CarouselToml) -> Self {
        let mut config = Self::default();
        if let Some(autoplay) = section.autoplay {
            config.autoplay = autoplay;
        }
        if let Some(ms) = section.autoplay_interval_ms {
            config.interval = Duration::from_millis(ms);
        }
        if let Some(policy) = section.index_policy {
            config.index_policy = policy;
        }
        if let Some(show) = section.slides_to_show {
            config.slides_to_show = show;
        }
        if let Some(ref rules) = section.responsive {
            config.responsive.clone_from(rules);
        }
        config
    }
}

// =============================================================================
// Tests
// =============================================================================
