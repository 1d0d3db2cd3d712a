//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;

pub(crate) const APP_NAME: &str = "cnapp-dashboard";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from `config.toml` and overridden by CLI flags.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Keep the dashboard in memory only for this run.
    #[serde(skip)]
    pub ephemeral: bool,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory holding the dashboard slot. Defaults to the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Enable mouse capture.
    #[serde(default)]
    pub mouse: bool,

    /// Show each widget's creation time on its card.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,

    /// Timestamp format string (chrono format).
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Show toast notifications after changes.
    #[serde(default = "default_true")]
    pub notifications: bool,

    /// Notification duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mouse: false,
            show_timestamps: true,
            timestamp_format: default_timestamp_format(),
            notifications: true,
            notification_duration: default_notification_duration(),
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
        }
    }
}

fn default_accent_color() -> String {
    "Cyan".to_string()
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

fn default_true() -> bool {
    true
}

fn default_notification_duration() -> u64 {
    3
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(data_dir) = &args.data_dir {
            self.data_dir = Some(data_dir.clone());
        }
        if args.ephemeral {
            self.ephemeral = true;
        }
        if let Some(mouse) = args.mouse {
            self.ui.mouse = mouse;
        }
        if let Some(accent_color) = &args.accent_color {
            self.theme.accent_color.clone_from(accent_color);
        }
    }

    /// Returns default data directory.
    #[must_use]
    pub fn default_data_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Returns effective data directory.
    #[must_use]
    pub fn effective_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(Self::default_data_dir)
    }

    /// Returns effective log path, next to the dashboard slot by default.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(|| {
            self.effective_data_dir()
                .map(|dir| dir.join(format!("{APP_NAME}.log")))
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            ephemeral: false,
            log_level: LogLevel::Info,
            data_dir: None,
            ui: UiConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r##"
            log_level = "debug"
            data_dir = "/tmp/dashboards"

            [ui]
            show_timestamps = false

            [theme]
            accent_color = "#ff8800"
        "##;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/dashboards")));
        assert!(!config.ui.show_timestamps);
        assert!(config.ui.notifications);
        assert_eq!(config.ui.timestamp_format, "%Y-%m-%d %H:%M");
        assert_eq!(config.theme.accent_color, "#ff8800");
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(!config.ephemeral);
        assert!(config.ui.show_timestamps);
        assert_eq!(config.ui.notification_duration, 3);
        assert_eq!(config.theme.accent_color, "Cyan");
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config: AppConfig = toml::from_str(r#"data_dir = "/from/file""#).unwrap();
        let args = CliArgs::parse_from([
            "cnapp-dashboard",
            "--data-dir",
            "/from/cli",
            "--ephemeral",
            "--log-level",
            "warn",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.effective_data_dir(), Some(PathBuf::from("/from/cli")));
        assert!(config.ephemeral);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_log_path_defaults_next_to_data() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/data")),
            ..AppConfig::default()
        };

        assert_eq!(
            config.effective_log_path(),
            Some(PathBuf::from("/data/cnapp-dashboard.log"))
        );
    }
}
