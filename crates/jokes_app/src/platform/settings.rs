//! Front-end settings, read from a RON file.
//!
//! A missing file yields the defaults. Every field is optional.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jokes_core::DEFAULT_AMOUNT;
use jokes_engine::{ClientSettings, JokeCategory, DEFAULT_BASE_URL};
use jokes_logging::{LevelFilter, LogDestination};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILENAME: &str = "jokes.ron";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse settings in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid settings in {path:?}: amount must be at least 1")]
    ZeroAmount { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub base_url: String,
    pub category: JokeCategory,
    pub amount: u32,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub log: LogSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            category: JokeCategory::Any,
            amount: DEFAULT_AMOUNT,
            connect_timeout_secs: None,
            request_timeout_secs: None,
            log: LogSettings::default(),
        }
    }
}

impl AppSettings {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub target: LogTarget,
    pub file: PathBuf,
    pub level: LogLevel,
}

impl Default for LogSettings {
    fn default() -> Self {
        // The terminal carries the joke list, so logs go to a file by default.
        Self {
            target: LogTarget::File,
            file: PathBuf::from("./jokes.log"),
            level: LogLevel::Info,
        }
    }
}

impl LogSettings {
    pub fn destination(&self) -> LogDestination {
        match self.target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File(self.file.clone()),
            LogTarget::Both => LogDestination::Both(self.file.clone()),
        }
    }
}

pub fn load(path: &Path) -> Result<AppSettings, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppSettings::default()),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let settings: AppSettings = ron::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if settings.amount == 0 {
        return Err(SettingsError::ZeroAmount {
            path: path.to_path_buf(),
        });
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.amount, 20);
        assert_eq!(settings.client_settings().request_timeout, None);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jokes.ron");
        fs::write(
            &path,
            r#"(
                category: Programming,
                amount: 5,
                request_timeout_secs: Some(10),
                log: (target: Both, level: Debug),
            )"#,
        )
        .unwrap();

        let settings = load(&path).unwrap();
        assert_eq!(settings.category, JokeCategory::Programming);
        assert_eq!(settings.amount, 5);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            settings.client_settings().request_timeout,
            Some(Duration::from_secs(10))
        );
        assert_eq!(
            settings.log.destination(),
            LogDestination::Both(PathBuf::from("./jokes.log"))
        );
        assert_eq!(settings.log.level.filter(), LevelFilter::Debug);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jokes.ron");
        fs::write(&path, "(amount: \"many\")").unwrap();

        assert!(matches!(load(&path), Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn zero_amount_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jokes.ron");
        fs::write(&path, "(amount: 0)").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, SettingsError::ZeroAmount { .. }));
        assert!(err.to_string().contains("amount must be at least 1"));
    }
}
