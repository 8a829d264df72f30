//! Run configuration resolved from the command line

use crate::cli::{Cli, DEFAULT_LOG_FILE};
use lifecycle::{Action, ParseError, Severity};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Infrastructure file is not accessible, {0}.")]
    InfraFile(String),

    #[error("Log file is not accessible, {0}.")]
    LogFile(String),

    #[error("OCI config file is not accessible, {0}.")]
    OciConfig(String),
}

/// Where the log goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFile {
    /// Given on the command line; already checked to exist and be writable
    Explicit(PathBuf),
    /// The default location, created on first use
    Default(PathBuf),
}

impl LogFile {
    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(p) | Self::Default(p) => p,
        }
    }
}

/// Validated settings for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub action: Action,
    pub infra_file: PathBuf,
    pub log_file: LogFile,
    pub level: Severity,
    pub oci_config: Option<PathBuf>,
    pub profile: Option<String>,
}

impl RunConfig {
    /// Validate the command line for a run of `action`
    pub fn from_cli(cli: &Cli, action: &str) -> Result<Self, ConfigError> {
        let action: Action = action.parse()?;
        let level: Severity = cli.level.parse()?;

        let infra_file = expand(&cli.infra_file);
        if !is_readable_file(&infra_file) {
            return Err(ConfigError::InfraFile(cli.infra_file.clone()));
        }

        let log_file = match &cli.logfile {
            Some(raw) => {
                let path = expand(raw);
                if !is_writable_file(&path) {
                    return Err(ConfigError::LogFile(raw.clone()));
                }
                LogFile::Explicit(path)
            }
            None => LogFile::Default(PathBuf::from(DEFAULT_LOG_FILE)),
        };

        let oci_config = match &cli.oci_cfg {
            Some(raw) => {
                let path = expand(raw);
                if !is_readable_file(&path) {
                    return Err(ConfigError::OciConfig(raw.clone()));
                }
                Some(path)
            }
            None => None,
        };

        Ok(Self {
            action,
            infra_file,
            log_file,
            level,
            oci_config,
            profile: cli.profile.clone(),
        })
    }
}

fn expand(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

fn is_readable_file(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}

fn is_writable_file(path: &Path) -> bool {
    path.is_file() && OpenOptions::new().append(true).open(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        infra: String,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let infra = dir.path().join("infra.json");
            fs::write(&infra, r#"{"compartments": []}"#).unwrap();
            let infra = infra.to_string_lossy().into_owned();
            Self { dir, infra }
        }

        fn file(&self, name: &str) -> String {
            let path = self.dir.path().join(name);
            fs::write(&path, "").unwrap();
            path.to_string_lossy().into_owned()
        }

        fn missing(&self, name: &str) -> String {
            self.dir.path().join(name).to_string_lossy().into_owned()
        }

        fn resolve(&self, extra: &[&str]) -> Result<RunConfig, ConfigError> {
            let mut args = vec!["infraswitch", "-i", self.infra.as_str()];
            args.extend_from_slice(extra);
            let cli = Cli::try_parse_from(args).unwrap();
            let action = cli.action.clone().unwrap_or_else(|| "START".into());
            RunConfig::from_cli(&cli, &action)
        }
    }

    #[test]
    fn test_minimal_run_uses_defaults() {
        let fx = Fixture::new();
        let config = fx.resolve(&["-a", "start"]).unwrap();

        assert_eq!(config.action, Action::Start);
        assert_eq!(config.level, Severity::Info);
        assert_eq!(
            config.log_file,
            LogFile::Default(PathBuf::from("/var/log/infra/infra.log"))
        );
        assert!(config.oci_config.is_none());
    }

    #[test]
    fn test_unknown_action() {
        let fx = Fixture::new();
        let err = fx.resolve(&["-a", "restart"]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown action restart.");
    }

    #[test]
    fn test_unknown_level() {
        let fx = Fixture::new();
        let err = fx.resolve(&["-a", "stop", "-v", "loud"]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown logging level: loud.");
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let fx = Fixture::new();
        let config = fx.resolve(&["-a", "stop", "-v", "critical"]).unwrap();
        assert_eq!(config.level, Severity::Critical);
    }

    #[test]
    fn test_missing_infra_file() {
        let fx = Fixture::new();
        let missing = fx.missing("nope.json");
        let cli = Cli::try_parse_from(["infraswitch", "-a", "start", "-i", &missing]).unwrap();

        let err = RunConfig::from_cli(&cli, "start").unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Infrastructure file is not accessible, {missing}.")
        );
    }

    #[test]
    fn test_explicit_log_file_must_exist() {
        let fx = Fixture::new();
        let missing = fx.missing("infra.log");
        let err = fx.resolve(&["-a", "start", "-l", &missing]).unwrap_err();
        assert!(matches!(err, ConfigError::LogFile(_)));

        let existing = fx.file("run.log");
        let config = fx.resolve(&["-a", "start", "-l", &existing]).unwrap();
        assert_eq!(config.log_file, LogFile::Explicit(PathBuf::from(existing)));
    }

    #[test]
    fn test_explicit_oci_config_must_be_readable() {
        let fx = Fixture::new();
        let missing = fx.missing("config");
        let err = fx.resolve(&["-a", "start", "-o", &missing]).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("OCI config file is not accessible, {missing}.")
        );

        let existing = fx.file("config");
        let config = fx.resolve(&["-a", "start", "-o", &existing]).unwrap();
        assert_eq!(config.oci_config, Some(PathBuf::from(existing)));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let fx = Fixture::new();
        let dir = fx.dir.path().to_string_lossy().into_owned();
        let err = fx.resolve(&["-a", "start", "-o", &dir]).unwrap_err();
        assert!(matches!(err, ConfigError::OciConfig(_)));
    }
}
