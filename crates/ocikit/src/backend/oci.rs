//! Real OCI backend using `oci` CLI commands.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::types::{DbSystem, Envelope, Instance, InstanceAction, ShutdownType};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variable the CLI itself honors for the config file location
pub const ENV_CONFIG_FILE: &str = "OCI_CLI_CONFIG_FILE";

/// Backend that executes real `oci` commands.
#[derive(Debug, Clone)]
pub struct OciCli {
    /// Path to the oci executable
    program: PathBuf,
    /// Config file passed with `--config-file`
    config_file: PathBuf,
    /// Profile passed with `--profile`
    profile: Option<String>,
}

impl OciCli {
    /// Create a backend for the given config file and profile.
    ///
    /// With no config file the CLI's own default is used: `$OCI_CLI_CONFIG_FILE`,
    /// then `~/.oci/config`. Returns an error if the config file cannot be read
    /// or the CLI is not installed.
    pub fn new(config_file: Option<&Path>, profile: Option<&str>) -> Result<Self> {
        let config_file = match config_file {
            Some(path) => path.to_path_buf(),
            None => default_config_file()?,
        };
        check_readable(&config_file)?;

        let program = find_oci()?;
        Ok(Self::with_program(program, config_file, profile))
    }

    /// Create a backend around a specific executable without any checks.
    pub fn with_program(
        program: impl Into<PathBuf>,
        config_file: impl Into<PathBuf>,
        profile: Option<&str>,
    ) -> Self {
        Self {
            program: program.into(),
            config_file: config_file.into(),
            profile: profile.map(str::to_string),
        }
    }

    /// Config file this backend authenticates with.
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Run an oci command and check for success.
    fn run_oci(&self, args: &[&str], resource: &str) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--config-file").arg(&self.config_file);
        if let Some(profile) = &self.profile {
            cmd.arg("--profile").arg(profile);
        }
        cmd.args(args);

        log::debug!(
            "Running: {} --config-file {} {}",
            self.program.display(),
            self.config_file.display(),
            args.join(" ")
        );

        let output = cmd.output().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::CliNotFound,
            _ => Error::Io(e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::from_cli_output(&stderr, resource));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn get<T: DeserializeOwned>(&self, args: &[&str], resource: &str) -> Result<T> {
        let stdout = self.run_oci(args, resource)?;
        let envelope: Envelope<T> = serde_json::from_str(&stdout)?;
        Ok(envelope.data)
    }
}

impl Backend for OciCli {
    fn get_instance(&self, instance_id: &str) -> Result<Instance> {
        self.get(
            &["compute", "instance", "get", "--instance-id", instance_id],
            instance_id,
        )
    }

    fn instance_action(&self, instance_id: &str, action: InstanceAction) -> Result<()> {
        self.run_oci(
            &[
                "compute",
                "instance",
                "action",
                "--instance-id",
                instance_id,
                "--action",
                action.as_str(),
            ],
            instance_id,
        )?;
        Ok(())
    }

    fn get_db_system(&self, db_system_id: &str) -> Result<DbSystem> {
        self.get(
            &["mysql", "db-system", "get", "--db-system-id", db_system_id],
            db_system_id,
        )
    }

    fn start_db_system(&self, db_system_id: &str) -> Result<()> {
        self.run_oci(
            &["mysql", "db-system", "start", "--db-system-id", db_system_id],
            db_system_id,
        )?;
        Ok(())
    }

    fn stop_db_system(&self, db_system_id: &str, shutdown: ShutdownType) -> Result<()> {
        self.run_oci(
            &[
                "mysql",
                "db-system",
                "stop",
                "--db-system-id",
                db_system_id,
                "--shutdown-type",
                shutdown.as_str(),
            ],
            db_system_id,
        )?;
        Ok(())
    }
}

/// Default config file location, following the CLI's own resolution.
pub fn default_config_file() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(ENV_CONFIG_FILE) {
        return Ok(PathBuf::from(path));
    }

    let home = dirs::home_dir()
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(".oci").join("config"))
}

fn check_readable(path: &Path) -> Result<()> {
    if path.is_file() && File::open(path).is_ok() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "OCI config file is not accessible, {}.",
            path.display()
        )))
    }
}

/// Find the oci executable.
fn find_oci() -> Result<PathBuf> {
    // The official installer drops the CLI in ~/bin by default
    if let Some(home) = dirs::home_dir() {
        let installer_default = home.join("bin").join("oci");
        if installer_default.exists() {
            return Ok(installer_default);
        }
    }

    for path in ["/usr/local/bin/oci", "/usr/bin/oci"] {
        if Path::new(path).exists() {
            return Ok(PathBuf::from(path));
        }
    }

    let output = Command::new("which")
        .arg("oci")
        .output()
        .map_err(|_| Error::CliNotFound)?;

    if output.status.success() {
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    Err(Error::CliNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::types::{ComputeState, DbSystemState};
    use tempfile::TempDir;

    #[test]
    fn test_new_rejects_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("config");

        let err = OciCli::new(Some(&missing), None).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(err.to_string().contains("not accessible"));
    }

    #[test]
    fn test_missing_program_is_cli_not_found() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config");
        std::fs::write(&config, "[DEFAULT]\n").unwrap();

        let cli = OciCli::with_program(dir.path().join("no-such-oci"), &config, None);
        let err = cli.get_instance("ocid1.instance.oc1..aaaa").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::CliNotFound);
    }

    #[cfg(unix)]
    mod fake_cli {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        /// Write an executable script standing in for `oci`. It records its
        /// arguments to `args.log` and runs `body`.
        fn fake_oci(dir: &TempDir, body: &str) -> OciCli {
            let script = dir.path().join("oci");
            let log = dir.path().join("args.log");
            let content = format!(
                "#!/bin/sh\necho \"$@\" >> '{}'\n{}\n",
                log.display(),
                body
            );
            std::fs::write(&script, content).unwrap();
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

            let config = dir.path().join("config");
            std::fs::write(&config, "[DEFAULT]\n").unwrap();
            OciCli::with_program(script, config, Some("PROD"))
        }

        fn recorded_args(dir: &TempDir) -> String {
            std::fs::read_to_string(dir.path().join("args.log")).unwrap()
        }

        #[test]
        fn test_get_instance_parses_envelope() {
            let dir = TempDir::new().unwrap();
            let cli = fake_oci(
                &dir,
                r#"echo '{"data": {"id": "ocid1.instance.oc1..aaaa", "display-name": "web-1", "lifecycle-state": "RUNNING"}}'"#,
            );

            let instance = cli.get_instance("ocid1.instance.oc1..aaaa").unwrap();
            assert_eq!(instance.display_name, "web-1");
            assert_eq!(instance.lifecycle_state, ComputeState::Running);

            let args = recorded_args(&dir);
            assert!(args.contains("--profile PROD"));
            assert!(args.contains("compute instance get --instance-id ocid1.instance.oc1..aaaa"));
        }

        #[test]
        fn test_instance_action_passes_action() {
            let dir = TempDir::new().unwrap();
            let cli = fake_oci(&dir, "echo '{}'");

            cli.instance_action("ocid1.instance.oc1..aaaa", InstanceAction::Stop)
                .unwrap();
            assert!(recorded_args(&dir).contains("--action STOP"));
        }

        #[test]
        fn test_db_system_calls() {
            let dir = TempDir::new().unwrap();
            let cli = fake_oci(
                &dir,
                r#"echo '{"data": {"id": "ocid1.mysqldbsystem.oc1..bbbb", "display-name": "hw", "lifecycle-state": "ACTIVE"}}'"#,
            );

            let db = cli.get_db_system("ocid1.mysqldbsystem.oc1..bbbb").unwrap();
            assert_eq!(db.lifecycle_state, DbSystemState::Active);

            cli.stop_db_system("ocid1.mysqldbsystem.oc1..bbbb", ShutdownType::Fast)
                .unwrap();
            cli.start_db_system("ocid1.mysqldbsystem.oc1..bbbb").unwrap();

            let args = recorded_args(&dir);
            assert!(args.contains("mysql db-system stop --db-system-id ocid1.mysqldbsystem.oc1..bbbb --shutdown-type FAST"));
            assert!(args.contains("mysql db-system start --db-system-id ocid1.mysqldbsystem.oc1..bbbb"));
        }

        #[test]
        fn test_service_error_is_categorized() {
            let dir = TempDir::new().unwrap();
            let cli = fake_oci(
                &dir,
                r#"echo 'ServiceError: {"code": "NotAuthorizedOrNotFound", "message": "nope", "status": 404}' >&2
exit 1"#,
            );

            let err = cli.get_instance("ocid1.instance.oc1..gone").unwrap_err();
            assert_eq!(err.category(), ErrorCategory::NotFound);
        }
    }
}
