use clap::Parser;

pub const DEFAULT_LOG_FILE: &str = "/var/log/infra/infra.log";
pub const DEFAULT_LEVEL: &str = "INFO";

#[derive(Parser, Debug)]
#[command(name = "infraswitch")]
#[command(about = "Start or stop the cloud resources declared in an infrastructure file")]
#[command(
    long_about = "Start or stop the cloud resources declared in an infrastructure file.\n\n\
    There are two modes of usage: seeking help and performing an action. Help is \
    shown whenever -h is given, whatever other flags are used, and whenever no \
    action is given."
)]
pub struct Cli {
    /// Action to perform on every included resource
    #[arg(short, long, value_name = "START|STOP")]
    pub action: Option<String>,

    /// Infrastructure file; JSON, or TOML with a .toml extension
    #[arg(short, long, value_name = "FILE", default_value = manifest::DEFAULT_MANIFEST)]
    pub infra_file: String,

    /// Log file; an explicit file must exist and be writable
    #[arg(short, long, value_name = "FILE")]
    pub logfile: Option<String>,

    /// Logging level
    #[arg(
        short = 'v',
        long,
        value_name = "DEBUG|INFO|WARNING|ERROR|CRITICAL",
        default_value = DEFAULT_LEVEL
    )]
    pub level: String,

    /// OCI config file [default: ~/.oci/config]
    #[arg(short, long, value_name = "FILE")]
    pub oci_cfg: Option<String>,

    /// Profile within the OCI config file
    #[arg(short, long, env = "OCI_CLI_PROFILE")]
    pub profile: Option<String>,
}
