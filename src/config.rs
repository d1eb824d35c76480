use crate::error::RunnerError;
use crate::executor::{OutputFormat, SessionConfig};
use clap::Parser;
use std::path::PathBuf;

/// Split a SQL script into statements and run them in order.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The SQL script to run
    pub script: PathBuf,

    /// External SQL client to pipe statements into; prints them when absent
    #[arg(long, env = "SQL_RUNNER_ENGINE_COMMAND")]
    pub engine_command: Option<String>,

    /// Output format of the dry run
    #[arg(long, value_enum, env = "SQL_RUNNER_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Initial session configuration entry, as KEY=VALUE
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Log filter directive
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn session_config(&self) -> Result<SessionConfig, RunnerError> {
        self.set
            .iter()
            .map(|pair| SessionConfig::parse_pair(pair))
            .collect()
    }
}
