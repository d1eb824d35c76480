use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("engine exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("invalid engine command: {0}")]
    InvalidCommand(String),
    #[error("failed to encode engine output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("could not read script {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("statement at line {line} failed: {source}")]
    Engine {
        line: usize,
        #[source]
        source: EngineError,
    },
    #[error("statement set failed: {0}")]
    Batch(#[source] EngineError),
    #[error("invalid configuration: {0}")]
    Config(String),
}
