pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod parser;

pub use error::{EngineError, RunnerError};
pub use executor::{Engine, ScriptRunner, SessionConfig};
pub use parser::{parse_statements, Statement, StatementKind};
