mod context;
mod engine;
mod runner;
mod session;

pub use context::{render_set, unquote, SessionConfig};
pub use engine::{render_statement_set, DryRunEngine, Engine, OutputFormat};
pub use runner::{RunSummary, ScriptRunner};
pub use session::CommandEngine;
