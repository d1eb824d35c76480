use super::context::{unquote, SessionConfig};
use super::engine::Engine;
use crate::error::RunnerError;
use crate::parser::{classify, parse_statements, Statement, StatementKind};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub directives: usize,
    pub executed: usize,
    pub batched: usize,
    pub batch_executed: bool,
}

/// Dispatches parsed statements to an [`Engine`] in source order.
///
/// `SET` directives update the session config before anything after them
/// runs, `INSERT`s are held back and executed together at the end, and
/// everything else runs immediately.
pub struct ScriptRunner<E: Engine> {
    engine: E,
    config: SessionConfig,
}

impl<E: Engine> ScriptRunner<E> {
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, SessionConfig::new())
    }

    pub fn with_config(engine: E, config: SessionConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    pub fn run(&mut self, statements: &[Statement]) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::default();
        let mut batch: Vec<&Statement> = Vec::new();

        for stmt in statements {
            let sql = stmt.text.trim_end();
            let engine_err = |source| RunnerError::Engine {
                line: stmt.line_start,
                source,
            };

            match classify(sql) {
                StatementKind::Set { key, value } => {
                    let (key, value) = (unquote(&key), unquote(&value));
                    tracing::info!(%key, %value, "Setting configuration");
                    self.config.set(key.as_str(), value.as_str());
                    self.engine
                        .apply_config(&key, &value)
                        .map_err(engine_err)?;
                    summary.directives += 1;
                }
                StatementKind::Insert => {
                    tracing::info!(line = stmt.line_start, "Adding to StatementSet:\n{sql}");
                    batch.push(stmt);
                }
                StatementKind::Execute => {
                    tracing::info!(line = stmt.line_start, "Executing:\n{sql}");
                    self.engine.execute(sql, &self.config).map_err(engine_err)?;
                    summary.executed += 1;
                }
            }
        }

        summary.batched = batch.len();
        if !batch.is_empty() {
            let sql: Vec<&str> = batch.iter().map(|s| s.text.trim_end()).collect();
            tracing::info!(statements = sql.len(), "Executing StatementSet");
            self.engine
                .execute_batch(&sql, &self.config)
                .map_err(RunnerError::Batch)?;
            summary.batch_executed = true;
        }

        Ok(summary)
    }

    /// Parse `script` and run it.
    pub fn run_str(&mut self, script: &str) -> Result<RunSummary, RunnerError> {
        let statements = parse_statements(script);
        tracing::debug!(count = statements.len(), "parsed statements");
        self.run(&statements)
    }

    /// Read a UTF-8 script from disk and run it.
    pub fn run_file(&mut self, path: &Path) -> Result<RunSummary, RunnerError> {
        let script = fs::read_to_string(path).map_err(|source| RunnerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.run_str(&script)
    }
}
