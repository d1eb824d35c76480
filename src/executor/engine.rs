use super::context::{render_set, SessionConfig};
use crate::error::EngineError;
use crate::parser::{STATEMENT_SET_BEGIN, STATEMENT_SET_END};
use serde::Serialize;
use std::io::Write;

/// The SQL engine the runner hands statements to.
pub trait Engine {
    /// Called for every `SET` directive, after the session config is updated.
    fn apply_config(&mut self, _key: &str, _value: &str) -> Result<(), EngineError> {
        Ok(())
    }

    fn execute(&mut self, sql: &str, config: &SessionConfig) -> Result<(), EngineError>;

    /// Run the collected `INSERT` statements together, in order.
    fn execute_batch(&mut self, sql: &[&str], config: &SessionConfig) -> Result<(), EngineError>;
}

impl<E: Engine + ?Sized> Engine for &mut E {
    fn apply_config(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        (**self).apply_config(key, value)
    }

    fn execute(&mut self, sql: &str, config: &SessionConfig) -> Result<(), EngineError> {
        (**self).execute(sql, config)
    }

    fn execute_batch(&mut self, sql: &[&str], config: &SessionConfig) -> Result<(), EngineError> {
        (**self).execute_batch(sql, config)
    }
}

/// Wrap statements in an `EXECUTE STATEMENT SET` block.
pub fn render_statement_set(sql: &[&str]) -> String {
    let mut out = format!("{STATEMENT_SET_BEGIN}\nBEGIN\n");
    for stmt in sql {
        out.push_str(stmt.trim_end());
        out.push('\n');
    }
    out.push_str(STATEMENT_SET_END);
    out.push('\n');
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct DryRunRecord<'a> {
    action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sql: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statements: Option<&'a [&'a str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<&'a SessionConfig>,
}

/// Writes what would be executed instead of running it.
pub struct DryRunEngine<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> DryRunEngine<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json(&mut self, record: &DryRunRecord<'_>) -> Result<(), EngineError> {
        serde_json::to_writer(&mut self.out, record)?;
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> Engine for DryRunEngine<W> {
    fn apply_config(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", render_set(key, value))?,
            OutputFormat::Json => self.write_json(&DryRunRecord {
                action: "set",
                sql: None,
                statements: None,
                key: Some(key),
                value: Some(value),
                config: None,
            })?,
        }
        Ok(())
    }

    fn execute(&mut self, sql: &str, config: &SessionConfig) -> Result<(), EngineError> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", sql.trim_end())?,
            OutputFormat::Json => self.write_json(&DryRunRecord {
                action: "execute",
                sql: Some(sql.trim_end()),
                statements: None,
                key: None,
                value: None,
                config: Some(config),
            })?,
        }
        Ok(())
    }

    fn execute_batch(&mut self, sql: &[&str], config: &SessionConfig) -> Result<(), EngineError> {
        match self.format {
            OutputFormat::Text => write!(self.out, "{}", render_statement_set(sql))?,
            OutputFormat::Json => self.write_json(&DryRunRecord {
                action: "execute_batch",
                sql: None,
                statements: Some(sql),
                key: None,
                value: None,
                config: Some(config),
            })?,
        }
        Ok(())
    }
}
