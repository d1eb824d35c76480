use super::context::SessionConfig;
use super::engine::{render_statement_set, Engine};
use crate::error::EngineError;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Runs every statement through an external SQL client.
///
/// The client is started once per statement (or once for the whole batch)
/// and receives the session config as `SET` lines followed by the SQL on its
/// stdin.
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split a command line with shell quoting rules.
    pub fn from_command_line(command: &str) -> Result<Self, EngineError> {
        let mut words = shlex::split(command)
            .ok_or_else(|| EngineError::InvalidCommand(format!("unbalanced quotes in '{command}'")))?
            .into_iter();
        let program = words
            .next()
            .ok_or_else(|| EngineError::InvalidCommand("empty command".to_string()))?;
        Ok(Self::new(program, words.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn run(&self, input: &str) -> Result<(), EngineError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdin = child.stdin.take();

        // Feed stdin from its own thread so a client that writes while it
        // reads never blocks on a full stdout pipe.
        let (written, output) = thread::scope(|s| {
            // stdin is dropped when the writer returns so the client sees EOF
            let writer = s.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(input.as_bytes()),
                None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "no stdin")),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (written, output)
        });
        let output = output?;

        if !output.stdout.is_empty() {
            io::stdout().write_all(&output.stdout)?;
        }

        if !output.status.success() {
            return Err(EngineError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        match written {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                tracing::debug!(program = %self.program, "engine exited before reading all input");
            }
            Err(e) => return Err(e.into()),
            Ok(()) => {}
        }

        tracing::debug!(program = %self.program, status = %output.status, "engine finished");
        Ok(())
    }
}

impl Engine for CommandEngine {
    fn execute(&mut self, sql: &str, config: &SessionConfig) -> Result<(), EngineError> {
        let mut input = config.to_set_statements();
        input.push_str(sql.trim_end());
        input.push('\n');
        self.run(&input)
    }

    fn execute_batch(&mut self, sql: &[&str], config: &SessionConfig) -> Result<(), EngineError> {
        let mut input = config.to_set_statements();
        input.push_str(&render_statement_set(sql));
        self.run(&input)
    }
}
