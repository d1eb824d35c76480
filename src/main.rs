use clap::Parser;
use std::io;
use std::process::ExitCode;

use sql_runner::config::Cli;
use sql_runner::error::RunnerError;
use sql_runner::executor::{CommandEngine, DryRunEngine, RunSummary, ScriptRunner};
use sql_runner::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level);

    match run(&cli) {
        Ok(summary) => {
            tracing::info!(
                directives = summary.directives,
                executed = summary.executed,
                batched = summary.batched,
                "script finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "script failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<RunSummary, RunnerError> {
    let config = cli.session_config()?;

    match &cli.engine_command {
        Some(command) => {
            let engine = CommandEngine::from_command_line(command)
                .map_err(|e| RunnerError::Config(e.to_string()))?;
            tracing::info!(program = engine.program(), "using external engine");
            ScriptRunner::with_config(engine, config).run_file(&cli.script)
        }
        None => {
            let engine = DryRunEngine::new(io::stdout().lock(), cli.format);
            ScriptRunner::with_config(engine, config).run_file(&cli.script)
        }
    }
}
