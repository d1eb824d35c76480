use clap::Parser;
use sql_runner::config::Cli;
use sql_runner::error::EngineError;
use sql_runner::executor::{
    render_set, render_statement_set, CommandEngine, Engine, SessionConfig,
};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[cfg(test)]
mod command_engine_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_command_line_split() {
        let engine = CommandEngine::from_command_line("sql-client -f - --conf 'my conf.yaml'")
            .expect("valid command");
        assert_eq!(engine.program(), "sql-client");
        assert_eq!(engine.args(), ["-f", "-", "--conf", "my conf.yaml"]);
    }

    #[test]
    fn test_invalid_command_lines() {
        assert!(matches!(
            CommandEngine::from_command_line("   "),
            Err(EngineError::InvalidCommand(_))
        ));
        assert!(matches!(
            CommandEngine::from_command_line("client 'unclosed"),
            Err(EngineError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_render_statement_set() {
        assert_eq!(
            render_statement_set(&["INSERT INTO a SELECT 1;\n", "INSERT INTO b SELECT 2;"]),
            "EXECUTE STATEMENT SET\nBEGIN\nINSERT INTO a SELECT 1;\nINSERT INTO b SELECT 2;\nEND;\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_statement_piped_with_config() {
        let dir = tempfile::tempdir().unwrap();
        let capture = dir.path().join("stdin.sql");
        let mut engine = CommandEngine::new(
            "sh",
            vec![
                "-c".to_string(),
                "cat > \"$0\"".to_string(),
                capture.display().to_string(),
            ],
        );
        let config: SessionConfig = [("execution.runtime-mode", "batch")].into_iter().collect();

        engine.execute("SELECT 1;", &config).unwrap();
        assert_eq!(
            std::fs::read_to_string(&capture).unwrap(),
            "SET 'execution.runtime-mode' = 'batch';\nSELECT 1;\n"
        );

        engine
            .execute_batch(&["INSERT INTO t SELECT 1;"], &SessionConfig::new())
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(&capture).unwrap(),
            "EXECUTE STATEMENT SET\nBEGIN\nINSERT INTO t SELECT 1;\nEND;\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_client() {
        let mut engine = CommandEngine::new(
            "sh",
            vec![
                "-c".to_string(),
                "cat > /dev/null; echo 'table not found' >&2; exit 3".to_string(),
            ],
        );

        let err = engine.execute("SELECT * FROM nope;", &SessionConfig::new()).unwrap_err();
        match err {
            EngineError::Failed { status, stderr } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "table not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_large_statement_through_echoing_client() {
        let sql = format!("SELECT '{}';", "x".repeat(1 << 20));
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut engine = CommandEngine::new("cat", Vec::new());
            let _ = tx.send(engine.execute(&sql, &SessionConfig::new()));
        });

        let result = rx
            .recv_timeout(Duration::from_secs(60))
            .expect("engine did not finish");
        assert!(result.is_ok(), "{result:?}");
    }

    #[cfg(unix)]
    #[test]
    fn test_client_exits_without_reading_input() {
        let mut engine = CommandEngine::new(
            "sh",
            vec!["-c".to_string(), "echo 'bad option' >&2; exit 3".to_string()],
        );
        let sql = format!("SELECT '{}';", "x".repeat(1 << 20));

        match engine.execute(&sql, &SessionConfig::new()).unwrap_err() {
            EngineError::Failed { status, stderr } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "bad option");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_set_lines_double_quotes() {
        assert_eq!(
            render_set("pipeline.name", "it's"),
            "SET 'pipeline.name' = 'it''s';"
        );
        let config: SessionConfig = [("k", "a'b")].into_iter().collect();
        assert_eq!(config.to_set_statements(), "SET 'k' = 'a''b';\n");
    }

    #[test]
    fn test_missing_program() {
        let mut engine = CommandEngine::new("definitely-not-a-sql-client-binary", Vec::new());
        let err = engine.execute("SELECT 1;", &SessionConfig::new()).unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exactly_one_script() {
        assert!(Cli::try_parse_from(["sql-runner"]).is_err());
        assert!(Cli::try_parse_from(["sql-runner", "a.sql", "b.sql"]).is_err());
        assert!(Cli::try_parse_from(["sql-runner", "a.sql"]).is_ok());
    }

    #[test]
    fn test_set_entries() {
        let cli = Cli::try_parse_from([
            "sql-runner",
            "job.sql",
            "--set",
            "parallelism.default=4",
            "--set",
            "pipeline.name = nightly load",
        ])
        .unwrap();

        let config = cli.session_config().unwrap();
        assert_eq!(config.len(), 2);
        assert_eq!(config.get("parallelism.default"), Some("4"));
        assert_eq!(config.get("pipeline.name"), Some("nightly load"));
    }

    #[test]
    fn test_invalid_set_entry() {
        let cli = Cli::try_parse_from(["sql-runner", "job.sql", "--set", "novalue"]).unwrap();
        assert!(cli.session_config().is_err());
        assert!(SessionConfig::parse_pair("=x").is_err());
    }
}
