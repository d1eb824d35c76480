use super::types::StatementKind;
use regex::Regex;
use std::sync::LazyLock;

static SET_STATEMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^SET\s+'(\S+)'\s+=\s+'(.*)';$").expect("Failed to compile regex")
});

/// Decide how a statement is dispatched.
///
/// A `SET` that does not match `SET '<key>' = '<value>';` is an ordinary
/// statement and goes to the engine as is.
pub fn classify(statement: &str) -> StatementKind {
    let trimmed = statement.trim();

    if let Some(caps) = SET_STATEMENT_PATTERN.captures(trimmed) {
        return StatementKind::Set {
            key: caps[1].to_string(),
            value: caps[2].to_string(),
        };
    }

    if trimmed.to_uppercase().starts_with("INSERT") {
        StatementKind::Insert
    } else {
        StatementKind::Execute
    }
}
