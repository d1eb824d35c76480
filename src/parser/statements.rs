use super::preprocessor::{
    normalize, strip_comments_mapped, LineMap, LINE_DELIMITER, STATEMENT_DELIMITER,
};
use super::types::Statement;

pub const STATEMENT_SET_BEGIN: &str = "EXECUTE STATEMENT SET";
pub const STATEMENT_SET_END: &str = "END;";

#[derive(Debug, Clone, Copy, PartialEq)]
enum SplitState {
    Idle,
    Accumulating,
    /// Inside `EXECUTE STATEMENT SET`; only `END;` closes the statement.
    InStatementSet,
}

/// Split a cleaned script into `;`-terminated statements.
pub fn split_statements(cleaned: &str) -> Vec<Statement> {
    split_mapped(cleaned, &LineMap::identity(cleaned))
}

fn split_mapped(cleaned: &str, lines: &LineMap) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut state = SplitState::Idle;
    let mut current = String::new();
    let mut line_start = 0usize;

    for (idx, line) in cleaned.split(LINE_DELIMITER).enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if state == SplitState::Idle {
            state = SplitState::Accumulating;
            line_start = lines.span(idx).0;
        }
        if trimmed.starts_with(STATEMENT_SET_BEGIN) {
            state = SplitState::InStatementSet;
        }

        current.push_str(trimmed);
        current.push(LINE_DELIMITER);

        if trimmed.ends_with(STATEMENT_DELIMITER)
            && (state != SplitState::InStatementSet || trimmed == STATEMENT_SET_END)
        {
            statements.push(Statement {
                text: std::mem::take(&mut current),
                line_start,
                line_end: lines.span(idx).1,
            });
            state = SplitState::Idle;
        }
    }

    if state != SplitState::Idle {
        tracing::debug!(
            line = line_start,
            "dropping unterminated statement at end of script"
        );
    }

    statements
}

/// Normalize, strip comments and split `script` into statements.
///
/// Line numbers refer to `script` itself, including any leading blank lines
/// removed by normalization.
pub fn parse_statements(script: &str) -> Vec<Statement> {
    let leading = script.len() - script.trim_start().len();
    let offset = script[..leading].matches(LINE_DELIMITER).count();

    let (cleaned, lines) = strip_comments_mapped(&normalize(script));
    let mut statements = split_mapped(&cleaned, &lines);
    for stmt in &mut statements {
        stmt.line_start += offset;
        stmt.line_end += offset;
    }
    statements
}
