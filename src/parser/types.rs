/// One complete statement taken from the cleaned script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Trimmed source lines, each followed by `\n`.
    pub text: String,
    /// 1-based line of the first contributing source line.
    pub line_start: usize,
    /// 1-based line of the last contributing source line.
    pub line_end: usize,
}

/// How the runner dispatches a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// `SET 'key' = 'value';`
    Set { key: String, value: String },
    /// Collected into the statement set and executed after everything else.
    Insert,
    /// Executed immediately, in source order.
    Execute,
}
