mod commands;
mod preprocessor;
mod statements;
mod types;

pub use commands::classify;
pub use preprocessor::{normalize, strip_comments, BEGIN_CERTIFICATE, END_CERTIFICATE};
pub use statements::{parse_statements, split_statements, STATEMENT_SET_BEGIN, STATEMENT_SET_END};
pub use types::{Statement, StatementKind};
