pub const STATEMENT_DELIMITER: char = ';';
pub const LINE_DELIMITER: char = '\n';

pub const BEGIN_CERTIFICATE: &str = "-----BEGIN CERTIFICATE-----";
pub const END_CERTIFICATE: &str = "-----END CERTIFICATE-----";

/// Trim the script and make sure it ends with `;\n`.
pub fn normalize(content: &str) -> String {
    let trimmed = content.trim();
    let mut formatted = String::with_capacity(trimmed.len() + 2);
    formatted.push_str(trimmed);
    if !trimmed.ends_with(STATEMENT_DELIMITER) {
        formatted.push(STATEMENT_DELIMITER);
    }
    formatted.push(LINE_DELIMITER);
    formatted
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LexState {
    Normal,
    LineComment,
    BlockComment,
    Certificate,
}

/// Maps each line of a cleaned script back to the source lines it came from.
#[derive(Debug, Clone)]
pub(crate) struct LineMap {
    /// 1-based source line on which each cleaned line starts.
    starts: Vec<usize>,
    total: usize,
}

impl LineMap {
    /// Cleaned text whose lines are the source lines.
    pub(crate) fn identity(text: &str) -> Self {
        let total = text.matches(LINE_DELIMITER).count() + 1;
        Self {
            starts: (1..=total).collect(),
            total,
        }
    }

    /// First and last source line of cleaned line `idx` (0-based).
    pub(crate) fn span(&self, idx: usize) -> (usize, usize) {
        let start = self.starts.get(idx).copied().unwrap_or(self.total);
        let end = self
            .starts
            .get(idx + 1)
            .map_or(self.total, |next| next - 1);
        (start, end)
    }
}

/// Remove `--` and `/* */` comments, leaving certificate blocks untouched.
pub fn strip_comments(normalized: &str) -> String {
    strip_comments_mapped(normalized).0
}

/// [`strip_comments`], also returning where each cleaned line came from.
///
/// A block comment spanning lines joins the text around it into one
/// cleaned line.
pub(crate) fn strip_comments_mapped(normalized: &str) -> (String, LineMap) {
    let mut out = String::with_capacity(normalized.len());
    let mut state = LexState::Normal;
    let mut i = 0usize;
    let last_block_close = normalized.rfind("*/");
    let last_cert_end = normalized.rfind(END_CERTIFICATE);

    // `source_line` is the line at `counted`; newlines are tallied lazily.
    let mut starts = vec![1usize];
    let mut source_line = 1usize;
    let mut counted = 0usize;

    while i < normalized.len() {
        let rest = &normalized[i..];

        match state {
            LexState::Normal => {
                if rest.starts_with(BEGIN_CERTIFICATE) {
                    out.push_str(BEGIN_CERTIFICATE);
                    i += BEGIN_CERTIFICATE.len();
                    // A lone BEGIN marker protects only itself.
                    if last_cert_end.is_some_and(|end| end >= i) {
                        state = LexState::Certificate;
                    }
                    continue;
                }
                if rest.starts_with(END_CERTIFICATE) {
                    out.push_str(END_CERTIFICATE);
                    i += END_CERTIFICATE.len();
                    continue;
                }
                if rest.starts_with("--") {
                    state = LexState::LineComment;
                    i += 2;
                    continue;
                }
                // An unterminated `/*` is not a comment.
                if rest.starts_with("/*") && last_block_close.is_some_and(|end| end >= i + 2) {
                    state = LexState::BlockComment;
                    i += 2;
                    continue;
                }
            }
            LexState::LineComment => {
                if rest.starts_with(LINE_DELIMITER) {
                    state = LexState::Normal;
                } else {
                    i += next_char_len(rest);
                    continue;
                }
            }
            LexState::BlockComment => {
                if rest.starts_with("*/") {
                    i += 2;
                    while normalized[i..].starts_with("*/") {
                        i += 2;
                    }
                    state = LexState::Normal;
                    continue;
                }
                i += next_char_len(rest);
                continue;
            }
            LexState::Certificate => {
                if rest.starts_with(END_CERTIFICATE) {
                    out.push_str(END_CERTIFICATE);
                    i += END_CERTIFICATE.len();
                    state = LexState::Normal;
                    continue;
                }
            }
        }

        let len = next_char_len(rest);
        out.push_str(&rest[..len]);
        i += len;

        if rest.starts_with(LINE_DELIMITER) {
            source_line += normalized[counted..i].matches(LINE_DELIMITER).count();
            counted = i;
            starts.push(source_line);
        }
    }

    source_line += normalized[counted..].matches(LINE_DELIMITER).count();
    (
        out,
        LineMap {
            starts,
            total: source_line,
        },
    )
}

fn next_char_len(s: &str) -> usize {
    s.chars().next().map_or(1, char::len_utf8)
}
