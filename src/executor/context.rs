use crate::error::RunnerError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Session configuration collected from `SET` directives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SessionConfig {
    entries: BTreeMap<String, String>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a `KEY=VALUE` pair as given on the command line.
    pub fn parse_pair(pair: &str) -> Result<(String, String), RunnerError> {
        let Some(eq_pos) = pair.find('=') else {
            return Err(RunnerError::Config(format!(
                "expected KEY=VALUE, got '{pair}'"
            )));
        };
        let key = pair[..eq_pos].trim();
        if key.is_empty() {
            return Err(RunnerError::Config(format!("empty key in '{pair}'")));
        }
        Ok((key.to_string(), pair[eq_pos + 1..].trim().to_string()))
    }

    /// Render the entries as `SET` directives, one per line.
    pub fn to_set_statements(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push_str(&render_set(key, value));
            out.push('\n');
        }
        out
    }
}

/// `SET 'key' = 'value';` with embedded quotes doubled.
pub fn render_set(key: &str, value: &str) -> String {
    format!("SET '{}' = '{}';", quote(key), quote(value))
}

/// Undo the quote doubling of a single-quoted SQL literal body.
pub fn unquote(literal: &str) -> String {
    literal.replace("''", "'")
}

fn quote(s: &str) -> String {
    s.replace('\'', "''")
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SessionConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (k, v) in iter {
            config.set(k, v);
        }
        config
    }
}
