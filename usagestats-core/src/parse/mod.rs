//! Access log line parsing.
//!
//! A line is matched against a five-group pattern (address, date, request target,
//! status, user agent). The target is percent-decoded and legacy query-string
//! router URLs are rewritten to path form before the entry is returned.

mod date;
mod legacy;
mod pattern;
#[cfg(test)]
mod tests;
mod validate;

pub use date::{day_of, parse_timestamp};
pub use legacy::rewrite_legacy_url;
pub use pattern::{COMBINED_LOG_PATTERN, OWN_LOG_PATTERN, select_pattern, strip_delimiters};
pub use validate::{InvalidEntry, validate_entry};

use crate::conf::{ConfigError, ParserConfig};
use crate::types::LogEntry;
use percent_encoding::percent_decode_str;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct LogParser {
    regex: Regex,
}

impl LogParser {
    pub fn from_config(cfg: &ParserConfig) -> Result<Self, ConfigError> {
        Self::new(select_pattern(cfg))
    }

    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            regex: pattern::compile_pattern(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns `None` when the line does not match the pattern.
    pub fn parse_line(&self, line: &str) -> Option<LogEntry> {
        let caps = self.regex.captures(line)?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

        let url = decode_target(group(3));
        let url = rewrite_legacy_url(&url).into_owned();

        Some(LogEntry {
            ip: group(1).to_string(),
            timestamp: parse_timestamp(group(2)),
            url,
            return_code: group(4).to_string(),
            user_agent: group(5).to_string(),
        })
    }
}

/// Form-style decoding: `+` is a space, then percent escapes are resolved.
fn decode_target(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
