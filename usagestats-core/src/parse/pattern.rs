use crate::conf::{ConfigError, ParserConfig};
use regex::Regex;

/// Format written by the application's own access logging:
/// `ip - - "date" url status "user agent"`.
pub const OWN_LOG_PATTERN: &str = r#"^(\S+) \S+ \S+ "(.*?)" (\S+) (\S+) "(.*?)""#;

/// Apache/nginx combined log format.
pub const COMBINED_LOG_PATTERN: &str =
    r#"^(\S+) \S+ \S+ \[(.*?)\] "\S+ (\S+).*?" (\S+) \S+ ".*?" "(.*?)""#;

/// Address, date, request target, status, user agent.
pub const REQUIRED_CAPTURE_GROUPS: usize = 5;

/// Picks the pattern for the configured log source.
///
/// Own log files always use [`OWN_LOG_PATTERN`]. External files use the configured
/// pattern and fall back to [`COMBINED_LOG_PATTERN`] when none is set.
pub fn select_pattern(cfg: &ParserConfig) -> &str {
    if cfg.create_log_files {
        return OWN_LOG_PATTERN;
    }

    cfg.access_log_file_parse_regex
        .as_deref()
        .unwrap_or(COMBINED_LOG_PATTERN)
}

pub fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    let source = strip_delimiters(pattern);
    let regex = Regex::new(&source).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })?;

    // captures_len counts the implicit whole-match group.
    let groups = regex.captures_len() - 1;
    if groups < REQUIRED_CAPTURE_GROUPS {
        return Err(ConfigError::MissingCaptureGroups {
            pattern: pattern.to_string(),
            groups,
        });
    }

    Ok(regex)
}

/// Accepts patterns written with delimiters, e.g. `/^(\S+) .../i`, and turns
/// trailing flags into an inline group. Bare patterns pass through unchanged.
pub fn strip_delimiters(pattern: &str) -> String {
    let Some(body) = pattern.strip_prefix('/') else {
        return pattern.to_string();
    };
    let Some(end) = body.rfind('/') else {
        return pattern.to_string();
    };

    let (inner, flags) = (&body[..end], &body[end + 1..]);
    if !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return pattern.to_string();
    }

    let inline: String = flags
        .chars()
        .filter(|c| matches!(c, 'i' | 'm' | 's' | 'x' | 'U'))
        .collect();

    if inline.is_empty() {
        inner.to_string()
    } else {
        format!("(?{inline}){inner}")
    }
}
