use crate::conf::ParserConfig;
use crate::parse::{COMBINED_LOG_PATTERN, LogParser, OWN_LOG_PATTERN, select_pattern};
use pretty_assertions::assert_eq;

const COMBINED_LINE: &str = r#"192.0.2.10 - - [10/Oct/2020:13:55:36 +0000] "GET /index.php/myjournal/article/view/10 HTTP/1.1" 200 2326 "https://example.org/" "Mozilla/5.0 (X11; Linux x86_64)""#;

fn combined_parser() -> LogParser {
    LogParser::new(COMBINED_LOG_PATTERN).unwrap()
}

#[test]
fn combined_line_extracts_all_fields() {
    // Arrange
    let parser = combined_parser();

    // Act
    let entry = parser.parse_line(COMBINED_LINE).unwrap();

    // Assert
    assert_eq!(entry.ip, "192.0.2.10");
    assert_eq!(entry.timestamp, Some(1_602_338_136));
    assert_eq!(entry.url, "/index.php/myjournal/article/view/10");
    assert_eq!(entry.return_code, "200");
    assert_eq!(entry.user_agent, "Mozilla/5.0 (X11; Linux x86_64)");
}

#[test]
fn target_is_percent_decoded() {
    // Arrange
    let parser = combined_parser();
    let line = r#"192.0.2.10 - - [10/Oct/2020:13:55:36 +0000] "GET /index.php/my%20journal/article/view/a%2Fb HTTP/1.1" 200 1 "-" "agent""#;

    // Act
    let entry = parser.parse_line(line).unwrap();

    // Assert
    assert_eq!(entry.url, "/index.php/my journal/article/view/a/b");
}

#[test]
fn legacy_target_is_rewritten_after_decoding() {
    // Arrange
    let parser = combined_parser();
    let line = r#"192.0.2.10 - - [10/Oct/2020:13:55:36 +0000] "GET /index.php?journal=j&page=article&op=view&path%5B%5D=10 HTTP/1.1" 200 1 "-" "agent""#;

    // Act
    let entry = parser.parse_line(line).unwrap();

    // Assert
    assert_eq!(entry.url, "/index.php/j/article/view/10");
}

#[test]
fn own_log_format_is_parsed() {
    // Arrange
    let parser = LogParser::new(OWN_LOG_PATTERN).unwrap();
    let line = r#"198.51.100.7 - - "2020-10-10 13:55:36" http://example.org/index.php/j/issue/view/3 304 "curl/8.0""#;

    // Act
    let entry = parser.parse_line(line).unwrap();

    // Assert
    assert_eq!(entry.ip, "198.51.100.7");
    assert_eq!(entry.timestamp, Some(1_602_338_136));
    assert_eq!(entry.url, "http://example.org/index.php/j/issue/view/3");
    assert_eq!(entry.return_code, "304");
    assert_eq!(entry.user_agent, "curl/8.0");
}

#[test]
fn non_matching_line_yields_nothing() {
    // Arrange
    let parser = combined_parser();

    // Act
    let entry = parser.parse_line("this is not an access log line");

    // Assert
    assert!(entry.is_none());
}

#[test]
fn unreadable_date_leaves_timestamp_empty() {
    // Arrange
    let parser = combined_parser();
    let line = r#"192.0.2.10 - - [yesterday] "GET /index.php/j/article/view/1 HTTP/1.1" 200 1 "-" "agent""#;

    // Act
    let entry = parser.parse_line(line).unwrap();

    // Assert
    assert_eq!(entry.timestamp, None);
}

#[test]
fn own_logs_ignore_configured_pattern() {
    // Arrange
    let cfg = ParserConfig {
        create_log_files: true,
        access_log_file_parse_regex: Some("^(.*)$".to_string()),
    };

    // Act / Assert
    assert_eq!(select_pattern(&cfg), OWN_LOG_PATTERN);
}

#[test]
fn external_logs_default_to_combined_format() {
    // Arrange
    let cfg = ParserConfig {
        create_log_files: false,
        access_log_file_parse_regex: None,
    };

    // Act / Assert
    assert_eq!(select_pattern(&cfg), COMBINED_LOG_PATTERN);
}

#[test]
fn delimited_custom_pattern_is_accepted() {
    // Arrange
    let cfg = ParserConfig {
        create_log_files: false,
        access_log_file_parse_regex: Some(
            r#"/^(\S+) \S+ \S+ \[(.*?)\] "\S+ (\S+).*?" (\S+) \S+ ".*?" "(.*?)"/i"#.to_string(),
        ),
    };

    // Act
    let parser = LogParser::from_config(&cfg).unwrap();

    // Assert
    assert!(parser.pattern().starts_with("(?i)^"));
    assert!(parser.parse_line(COMBINED_LINE).is_some());
}

#[test]
fn pattern_with_too_few_groups_is_rejected() {
    // Act
    let err = LogParser::new(r"^(\S+) (\S+)").unwrap_err();

    // Assert
    assert!(err.to_string().contains("2 capture groups"));
}

#[test]
fn invalid_pattern_is_rejected() {
    // Act
    let result = LogParser::new(r"^((\S+)");

    // Assert
    assert!(result.is_err());
}
