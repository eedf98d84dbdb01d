use crate::filter::{FilterDecision, RequestFilter, RobotList};
use crate::types::LogEntry;

fn entry(url: &str, code: &str, agent: &str) -> LogEntry {
    LogEntry {
        ip: "192.0.2.1".to_string(),
        timestamp: Some(1_600_000_000),
        url: url.to_string(),
        return_code: code.to_string(),
        user_agent: agent.to_string(),
    }
}

fn filter_with_robots(lines: &[&str]) -> RequestFilter {
    let robots = RobotList::from_lines(lines.iter().copied()).unwrap();
    RequestFilter::new(Some(robots), None)
}

#[test]
fn successful_application_request_is_accepted() {
    // Arrange
    let filter = filter_with_robots(&["bot"]);

    // Act
    let decision = filter.check(&entry("/index.php/j/article/view/1", "200", "Mozilla/5.0"));

    // Assert
    assert_eq!(decision, FilterDecision::Accept);
}

#[test]
fn not_modified_counts_as_successful() {
    let filter = RequestFilter::default();

    let decision = filter.check(&entry("/index.php/j/article/view/1", "304", "Mozilla/5.0"));

    assert_eq!(decision, FilterDecision::Accept);
}

#[test]
fn static_assets_are_dropped() {
    let filter = RequestFilter::default();

    let decision = filter.check(&entry("/public/site/logo.png", "200", "Mozilla/5.0"));

    assert_eq!(decision, FilterDecision::NotApplication);
}

#[test]
fn unsuccessful_requests_are_dropped() {
    let filter = RequestFilter::default();

    for code in ["404", "500", "206", "-", ""] {
        let decision = filter.check(&entry("/index.php/j/article/view/1", code, "Mozilla/5.0"));
        assert_eq!(decision, FilterDecision::Unsuccessful, "code {code:?}");
    }
}

#[test]
fn listed_robots_are_dropped_regardless_of_status() {
    // Arrange
    let filter = filter_with_robots(&["googlebot", "^curl/"]);

    // Act
    let ok = filter.check(&entry("/index.php/j/article/view/1", "200", "Mozilla/5.0 (compatible; Googlebot/2.1)"));
    let not_modified = filter.check(&entry("/index.php/j/article/view/1", "304", "curl/8.0"));

    // Assert
    assert_eq!(ok, FilterDecision::Robot);
    assert_eq!(not_modified, FilterDecision::Robot);
}

#[test]
fn missing_robot_list_drops_no_agents() {
    let filter = RequestFilter::new(None, None);

    let decision = filter.check(&entry("/index.php/j/article/view/1", "200", "Googlebot/2.1"));

    assert_eq!(decision, FilterDecision::Accept);
}
