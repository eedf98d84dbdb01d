use integration_tests::harness::TestWorkspace;
use pretty_assertions::assert_eq;
use usagestats_core::types::{AssocType, FileType};

const BROWSER: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

fn combined_line(ip: &str, date: &str, target: &str, status: u16, agent: &str) -> String {
    format!(r#"{ip} - - [{date}] "GET {target} HTTP/1.1" {status} 5120 "https://example.org/" "{agent}""#)
}

#[test]
fn combined_logs_with_legacy_urls_are_counted() {
    // Arrange
    let ws = TestWorkspace::from_fixture("combined");
    let lines = [
        combined_line(
            "198.51.100.7",
            "10/Oct/2020:13:55:36 +0000",
            "/index.php?journal=myjournal&page=article&op=view&path%5B%5D=10",
            200,
            BROWSER,
        ),
        combined_line(
            "198.51.100.7",
            "10/Oct/2020:23:30:00 -0200",
            "/index.php/public/article/download/intro-2020/pdf",
            200,
            BROWSER,
        ),
    ];
    ws.stage("access_log.20201010", &lines.each_ref().map(String::as_str));

    // Act
    let summary = ws.loader().run(&mut ws.pipeline()).unwrap();

    // Assert
    assert_eq!(summary.archived.len(), 1);
    let committed = ws.committed();
    assert_eq!(committed.len(), 2);

    assert_eq!(committed[0].assoc_type, AssocType::Article);
    assert_eq!(committed[0].assoc_id, 10);
    assert_eq!(committed[0].day, "20201010");

    // 23:30 at -0200 is the next day in UTC.
    assert_eq!(committed[1].assoc_type, AssocType::Galley);
    assert_eq!(committed[1].assoc_id, 30);
    assert_eq!(committed[1].file_type, Some(FileType::Pdf));
    assert_eq!(committed[1].day, "20201011");
}

#[test]
fn crawlers_are_dropped_when_detection_is_enabled() {
    let ws = TestWorkspace::from_fixture("combined");
    let lines = [combined_line(
        "198.51.100.8",
        "10/Oct/2020:13:55:36 +0000",
        "/index.php/myjournal/article/view/10",
        200,
        "Mozilla/5.0 (compatible; Yahoo! Slurp; http://help.yahoo.com/help/us/ysearch/slurp)",
    )];
    ws.stage("crawler.log", &lines.each_ref().map(String::as_str));

    ws.loader().run(&mut ws.pipeline()).unwrap();

    assert!(ws.committed().is_empty());
}
