use woothee::parser::Parser;

/// Crawler classification backed by woothee's user-agent database.
pub struct CrawlerDetector {
    parser: Parser,
}

impl CrawlerDetector {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    pub fn is_crawler(&self, user_agent: &str) -> bool {
        let Some(result) = self.parser.parse(user_agent) else {
            return false;
        };

        result.category == "crawler"
    }
}

impl Default for CrawlerDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CrawlerDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrawlerDetector").finish_non_exhaustive()
    }
}
