mod crawler;
mod robots;
#[cfg(test)]
mod tests;

pub use crawler::CrawlerDetector;
pub use robots::RobotList;

use crate::conf::{ConfigError, RobotsConfig};
use crate::types::LogEntry;

/// Marker every application request carries in its URL.
pub const FRONT_CONTROLLER: &str = "/index.php/";

/// Return codes that count as a successful request.
pub const SUCCESSFUL_RETURN_CODES: [u16; 2] = [200, 304];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Accept,
    /// Static assets and anything not routed through the application.
    NotApplication,
    Unsuccessful,
    Robot,
}

/// Drops entries that must never be counted.
///
/// Matching order...
/// 1. Front-controller marker
/// 2. Return code
/// 3. Robot list (and crawler detection when enabled)
#[derive(Debug, Default)]
pub struct RequestFilter {
    robots: Option<RobotList>,
    crawlers: Option<CrawlerDetector>,
}

impl RequestFilter {
    pub fn new(robots: Option<RobotList>, crawlers: Option<CrawlerDetector>) -> Self {
        Self { robots, crawlers }
    }

    pub fn from_config(cfg: &RobotsConfig) -> Result<Self, ConfigError> {
        let robots = RobotList::discover(&cfg.dir)?;
        match &robots {
            Some(list) => tracing::info!(
                robot_list = ?list.source(),
                patterns = list.len(),
                "robot list loaded"
            ),
            None => tracing::warn!(dir = %cfg.dir.display(), "no robot list found, bot filtering disabled"),
        }

        let crawlers = cfg.detect_crawlers.then(CrawlerDetector::new);

        Ok(Self::new(robots, crawlers))
    }

    pub fn check(&self, entry: &LogEntry) -> FilterDecision {
        if !entry.url.contains(FRONT_CONTROLLER) {
            return FilterDecision::NotApplication;
        }

        if !is_successful(&entry.return_code) {
            return FilterDecision::Unsuccessful;
        }

        if self.is_robot(&entry.user_agent) {
            return FilterDecision::Robot;
        }

        FilterDecision::Accept
    }

    fn is_robot(&self, user_agent: &str) -> bool {
        self.robots.as_ref().is_some_and(|r| r.is_bot(user_agent))
            || self
                .crawlers
                .as_ref()
                .is_some_and(|c| c.is_crawler(user_agent))
    }
}

fn is_successful(return_code: &str) -> bool {
    return_code
        .trim()
        .parse::<u16>()
        .is_ok_and(|code| SUCCESSFUL_RETURN_CODES.contains(&code))
}
