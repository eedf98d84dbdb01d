//! Read-only views of the publishing object repositories.
//!
//! The pipeline never owns journals, articles, issues or galleys; it only asks
//! these capabilities whether an identifier names an object of the expected
//! journal (or parent) and which internal id it has.

mod directory;
mod memory;

pub use directory::JournalDirectory;
pub use memory::{CatalogFileSpec, GalleyKind, InMemoryCatalog};

use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalSettings {
    pub enable_public_article_id: bool,
    pub enable_public_issue_id: bool,
    pub enable_public_galley_id: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journal {
    pub id: u64,
    /// URL path segment, e.g. `myjournal` in `/index.php/myjournal/...`.
    pub path: String,
    pub settings: JournalSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Article {
    pub id: u64,
    pub journal_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleGalley {
    pub id: u64,
    pub article_id: u64,
    pub is_pdf: bool,
    pub is_html: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Issue {
    pub id: u64,
    pub journal_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueGalley {
    pub id: u64,
    pub issue_id: u64,
    pub is_pdf: bool,
}

pub trait JournalLookup {
    fn all_journals(&self) -> Vec<Journal>;
}

/// Only published articles are visible.
pub trait ArticleLookup {
    /// Public id first, then internal id.
    fn article_by_best_id(&self, journal_id: u64, id: &str) -> Option<Article>;
    fn article_by_id(&self, journal_id: u64, id: u64) -> Option<Article>;
}

pub trait ArticleGalleyLookup {
    fn article_galley_by_best_id(&self, article_id: u64, id: &str) -> Option<ArticleGalley>;
    fn article_galley_by_id(&self, article_id: u64, id: u64) -> Option<ArticleGalley>;
}

pub trait IssueLookup {
    fn issue_by_best_id(&self, journal_id: u64, id: &str) -> Option<Issue>;
    fn issue_by_id(&self, journal_id: u64, id: u64) -> Option<Issue>;
}

pub trait IssueGalleyLookup {
    fn issue_galley_by_best_id(&self, issue_id: u64, id: &str) -> Option<IssueGalley>;
    fn issue_galley_by_id(&self, issue_id: u64, id: u64) -> Option<IssueGalley>;
}

/// The object repositories consulted during URL resolution.
#[derive(Clone)]
pub struct Repositories {
    pub journals: Arc<dyn JournalLookup>,
    pub articles: Arc<dyn ArticleLookup>,
    pub article_galleys: Arc<dyn ArticleGalleyLookup>,
    pub issues: Arc<dyn IssueLookup>,
    pub issue_galleys: Arc<dyn IssueGalleyLookup>,
}

impl Repositories {
    /// All five capabilities served by one catalog.
    pub fn from_catalog<C>(catalog: Arc<C>) -> Repositories
    where
        C: JournalLookup + ArticleLookup + ArticleGalleyLookup + IssueLookup + IssueGalleyLookup + 'static,
    {
        Repositories {
            journals: catalog.clone(),
            articles: catalog.clone(),
            article_galleys: catalog.clone(),
            issues: catalog.clone(),
            issue_galleys: catalog,
        }
    }
}
