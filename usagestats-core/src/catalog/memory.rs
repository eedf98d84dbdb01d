use crate::catalog::{
    Article, ArticleGalley, ArticleGalleyLookup, ArticleLookup, Issue, IssueGalley,
    IssueGalleyLookup, IssueLookup, Journal, JournalLookup, JournalSettings,
};
use crate::conf::ConfigError;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Shape of the catalog HCL file.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogFileSpec {
    pub journals: Vec<JournalSpec>,
    pub articles: Vec<ArticleSpec>,
    pub article_galleys: Vec<ArticleGalleySpec>,
    pub issues: Vec<IssueSpec>,
    pub issue_galleys: Vec<IssueGalleySpec>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct JournalSpec {
    pub id: u64,
    pub path: String,
    pub enable_public_article_id: bool,
    pub enable_public_issue_id: bool,
    pub enable_public_galley_id: bool,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArticleSpec {
    pub id: u64,
    pub journal_id: u64,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArticleGalleySpec {
    pub id: u64,
    pub article_id: u64,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub kind: GalleyKind,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IssueSpec {
    pub id: u64,
    pub journal_id: u64,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IssueGalleySpec {
    pub id: u64,
    pub issue_id: u64,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub kind: GalleyKind,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleyKind {
    Pdf,
    Html,
    #[default]
    Other,
}

fn default_published() -> bool {
    true
}

/// Rows of one object kind, indexed by internal id and by (scope, public id),
/// where the scope is the owning journal or parent object.
#[derive(Debug)]
struct Table<T> {
    by_id: AHashMap<u64, (u64, T)>,
    by_public_id: AHashMap<(u64, String), u64>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            by_id: AHashMap::new(),
            by_public_id: AHashMap::new(),
        }
    }
}

impl<T: Copy> Table<T> {
    fn insert(&mut self, id: u64, scope: u64, public_id: Option<String>, row: T) {
        self.by_id.insert(id, (scope, row));
        if let Some(public_id) = public_id.filter(|p| !p.is_empty()) {
            self.by_public_id.insert((scope, public_id), id);
        }
    }

    fn by_id(&self, scope: u64, id: u64) -> Option<T> {
        self.by_id
            .get(&id)
            .filter(|(owner, _)| *owner == scope)
            .map(|(_, row)| *row)
    }

    fn by_best_id(&self, scope: u64, id: &str) -> Option<T> {
        if let Some(internal) = self.by_public_id.get(&(scope, id.to_string())) {
            return self.by_id(scope, *internal);
        }

        id.trim()
            .parse::<u64>()
            .ok()
            .and_then(|internal| self.by_id(scope, internal))
    }

    fn contains(&self, id: u64) -> bool {
        self.by_id.contains_key(&id)
    }
}

/// Catalog held in memory, loaded from an HCL file.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    journals: Vec<Journal>,
    articles: Table<Article>,
    article_galleys: Table<ArticleGalley>,
    issues: Table<Issue>,
    issue_galleys: Table<IssueGalley>,
}

impl InMemoryCatalog {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let spec: CatalogFileSpec = hcl::from_str(&text).map_err(|e| ConfigError::parse(path, e))?;
        Self::from_spec(spec)
    }

    pub fn from_spec(spec: CatalogFileSpec) -> Result<Self, ConfigError> {
        let mut catalog = InMemoryCatalog::default();

        //---------------------------------------------------------------------
        // Journals
        //---------------------------------------------------------------------
        let mut paths = AHashSet::new();
        let mut journal_ids = AHashSet::new();
        for j in spec.journals {
            if !paths.insert(j.path.clone()) {
                return Err(ConfigError::DuplicateJournal { path: j.path });
            }
            journal_ids.insert(j.id);
            catalog.journals.push(Journal {
                id: j.id,
                path: j.path,
                settings: JournalSettings {
                    enable_public_article_id: j.enable_public_article_id,
                    enable_public_issue_id: j.enable_public_issue_id,
                    enable_public_galley_id: j.enable_public_galley_id,
                },
            });
        }

        //---------------------------------------------------------------------
        // Articles and their galleys
        //---------------------------------------------------------------------
        for a in spec.articles {
            if !journal_ids.contains(&a.journal_id) {
                return Err(dangling("article", a.id, "journal", a.journal_id));
            }
            if !a.published {
                continue;
            }
            let row = Article {
                id: a.id,
                journal_id: a.journal_id,
            };
            catalog.articles.insert(a.id, a.journal_id, a.public_id, row);
        }

        for g in spec.article_galleys {
            if !catalog.articles.contains(g.article_id) {
                // Galleys of unpublished articles are unreachable, not an error.
                tracing::debug!(galley_id = g.id, article_id = g.article_id, "skipping galley without published article");
                continue;
            }
            let row = ArticleGalley {
                id: g.id,
                article_id: g.article_id,
                is_pdf: g.kind == GalleyKind::Pdf,
                is_html: g.kind == GalleyKind::Html,
            };
            catalog.article_galleys.insert(g.id, g.article_id, g.public_id, row);
        }

        //---------------------------------------------------------------------
        // Issues and their galleys
        //---------------------------------------------------------------------
        for i in spec.issues {
            if !journal_ids.contains(&i.journal_id) {
                return Err(dangling("issue", i.id, "journal", i.journal_id));
            }
            if !i.published {
                continue;
            }
            let row = Issue {
                id: i.id,
                journal_id: i.journal_id,
            };
            catalog.issues.insert(i.id, i.journal_id, i.public_id, row);
        }

        for g in spec.issue_galleys {
            if !catalog.issues.contains(g.issue_id) {
                tracing::debug!(galley_id = g.id, issue_id = g.issue_id, "skipping galley without published issue");
                continue;
            }
            let row = IssueGalley {
                id: g.id,
                issue_id: g.issue_id,
                is_pdf: g.kind == GalleyKind::Pdf,
            };
            catalog.issue_galleys.insert(g.id, g.issue_id, g.public_id, row);
        }

        Ok(catalog)
    }
}

fn dangling(kind: &'static str, id: u64, parent: &'static str, parent_id: u64) -> ConfigError {
    ConfigError::DanglingCatalogEntry {
        kind,
        id,
        parent,
        parent_id,
    }
}

impl JournalLookup for InMemoryCatalog {
    fn all_journals(&self) -> Vec<Journal> {
        self.journals.clone()
    }
}

impl ArticleLookup for InMemoryCatalog {
    fn article_by_best_id(&self, journal_id: u64, id: &str) -> Option<Article> {
        self.articles.by_best_id(journal_id, id)
    }

    fn article_by_id(&self, journal_id: u64, id: u64) -> Option<Article> {
        self.articles.by_id(journal_id, id)
    }
}

impl ArticleGalleyLookup for InMemoryCatalog {
    fn article_galley_by_best_id(&self, article_id: u64, id: &str) -> Option<ArticleGalley> {
        self.article_galleys.by_best_id(article_id, id)
    }

    fn article_galley_by_id(&self, article_id: u64, id: u64) -> Option<ArticleGalley> {
        self.article_galleys.by_id(article_id, id)
    }
}

impl IssueLookup for InMemoryCatalog {
    fn issue_by_best_id(&self, journal_id: u64, id: &str) -> Option<Issue> {
        self.issues.by_best_id(journal_id, id)
    }

    fn issue_by_id(&self, journal_id: u64, id: u64) -> Option<Issue> {
        self.issues.by_id(journal_id, id)
    }
}

impl IssueGalleyLookup for InMemoryCatalog {
    fn issue_galley_by_best_id(&self, issue_id: u64, id: &str) -> Option<IssueGalley> {
        self.issue_galleys.by_best_id(issue_id, id)
    }

    fn issue_galley_by_id(&self, issue_id: u64, id: u64) -> Option<IssueGalley> {
        self.issue_galleys.by_id(issue_id, id)
    }
}
