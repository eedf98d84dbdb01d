use crate::catalog::{ArticleGalley, IssueGalley, Journal, Repositories};
use crate::resolve::routes::ObjectReference;
use crate::types::{AssocType, FileType, ResolvedAccess};

/// Turns public-facing identifiers into internal ids, honoring each journal's
/// public id settings.
#[derive(Clone)]
pub struct IdentityResolver {
    repos: Repositories,
}

impl IdentityResolver {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub fn resolve(&self, journal: &Journal, reference: &ObjectReference<'_>) -> Option<ResolvedAccess> {
        match reference.assoc_type {
            AssocType::Article => {
                let article_id = self.article_id(journal, reference.id)?;
                Some(access(AssocType::Article, article_id, journal, None))
            }
            AssocType::Issue => {
                let issue_id = self.issue_id(journal, reference.id)?;
                Some(access(AssocType::Issue, issue_id, journal, None))
            }
            AssocType::Galley => {
                let parent = reference.parent_id?;
                let article_id = self.article_id(journal, parent)?;
                match self.article_galley(journal, article_id, reference.id) {
                    Some(galley) => Some(access(
                        AssocType::Galley,
                        galley.id,
                        journal,
                        Some(article_galley_file_type(&galley)),
                    )),
                    // Unknown galley: count it against the article instead.
                    None => self.resolve_parent(journal, AssocType::Article, parent),
                }
            }
            AssocType::IssueGalley => {
                let parent = reference.parent_id?;
                let issue_id = self.issue_id(journal, parent)?;
                match self.issue_galley(journal, issue_id, reference.id) {
                    Some(galley) => Some(access(
                        AssocType::IssueGalley,
                        galley.id,
                        journal,
                        Some(issue_galley_file_type(&galley)),
                    )),
                    None => self.resolve_parent(journal, AssocType::Issue, parent),
                }
            }
        }
    }

    fn resolve_parent(&self, journal: &Journal, assoc_type: AssocType, parent_id: &str) -> Option<ResolvedAccess> {
        let id = match assoc_type {
            AssocType::Article => self.article_id(journal, parent_id)?,
            AssocType::Issue => self.issue_id(journal, parent_id)?,
            AssocType::Galley | AssocType::IssueGalley => return None,
        };
        Some(access(assoc_type, id, journal, None))
    }

    pub fn article_id(&self, journal: &Journal, id: &str) -> Option<u64> {
        let article = if journal.settings.enable_public_article_id {
            self.repos.articles.article_by_best_id(journal.id, id)
        } else {
            self.repos.articles.article_by_id(journal.id, parse_internal(id)?)
        };
        article.map(|a| a.id)
    }

    pub fn issue_id(&self, journal: &Journal, id: &str) -> Option<u64> {
        let issue = if journal.settings.enable_public_issue_id {
            self.repos.issues.issue_by_best_id(journal.id, id)
        } else {
            self.repos.issues.issue_by_id(journal.id, parse_internal(id)?)
        };
        issue.map(|i| i.id)
    }

    pub fn article_galley(&self, journal: &Journal, article_id: u64, id: &str) -> Option<ArticleGalley> {
        if journal.settings.enable_public_galley_id {
            self.repos.article_galleys.article_galley_by_best_id(article_id, id)
        } else {
            self.repos
                .article_galleys
                .article_galley_by_id(article_id, parse_internal(id)?)
        }
    }

    pub fn issue_galley(&self, journal: &Journal, issue_id: u64, id: &str) -> Option<IssueGalley> {
        if journal.settings.enable_public_galley_id {
            self.repos.issue_galleys.issue_galley_by_best_id(issue_id, id)
        } else {
            self.repos
                .issue_galleys
                .issue_galley_by_id(issue_id, parse_internal(id)?)
        }
    }
}

pub fn article_galley_file_type(galley: &ArticleGalley) -> FileType {
    if galley.is_pdf {
        FileType::Pdf
    } else if galley.is_html {
        FileType::Html
    } else {
        FileType::Other
    }
}

/// Issue galleys are never HTML.
pub fn issue_galley_file_type(galley: &IssueGalley) -> FileType {
    if galley.is_pdf {
        FileType::Pdf
    } else {
        FileType::Other
    }
}

fn parse_internal(id: &str) -> Option<u64> {
    id.trim().parse::<u64>().ok().filter(|id| *id > 0)
}

fn access(assoc_type: AssocType, assoc_id: u64, journal: &Journal, file_type: Option<FileType>) -> ResolvedAccess {
    ResolvedAccess {
        assoc_type,
        assoc_id,
        journal_id: journal.id,
        file_type,
    }
}
