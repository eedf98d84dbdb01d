//! URL → object resolution.
//!
//! 1. Match the URL against the route table ([`routes::match_route`])
//! 2. Find the journal by its path segment ([`JournalDirectory`])
//! 3. Resolve public ids to internal ids ([`IdentityResolver`])
//! 4. Drop landing-page views of galleys whose content is fetched separately

mod identity;
mod routes;
#[cfg(test)]
mod tests;

pub use identity::{IdentityResolver, article_galley_file_type, issue_galley_file_type};
pub use routes::{ObjectReference, ROUTE_TEMPLATES, RouteKind, RouteTemplate, journal_path, match_route};

use crate::catalog::{JournalDirectory, Repositories};
use crate::types::{AssocType, FileType, ResolvedAccess};

#[derive(Clone)]
pub struct UrlResolver {
    directory: JournalDirectory,
    identities: IdentityResolver,
}

impl UrlResolver {
    pub fn new(directory: JournalDirectory, repos: Repositories) -> Self {
        Self {
            directory,
            identities: IdentityResolver::new(repos),
        }
    }

    /// Builds the journal directory from the journal repository.
    pub fn from_repositories(repos: Repositories) -> Self {
        let directory = JournalDirectory::build(repos.journals.as_ref());
        Self::new(directory, repos)
    }

    pub fn directory(&self) -> &JournalDirectory {
        &self.directory
    }

    /// Returns `None` when the URL is not a countable access.
    pub fn resolve(&self, url: &str) -> Option<ResolvedAccess> {
        let reference = match_route(url)?;
        let journal = self.directory.get(journal_path(url)?)?;
        let resolved = self.identities.resolve(journal, &reference)?;

        if is_suppressed_view(&reference, &resolved) {
            tracing::debug!(url, assoc_id = resolved.assoc_id, "view of a galley with separate download, not counted");
            return None;
        }

        Some(resolved)
    }
}

/// Viewing a PDF or HTML galley through the landing page route is followed by a
/// separate download request, which is the one that counts.
fn is_suppressed_view(reference: &ObjectReference<'_>, resolved: &ResolvedAccess) -> bool {
    if reference.route.kind != RouteKind::View {
        return false;
    }

    match resolved.assoc_type {
        AssocType::Galley => matches!(resolved.file_type, Some(FileType::Html | FileType::Pdf)),
        AssocType::IssueGalley => matches!(resolved.file_type, Some(FileType::Pdf)),
        AssocType::Article | AssocType::Issue => false,
    }
}
