use crate::filter::FRONT_CONTROLLER;
use crate::types::AssocType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Landing page of an article or issue.
    View,
    /// Delivery of a galley file.
    Download,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RouteTemplate {
    pub assoc_type: AssocType,
    pub kind: RouteKind,
    pub template: &'static str,
}

const fn route(assoc_type: AssocType, kind: RouteKind, template: &'static str) -> RouteTemplate {
    RouteTemplate {
        assoc_type,
        kind,
        template,
    }
}

/// Countable routes, searched in order; the first template contained in the URL wins.
pub static ROUTE_TEMPLATES: [RouteTemplate; 7] = [
    route(AssocType::Article, RouteKind::View, "/article/view/"),
    route(AssocType::Article, RouteKind::View, "/article/viewArticle/"),
    route(AssocType::Galley, RouteKind::Download, "/article/viewFile/"),
    route(AssocType::Galley, RouteKind::Download, "/article/download/"),
    route(AssocType::Issue, RouteKind::View, "issue/view/"),
    route(AssocType::IssueGalley, RouteKind::Download, "issue/viewFile/"),
    route(AssocType::IssueGalley, RouteKind::Download, "issue/download/"),
];

/// What a URL points at, still in public-facing identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectReference<'a> {
    pub route: &'static RouteTemplate,
    pub assoc_type: AssocType,
    pub id: &'a str,
    /// Article or issue owning the galley, for galley references.
    pub parent_id: Option<&'a str>,
}

/// Matches `url` against [`ROUTE_TEMPLATES`] and splits out the identifiers.
///
/// `/article/view/10` references article 10, `/article/view/10/3` narrows to
/// galley 3 of article 10. Galley routes require both components.
pub fn match_route(url: &str) -> Option<ObjectReference<'_>> {
    let (route, rest) = ROUTE_TEMPLATES.iter().find_map(|route| {
        url.split_once(route.template)
            .map(|(_, rest)| (route, rest))
    })?;

    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let mut components = rest.split('/');
    let first = components.next().unwrap_or_default();
    let second = components.next().filter(|c| !c.is_empty());

    match (route.assoc_type.child(), second) {
        // A view route with a second component addresses a galley.
        (Some(child), Some(child_id)) => Some(ObjectReference {
            route,
            assoc_type: child,
            id: child_id,
            parent_id: Some(first),
        }),
        (Some(_), None) => Some(ObjectReference {
            route,
            assoc_type: route.assoc_type,
            id: first,
            parent_id: None,
        }),
        (None, Some(galley_id)) => Some(ObjectReference {
            route,
            assoc_type: route.assoc_type,
            id: galley_id,
            parent_id: Some(first),
        }),
        (None, None) => None,
    }
}

/// The journal path segment: the component right after the front controller.
pub fn journal_path(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once(FRONT_CONTROLLER)?;
    rest.split('/').next().filter(|p| !p.is_empty())
}
