use crate::resolve::{RouteKind, journal_path, match_route};
use crate::types::AssocType;
use pretty_assertions::assert_eq;

#[test]
fn view_route_with_one_component_references_the_article() {
    // Act
    let reference = match_route("/index.php/j/article/view/10").unwrap();

    // Assert
    assert_eq!(reference.assoc_type, AssocType::Article);
    assert_eq!(reference.id, "10");
    assert_eq!(reference.parent_id, None);
    assert_eq!(reference.route.kind, RouteKind::View);
}

#[test]
fn view_route_with_two_components_narrows_to_galley() {
    let reference = match_route("/index.php/j/article/view/10/5").unwrap();

    assert_eq!(reference.assoc_type, AssocType::Galley);
    assert_eq!(reference.id, "5");
    assert_eq!(reference.parent_id, Some("10"));
    assert_eq!(reference.route.kind, RouteKind::View);
}

#[test]
fn legacy_view_article_route_is_recognized() {
    let reference = match_route("/index.php/j/article/viewArticle/10").unwrap();

    assert_eq!(reference.assoc_type, AssocType::Article);
    assert_eq!(reference.route.template, "/article/viewArticle/");
}

#[test]
fn download_route_references_galley_of_parent() {
    let reference = match_route("/index.php/j/article/download/10/3").unwrap();

    assert_eq!(reference.assoc_type, AssocType::Galley);
    assert_eq!(reference.id, "3");
    assert_eq!(reference.parent_id, Some("10"));
    assert_eq!(reference.route.kind, RouteKind::Download);
}

#[test]
fn download_route_without_galley_component_is_unresolvable() {
    assert_eq!(match_route("/index.php/j/article/download/10"), None);
    assert_eq!(match_route("/index.php/j/issue/viewFile/7/"), None);
}

#[test]
fn issue_routes_do_not_shadow_each_other() {
    let view = match_route("/index.php/j/issue/view/7/8").unwrap();
    let file = match_route("/index.php/j/issue/viewFile/7/8").unwrap();

    assert_eq!(view.assoc_type, AssocType::IssueGalley);
    assert_eq!(view.route.kind, RouteKind::View);
    assert_eq!(file.assoc_type, AssocType::IssueGalley);
    assert_eq!(file.route.kind, RouteKind::Download);
}

#[test]
fn query_string_and_fragment_are_not_part_of_the_id() {
    let query = match_route("/index.php/j/article/view/10?lang=en").unwrap();
    let fragment = match_route("/index.php/j/article/view/10/5#page=2").unwrap();

    assert_eq!(query.id, "10");
    assert_eq!(fragment.id, "5");
}

#[test]
fn trailing_slash_does_not_narrow() {
    let reference = match_route("/index.php/j/article/view/10/").unwrap();

    assert_eq!(reference.assoc_type, AssocType::Article);
    assert_eq!(reference.id, "10");
}

#[test]
fn non_countable_pages_do_not_match() {
    assert_eq!(match_route("/index.php/j/about"), None);
    assert_eq!(match_route("/index.php/j/search/search?query=x"), None);
}

#[test]
fn journal_path_is_segment_after_front_controller() {
    assert_eq!(journal_path("/index.php/myjournal/article/view/1"), Some("myjournal"));
    assert_eq!(journal_path("/ojs/index.php/other/issue/view/2"), Some("other"));
    assert_eq!(journal_path("/index.php//article/view/1"), None);
    assert_eq!(journal_path("/article/view/1"), None);
}
