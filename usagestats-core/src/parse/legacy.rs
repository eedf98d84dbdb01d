use smallvec::SmallVec;
use std::borrow::Cow;

const LEGACY_MARKER: &str = "?journal=";
const ROUTER_KEYS: [&str; 4] = ["journal", "page", "op", "path[]"];

/// Rewrites a query-string router URL into path-info form.
///
/// `/index.php?journal=j&page=article&op=view&path[]=10` becomes
/// `/index.php/j/article/view/10`. Router parameters keep the order they appear in;
/// any other parameter is dropped. URLs without `?journal=` are returned as-is.
pub fn rewrite_legacy_url(url: &str) -> Cow<'_, str> {
    if !url.contains(LEGACY_MARKER) {
        return Cow::Borrowed(url);
    }

    let Some((base, query)) = url.split_once('?') else {
        return Cow::Borrowed(url);
    };

    let segments: SmallVec<[&str; 4]> = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, value)| ROUTER_KEYS.contains(key) && !value.is_empty())
        .map(|(_, value)| value)
        .collect();

    let mut rewritten = base.trim_end_matches('/').to_string();
    for segment in segments {
        rewritten.push('/');
        rewritten.push_str(segment);
    }

    Cow::Owned(rewritten)
}
