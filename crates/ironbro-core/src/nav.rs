//! Active navigation link highlighting

use tracing::{debug, trace};

use crate::page::NavLink;

const INDEX_PAGE: &str = "index.html";
const INDEX_LINK: &str = "./index.html";

/// Rule under which a link matched the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// `index.html` against `./index.html`
    IndexEquivalent,
    /// Identical strings
    Exact,
    /// Empty page name against `./index.html`
    RootEquivalent,
    /// Page name contains the link's stem (nested paths)
    Containment,
}

/// Page name from a location path: last segment, `index.html` for the root
pub fn current_page(pathname: &str) -> String {
    match pathname.rsplit('/').next() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => INDEX_PAGE.to_string(),
    }
}

/// Last rule that matches `href` against `current`, if any
pub fn matching_rule(href: &str, current: &str) -> Option<MatchRule> {
    if href.is_empty() {
        return None;
    }

    let mut matched = None;
    if current == INDEX_PAGE && href == INDEX_LINK {
        matched = Some(MatchRule::IndexEquivalent);
    }
    if current == href {
        matched = Some(MatchRule::Exact);
    }
    if current.is_empty() && href == INDEX_LINK {
        matched = Some(MatchRule::RootEquivalent);
    }
    let stem = href.replacen("./", "", 1).replacen(".html", "", 1);
    if href != INDEX_LINK && !stem.is_empty() && current.contains(&stem) {
        matched = Some(MatchRule::Containment);
    }
    matched
}

/// Mark matching links `active` and clear the rest; returns the active count.
///
/// Rules are evaluated per link, so overlapping shapes can leave more than one
/// link active.
pub fn highlight_active(links: &mut [NavLink], current: &str) -> usize {
    let mut active = 0;
    for link in links.iter_mut() {
        let rule = link
            .href
            .as_deref()
            .and_then(|href| matching_rule(href, current));
        match rule {
            Some(rule) => {
                trace!("Nav: {:?} matched {:?}", link.href, rule);
                link.element.add_class("active");
                active += 1;
            }
            None => link.element.remove_class("active"),
        }
    }
    debug!("Nav: {} active link(s) for '{}'", active, current);
    active
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(hrefs: &[&str]) -> Vec<NavLink> {
        hrefs.iter().map(|h| NavLink::new(h)).collect()
    }

    fn active(links: &[NavLink]) -> Vec<&str> {
        links
            .iter()
            .filter(|l| l.is_active())
            .filter_map(|l| l.href.as_deref())
            .collect()
    }

    #[test]
    fn test_current_page() {
        assert_eq!(current_page("/videos.html"), "videos.html");
        assert_eq!(current_page("/site/videos.html"), "videos.html");
        assert_eq!(current_page("/"), "index.html");
        assert_eq!(current_page(""), "index.html");
    }

    #[test]
    fn test_index_page_marks_index_link() {
        let mut nav = links(&["./index.html", "./about.html"]);
        assert_eq!(highlight_active(&mut nav, "index.html"), 1);
        assert_eq!(active(&nav), vec!["./index.html"]);
    }

    #[test]
    fn test_empty_path_uses_root_equivalence() {
        let mut nav = links(&["./index.html", "./about.html"]);
        assert_eq!(highlight_active(&mut nav, ""), 1);
        assert_eq!(active(&nav), vec!["./index.html"]);
        assert_eq!(
            matching_rule("./index.html", ""),
            Some(MatchRule::RootEquivalent)
        );
    }

    #[test]
    fn test_exact_and_containment() {
        assert_eq!(matching_rule("videos.html", "videos.html"), Some(MatchRule::Containment));
        assert_eq!(matching_rule("./videos.html", "videos.html"), Some(MatchRule::Containment));
        assert_eq!(matching_rule("./index.html", "index.html"), Some(MatchRule::IndexEquivalent));
        assert_eq!(matching_rule("./videos.html", "fan-mail.html"), None);
    }

    #[test]
    fn test_overlapping_links_can_both_match() {
        let mut nav = links(&["./brosquad.html", "./brosquad-new.html"]);
        assert_eq!(highlight_active(&mut nav, "brosquad-new.html"), 2);
    }

    #[test]
    fn test_stale_active_is_cleared() {
        let mut nav = links(&["./index.html", "./videos.html"]);
        highlight_active(&mut nav, "index.html");
        highlight_active(&mut nav, "videos.html");
        assert_eq!(active(&nav), vec!["./videos.html"]);
    }

    #[test]
    fn test_links_without_href_never_match() {
        let mut nav = vec![NavLink::default(), NavLink::new(""), NavLink::new("./")];
        assert_eq!(highlight_active(&mut nav, "index.html"), 0);

        // A bare "./" strips to an empty stem, so containment never fires
        for current in ["videos.html", "index.html", ""] {
            assert_eq!(matching_rule("./", current), None);
        }
    }
}
