//! Site accent override for accent-enabled sidebars and highlight elements

use tracing::debug;

use super::{Element, Page};
use crate::theme::Color;

/// Pages that keep their own palette
pub const DEFAULT_EXCLUDED_PAGES: &[&str] = &["reviews.html", "camoman.html"];

const DARKEN_AMOUNT: u8 = 40;
const HIGHLIGHT_CLASSES: [&str; 3] = ["highlight", "neon", "accent-highlight"];
const MEDIA_TAGS: [&str; 5] = ["IMG", "SVG", "VIDEO", "CANVAS", "PICTURE"];
/// Computed property read, then the inline property written
const RECOLORED: [(&str, &str); 3] = [
    ("color", "color"),
    ("background-color", "background-color"),
    ("border-top-color", "border-color"),
];

/// Element that may take the site accent.
///
/// Computed colors are read from `element.style`; replacements are written
/// back into the same map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccentElement {
    /// Upper-case tag name
    pub tag: String,
    /// Descendant of a `[data-allow-accent]` container
    pub in_allow_container: bool,
    /// Descendant of a `[data-skip-accent]` container
    pub in_skip_container: bool,
    /// Trimmed text content
    pub text: String,
    pub element: Element,
}

impl AccentElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            ..Self::default()
        }
    }

    pub fn inside_allow_container(mut self) -> Self {
        self.in_allow_container = true;
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.element.add_class(class);
        self
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.element.set_style(property, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.trim().to_string();
        self
    }

    fn is_candidate(&self) -> bool {
        self.in_allow_container || HIGHLIGHT_CLASSES.iter().any(|c| self.element.has_class(c))
    }

    fn is_skipped(&self) -> bool {
        MEDIA_TAGS.contains(&self.tag.as_str())
            || self.element.has_class("nav-link")
            || self.in_skip_container
            || self.element.has_attribute("data-skip-accent")
            || is_emoji_only(&self.text)
    }

    /// Replace every non-neutral color; returns whether anything changed
    fn recolor(&mut self, accent: &str) -> bool {
        let mut changed = false;
        for (computed, inline) in RECOLORED {
            let replace = self
                .element
                .style(computed)
                .is_some_and(|value| !is_neutral(value));
            if replace {
                self.element.set_style(inline, accent);
                changed = true;
            }
        }
        changed
    }
}

/// Black, white or transparent colors are kept as they are
fn is_neutral(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    match compact.as_str() {
        "" | "transparent" | "black" | "white" => true,
        _ => Color::parse(&compact).is_some_and(|c| c.is_black_or_white()),
    }
}

fn is_emoji_only(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| (!c.is_ascii() && !c.is_alphanumeric()) || c == '\u{200d}' || c == '\u{fe0f}')
}

/// Restyle sidebars marked `data-allow-accent`, their images, and the
/// eligible accent elements with `accent`.
///
/// Returns whether anything was applied. Root CSS variables are left alone so
/// navigation hover styles keep following the theme.
pub fn apply_site_accent<S: AsRef<str>>(page: &mut Page, accent: &str, excluded_pages: &[S]) -> bool {
    let accent = accent.trim();
    if accent.is_empty() {
        return false;
    }
    let current = page.current_page();
    if excluded_pages.iter().any(|p| p.as_ref() == current) {
        debug!("SiteAccent: '{}' is excluded", current);
        return false;
    }

    let dark = Color::parse(accent)
        .map(|c| c.darken(DARKEN_AMOUNT).to_css_rgb())
        .unwrap_or_else(|| accent.to_string());

    let mut applied = false;
    if let Some(sidebar) = page
        .sidebar
        .as_mut()
        .filter(|s| s.has_attribute("data-allow-accent"))
    {
        sidebar.set_style("background", &format!("linear-gradient(180deg, {accent}, {dark})"));
        sidebar.set_style(
            "box-shadow",
            &format!("0 0 25px {accent}, inset 0 0 20px {dark}"),
        );
        for image in &mut page.sidebar_images {
            image.set_style("box-shadow", &format!("0 0 20px {accent}, 0 0 40px {dark}"));
            image.set_style("border-color", accent);
        }
        applied = true;
    }

    let mut recolored = 0;
    for node in page
        .accent_elements
        .iter_mut()
        .filter(|n| n.is_candidate() && !n.is_skipped())
    {
        if node.recolor(accent) {
            recolored += 1;
        }
    }
    debug!("SiteAccent: recolored {} element(s) on {}", recolored, current);

    applied || recolored > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accent_page(path: &str) -> Page {
        let mut page = Page::new(path);
        page.sidebar = Some(Element::new().with_attribute("data-allow-accent", ""));
        page
    }

    #[test]
    fn test_gradient_uses_darkened_accent() {
        let mut page = accent_page("/index.html");
        assert!(apply_site_accent(&mut page, "#ff1a1a", DEFAULT_EXCLUDED_PAGES));
        let sidebar = page.sidebar.as_ref().unwrap();
        assert_eq!(
            sidebar.style("background"),
            Some("linear-gradient(180deg, #ff1a1a, rgb(215, 0, 0))")
        );
        assert_eq!(
            sidebar.style("box-shadow"),
            Some("0 0 25px #ff1a1a, inset 0 0 20px rgb(215, 0, 0)")
        );
    }

    #[test]
    fn test_unparseable_accent_is_used_verbatim() {
        let mut page = accent_page("/index.html");
        assert!(apply_site_accent(&mut page, "hotpink", DEFAULT_EXCLUDED_PAGES));
        assert_eq!(
            page.sidebar.as_ref().unwrap().style("background"),
            Some("linear-gradient(180deg, hotpink, hotpink)")
        );
    }

    #[test]
    fn test_excluded_page_and_plain_sidebar() {
        let mut excluded = accent_page("/camoman.html");
        assert!(!apply_site_accent(&mut excluded, "#00ff9d", DEFAULT_EXCLUDED_PAGES));

        let mut plain = Page::new("/index.html");
        plain.sidebar = Some(Element::new());
        assert!(!apply_site_accent(&mut plain, "#00ff9d", DEFAULT_EXCLUDED_PAGES));

        let mut missing = Page::new("/index.html");
        assert!(!apply_site_accent(&mut missing, "#00ff9d", DEFAULT_EXCLUDED_PAGES));
    }

    #[test]
    fn test_sidebar_images_glow() {
        let mut page = accent_page("/index.html");
        page.sidebar_images = vec![Element::new(), Element::new()];
        apply_site_accent(&mut page, "#00ff9d", DEFAULT_EXCLUDED_PAGES);
        for image in &page.sidebar_images {
            assert_eq!(
                image.style("box-shadow"),
                Some("0 0 20px #00ff9d, 0 0 40px rgb(0, 215, 117)")
            );
            assert_eq!(image.style("border-color"), Some("#00ff9d"));
        }

        // Images of a sidebar without the marker stay untouched
        let mut plain = Page::new("/index.html");
        plain.sidebar = Some(Element::new());
        plain.sidebar_images = vec![Element::new()];
        apply_site_accent(&mut plain, "#00ff9d", DEFAULT_EXCLUDED_PAGES);
        assert_eq!(plain.sidebar_images[0].style("box-shadow"), None);
    }

    #[test]
    fn test_recolors_only_eligible_colors() {
        let mut page = Page::new("/index.html");
        page.accent_elements = vec![
            AccentElement::new("span")
                .inside_allow_container()
                .with_style("color", "rgb(0, 170, 255)")
                .with_style("background-color", "rgba(0, 0, 0, 0)")
                .with_style("border-top-color", "rgb(255, 255, 255)"),
            AccentElement::new("h2")
                .with_class("neon")
                .with_style("background-color", "#123456"),
            AccentElement::new("p").with_style("color", "#123456"),
        ];

        assert!(apply_site_accent(&mut page, "#ff1a1a", DEFAULT_EXCLUDED_PAGES));
        let [span, heading, plain] = page.accent_elements.as_slice() else {
            panic!("expected three elements");
        };
        assert_eq!(span.element.style("color"), Some("#ff1a1a"));
        assert_eq!(span.element.style("border-color"), None);
        assert_eq!(span.element.style("background-color"), Some("rgba(0, 0, 0, 0)"));
        assert_eq!(heading.element.style("background-color"), Some("#ff1a1a"));
        // Outside allow containers and without a highlight class
        assert_eq!(plain.element.style("color"), Some("#123456"));
    }

    #[test]
    fn test_skips_links_media_and_opted_out_elements() {
        let mut skip_container = AccentElement::new("div")
            .inside_allow_container()
            .with_style("color", "#123456");
        skip_container.in_skip_container = true;

        let mut page = Page::new("/index.html");
        page.accent_elements = vec![
            AccentElement::new("a")
                .with_class("nav-link")
                .with_class("highlight")
                .with_style("color", "#123456"),
            AccentElement::new("img")
                .inside_allow_container()
                .with_style("border-top-color", "#123456"),
            skip_container,
            AccentElement::new("span")
                .with_class("accent-highlight")
                .with_text("🔥🔥")
                .with_style("color", "#123456"),
            AccentElement::new("span")
                .inside_allow_container()
                .with_style("color", "transparent"),
        ];

        assert!(!apply_site_accent(&mut page, "#ff1a1a", DEFAULT_EXCLUDED_PAGES));
        assert!(page
            .accent_elements
            .iter()
            .all(|n| n.element.style("color") != Some("#ff1a1a")
                && n.element.style("border-color").is_none()));
    }

    #[test]
    fn test_neutral_colors() {
        for value in ["#000", "#FFFFFF", "rgb(0,0,0)", "rgb(255, 255, 255)", "white", "transparent", ""] {
            assert!(is_neutral(value), "{value}");
        }
        for value in ["#00aaff", "rgb(1, 0, 0)", "hotpink"] {
            assert!(!is_neutral(value), "{value}");
        }
    }
}
