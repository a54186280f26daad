//! Asset tag extraction from bundler output.
//!
//! The bundler rewrites `index.html` with hashed `<link>` and `<script>` tags
//! pointing below the assets prefix. Only those tags are carried over; inline
//! scripts and third-party tags stay behind.

use regex::Regex;
use std::sync::LazyLock;

/// `<link ...>` (void element, optionally self-closed). Quoted values may contain `>`.
static RE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<link\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).unwrap()
});

/// `<script ...></script>` with nothing but whitespace inside.
static RE_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script\b(?:[^>"']|"[^"]*"|'[^']*')*>\s*</script\s*>"#).unwrap()
});

static RE_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)\bhref\s*=\s*["']([^"']*)["']"#).unwrap());

static RE_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)\bsrc\s*=\s*["']([^"']*)["']"#).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Stylesheet,
    Script,
}

/// One tag lifted verbatim from the built HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTag {
    pub kind: AssetKind,
    pub html: String,
}

/// Extract asset tags, all `<link>` tags first, then all `<script>` tags.
///
/// Document order is kept within each group.
pub fn extract_asset_tags(html: &str, prefix: &str) -> Vec<AssetTag> {
    let targets_assets = |re: &Regex, tag: &str| {
        re.captures(tag)
            .and_then(|caps| caps.get(1))
            .is_some_and(|m| m.as_str().starts_with(prefix))
    };

    let links = RE_LINK
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|tag| targets_assets(&RE_HREF, tag))
        .map(|tag| AssetTag {
            kind: AssetKind::Stylesheet,
            html: tag.to_string(),
        });

    let scripts = RE_SCRIPT
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|tag| targets_assets(&RE_SRC, tag))
        .map(|tag| AssetTag {
            kind: AssetKind::Script,
            html: tag.to_string(),
        });

    links.chain(scripts).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILT: &str = r#"<!doctype html>
<html lang="nl">
  <head>
    <meta charset="UTF-8" />
    <script type="module" crossorigin src="/assets/a.js"></script>
    <link rel="icon" href="/favicon.svg" />
    <script type="module" crossorigin src="/assets/vendor.js"></script>
    <link rel="stylesheet" crossorigin href="/assets/b.css">
    <script src="https://plausible.io/js/script.js"></script>
  </head>
  <body><div id="root"></div></body>
</html>"#;

    #[test]
    fn test_links_before_scripts_in_document_order() {
        let tags = extract_asset_tags(BUILT, "/assets/");
        let html: Vec<_> = tags.iter().map(|t| t.html.as_str()).collect();
        assert_eq!(
            html,
            [
                r#"<link rel="stylesheet" crossorigin href="/assets/b.css">"#,
                r#"<script type="module" crossorigin src="/assets/a.js"></script>"#,
                r#"<script type="module" crossorigin src="/assets/vendor.js"></script>"#,
            ]
        );
        assert_eq!(tags[0].kind, AssetKind::Stylesheet);
        assert_eq!(tags[2].kind, AssetKind::Script);
    }

    #[test]
    fn test_non_asset_tags_ignored() {
        let tags = extract_asset_tags(BUILT, "/static/");
        assert!(tags.is_empty());
    }

    #[test]
    fn test_multiline_tag() {
        let html = "<script\n  type=\"module\"\n  src='/assets/x.js'>\n</script>";
        let tags = extract_asset_tags(html, "/assets/");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].html, html);
    }

    #[test]
    fn test_quoted_gt_stays_inside_tag() {
        let html = r#"<link rel="stylesheet" media="(width > 600px)" href="/assets/wide.css">
<script type="module" data-when='a>b' src="/assets/app.js"></script>"#;
        let tags = extract_asset_tags(html, "/assets/");
        assert_eq!(tags.len(), 2);
        assert!(tags[0].html.ends_with(r#"href="/assets/wide.css">"#));
        assert!(tags[1].html.starts_with(r#"<script type="module" data-when='a>b'"#));
    }
}
