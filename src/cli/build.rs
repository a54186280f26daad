//! `prerender build`: finalize, render and validate in order.
//!
//! Each stage reads what the previous one wrote, so the first failure stops
//! the run. One summary line is printed as each stage completes.

use anyhow::{Context, Result};

use super::{finalize, render, validate};
use crate::config::SiteConfig;
use crate::log;
use crate::utils::plural_count;

pub fn run(config: &SiteConfig) -> Result<()> {
    let finalized = finalize::run(config).context("finalize stage failed")?;
    log!(
        "build"; "finalize: {} and {} -> {}",
        plural_count(finalized.stylesheets, "stylesheet"),
        plural_count(finalized.scripts, "script"),
        config.root_relative(&finalized.output).display()
    );

    let rendered = render::run(config).context("render stage failed")?;
    log!("build"; "render: {} written", plural_count(rendered.succeeded(), "page"));

    let report = validate::run(config).context("validate stage failed")?;
    log!("build"; "validate: {}", report);

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const CONFIG: &str = r#"[site]
url = "https://example.com"
name = "Schoon"

[[routes]]
path = "/"
title = "Schoon | Schoonmaakbedrijf"
description = "Terras & Tuin \"Pro\""

[[routes]]
path = "/over-ons"
title = "Over ons | Schoon"
description = "Ons team <3"
name = "Over ons"
"#;

    const TEMPLATE: &str = r#"<!doctype html>
<html lang="nl">
  <head>
    <meta charset="UTF-8" />
    <title>Schoon</title>
    <meta name="title" content="Schoon" />
    <meta name="description"
          content="Schoonmaak" />
    <link rel="canonical" href="https://example.com/" />
    <meta property="og:url" content="https://example.com/" />
    <meta property="og:title" content="Schoon" />
    <meta property="og:description" content="Schoonmaak" />
    <meta property="og:type" content="website" />
    <meta name="twitter:url" content="https://example.com/" />
    <meta name="twitter:title" content="Schoon" />
    <meta name="twitter:description" content="Schoonmaak" />
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.tsx"></script>
  </body>
</html>
"#;

    const BUILT: &str = r#"<!doctype html>
<html><head>
<script type="module" crossorigin src="/assets/a.js"></script>
<script type="module" crossorigin src="/assets/vendor.js"></script>
<link rel="stylesheet" crossorigin href="/assets/b.css">
</head><body><div id="root"></div></body></html>"#;

    const SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc></url>
  <url><loc>https://example.com/over-ons/</loc></url>
</urlset>"#;

    const BUNDLE: &str = r#"{"routes":{"/":"<h1>Welkom</h1>","/over-ons":"<h1>Over ons</h1>"}}"#;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project() -> (TempDir, SiteConfig) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "template.html", TEMPLATE);
        write(root, "dist/index.html", BUILT);
        write(root, "public/sitemap.xml", SITEMAP);
        write(root, "dist/server/entry-server.json", BUNDLE);

        let mut config = SiteConfig::from_str(CONFIG).unwrap();
        config.root = root.to_path_buf();
        config.paths.normalize(root);
        (tmp, config)
    }

    fn read(root: &Path, rel: &str) -> String {
        fs::read_to_string(root.join(rel)).unwrap()
    }

    #[test]
    fn test_build_end_to_end() {
        let (tmp, config) = project();
        run(&config).unwrap();
        let root = tmp.path();

        let template = read(root, "dist/.prerender/template.html");
        let link = template.find("/assets/b.css").unwrap();
        let script = template.find("/assets/a.js").unwrap();
        assert!(link < script);
        assert!(!template.contains("/src/main.tsx"));

        let home = read(root, "dist/index.html");
        assert!(home.contains("<title>Schoon | Schoonmaakbedrijf</title>"));
        assert!(home.contains(r#"content="Terras &amp; Tuin &quot;Pro&quot;""#));
        assert!(home.contains(r#""@type":"BreadcrumbList""#));
        assert!(home.contains(r#"data-server-rendered="true"><header"#));
        assert!(home.contains("<main><h1>Welkom</h1></main>"));

        let about = read(root, "dist/over-ons/index.html");
        assert!(about.contains(r#"<link rel="canonical" href="https://example.com/over-ons" />"#));
        assert!(about.contains(r#"content="Ons team &lt;3""#));
        assert!(about.contains(r#""name":"Over ons","item":"https://example.com/over-ons""#));

        let log = read(root, "prerender.log");
        assert!(log.contains("[finalize] wrote"));
    }

    #[test]
    fn test_build_is_idempotent() {
        let (tmp, config) = project();
        run(&config).unwrap();
        let first = read(tmp.path(), "dist/over-ons/index.html");
        let first_home = read(tmp.path(), "dist/index.html");

        run(&config).unwrap();
        assert_eq!(read(tmp.path(), "dist/over-ons/index.html"), first);
        assert_eq!(read(tmp.path(), "dist/index.html"), first_home);
    }

    #[test]
    fn test_unknown_route_uses_home_meta_and_own_canonical() {
        let (tmp, config) = project();
        let root = tmp.path();
        write(
            root,
            "public/sitemap.xml",
            "<urlset><url><loc>https://example.com/</loc></url>\
             <url><loc>https://example.com/vacatures</loc></url></urlset>",
        );
        write(
            root,
            "dist/server/entry-server.json",
            r#"{"routes":{},"fallback":"<h1>Pagina</h1>"}"#,
        );
        run(&config).unwrap();

        let page = read(root, "dist/vacatures/index.html");
        assert!(page.contains(r#"content="Terras &amp; Tuin &quot;Pro&quot;""#));
        assert!(page.contains(r#"href="https://example.com/vacatures""#));
        assert!(page.contains(r#""name":"Vacatures""#));
    }

    #[test]
    fn test_render_failure_stops_before_validate() {
        let (tmp, config) = project();
        let root = tmp.path();
        write(
            root,
            "public/sitemap.xml",
            "<urlset><url><loc>https://example.com/</loc></url>\
             <url><loc>https://example.com/contact</loc></url></urlset>",
        );

        let err = run(&config).unwrap_err();
        assert_eq!(err.to_string(), "render stage failed");
        assert!(err.root_cause().to_string().contains("1 route failed"));
        // the other route still rendered
        assert!(root.join("dist/index.html").is_file());
        assert!(!root.join("dist/contact/index.html").exists());
    }

    #[test]
    fn test_bad_sitemap_entry_does_not_stop_build() {
        let (tmp, config) = project();
        let root = tmp.path();
        write(
            root,
            "public/sitemap.xml",
            "<urlset><url><loc>https://example.com/</loc></url>\
             <url><loc>https://example.com/winkel?a=1&b=2</loc></url>\
             <url><loc>https://example.com/over-ons</loc></url></urlset>",
        );

        run(&config).unwrap();
        assert!(root.join("dist/index.html").is_file());
        assert!(root.join("dist/over-ons/index.html").is_file());
        assert!(!root.join("dist/winkel").exists());
    }

    #[test]
    fn test_missing_sitemap_aborts_render() {
        let (tmp, config) = project();
        fs::remove_file(tmp.path().join("public/sitemap.xml")).unwrap();

        let err = run(&config).unwrap_err();
        assert!(format!("{err:#}").contains("no sitemap found"));
    }

    #[test]
    fn test_missing_built_html_aborts_finalize() {
        let (tmp, config) = project();
        fs::remove_file(tmp.path().join("dist/index.html")).unwrap();

        let err = run(&config).unwrap_err();
        assert_eq!(err.to_string(), "finalize stage failed");
        assert!(!tmp.path().join("dist/.prerender/template.html").exists());
    }

    #[test]
    fn test_missing_page_fails_validation() {
        let (tmp, config) = project();
        run(&config).unwrap();
        fs::remove_file(tmp.path().join("dist/over-ons/index.html")).unwrap();

        let err = validate::run(&config).unwrap_err();
        assert!(err.to_string().contains("1 route failed readiness checks"));
    }
}
