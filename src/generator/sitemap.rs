//! Sitemap generation.
//!
//! Derives a URL set from the pages of a dataset and writes a
//! `dist/sitemap.xml` for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/index.html</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! # URL join rule
//!
//! The base URL is always treated as a directory: a trailing `/` is
//! appended when missing, one leading `/` is stripped from the relative
//! URL, and the two are concatenated. `https://x.test/sub` +
//! `/about.html` gives `https://x.test/sub/about.html`.

use crate::content;
use crate::log;
use crate::site::Site;
use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Every entry carries the same fixed change frequency.
const CHANGE_FREQUENCY: &str = "weekly";

/// Sitemap data structure
pub struct Sitemap {
    /// List of URL entries
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Last modification date (YYYY-MM-DD)
    lastmod: String,
    /// `1.0` for the page resolving to `index.html`, `0.8` otherwise
    priority: &'static str,
}

impl Sitemap {
    /// Build a sitemap from the pages of a dataset.
    ///
    /// The relative URL of a page is its `alias` frontmatter attribute
    /// when present, else the file name with `.md` replaced by `.html`.
    /// Pages that cannot be read are skipped with a logged warning; the
    /// sitemap is still produced for the rest.
    pub fn build(site: &Site, dataset: &str, base_url: &str) -> Result<Self> {
        let listing = content::list_pages(site, dataset)?;
        let lastmod = Utc::now().format("%Y-%m-%d").to_string();

        let mut urls = Vec::with_capacity(listing.pages.len());
        for name in &listing.pages {
            let page = match content::read_page(site, dataset, name) {
                Ok(page) => page,
                Err(err) => {
                    log!("sitemap"; "skipping {name}: {err:#}");
                    continue;
                }
            };

            let relative = page
                .document
                .attributes
                .get("alias")
                .map_or_else(|| html_name(name), str::to_string);

            urls.push(UrlEntry {
                loc: join_url(base_url, &relative),
                lastmod: lastmod.clone(),
                priority: priority_for(&relative),
            });
        }

        Ok(Self { urls })
    }

    /// Absolute URLs of all entries, in page order.
    pub fn locations(&self) -> Vec<String> {
        self.urls.iter().map(|entry| entry.loc.clone()).collect()
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod));
            xml.push_str(&format!("    <changefreq>{CHANGE_FREQUENCY}</changefreq>\n"));
            xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write the sitemap to `dist/sitemap.xml`, creating `dist` if absent.
    pub fn write(self, site: &Site) -> Result<PathBuf> {
        let dist = site.dist_dir();
        fs::create_dir_all(&dist)
            .with_context(|| format!("failed to create output directory {}", dist.display()))?;

        let path = dist.join("sitemap.xml");
        let xml = self.into_xml();
        fs::write(&path, xml)
            .with_context(|| format!("failed to write sitemap to {}", path.display()))?;

        log!("sitemap"; "{}", path.display());
        Ok(path)
    }
}

/// `index.md` -> `index.html`
fn html_name(page_name: &str) -> String {
    match page_name.strip_suffix(".md") {
        Some(stem) => format!("{stem}.html"),
        None => page_name.to_string(),
    }
}

/// `1.0` exactly when the derived relative URL is `index.html`.
fn priority_for(relative: &str) -> &'static str {
    if relative == "index.html" { "1.0" } else { "0.8" }
}

/// Join a relative URL onto a base URL, treating the base as a directory.
pub fn join_url(base: &str, relative: &str) -> String {
    let relative = relative.strip_prefix('/').unwrap_or(relative);
    if base.ends_with('/') {
        format!("{base}{relative}")
    } else {
        format!("{base}/{relative}")
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::write_page;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> (TempDir, Site) {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path());
        (tmp, site)
    }

    #[test]
    fn test_join_url_without_trailing_slash() {
        assert_eq!(
            join_url("https://x.test/sub", "about.html"),
            "https://x.test/sub/about.html"
        );
    }

    #[test]
    fn test_join_url_with_trailing_slash() {
        assert_eq!(
            join_url("https://x.test/", "about.html"),
            "https://x.test/about.html"
        );
    }

    #[test]
    fn test_join_url_strips_leading_slash() {
        assert_eq!(
            join_url("https://x.test", "/about.html"),
            "https://x.test/about.html"
        );
    }

    #[test]
    fn test_html_name() {
        assert_eq!(html_name("index.md"), "index.html");
        assert_eq!(html_name("about.md"), "about.html");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
    }

    #[test]
    fn test_build_alias_and_priority() {
        let (_tmp, site) = site();
        write_page(&site, "default", "index.md", "Home", "# Welcome").unwrap();
        // alias override on the second page
        let dir = site.content_dir("default");
        fs::write(
            dir.join("company.md"),
            "---\ntitle: Company\nalias: /about.html\n---\n\nAbout us.",
        )
        .unwrap();

        let sitemap = Sitemap::build(&site, "default", "https://x.test").unwrap();
        assert_eq!(sitemap.locations().len(), 2);

        let xml = sitemap.into_xml();
        assert!(xml.contains("<loc>https://x.test/about.html</loc>"));
        assert!(xml.contains("<loc>https://x.test/index.html</loc>"));
        assert_eq!(xml.matches("<priority>1.0</priority>").count(), 1);
        assert_eq!(xml.matches("<priority>0.8</priority>").count(), 1);
        assert_eq!(xml.matches("<changefreq>weekly</changefreq>").count(), 2);
    }

    #[test]
    fn test_build_empty_dataset() {
        let (_tmp, site) = site();

        let sitemap = Sitemap::build(&site, "default", "https://x.test").unwrap();
        assert!(sitemap.locations().is_empty());

        let xml = sitemap.into_xml();
        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_lastmod_is_current_utc_date() {
        let (_tmp, site) = site();
        write_page(&site, "default", "index.md", "Home", "hi").unwrap();

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let xml = Sitemap::build(&site, "default", "https://x.test")
            .unwrap()
            .into_xml();
        assert!(xml.contains(&format!("<lastmod>{today}</lastmod>")));
    }

    #[test]
    fn test_write_creates_dist() {
        let (_tmp, site) = site();
        write_page(&site, "default", "index.md", "Home", "hi").unwrap();

        let sitemap = Sitemap::build(&site, "default", "https://x.test").unwrap();
        let path = sitemap.write(&site).unwrap();

        assert_eq!(path, site.dist_dir().join("sitemap.xml"));
        assert!(path.is_file());
    }
}
