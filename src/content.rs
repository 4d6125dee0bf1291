//! Content store: markdown pages grouped into named datasets.
//!
//! A dataset is a directory under `src/content/`; it is created lazily on
//! the first list or write, so a missing dataset is never an error here.
//! Every call re-reads from disk - the filesystem is the only state.

use crate::frontmatter::{self, Document};
use crate::log;
use crate::site::Site;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Result of listing a dataset.
#[derive(Debug, Clone)]
pub struct PageListing {
    /// Page file names ending in `.md`, sorted for deterministic output.
    pub pages: Vec<String>,
    pub directory: PathBuf,
    /// True when the dataset directory was created by this call.
    pub created: bool,
}

/// List the pages of a dataset, creating its directory if absent.
pub fn list_pages(site: &Site, dataset: &str) -> Result<PageListing> {
    let directory = site.content_dir(dataset);

    let created = !directory.is_dir();
    if created {
        fs::create_dir_all(&directory).with_context(|| {
            format!("failed to create dataset directory {}", directory.display())
        })?;
        log!("content"; "created dataset directory {}", directory.display());
    }

    let entries = fs::read_dir(&directory)
        .with_context(|| format!("failed to list dataset directory {}", directory.display()))?;

    let mut pages: Vec<String> = entries
        .flatten()
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".md"))
        .collect();
    pages.sort();

    Ok(PageListing {
        pages,
        directory,
        created,
    })
}

/// Write a page built from a title and body, overwriting any existing file.
///
/// This is an upsert: no existence check is made. The dataset directory is
/// created on demand.
pub fn write_page(
    site: &Site,
    dataset: &str,
    file_name: &str,
    title: &str,
    body: &str,
) -> Result<PathBuf> {
    let directory = site.content_dir(dataset);
    fs::create_dir_all(&directory).with_context(|| {
        format!("failed to create dataset directory {}", directory.display())
    })?;

    let path = directory.join(file_name);
    fs::write(&path, frontmatter::serialize(title, body))
        .with_context(|| format!("failed to write page {}", path.display()))?;

    Ok(path)
}

/// A page read from disk, parsed through the frontmatter codec.
#[derive(Debug, Clone)]
pub struct PageFile {
    pub path: PathBuf,
    pub document: Document,
}

/// Read and parse a single page. An absent or unreadable file is an error
/// carrying the underlying I/O message.
pub fn read_page(site: &Site, dataset: &str, page_name: &str) -> Result<PageFile> {
    let path = site.content_dir(dataset).join(page_name);
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read page {}", path.display()))?;

    Ok(PageFile {
        path,
        document: frontmatter::parse(&raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site() -> (TempDir, Site) {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path());
        (tmp, site)
    }

    #[test]
    fn test_list_pages_creates_missing_dataset() {
        let (_tmp, site) = site();

        let listing = list_pages(&site, "default").unwrap();
        assert!(listing.pages.is_empty());
        assert!(listing.created);
        assert!(listing.directory.is_dir());
    }

    #[test]
    fn test_list_pages_existing_empty_dataset() {
        let (_tmp, site) = site();
        fs::create_dir_all(site.content_dir("default")).unwrap();

        let listing = list_pages(&site, "default").unwrap();
        assert!(listing.pages.is_empty());
        assert!(!listing.created);
    }

    #[test]
    fn test_list_pages_filters_and_sorts() {
        let (_tmp, site) = site();
        let dir = site.content_dir("default");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("b.md"), "b").unwrap();
        fs::write(dir.join("a.md"), "a").unwrap();
        fs::write(dir.join("notes.txt"), "skip").unwrap();

        let listing = list_pages(&site, "default").unwrap();
        assert_eq!(listing.pages, ["a.md", "b.md"]);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let (_tmp, site) = site();

        let path = write_page(&site, "default", "index.md", "Home", "# Welcome").unwrap();
        assert!(path.is_file());

        let page = read_page(&site, "default", "index.md").unwrap();
        assert_eq!(page.document.attributes.get("title"), Some("Home"));
        assert_eq!(page.document.body, "# Welcome");
    }

    #[test]
    fn test_write_page_overwrites() {
        let (_tmp, site) = site();
        write_page(&site, "default", "index.md", "Old", "old").unwrap();
        write_page(&site, "default", "index.md", "New", "new").unwrap();

        let page = read_page(&site, "default", "index.md").unwrap();
        assert_eq!(page.document.attributes.get("title"), Some("New"));
        assert_eq!(page.document.body, "new");
    }

    #[test]
    fn test_read_missing_page_is_error() {
        let (_tmp, site) = site();
        fs::create_dir_all(site.content_dir("default")).unwrap();

        let err = read_page(&site, "default", "absent.md").unwrap_err();
        assert!(format!("{err:#}").contains("absent.md"));
    }
}
