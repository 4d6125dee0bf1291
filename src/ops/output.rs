//! Output operations: `save_html`, `copy_media`, `empty_dist`,
//! `xml_sitemap`.

use super::{OpResult, dataset_arg, error_chain, required_str, to_value};
use crate::generator::sitemap::Sitemap;
use crate::output;
use crate::site::Site;
use serde::Serialize;
use serde_json::{Value, json};

/// Write rendered HTML into `dist`, creating implied subdirectories.
pub fn save_html(site: &Site, args: &Value) -> OpResult {
    let file_name = required_str(args, "fileName")?;
    let content = required_str(args, "content")?;

    match output::save_html(site, file_name, content) {
        Ok(path) => Ok(json!({
            "success": true,
            "filePath": path.display().to_string(),
            "distDir": site.dist_dir().display().to_string(),
        })),
        Err(err) => Ok(json!({
            "success": false,
            "error": error_chain(&err),
            "filePath": site.dist_dir().join(file_name).display().to_string(),
        })),
    }
}

/// Mirror the media source into `dist/media`. A missing source is an
/// explicit failure; any nested error aborts the whole copy.
pub fn copy_media(site: &Site, _args: &Value) -> OpResult {
    match output::copy_media(site) {
        Ok((source, destination)) => Ok(json!({
            "success": true,
            "sourceDir": source.display().to_string(),
            "destinationDir": destination.display().to_string(),
        })),
        Err(err) => Ok(json!({
            "success": false,
            "error": error_chain(&err),
            "sourceDir": site.media_dir().display().to_string(),
            "destinationDir": site.media_dist_dir().display().to_string(),
        })),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmptyDistResult {
    success: bool,
    dist_dir: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

/// Empty the `dist` tree, creating it when absent. Per-subtree failures
/// are surfaced as warnings, not as a failed result.
pub fn empty_dist(site: &Site, _args: &Value) -> OpResult {
    match output::empty_dist(site) {
        Ok(outcome) => Ok(to_value(EmptyDistResult {
            success: true,
            dist_dir: outcome.dist.display().to_string(),
            warnings: outcome.warnings,
        })),
        Err(err) => Ok(json!({
            "success": false,
            "error": error_chain(&err),
            "distDir": site.dist_dir().display().to_string(),
        })),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct XmlSitemapResult {
    success: bool,
    sitemap_path: String,
    url_count: usize,
    urls: Vec<String>,
}

/// Build and write `dist/sitemap.xml` for a dataset.
pub fn xml_sitemap(site: &Site, args: &Value) -> OpResult {
    let base_url = required_str(args, "baseUrl")?;
    let dataset = dataset_arg(args);

    let sitemap = match Sitemap::build(site, dataset, base_url) {
        Ok(sitemap) => sitemap,
        Err(err) => {
            return Ok(json!({
                "success": false,
                "error": error_chain(&err),
                "dataSet": dataset,
            }));
        }
    };

    let urls = sitemap.locations();
    match sitemap.write(site) {
        Ok(path) => Ok(to_value(XmlSitemapResult {
            success: true,
            sitemap_path: path.display().to_string(),
            url_count: urls.len(),
            urls,
        })),
        Err(err) => Ok(json!({
            "success": false,
            "error": error_chain(&err),
            "dataSet": dataset,
        })),
    }
}
