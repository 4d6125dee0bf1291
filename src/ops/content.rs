//! Content operations: `list_pages`, `create_page`, `get_page`.

use super::{OpResult, dataset_arg, error_chain, required_str, to_value};
use crate::content;
use crate::log;
use crate::site::Site;
use serde::Serialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListPagesResult {
    pages: Vec<String>,
    directory: String,
    directory_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    directory_created: Option<bool>,
    data_set: String,
}

/// List the `.md` pages of a dataset, creating the dataset on demand.
///
/// A creation/listing failure is absorbed: the result reports an empty
/// page set with `directoryExists: false` instead of failing.
pub fn list_pages(site: &Site, args: &Value) -> OpResult {
    let dataset = dataset_arg(args);

    match content::list_pages(site, dataset) {
        Ok(listing) => Ok(to_value(ListPagesResult {
            pages: listing.pages,
            directory: listing.directory.display().to_string(),
            directory_exists: true,
            directory_created: listing.created.then_some(true),
            data_set: dataset.to_string(),
        })),
        Err(err) => {
            log!("content"; "list_pages: {}", error_chain(&err));
            Ok(to_value(ListPagesResult {
                pages: Vec::new(),
                directory: site.content_dir(dataset).display().to_string(),
                directory_exists: false,
                directory_created: None,
                data_set: dataset.to_string(),
            }))
        }
    }
}

/// Create or overwrite a page from `fileName`, `title`, and `copy`.
pub fn create_page(site: &Site, args: &Value) -> OpResult {
    let file_name = required_str(args, "fileName")?;
    let title = required_str(args, "title")?;
    let copy = required_str(args, "copy")?;
    let dataset = dataset_arg(args);

    match content::write_page(site, dataset, file_name, title, copy) {
        Ok(path) => Ok(json!({
            "success": true,
            "filePath": path.display().to_string(),
            "directory": site.content_dir(dataset).display().to_string(),
            "dataSet": dataset,
        })),
        Err(err) => Ok(json!({
            "success": false,
            "error": error_chain(&err),
            "dataSet": dataset,
        })),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetPageResult {
    success: bool,
    data_set: String,
    page_name: String,
    file_path: String,
    attributes: Map<String, Value>,
    content: String,
    raw_content: String,
}

/// Read and parse a single page. An absent page is an explicit failure
/// carrying the underlying I/O message.
pub fn get_page(site: &Site, args: &Value) -> OpResult {
    let page_name = required_str(args, "pageName")?;
    let dataset = dataset_arg(args);

    match content::read_page(site, dataset, page_name) {
        Ok(page) => Ok(to_value(GetPageResult {
            success: true,
            data_set: dataset.to_string(),
            page_name: page_name.to_string(),
            file_path: page.path.display().to_string(),
            attributes: page.document.attributes.to_json(),
            content: page.document.body,
            raw_content: page.document.raw,
        })),
        Err(err) => Ok(json!({
            "success": false,
            "error": error_chain(&err),
            "dataSet": dataset,
            "pageName": page_name,
        })),
    }
}
