//! Tool-style operation surface.
//!
//! Each operation takes a JSON argument bag and returns a JSON object
//! result; an external dispatcher (outside this crate) decides which
//! operation to invoke and wraps the result in its own envelope. The
//! operations share no in-memory state - every invocation re-reads the
//! workspace from disk, so they are individually idempotent and safe to
//! call out of order.
//!
//! # Operations
//!
//! | Operation      | Required args            | Optional args          |
//! |----------------|--------------------------|------------------------|
//! | `list_pages`   | -                        | `dataSet`              |
//! | `create_page`  | `fileName, title, copy`  | `dataSet`              |
//! | `get_page`     | `pageName`               | `dataSet`              |
//! | `get_markdown` | -                        | -                      |
//! | `get_template` | -                        | `template`             |
//! | `get_component`| `component`              | -                      |
//! | `save_html`    | `fileName, content`      | -                      |
//! | `copy_media`   | -                        | -                      |
//! | `empty_dist`   | -                        | -                      |
//! | `xml_sitemap`  | `baseUrl`                | `dataSet`              |
//! | `run_server`   | -                        | `port`                 |
//!
//! # Failure tiers
//!
//! Argument validation failures ([`OpError`]) are raised immediately and
//! rendered verbatim by [`dispatch`]. Environment failures are mostly
//! absorbed into safe defaults inside the operations; the exceptions
//! (`get_page` on an absent page, `copy_media` without a source,
//! `run_server` without `dist`) return `success: false` carrying the
//! underlying message as data.

mod content;
mod decoration;
mod output;
mod server;

use crate::site::{DEFAULT_DATASET, Site};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Argument-tier operation errors; never absorbed, never defaulted.
#[derive(Debug, Error)]
pub enum OpError {
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),

    #[error("missing required argument `{0}`")]
    MissingArgument(&'static str),
}

pub type OpResult = Result<Value, OpError>;

/// Route a named operation to its handler.
///
/// Argument-tier errors are rendered as `{success: false, error}` so the
/// caller always receives a JSON object.
pub fn dispatch(site: &Site, operation: &str, args: &Value) -> Value {
    let result = match operation {
        "list_pages" => content::list_pages(site, args),
        "create_page" => content::create_page(site, args),
        "get_page" => content::get_page(site, args),
        "get_markdown" => decoration::get_markdown(site, args),
        "get_template" => decoration::get_template(site, args),
        "get_component" => decoration::get_component(site, args),
        "save_html" => output::save_html(site, args),
        "copy_media" => output::copy_media(site, args),
        "empty_dist" => output::empty_dist(site, args),
        "xml_sitemap" => output::xml_sitemap(site, args),
        "run_server" => server::run_server(site, args),
        other => Err(OpError::UnknownOperation(other.to_string())),
    };

    match result {
        Ok(value) => value,
        Err(err) => json!({ "success": false, "error": err.to_string() }),
    }
}

/// Extract a required string argument.
///
/// An empty string counts as missing: the surface treats blank values the
/// same as absent ones rather than silently writing empty content.
fn required_str<'a>(args: &'a Value, key: &'static str) -> Result<&'a str, OpError> {
    match args.get(key).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(OpError::MissingArgument(key)),
    }
}

/// Extract an optional string argument with a default.
fn optional_str<'a>(args: &'a Value, key: &str, default: &'a str) -> &'a str {
    match args.get(key).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => value,
        _ => default,
    }
}

/// The `dataSet` argument, defaulting to `"default"`.
fn dataset_arg(args: &Value) -> &str {
    optional_str(args, "dataSet", DEFAULT_DATASET)
}

/// Serialize a typed result onto the wire.
fn to_value<T: Serialize>(result: T) -> Value {
    serde_json::to_value(result).expect("operation results serialize to JSON")
}

/// Render an error chain including the root cause.
fn error_chain(err: &anyhow::Error) -> String {
    format!("{err:#}")
}
