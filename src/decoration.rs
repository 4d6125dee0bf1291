//! Decoration store: named visual theme bundles.
//!
//! A decoration owns three sub-collections under
//! `src/decoration/<name>/`:
//!
//! | Collection | Location            | Keyed by                  |
//! |------------|---------------------|---------------------------|
//! | templates  | `templates/`        | file name (`index.html`)  |
//! | renderers  | `markdown/`         | tag file name (`h1.html`) |
//! | components | `components/<comp>/`| component name            |
//!
//! Absence is data, not an error: a missing markdown directory yields an
//! empty map, a missing template reports `exists = false`, and a component
//! reports each of its three files independently.

use crate::log;
use crate::site::Site;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Lookup result for a named template.
#[derive(Debug, Clone)]
pub struct TemplateLookup {
    pub exists: bool,
    pub content: Option<String>,
}

/// A component: its template plus a markdown/HTML usage example pair.
///
/// `exists` reflects only the component directory; each file is resolved
/// independently, so one missing file does not fail the others.
#[derive(Debug, Clone)]
pub struct Component {
    pub exists: bool,
    pub template: Option<String>,
    pub example_md: Option<String>,
    pub example_html: Option<String>,
}

/// Read every `*.html` file of the decoration's markdown directory into a
/// `file name -> content` map. A missing directory yields an empty map.
pub fn markdown_renderers(site: &Site, decoration: &str) -> BTreeMap<String, String> {
    let dir = site.markdown_dir(decoration);

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(err) => {
            log!("decoration"; "no markdown renderers at {}: {err}", dir.display());
            return BTreeMap::new();
        }
    };

    let mut renderers = BTreeMap::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "html") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match fs::read_to_string(&path) {
            Ok(content) => {
                renderers.insert(name.to_string(), content);
            }
            Err(err) => log!("decoration"; "skipping renderer {}: {err}", path.display()),
        }
    }

    renderers
}

/// Look up a template by file name. Existence is tested before reading;
/// any failure leaves `content = None, exists = false`.
pub fn template(site: &Site, decoration: &str, name: &str) -> TemplateLookup {
    let path = site.templates_dir(decoration).join(name);

    if !path.is_file() {
        return TemplateLookup {
            exists: false,
            content: None,
        };
    }

    match fs::read_to_string(&path) {
        Ok(content) => TemplateLookup {
            exists: true,
            content: Some(content),
        },
        Err(err) => {
            log!("decoration"; "failed to read template {}: {err}", path.display());
            TemplateLookup {
                exists: false,
                content: None,
            }
        }
    }
}

/// Resolve a component's template and example pair.
pub fn component(site: &Site, decoration: &str, name: &str) -> Component {
    let dir = site.component_dir(decoration, name);

    Component {
        exists: dir.is_dir(),
        template: read_optional(&dir.join("template.html")),
        example_md: read_optional(&dir.join("example.md")),
        example_html: read_optional(&dir.join("example.html")),
    }
}

fn read_optional(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}
