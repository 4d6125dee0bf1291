//! Decoration operations: `get_markdown`, `get_template`, `get_component`.
//!
//! Each operation resolves the active decoration fresh from the settings
//! file, so a settings edit takes effect on the very next call.

use super::{OpResult, optional_str, required_str, to_value};
use crate::decoration;
use crate::site::Site;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Template looked up when no name is given.
const DEFAULT_TEMPLATE: &str = "index.html";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetMarkdownResult {
    decoration: String,
    markdown_dir: String,
    templates: BTreeMap<String, String>,
}

/// Map of the active decoration's per-tag markdown renderer fragments.
pub fn get_markdown(site: &Site, _args: &Value) -> OpResult {
    let decoration = site.active_decoration();
    let templates = decoration::markdown_renderers(site, &decoration);

    Ok(to_value(GetMarkdownResult {
        markdown_dir: site.markdown_dir(&decoration).display().to_string(),
        decoration,
        templates,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetTemplateResult {
    decoration: String,
    template_exists: bool,
    template: Option<String>,
}

/// Read a named template of the active decoration (default `index.html`).
pub fn get_template(site: &Site, args: &Value) -> OpResult {
    let name = optional_str(args, "template", DEFAULT_TEMPLATE);
    let decoration = site.active_decoration();
    let lookup = decoration::template(site, &decoration, name);

    Ok(to_value(GetTemplateResult {
        decoration,
        template_exists: lookup.exists,
        template: lookup.content,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetComponentResult {
    component: String,
    component_exists: bool,
    template: Option<String>,
    example_md: Option<String>,
    example_html: Option<String>,
}

/// Read a component's template and example pair; each file resolves
/// independently.
pub fn get_component(site: &Site, args: &Value) -> OpResult {
    let name = required_str(args, "component")?;
    let decoration = site.active_decoration();
    let component = decoration::component(site, &decoration, name);

    Ok(to_value(GetComponentResult {
        component: name.to_string(),
        component_exists: component.exists,
        template: component.template,
        example_md: component.example_md,
        example_html: component.example_html,
    }))
}

#[cfg(test)]
mod tests {
    use crate::ops::dispatch;
    use crate::site::Site;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> (TempDir, Site) {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path());
        (tmp, site)
    }

    fn select_decoration(site: &Site, name: &str) {
        fs::create_dir_all(site.root().join("src")).unwrap();
        fs::write(site.settings_file(), format!("decoration: {name}\n")).unwrap();
    }

    #[test]
    fn test_get_markdown_missing_dir_is_empty_map() {
        let (_tmp, site) = site();

        let result = dispatch(&site, "get_markdown", &json!({}));
        assert_eq!(result["decoration"], "light");
        assert_eq!(result["templates"], json!({}));
    }

    #[test]
    fn test_get_markdown_uses_active_decoration() {
        let (_tmp, site) = site();
        select_decoration(&site, "dark");
        let dir = site.markdown_dir("dark");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("h1.html"), "<h1>").unwrap();

        let result = dispatch(&site, "get_markdown", &json!({}));
        assert_eq!(result["decoration"], "dark");
        assert_eq!(result["templates"]["h1.html"], "<h1>");
    }

    #[test]
    fn test_get_template_default_name() {
        let (_tmp, site) = site();
        let dir = site.templates_dir("light");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.html"), "<html>").unwrap();

        let result = dispatch(&site, "get_template", &json!({}));
        assert_eq!(result["templateExists"], true);
        assert_eq!(result["template"], "<html>");
    }

    #[test]
    fn test_get_template_missing() {
        let (_tmp, site) = site();

        let result = dispatch(&site, "get_template", &json!({"template": "post.html"}));
        assert_eq!(result["templateExists"], false);
        assert_eq!(result["template"], json!(null));
    }

    #[test]
    fn test_get_component_requires_name() {
        let (_tmp, site) = site();

        let result = dispatch(&site, "get_component", &json!({}));
        assert_eq!(result["success"], false);
        assert!(result["error"].as_str().unwrap().contains("component"));
    }

    #[test]
    fn test_get_component_partial_files() {
        let (_tmp, site) = site();
        let dir = site.component_dir("light", "hero");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("template.html"), "<section>").unwrap();
        fs::write(dir.join("example.md"), "## hero").unwrap();

        let result = dispatch(&site, "get_component", &json!({"component": "hero"}));
        assert_eq!(result["componentExists"], true);
        assert_eq!(result["template"], "<section>");
        assert_eq!(result["exampleMd"], "## hero");
        assert_eq!(result["exampleHtml"], json!(null));
    }

    #[test]
    fn test_settings_edit_takes_effect_next_call() {
        let (_tmp, site) = site();

        let before = dispatch(&site, "get_template", &json!({}));
        assert_eq!(before["decoration"], "light");

        select_decoration(&site, "dark");
        let after = dispatch(&site, "get_template", &json!({}));
        assert_eq!(after["decoration"], "dark");
    }
}
