//! Workspace initialization.
//!
//! Scaffolds the fixed workspace layout with a starter dataset, a `light`
//! decoration skeleton, and a settings file.

use crate::frontmatter;
use crate::log;
use crate::site::Site;
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Default workspace directory structure
const WORKSPACE_DIRS: &[&str] = &[
    "src/content/default",
    "src/decoration/light/templates",
    "src/decoration/light/markdown",
    "src/decoration/light/components",
    "src/media",
    "dist",
];

const STARTER_SETTINGS: &str = "decoration: light\n";

const STARTER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{title}}</title>
</head>
<body>
{{content}}
</body>
</html>
"#;

/// Create a new workspace with the default structure.
pub fn new_workspace(root: &Path, has_name: bool) -> Result<()> {
    // Safety check: if no name was provided (init in current dir),
    // the directory must be completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `maquette init <NAME>` to create in a subdirectory."
        );
    }

    init_workspace_structure(root)?;
    init_starter_files(root)?;

    log!("init"; "workspace created at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Create the workspace directory structure
fn init_workspace_structure(root: &Path) -> Result<()> {
    for dir in WORKSPACE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `maquette init <NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Write the settings file, a starter page, and a starter template
fn init_starter_files(root: &Path) -> Result<()> {
    let site = Site::new(root);

    fs::write(site.settings_file(), STARTER_SETTINGS)
        .context("Failed to write settings.yml")?;

    fs::write(
        site.content_dir("default").join("index.md"),
        frontmatter::serialize("Home", "# Welcome\n\nThis page was created by `maquette init`."),
    )
    .context("Failed to write starter page")?;

    fs::write(
        site.templates_dir("light").join("index.html"),
        STARTER_TEMPLATE,
    )
    .context("Failed to write starter template")?;

    Ok(())
}
