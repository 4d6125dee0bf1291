//! Workspace layout and settings resolution.
//!
//! All engine state lives on disk under a single workspace root:
//!
//! ```text
//! <root>/
//! ├── src/
//! │   ├── settings.yml            decoration: <name>
//! │   ├── content/<dataset>/      markdown pages
//! │   ├── decoration/<name>/
//! │   │   ├── templates/          page templates
//! │   │   ├── markdown/           per-tag renderer fragments
//! │   │   └── components/<comp>/  template.html, example.md, example.html
//! │   └── media/                  static media tree
//! └── dist/                       generated output tree
//! ```
//!
//! [`Site`] derives canonical paths from that layout. No method here checks
//! existence; callers decide how absence is handled.

use std::fs;
use std::path::{Path, PathBuf};

/// Decoration used when `settings.yml` is missing, unreadable, or silent.
pub const DEFAULT_DECORATION: &str = "light";

/// Dataset used when an operation does not name one.
pub const DEFAULT_DATASET: &str = "default";

/// Settings key selecting the active decoration.
const DECORATION_KEY: &str = "decoration:";

/// Handle on a workspace root; all paths and settings derive from it.
#[derive(Debug, Clone)]
pub struct Site {
    root: PathBuf,
}

impl Site {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/src/settings.yml`
    pub fn settings_file(&self) -> PathBuf {
        self.root.join("src").join("settings.yml")
    }

    /// `<root>/src/content/<dataset>`
    pub fn content_dir(&self, dataset: &str) -> PathBuf {
        self.root.join("src").join("content").join(dataset)
    }

    /// `<root>/src/decoration/<name>`
    pub fn decoration_dir(&self, decoration: &str) -> PathBuf {
        self.root.join("src").join("decoration").join(decoration)
    }

    /// `<root>/src/decoration/<name>/templates`
    pub fn templates_dir(&self, decoration: &str) -> PathBuf {
        self.decoration_dir(decoration).join("templates")
    }

    /// `<root>/src/decoration/<name>/markdown`
    pub fn markdown_dir(&self, decoration: &str) -> PathBuf {
        self.decoration_dir(decoration).join("markdown")
    }

    /// `<root>/src/decoration/<name>/components/<component>`
    pub fn component_dir(&self, decoration: &str, component: &str) -> PathBuf {
        self.decoration_dir(decoration)
            .join("components")
            .join(component)
    }

    /// `<root>/src/media`
    pub fn media_dir(&self) -> PathBuf {
        self.root.join("src").join("media")
    }

    /// `<root>/dist`
    pub fn dist_dir(&self) -> PathBuf {
        self.root.join("dist")
    }

    /// `<root>/dist/media`
    pub fn media_dist_dir(&self) -> PathBuf {
        self.dist_dir().join("media")
    }

    /// Resolve the active decoration from `settings.yml`.
    ///
    /// The file is scanned as plain text, not parsed as YAML: the first
    /// line starting with `decoration:` wins, and the value is the segment
    /// between the first and second colon, trimmed. Any read failure, a
    /// missing key, or an empty value falls back to [`DEFAULT_DECORATION`].
    ///
    /// Read fresh on every call; settings edits take effect on the next
    /// operation.
    pub fn active_decoration(&self) -> String {
        let Ok(settings) = fs::read_to_string(self.settings_file()) else {
            return DEFAULT_DECORATION.to_string();
        };

        settings
            .lines()
            .find(|line| line.starts_with(DECORATION_KEY))
            .and_then(|line| line.split(':').nth(1))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map_or_else(|| DEFAULT_DECORATION.to_string(), str::to_string)
    }
}
