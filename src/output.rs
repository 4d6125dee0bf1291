//! Output tree management for `dist`.
//!
//! Three operations over the generated output tree: writing rendered HTML,
//! mirroring the media source, and emptying the tree. No manifest is kept;
//! the directory contents are the only source of truth.
//!
//! Deletion is permissive: a failure inside one subtree is recorded as a
//! warning and processing continues with its siblings. Copying is the
//! opposite: the first nested error aborts and surfaces.

use crate::log;
use crate::site::Site;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

/// Write a rendered HTML file into `dist`, creating `dist` and any
/// intermediate subdirectories implied by `file_name`. Overwrites.
pub fn save_html(site: &Site, file_name: &str, content: &str) -> Result<PathBuf> {
    let dist = site.dist_dir();
    let path = dist.join(file_name);

    let parent = path.parent().unwrap_or(&dist);
    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create output directory {}", parent.display()))?;

    fs::write(&path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(path)
}

/// Mirror the media source tree into `dist/media`.
///
/// The source directory must exist; a missing source is an explicit
/// failure. A failure on any nested entry aborts the whole copy.
pub fn copy_media(site: &Site) -> Result<(PathBuf, PathBuf)> {
    let source = site.media_dir();
    let destination = site.media_dist_dir();

    if !source.is_dir() {
        bail!("media source directory {} does not exist", source.display());
    }

    copy_dir_recursively(&source, &destination)?;
    Ok((source, destination))
}

/// Depth-first recursive mirror; files are copied byte-for-byte.
fn copy_dir_recursively(src: &Path, dst: &Path) -> Result<()> {
    if !dst.exists() {
        fs::create_dir_all(dst)
            .with_context(|| format!("failed to create destination directory {}", dst.display()))?;
    }

    for entry in fs::read_dir(src)
        .with_context(|| format!("failed to read source directory {}", src.display()))?
    {
        let entry = entry.context("invalid directory entry")?;
        let entry_path = entry.path();
        let dest_path = dst.join(entry.file_name());

        if entry_path.is_dir() {
            copy_dir_recursively(&entry_path, &dest_path)?;
        } else {
            fs::copy(&entry_path, &dest_path).with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    entry_path.display(),
                    dest_path.display()
                )
            })?;
            log!("media"; "{}", dest_path.display());
        }
    }

    Ok(())
}

/// Outcome of emptying `dist`.
#[derive(Debug, Clone)]
pub struct EmptyOutcome {
    pub dist: PathBuf,
    /// Per-subtree failures that were absorbed; empty on a clean run.
    pub warnings: Vec<String>,
}

/// Empty the `dist` tree.
///
/// A missing `dist` is created and reported as success (nothing to empty).
/// Otherwise every entry is deleted post-order; failures are collected as
/// warnings per subtree and siblings keep processing. The root directory
/// exists when this returns.
pub fn empty_dist(site: &Site) -> Result<EmptyOutcome> {
    let dist = site.dist_dir();
    let mut warnings = Vec::new();

    if dist.is_dir() {
        match fs::read_dir(&dist) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    remove_entry(&entry.path(), &mut warnings);
                }
            }
            Err(err) => warnings.push(format!("failed to list {}: {err}", dist.display())),
        }
    }

    fs::create_dir_all(&dist)
        .with_context(|| format!("failed to create output directory {}", dist.display()))?;

    for warning in &warnings {
        log!("output"; "{warning}");
    }

    Ok(EmptyOutcome { dist, warnings })
}

/// Post-order removal: recurse into a directory, then remove it once empty.
/// Failures are absorbed into `warnings`, never propagated.
fn remove_entry(path: &Path, warnings: &mut Vec<String>) {
    if path.is_dir() {
        match fs::read_dir(path) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    remove_entry(&entry.path(), warnings);
                }
                if let Err(err) = fs::remove_dir(path) {
                    warnings.push(format!("failed to remove directory {}: {err}", path.display()));
                }
            }
            Err(err) => warnings.push(format!("failed to list {}: {err}", path.display())),
        }
    } else if let Err(err) = fs::remove_file(path) {
        // The entry may have vanished between listing and removal
        warnings.push(format!("failed to remove {}: {err}", path.display()));
    }
}
