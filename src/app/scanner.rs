use crate::app::models::{FileEntry, FilterConfig};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, Walk, WalkBuilder};
use pathdiff::diff_paths;
use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};

/// Walks a root directory and yields the files that survive the filters.
pub struct Scanner<'a> {
    root: PathBuf,
    config: &'a FilterConfig,
    exclude_set: GlobSet,
}

impl<'a> Scanner<'a> {
    pub fn new(root: PathBuf, config: &'a FilterConfig) -> Result<Self> {
        Ok(Self {
            root,
            config,
            exclude_set: build_globset(&config.exclude)?,
        })
    }

    /// Files in dump order: each directory's files sorted by name, then its
    /// subdirectories sorted by name, depth-first.
    pub fn files(&self) -> impl Iterator<Item = FileEntry> + '_ {
        self.walker().filter_map(move |result| match result {
            Ok(entry) => self.process_entry(&entry),
            Err(err) => {
                log::warn!("Error walking entry: {}", err);
                None
            }
        })
    }

    fn walker(&self) -> Walk {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_path(files_before_dirs);

        if self.config.respect_gitignore {
            builder
                .ignore(true)
                .git_ignore(true)
                .git_exclude(true)
                .parents(true)
                .require_git(false);
        }

        // Pruning happens here so ignored subtrees are never entered.
        let config = self.config.clone();
        let exclude_set = self.exclude_set.clone();
        let root = self.root.clone();
        builder.filter_entry(move |entry| {
            if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
                return true;
            }
            if config.is_ignored_dir(&entry.file_name().to_string_lossy()) {
                return false;
            }
            !diff_paths(entry.path(), &root).is_some_and(|rel| exclude_set.is_match(rel))
        });

        builder.build()
    }

    fn process_entry(&self, entry: &DirEntry) -> Option<FileEntry> {
        if entry.depth() == 0 || entry.file_type().is_some_and(|t| t.is_dir()) {
            return None;
        }

        // Directory symlinks are listed by the walker but never followed.
        if entry.path_is_symlink() && entry.path().is_dir() {
            return None;
        }

        let name = entry.file_name().to_string_lossy();
        if self.config.is_ignored_file(&name) {
            return None;
        }

        let relative = diff_paths(entry.path(), &self.root)?;
        if self.exclude_set.is_match(&relative) {
            return None;
        }

        Some(FileEntry::new(entry.path(), display_path(&relative)))
    }
}

/// Root-anchored path with `/` separators (`./src/main.rs`), for headers and
/// logs only.
pub fn display_path(relative: &Path) -> String {
    let mut display = String::from(".");
    for part in relative.components().filter_map(|c| match c {
        Component::Normal(part) => Some(part.to_string_lossy()),
        _ => None,
    }) {
        display.push('/');
        display.push_str(&part);
    }
    display
}

fn files_before_dirs(a: &Path, b: &Path) -> Ordering {
    a.is_dir()
        .cmp(&b.is_dir())
        .then_with(|| a.file_name().cmp(&b.file_name()))
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).context(format!("Invalid glob pattern: {}", pat))?);
    }
    Ok(builder.build()?)
}
