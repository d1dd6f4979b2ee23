use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "ai_dump.txt";

pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".venv",
    ".git",
    "__pycache__",
    "dist",
    "build",
    "static",
    ".svelte-kit",
];

pub const DEFAULT_IGNORED_EXTENSIONS: &[&str] = &[
    ".pyc", ".db", ".db-shm", ".db-wal", ".log",
    // images and media
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".mp4", ".mov", ".avi", ".pdf",
];

pub const DEFAULT_IGNORED_FILES: &[&str] = &[
    DEFAULT_OUTPUT,
    "create_dump.py",
    ".DS_Store",
    "README.md",
    ".gitignore",
    // lock files
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    // lint and format configs
    "eslint.config.js",
    ".eslintrc.js",
    ".eslintrc.json",
    ".prettierrc",
    ".prettierignore",
    ".npmrc",
    "tsconfig.json",
];

/// The resolved, read-only filter configuration for a single dump.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub output: PathBuf,
    pub ignored_dir_names: BTreeSet<String>,
    pub ignored_extensions: BTreeSet<String>,
    pub ignored_file_names: BTreeSet<String>,
    /// Glob patterns over forward-slash relative paths.
    pub exclude: Vec<String>,
    pub respect_gitignore: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            ignored_dir_names: to_set(DEFAULT_IGNORED_DIRS),
            ignored_extensions: to_set(DEFAULT_IGNORED_EXTENSIONS),
            ignored_file_names: to_set(DEFAULT_IGNORED_FILES),
            exclude: Vec::new(),
            respect_gitignore: false,
        }
    }
}

impl FilterConfig {
    /// A configuration with empty ignore-sets, writing to `output`.
    #[cfg(test)]
    pub fn empty(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            ignored_dir_names: BTreeSet::new(),
            ignored_extensions: BTreeSet::new(),
            ignored_file_names: BTreeSet::new(),
            exclude: Vec::new(),
            respect_gitignore: false,
        }
    }

    pub fn output_file_name(&self) -> Option<&str> {
        self.output.file_name().and_then(|n| n.to_str())
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dir_names.contains(name)
    }

    /// Exact-match file filter. The output's own basename is always skipped.
    pub fn is_ignored_file(&self, name: &str) -> bool {
        if self.ignored_file_names.contains(name) || self.output_file_name() == Some(name) {
            return true;
        }
        extension_of(name).is_some_and(|ext| self.ignored_extensions.contains(ext))
    }
}

/// Extension of a basename including its dot. Leading dots don't count, so
/// `.gitignore` has none and `a.tar.gz` yields `.gz`.
pub fn extension_of(name: &str) -> Option<&str> {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    name[stem_start..]
        .rfind('.')
        .map(|idx| &name[stem_start + idx..])
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A file discovered during the walk, before it is read.
#[derive(Debug)]
pub struct FileEntry {
    pub path: PathBuf,
    pub relative_path: String,
}

impl FileEntry {
    pub fn new(path: &Path, relative_path: String) -> Self {
        Self {
            path: path.to_path_buf(),
            relative_path,
        }
    }
}

/// A decoded file ready to be written. Lives only until its block is written.
#[derive(Debug)]
pub struct FileRecord {
    pub relative_path: String,
    pub content: String,
    pub dropped_bytes: usize,
}

/// Totals reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DumpSummary {
    pub files_written: usize,
    pub files_failed: usize,
    pub lossy_files: Vec<String>,
    pub dropped_bytes: usize,
}
