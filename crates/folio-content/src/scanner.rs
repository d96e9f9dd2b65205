//! Source file discovery by filesystem walking.
//!
//! The scanner only finds files; nothing is read at this stage. Reading and
//! parsing happen later, one document at a time, in [`crate::Scan`].

use std::fs;
use std::path::{Path, PathBuf};

/// Reference to a markdown source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Path relative to the content root, `/`-separated (e.g., "guide/setup.md").
    pub rel_path: String,
    /// Absolute path of the file.
    pub abs_path: PathBuf,
}

/// Reference to a `_category_.yml` sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    /// Directory the sidecar describes, relative to the content root
    /// (empty for the root itself).
    pub dir: String,
    /// Absolute path of the sidecar.
    pub abs_path: PathBuf,
}

/// Result of walking one content root.
#[derive(Debug, Default)]
pub(crate) struct ScanResult {
    pub documents: Vec<DocumentRef>,
    pub categories: Vec<CategoryRef>,
}

const CATEGORY_FILENAMES: [&str; 2] = ["_category_.yml", "_category_.yaml"];

/// Walks a content root collecting markdown files and category sidecars.
pub(crate) struct Scanner {
    root: PathBuf,
}

impl Scanner {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Walk the root. Results are sorted by relative path.
    pub fn scan(&self) -> ScanResult {
        let mut result = ScanResult::default();
        self.scan_directory(&self.root, "", &mut result);
        result.documents.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        result.categories.sort_by(|a, b| a.dir.cmp(&b.dir));
        result
    }

    fn scan_directory(&self, dir_path: &Path, prefix: &str, result: &mut ScanResult) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            tracing::warn!(path = %dir_path.display(), "Failed to read content directory");
            return;
        };

        let mut category: Option<PathBuf> = None;
        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            let rel = join_rel(prefix, &name);

            if is_dir {
                if !name.starts_with('_') {
                    self.scan_directory(&path, &rel, result);
                }
            } else if CATEGORY_FILENAMES.contains(&name.as_str()) {
                // Prefer .yml when both exist.
                if category.is_none() || name.ends_with(".yml") {
                    category = Some(path);
                }
            } else if !name.starts_with('_') && is_markdown(&path) {
                result.documents.push(DocumentRef {
                    rel_path: rel,
                    abs_path: path,
                });
            }
        }

        if let Some(abs_path) = category {
            result.categories.push(CategoryRef {
                dir: prefix.to_owned(),
                abs_path,
            });
        }
    }
}

fn join_rel(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("mdx"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rel_paths(result: &ScanResult) -> Vec<&str> {
        result.documents.iter().map(|r| r.rel_path.as_str()).collect()
    }

    #[test]
    fn test_scan_finds_markdown_sorted() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("b.md"), "# B").unwrap();
        fs::write(temp_dir.path().join("a.mdx"), "# A").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "skip").unwrap();
        let guide = temp_dir.path().join("guide");
        fs::create_dir(&guide).unwrap();
        fs::write(guide.join("index.md"), "# Guide").unwrap();

        let result = Scanner::new(temp_dir.path().to_path_buf()).scan();

        assert_eq!(rel_paths(&result), vec!["a.mdx", "b.md", "guide/index.md"]);
        assert!(result.documents[2].abs_path.ends_with("guide/index.md"));
    }

    #[test]
    fn test_scan_skips_hidden_and_underscore() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".hidden.md"), "# Hidden").unwrap();
        fs::write(temp_dir.path().join("_partial.md"), "# Partial").unwrap();
        fs::write(temp_dir.path().join("visible.md"), "# Visible").unwrap();
        let private = temp_dir.path().join("_private");
        fs::create_dir(&private).unwrap();
        fs::write(private.join("secret.md"), "# Secret").unwrap();
        let git = temp_dir.path().join(".git");
        fs::create_dir(&git).unwrap();
        fs::write(git.join("README.md"), "# Git").unwrap();

        let result = Scanner::new(temp_dir.path().to_path_buf()).scan();

        assert_eq!(rel_paths(&result), vec!["visible.md"]);
    }

    #[test]
    fn test_scan_records_category_sidecars() {
        let temp_dir = tempfile::tempdir().unwrap();
        let guide = temp_dir.path().join("guide");
        fs::create_dir(&guide).unwrap();
        fs::write(guide.join("_category_.yml"), "label: Guides").unwrap();
        fs::write(guide.join("setup.md"), "# Setup").unwrap();
        let api = temp_dir.path().join("api");
        fs::create_dir(&api).unwrap();
        fs::write(api.join("_category_.yaml"), "label: API").unwrap();

        let result = Scanner::new(temp_dir.path().to_path_buf()).scan();

        let dirs: Vec<_> = result.categories.iter().map(|c| c.dir.as_str()).collect();
        assert_eq!(dirs, vec!["api", "guide"]);
        assert_eq!(rel_paths(&result), vec!["guide/setup.md"]);
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = Scanner::new(temp_dir.path().to_path_buf()).scan();
        assert!(result.documents.is_empty());
        assert!(result.categories.is_empty());
    }
}
