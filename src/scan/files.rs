//! Discovery of C source files under a root directory.

use std::ffi::OsStr;
use std::path::Path;
use walkdir::WalkDir;

use super::{ScanError, SourceFile};

/// Default directory names skipped at every depth.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &["bonus", "test"];

/// Default source suffixes, without the leading dot.
pub const DEFAULT_EXTENSIONS: &[&str] = &["c"];

/// Walks a tree and yields the source files in it.
#[derive(Debug, Clone)]
pub struct TreeScanner {
    ignored_dirs: Vec<String>,
    suffixes: Vec<String>,
}

impl Default for TreeScanner {
    fn default() -> Self {
        Self::new(
            DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl TreeScanner {
    /// Create a scanner. Extensions may be given with or without the dot.
    pub fn new(ignored_dirs: Vec<String>, extensions: Vec<String>) -> Self {
        let suffixes = extensions
            .into_iter()
            .map(|ext| format!(".{}", ext.trim_start_matches('.')))
            .collect();
        Self {
            ignored_dirs,
            suffixes,
        }
    }

    /// Lazily yield every source file under `root`, in file-name order.
    ///
    /// Symlinked directories are followed. A symlink cycle, or a directory
    /// that cannot be listed, is yielded as an error.
    pub fn walk<'a>(
        &'a self,
        root: &Path,
    ) -> impl Iterator<Item = Result<SourceFile, ScanError>> + 'a {
        let root_buf = root.to_path_buf();

        WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| {
                // The root is scanned even if its own name is excluded
                !(e.depth() > 0 && e.file_type().is_dir() && self.is_ignored_dir(e.file_name()))
            })
            .filter_map(move |entry| match entry {
                Ok(e) => (e.file_type().is_file() && self.is_source(e.file_name()))
                    .then(|| Ok(SourceFile::new(e.into_path()))),
                Err(source) => Some(Err(ScanError::Walk {
                    root: root_buf.clone(),
                    source,
                })),
            })
    }

    fn is_ignored_dir(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy();
        self.ignored_dirs.iter().any(|d| *d == name)
    }

    fn is_source(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy();
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn collect(scanner: &TreeScanner, root: &Path) -> Vec<String> {
        scanner
            .walk(root)
            .map(|f| {
                f.unwrap()
                    .path()
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_finds_c_files_only() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/main.c"), "int main(void) {}\n").unwrap();
        fs::write(temp.path().join("src/main.h"), "int main(void);\n").unwrap();
        fs::write(temp.path().join("Makefile"), "all:\n").unwrap();
        fs::write(temp.path().join("notes.cc"), "").unwrap();

        let files = collect(&TreeScanner::default(), temp.path());
        assert_eq!(files, vec!["src/main.c"]);
    }

    #[test]
    fn test_ignored_dirs_at_any_depth() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("bonus")).unwrap();
        fs::create_dir_all(temp.path().join("lib/deep/test")).unwrap();
        fs::create_dir_all(temp.path().join("tests")).unwrap();
        fs::write(temp.path().join("bonus/extra.c"), "void x(void) {}\n").unwrap();
        fs::write(temp.path().join("lib/deep/test/t.c"), "void t(void) {}\n").unwrap();
        fs::write(temp.path().join("lib/deep/kept.c"), "void k(void) {}\n").unwrap();
        fs::write(temp.path().join("tests/unit.c"), "void u(void) {}\n").unwrap();

        let files = collect(&TreeScanner::default(), temp.path());
        assert_eq!(files, vec!["lib/deep/kept.c", "tests/unit.c"]);
    }

    #[test]
    fn test_file_named_like_ignored_dir_is_kept() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("test.c"), "").unwrap();

        let files = collect(&TreeScanner::default(), temp.path());
        assert_eq!(files, vec!["test.c"]);
    }

    #[test]
    fn test_root_named_like_ignored_dir_is_scanned() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("bonus");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.c"), "").unwrap();

        let files = collect(&TreeScanner::default(), &root);
        assert_eq!(files, vec!["a.c"]);
    }

    #[test]
    fn test_custom_dirs_and_extensions() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("vendor")).unwrap();
        fs::create_dir_all(temp.path().join("bonus")).unwrap();
        fs::write(temp.path().join("vendor/v.c"), "").unwrap();
        fs::write(temp.path().join("bonus/b.c"), "").unwrap();
        fs::write(temp.path().join("a.h"), "").unwrap();

        let scanner = TreeScanner::new(
            vec!["vendor".to_string()],
            vec!["c".to_string(), ".h".to_string()],
        );
        let files = collect(&scanner, temp.path());
        assert_eq!(files, vec!["a.h", "bonus/b.c"]);
    }

    #[test]
    fn test_sorted_order() {
        let temp = TempDir::new().unwrap();
        for name in ["zeta.c", "alpha.c", "mid.c"] {
            fs::write(temp.path().join(name), "").unwrap();
        }

        let files = collect(&TreeScanner::default(), temp.path());
        assert_eq!(files, vec!["alpha.c", "mid.c", "zeta.c"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_is_an_error() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("src");
        fs::create_dir_all(&dir).unwrap();
        std::os::unix::fs::symlink(temp.path(), dir.join("loop")).unwrap();

        let results: Vec<_> = TreeScanner::default().walk(temp.path()).collect();
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(ScanError::Walk { .. }))));
    }
}
