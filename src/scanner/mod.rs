mod filter;

pub use filter::{
    EXCLUDED_DIRS, FIXTURE_DIR_PATTERNS, FileFilter, LanguageFilter, MINIFIED_FILE_PATTERNS,
};

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Result;
use crate::language::LanguageRegistry;

/// Trait for scanning directories and finding files.
pub trait FileScanner {
    /// Scan a directory and return all matching file paths.
    ///
    /// # Errors
    /// Returns an error if the scan cannot be set up.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

pub struct DirectoryScanner<F: FileFilter> {
    filter: F,
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self { filter }
    }

    fn relative<'a>(root: &Path, path: &'a Path) -> &'a Path {
        path.strip_prefix(root).unwrap_or(path)
    }

    fn scan_impl(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || self.filter.should_descend(Self::relative(root, e.path()))
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|e| {
                e.file_type().is_file()
                    && self.filter.should_include(Self::relative(root, e.path()))
            })
            .map(walkdir::DirEntry::into_path)
            .collect()
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<F> {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.scan_impl(root))
    }
}

/// Deduplicated list of source files under a project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    root: PathBuf,
    files: IndexSet<PathBuf>,
}

impl FileList {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, files: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: files.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    /// `path` relative to the project root, or unchanged if outside it.
    #[must_use]
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

/// Enumerate the source files of the languages declared in `config`.
///
/// # Errors
/// Returns an error if an `extra_excludes` pattern is not a valid glob.
pub fn scan_project(
    root: &Path,
    config: &Config,
    languages: &LanguageRegistry,
    extra_excludes: &[String],
) -> Result<FileList> {
    let extensions = languages.extensions_for(&config.languages);
    debug!(?extensions, "scanning {}", root.display());

    let filter = LanguageFilter::new(extensions, extra_excludes)?;
    let files = DirectoryScanner::new(filter).scan(root)?;
    let list = FileList::new(root, files);
    debug!(files = list.len(), "scan complete");
    Ok(list)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
