use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::filesystem::{FileSystem, RealFileSystem};
use super::model::{CONTRACT_FILE, Config};
use super::validation::validate_contract;

/// Outcome of loading the repository contract.
///
/// Loading never fails: every problem is recorded in `errors`. `raw` holds the
/// parsed document whenever the file was valid JSON, even if it failed schema
/// validation, while `config` is only populated for a contract without errors.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadResult {
    /// Location the contract was read from.
    pub path: PathBuf,
    /// The parsed JSON document, if parsing succeeded.
    pub raw: Option<Value>,
    /// The validated configuration, if there were no errors.
    pub config: Option<Config>,
    /// Every problem found, in discovery order.
    pub errors: Vec<String>,
}

impl LoadResult {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn failed(path: PathBuf, raw: Option<Value>, errors: Vec<String>) -> Self {
        Self {
            path,
            raw,
            config: None,
            errors,
        }
    }
}

/// Trait for loading the repository contract.
pub trait ContractLoader {
    /// Load and validate the contract of the project rooted at `project_root`.
    fn load(&self, project_root: &Path) -> LoadResult;
}

/// Loads `.aocs.json` from the project root.
#[derive(Debug, Default)]
pub struct FileContractLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl FileContractLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileContractLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> ContractLoader for FileContractLoader<F> {
    fn load(&self, project_root: &Path) -> LoadResult {
        let path = project_root.join(CONTRACT_FILE);
        debug!(path = %path.display(), "loading contract");

        if !self.fs.exists(&path) {
            let error = format!("contract file not found: {}", path.display());
            return LoadResult::failed(path, None, vec![error]);
        }

        let content = match self.fs.read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                let error = format!("failed to read {}: {e}", path.display());
                return LoadResult::failed(path, None, vec![error]);
            }
        };

        parse_contract(path, &content)
    }
}

/// Parse and validate contract text read from `path`.
#[must_use]
pub fn parse_contract(path: PathBuf, content: &str) -> LoadResult {
    let raw: Value = match serde_json::from_str(content) {
        Ok(raw) => raw,
        Err(e) => {
            let error = format!("{CONTRACT_FILE} is not valid JSON: {e}");
            return LoadResult::failed(path, None, vec![error]);
        }
    };

    let errors = validate_contract(&raw);
    if !errors.is_empty() {
        return LoadResult::failed(path, Some(raw), errors);
    }

    match serde_json::from_value::<Config>(raw.clone()) {
        Ok(config) => LoadResult {
            path,
            raw: Some(raw),
            config: Some(config),
            errors: Vec::new(),
        },
        Err(e) => {
            let error = format!("{CONTRACT_FILE} could not be decoded: {e}");
            LoadResult::failed(path, Some(raw), vec![error])
        }
    }
}

/// Load the contract of `project_root` from the real filesystem.
#[must_use]
pub fn load_contract(project_root: &Path) -> LoadResult {
    FileContractLoader::new().load(project_root)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
