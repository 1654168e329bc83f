use std::collections::HashMap;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::json;

use super::*;
use crate::config::Mode;

struct MockFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
    unreadable: Vec<PathBuf>,
}

impl MockFileSystem {
    fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            unreadable: Vec::new(),
        }
    }

    fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
        self
    }

    fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.files
            .lock()
            .unwrap()
            .insert(path.clone(), String::new());
        self.unreadable.push(path);
        self
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        if self.unreadable.iter().any(|p| p == path) {
            return Err(Error::new(ErrorKind::PermissionDenied, "permission denied"));
        }
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "file not found"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

fn load_with(fs: MockFileSystem) -> LoadResult {
    FileContractLoader::with_fs(fs).load(Path::new("/project"))
}

#[test]
fn missing_contract_yields_single_error() {
    let result = load_with(MockFileSystem::new());

    assert!(result.config.is_none());
    assert!(result.raw.is_none());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("contract file not found"));
    assert!(result.errors[0].contains(".aocs.json"));
}

#[test]
fn unreadable_contract_yields_read_error() {
    let fs = MockFileSystem::new().with_unreadable("/project/.aocs.json");
    let result = load_with(fs);

    assert!(result.config.is_none());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("permission denied"));
}

#[test]
fn malformed_json_yields_parse_error() {
    let fs = MockFileSystem::new().with_file("/project/.aocs.json", "{ \"version\": ");
    let result = load_with(fs);

    assert!(result.config.is_none());
    assert!(result.raw.is_none());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("not valid JSON"));
}

#[test]
fn schema_errors_keep_raw_document() {
    let fs = MockFileSystem::new().with_file("/project/.aocs.json", r#"{"mode": "fast"}"#);
    let result = load_with(fs);

    assert!(result.config.is_none());
    assert_eq!(result.raw, Some(json!({"mode": "fast"})));
    assert_eq!(result.errors.len(), 3);
    assert!(!result.is_valid());
}

#[test]
fn valid_contract_is_decoded() {
    let fs = MockFileSystem::new().with_file(
        "/project/.aocs.json",
        r#"{"version": "1.0", "languages": ["javascript", "python"], "mode": "lite"}"#,
    );
    let result = load_with(fs);

    assert!(result.is_valid());
    let config = result.config.unwrap();
    assert_eq!(config.languages, vec!["javascript", "python"]);
    assert_eq!(config.mode, Mode::Lite);
    assert_eq!(result.path, PathBuf::from("/project/.aocs.json"));
}

#[test]
fn load_contract_reads_real_filesystem() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".aocs.json"),
        r#"{"version": "1.0", "languages": ["go"], "mode": "strict"}"#,
    )
    .unwrap();

    let result = load_contract(dir.path());
    assert!(result.is_valid());
    assert_eq!(result.config.unwrap().mode, Mode::Strict);
}

#[test]
fn parse_contract_reports_non_object() {
    let result = parse_contract(PathBuf::from(".aocs.json"), "42");
    assert_eq!(result.errors, vec!["contract must be a JSON object, got number"]);
    assert_eq!(result.raw, Some(json!(42)));
}
