#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the aocs binary.
#[macro_export]
macro_rules! aocs {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("aocs"))
    };
}

/// A contract declaring JavaScript in lite mode.
pub const LITE_JS_CONTRACT: &str =
    r#"{"version": "1.0", "languages": ["javascript"], "mode": "lite"}"#;

/// A contract declaring JavaScript in strict mode.
pub const STRICT_JS_CONTRACT: &str =
    r#"{"version": "1.0", "languages": ["javascript"], "mode": "strict"}"#;

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// A project with `contract` and a short agent README.
    pub fn with_contract(contract: &str) -> Self {
        let fixture = Self::new();
        fixture.create_contract(contract);
        fixture.create_file("AGENTS.md", "Read .aocs.json before editing.\n");
        fixture
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn create_contract(&self, content: &str) {
        self.create_file(".aocs.json", content);
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
