//! Files written by `aocs init`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{AGENT_README_FILE, CONTRACT_FILE, Config, Mode};
use crate::error::{AocsError, Result};

/// Patterns forbidden by a freshly scaffolded contract.
pub const DEFAULT_FORBIDDEN_PATTERNS: &[&str] = &["dynamic-eval"];

/// Language used when none is chosen.
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// A new contract and agent README for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    pub languages: Vec<String>,
    pub mode: Mode,
}

impl Default for Scaffold {
    fn default() -> Self {
        Self {
            languages: vec![DEFAULT_LANGUAGE.to_string()],
            mode: Mode::default(),
        }
    }
}

impl Scaffold {
    /// Falls back to the default language when `languages` is empty.
    #[must_use]
    pub fn new(languages: Vec<String>, mode: Mode) -> Self {
        let languages = if languages.is_empty() {
            vec![DEFAULT_LANGUAGE.to_string()]
        } else {
            languages
        };
        Self { languages, mode }
    }

    #[must_use]
    pub fn contract(&self) -> Config {
        let mut config = Config::new(self.languages.clone(), self.mode);
        config.forbidden_patterns = DEFAULT_FORBIDDEN_PATTERNS
            .iter()
            .map(ToString::to_string)
            .collect();
        config
    }

    /// Pretty-printed contract JSON with a trailing newline.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn contract_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(&self.contract())?;
        json.push('\n');
        Ok(json)
    }

    #[must_use]
    pub fn agent_readme(&self) -> String {
        format!(
            "# Agent guide\n\
             \n\
             This repository is validated by `aocs` against `{CONTRACT_FILE}`.\n\
             \n\
             - Languages: {languages}\n\
             - Mode: {mode}\n\
             \n\
             Start every source file with a role hint in a comment, for example\n\
             `// @aocs-role: service`. Valid roles are entry, service, state, ui,\n\
             util and test. Files that export public items should also declare\n\
             `@aocs-module: <name>`. State files name their owner with\n\
             `@aocs-owner`, and services list their effects with\n\
             `@aocs-side-effects`.\n\
             \n\
             Run `aocs validate` before committing.\n",
            languages = self.languages.join(", "),
            mode = self.mode.as_str(),
        )
    }

    /// Write the contract and README into `root`, returning the written paths.
    ///
    /// # Errors
    /// Returns an error if either file exists and `force` is false, or if a
    /// file cannot be written.
    pub fn write(&self, root: &Path, force: bool) -> Result<Vec<PathBuf>> {
        let contract_path = root.join(CONTRACT_FILE);
        let readme_path = root.join(AGENT_README_FILE);

        if !force
            && let Some(existing) = [&contract_path, &readme_path].into_iter().find(|p| p.exists())
        {
            return Err(AocsError::Contract(format!(
                "{} already exists. Use --force to overwrite.",
                existing.display()
            )));
        }

        fs::create_dir_all(root).map_err(|source| AocsError::FileWrite {
            path: root.to_path_buf(),
            source,
        })?;

        let files = [
            (contract_path, self.contract_json()?),
            (readme_path, self.agent_readme()),
        ];
        let mut written = Vec::with_capacity(files.len());
        for (path, content) in files {
            debug!("writing {}", path.display());
            fs::write(&path, content).map_err(|source| AocsError::FileWrite {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
#[path = "scaffold_tests.rs"]
mod tests;
