use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSyntax {
    pub single_line: Vec<String>,
    pub multi_line: Vec<(String, String)>,
}

impl CommentSyntax {
    #[must_use]
    pub fn new(single_line: Vec<&str>, multi_line: Vec<(&str, &str)>) -> Self {
        Self {
            single_line: single_line.into_iter().map(String::from).collect(),
            multi_line: multi_line
                .into_iter()
                .map(|(s, e)| (s.to_string(), e.to_string()))
                .collect(),
        }
    }

    /// For each line of `content`, whether it is entirely a comment.
    ///
    /// Block comments are tracked across lines, so a `*` continuation line
    /// counts only while a block is open.
    #[must_use]
    pub fn comment_mask(&self, content: &str) -> Vec<bool> {
        let mut open: Option<&str> = None;
        content
            .lines()
            .map(|line| {
                let trimmed = line.trim_start();
                if let Some(end) = open {
                    if let Some(pos) = trimmed.find(end) {
                        open = None;
                        self.track_blocks(&trimmed[pos + end.len()..], &mut open);
                    }
                    return true;
                }
                if trimmed.is_empty() {
                    return false;
                }
                if self.single_line.iter().any(|p| trimmed.starts_with(p.as_str())) {
                    return true;
                }
                let starts_block = self
                    .multi_line
                    .iter()
                    .any(|(start, _)| trimmed.starts_with(start.as_str()));
                self.track_blocks(trimmed, &mut open);
                starts_block
            })
            .collect()
    }

    /// Leave `open` set to the pending end delimiter if `text` opens a block
    /// it does not close.
    fn track_blocks<'s>(&'s self, mut text: &str, open: &mut Option<&'s str>) {
        loop {
            let Some((pos, start, end)) = self
                .multi_line
                .iter()
                .filter_map(|(s, e)| {
                    text.find(s.as_str())
                        .map(|pos| (pos, s.as_str(), e.as_str()))
                })
                .min_by_key(|(pos, _, _)| *pos)
            else {
                return;
            };
            let line_comment = self
                .single_line
                .iter()
                .filter_map(|p| text.find(p.as_str()))
                .min();
            if line_comment.is_some_and(|lc| lc < pos) {
                return;
            }
            let rest = &text[pos + start.len()..];
            match rest.find(end) {
                Some(close) => text = &rest[close + end.len()..],
                None => {
                    *open = Some(end);
                    return;
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Lowercase identifier used in the contract's `languages` list.
    pub name: String,
    pub extensions: Vec<String>,
    pub comment_syntax: CommentSyntax,
    /// Line pattern signalling that a file exports public items.
    pub export_pattern: String,
}

impl Language {
    #[must_use]
    pub fn new(
        name: &str,
        extensions: Vec<&str>,
        comment_syntax: CommentSyntax,
        export_pattern: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.into_iter().map(String::from).collect(),
            comment_syntax,
            export_pattern: export_pattern.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct LanguageRegistry {
    languages: Vec<Language>,
    name_map: HashMap<String, usize>,
    extension_map: HashMap<String, usize>,
}

impl LanguageRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            languages: Vec::new(),
            name_map: HashMap::new(),
            extension_map: HashMap::new(),
        }
    }

    pub fn register(&mut self, language: Language) {
        let idx = self.languages.len();
        for ext in &language.extensions {
            self.extension_map.insert(ext.clone(), idx);
        }
        self.name_map.insert(language.name.to_lowercase(), idx);
        self.languages.push(language);
    }

    /// Look up a language by contract name, ignoring case.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Language> {
        self.name_map
            .get(&name.trim().to_lowercase())
            .map(|&idx| &self.languages[idx])
    }

    #[must_use]
    pub fn get_by_extension(&self, ext: &str) -> Option<&Language> {
        self.extension_map
            .get(ext)
            .map(|&idx| &self.languages[idx])
    }

    #[must_use]
    pub fn all(&self) -> &[Language] {
        &self.languages
    }

    /// Extensions implied by the declared language names.
    ///
    /// Unknown names contribute nothing.
    #[must_use]
    pub fn extensions_for<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let mut extensions: Vec<String> = names
            .iter()
            .filter_map(|name| self.get_by_name(name.as_ref()))
            .flat_map(|lang| lang.extensions.iter().cloned())
            .collect();
        extensions.sort();
        extensions.dedup();
        extensions
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        let mut registry = Self::new();

        registry.register(Language::new(
            "javascript",
            vec!["js", "mjs", "cjs", "jsx"],
            CommentSyntax::new(vec!["//"], vec![("/*", "*/")]),
            r"^\s*export\s|^\s*module\.exports\b|^\s*exports\.\w+\s*=",
        ));

        registry.register(Language::new(
            "typescript",
            vec!["ts", "tsx", "mts", "cts"],
            CommentSyntax::new(vec!["//"], vec![("/*", "*/")]),
            r"^\s*export\s|^\s*module\.exports\b|^\s*exports\.\w+\s*=",
        ));

        registry.register(Language::new(
            "python",
            vec!["py"],
            CommentSyntax::new(vec!["#"], vec![]),
            r"^__all__\s*=",
        ));

        registry.register(Language::new(
            "rust",
            vec!["rs"],
            CommentSyntax::new(vec!["//"], vec![("/*", "*/")]),
            r"^\s*pub\s+(?:async\s+)?(?:fn|struct|enum|trait|mod|const|static|type|use)\b",
        ));

        registry.register(Language::new(
            "go",
            vec!["go"],
            CommentSyntax::new(vec!["//"], vec![("/*", "*/")]),
            r"^(?:func\s+(?:\([^)]*\)\s*)?|type\s+|var\s+|const\s+)[A-Z]",
        ));

        registry
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
