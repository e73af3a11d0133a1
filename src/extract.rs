use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::domain::ConfigRule;
use crate::error::{Result, StreamError};

struct TagPattern {
    suffix: String,
    regex: Regex,
}

/// Pulls candidate names out of configuration files. Which tag is read is
/// decided by the file name suffix through the rule table; files matching
/// no rule yield nothing.
pub struct NameExtractor {
    patterns: Vec<TagPattern>,
}

// Values are matched within a single line.
fn tag_regex(tag: &str) -> std::result::Result<Regex, regex::Error> {
    let tag = regex::escape(tag);
    Regex::new(&format!(r"(?i)<{tag}>(.*?)</{tag}>"))
}

impl NameExtractor {
    pub fn new(rules: &[ConfigRule]) -> Result<Self> {
        let patterns = rules
            .iter()
            .map(|rule| {
                let regex = tag_regex(&rule.tag).map_err(|source| StreamError::Pattern {
                    file: rule.file.clone(),
                    source,
                })?;
                Ok(TagPattern {
                    suffix: rule.file.to_lowercase(),
                    regex,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    fn pattern_for(&self, path: &Path) -> Option<&Regex> {
        let file_name = path.file_name()?.to_string_lossy().to_lowercase();
        self.patterns
            .iter()
            .find(|p| file_name.ends_with(&p.suffix))
            .map(|p| &p.regex)
    }

    /// All tag-enclosed values in `content`, keyed on the suffix of `path`.
    pub fn extract_from_content(&self, path: &Path, content: &str) -> BTreeSet<String> {
        match self.pattern_for(path) {
            Some(regex) => regex
                .captures_iter(content)
                .map(|caps| caps[1].to_string())
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// Reads `path` and extracts its names. A missing file is not an error.
    pub fn read_names(&self, path: &Path) -> Result<BTreeSet<String>> {
        if self.pattern_for(path).is_none() {
            return Ok(BTreeSet::new());
        }
        match fs::read_to_string(path) {
            Ok(content) => Ok(self.extract_from_content(path, &content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeSet::new()),
            Err(source) => Err(StreamError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Like [`read_names`](Self::read_names), but a read failure is logged
    /// and treated as an empty result.
    pub fn extract_names(&self, path: &Path) -> BTreeSet<String> {
        self.read_names(path).unwrap_or_else(|e| {
            tracing::warn!("{e}");
            BTreeSet::new()
        })
    }
}
