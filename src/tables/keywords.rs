// src/tables/keywords.rs
// Keyword definition loader.
//
// One record per line:
//   <keyword> <payload>
// where <keyword> is [A-Za-z0-9_]+ and <payload> is the token-kind expression
// emitted verbatim into the generated table. Lines starting with '#' are
// comments; blank lines are ignored.

use std::path::Path;

use hashbrown::HashMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{KeywordTableError, Result};

pub const COMMENT_MARKER: char = '#';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub text: String,
    pub payload: String,
    /// 1-based line in the definition source (0 for keywords built in code).
    pub line: usize,
}

impl Keyword {
    pub fn new(text: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            payload: payload.into(),
            line: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

/// A line that did not look like `<keyword> <payload>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    pub line: usize,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedKeywords {
    pub keywords: Vec<Keyword>,
    pub skipped: Vec<MalformedLine>,
}

fn record_pattern() -> Regex {
    Regex::new(r"^([A-Za-z0-9_]+)[ \t]+(\S.*?)\s*$").expect("static keyword pattern")
}

pub fn parse_keywords(src: &str) -> Result<LoadedKeywords> {
    let pattern = record_pattern();
    let mut out = LoadedKeywords::default();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (idx, raw_line) in src.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim_start();
        if line.trim_end().is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }

        let Some(caps) = pattern.captures(line) else {
            log::warn!("unrecognizable line detected at line {line_no}: {raw_line:?}");
            out.skipped.push(MalformedLine {
                line: line_no,
                text: raw_line.to_string(),
            });
            continue;
        };

        let text = caps[1].to_string();
        if let Some(&first_line) = seen.get(&text) {
            return Err(KeywordTableError::DuplicateKeyword {
                keyword: text,
                line: line_no,
                first_line,
            });
        }
        seen.insert(text.clone(), line_no);

        out.keywords.push(Keyword {
            text,
            payload: caps[2].to_string(),
            line: line_no,
        });
    }

    Ok(out)
}

pub fn read_keywords(path: &Path) -> Result<LoadedKeywords> {
    let src = std::fs::read_to_string(path).map_err(|e| KeywordTableError::io(path, e))?;
    parse_keywords(&src)
}

/// Rejects duplicate texts in keywords that did not come through [`parse_keywords`].
pub fn check_unique(keywords: &[Keyword]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(keywords.len());
    for (i, kw) in keywords.iter().enumerate() {
        let line = if kw.line == 0 { i + 1 } else { kw.line };
        if let Some(&first_line) = seen.get(kw.text.as_str()) {
            return Err(KeywordTableError::DuplicateKeyword {
                keyword: kw.text.clone(),
                line,
                first_line,
            });
        }
        seen.insert(&kw.text, line);
    }
    Ok(())
}
