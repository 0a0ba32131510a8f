// src/tables/mod.rs
pub mod assign;
pub mod build;
pub mod emit;
pub mod io;
pub mod keywords;
pub mod signature;
pub mod verify;

use std::path::Path;

pub use assign::{ASCII_LEN, AssociatedValues, UNUSED};
pub use build::{Search, SearchStep, build_keyword_table};
pub use emit::{EmitOptions, render_rust, write_source};
pub use io::{load_table_json, load_table_json_bytes, save_table_json};
pub use keywords::{Keyword, LoadedKeywords, parse_keywords, read_keywords};
pub use signature::{SignatureIndex, SignatureIndexes};

use crate::{config::GenConfig, error::Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub signatures_tried: usize,
    pub adjustments: usize,
}

/// Finalized perfect hash table for one keyword set.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    pub keywords: Vec<Keyword>,
    pub signature: SignatureIndex,
    /// Raw values; characters no keyword samples hold [`UNUSED`].
    pub asso_values: AssociatedValues,
    /// hash -> keyword index, `MAX_HASH_VALUE + 1` entries.
    pub slots: Vec<Option<usize>>,
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub stats: SearchStats,
}

impl KeywordTable {
    #[inline]
    pub fn max_hash_value(&self) -> usize {
        self.slots.len().saturating_sub(1)
    }

    /// Value that stands in for [`UNUSED`] in the dense table.
    #[inline]
    pub fn sentinel(&self) -> usize {
        self.max_hash_value() + 1
    }

    /// Associated value as the emitted table stores it.
    #[inline]
    pub fn asso(&self, c: u8) -> usize {
        match self.asso_values.get(c) {
            UNUSED => self.sentinel(),
            v => v as usize,
        }
    }

    pub fn dense_asso_values(&self) -> [usize; ASCII_LEN] {
        let mut out = [0usize; ASCII_LEN];
        for (c, slot) in out.iter_mut().enumerate() {
            *slot = self.asso(c as u8);
        }
        out
    }

    /// Runtime hash: same accumulation the emitted `hash` performs.
    pub fn hash(&self, word: &[u8]) -> usize {
        let mut hval = word.len();
        for o in self.signature.sampled(word.len()) {
            hval += self.asso(word[o]);
        }
        hval
    }

    pub fn slot(&self, hash: usize) -> Option<&Keyword> {
        self.slots.get(hash).copied().flatten().map(|i| &self.keywords[i])
    }

    pub fn lookup(&self, word: &str) -> Option<&Keyword> {
        let len = word.len();
        if len < self.min_word_length || len > self.max_word_length {
            return None;
        }
        let key = self.hash(word.as_bytes());
        if key > self.max_hash_value() {
            return None;
        }
        self.slot(key).filter(|kw| kw.text == word)
    }

    pub fn payload(&self, word: &str) -> Option<&str> {
        self.lookup(word).map(|kw| kw.payload.as_str())
    }
}

/// Load, build, verify, then write the generated source (and the JSON dump
/// when configured). Nothing is written unless construction succeeds.
pub fn generate(input: &Path, output: &Path, cfg: &GenConfig) -> Result<KeywordTable> {
    let loaded = read_keywords(input)?;
    if !loaded.skipped.is_empty() {
        log::warn!(
            "{}: skipped {} unrecognizable line(s)",
            input.display(),
            loaded.skipped.len()
        );
    }

    let table = build_keyword_table(loaded.keywords, cfg)?;
    verify::verify_table(&table)?;

    let source_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let opts = EmitOptions {
        payload_type: cfg.payload_type.clone(),
        source_name,
    };
    write_source(output, &render_rust(&table, &opts))?;

    if let Some(json) = &cfg.json_out {
        save_table_json(json, &table)?;
    }
    Ok(table)
}
