// src/tables/verify.rs
// Post-construction checks on a finalized table. Read-only, so the probe
// sweep fans out over rayon.

use hashbrown::HashMap;
use rayon::prelude::*;

use super::KeywordTable;
use crate::error::{KeywordTableError, Result};

/// Pairs of keywords whose runtime hashes coincide.
pub fn hash_collisions(table: &KeywordTable) -> Vec<(String, String)> {
    let mut owners: HashMap<usize, &str> = HashMap::with_capacity(table.keywords.len());
    let mut out = Vec::new();
    for kw in &table.keywords {
        let h = table.hash(kw.as_bytes());
        if let Some(prev) = owners.insert(h, &kw.text) {
            out.push((prev.to_string(), kw.text.clone()));
        }
    }
    out
}

/// Keywords that do not look up to themselves.
pub fn unreachable_keywords(table: &KeywordTable) -> Vec<String> {
    table
        .keywords
        .iter()
        .filter(|kw| table.lookup(&kw.text).map(|hit| hit.text.as_str()) != Some(kw.text.as_str()))
        .map(|kw| kw.text.clone())
        .collect()
}

/// Probes that are not keywords yet still resolve to one.
pub fn false_positives<S>(table: &KeywordTable, probes: &[S]) -> Vec<String>
where
    S: AsRef<str> + Sync,
{
    probes
        .par_iter()
        .filter_map(|p| {
            let probe: &str = p.as_ref();
            match table.lookup(probe) {
                Some(kw) if kw.text != probe => Some(probe.to_string()),
                _ => None,
            }
        })
        .collect()
}

/// Counts of a probe sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeSummary {
    pub probes: usize,
    pub keyword_hits: usize,
    pub out_of_range: usize,
    pub slot_mismatch: usize,
    pub false_positives: usize,
}

impl ProbeSummary {
    fn merge(self, o: Self) -> Self {
        Self {
            probes: self.probes + o.probes,
            keyword_hits: self.keyword_hits + o.keyword_hits,
            out_of_range: self.out_of_range + o.out_of_range,
            slot_mismatch: self.slot_mismatch + o.slot_mismatch,
            false_positives: self.false_positives + o.false_positives,
        }
    }
}

/// Classifies each probe by how the runtime lookup disposes of it.
pub fn summarize_probes<S>(table: &KeywordTable, probes: &[S]) -> ProbeSummary
where
    S: AsRef<str> + Sync,
{
    probes
        .par_iter()
        .map(|probe| {
            let probe = probe.as_ref();
            let mut s = ProbeSummary {
                probes: 1,
                ..Default::default()
            };
            let len = probe.len();
            let in_len_range = (table.min_word_length..=table.max_word_length).contains(&len);
            let h = table.hash(probe.as_bytes());
            match table.lookup(probe) {
                Some(kw) if kw.text == probe => s.keyword_hits = 1,
                Some(_) => s.false_positives = 1,
                None if !in_len_range || h > table.max_hash_value() => s.out_of_range = 1,
                None => s.slot_mismatch = 1,
            }
            s
        })
        .reduce(ProbeSummary::default, ProbeSummary::merge)
}

/// Injectivity and totality; the generator refuses to write a table failing either.
pub fn verify_table(table: &KeywordTable) -> Result<()> {
    if let Some((a, b)) = hash_collisions(table).into_iter().next() {
        return Err(KeywordTableError::InvalidTable(format!(
            "`{a}` and `{b}` share a hash"
        )));
    }
    if let Some(word) = unreachable_keywords(table).into_iter().next() {
        return Err(KeywordTableError::InvalidTable(format!(
            "`{word}` does not look up to itself"
        )));
    }
    Ok(())
}
