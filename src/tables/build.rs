// src/tables/build.rs
use std::time::Instant;

use super::{
    KeywordTable, SearchStats,
    assign::{AssociatedValues, Assignment, HashTable, RetryReason, assign},
    keywords::{Keyword, check_unique},
    signature::{SignatureIndex, SignatureIndexes},
};
use crate::{
    config::GenConfig,
    error::{KeywordTableError, Result},
};

/// One step of the signature search.
#[derive(Debug)]
pub enum SearchStep {
    Success {
        signature: SignatureIndex,
        asso: AssociatedValues,
        table: HashTable,
        adjustments: usize,
    },
    /// This signature failed; the next call moves on to the next candidate.
    Retry {
        signature: SignatureIndex,
        reason: RetryReason,
    },
    /// Every candidate signature has been tried.
    GiveUp,
}

/// Walks the signature candidates for a validated keyword set.
pub struct Search<'a> {
    keywords: &'a [Keyword],
    signatures: SignatureIndexes,
    max_tries: usize,
    tried: usize,
}

impl<'a> Search<'a> {
    pub fn new(keywords: &'a [Keyword], max_tries: usize) -> Result<Self> {
        validate(keywords)?;
        let (min_len, max_len) = length_range(keywords).ok_or(KeywordTableError::EmptyKeywordSet)?;
        Ok(Self {
            keywords,
            signatures: SignatureIndexes::new(min_len, max_len),
            max_tries,
            tried: 0,
        })
    }

    pub fn signatures_tried(&self) -> usize {
        self.tried
    }

    pub fn step(&mut self) -> SearchStep {
        let Some(signature) = self.signatures.next() else {
            return SearchStep::GiveUp;
        };
        self.tried += 1;
        log::debug!("[search] trying signature {signature}");

        match assign(self.keywords, &signature, self.max_tries) {
            Assignment::Success {
                asso,
                table,
                adjustments,
            } => SearchStep::Success {
                signature,
                asso,
                table,
                adjustments,
            },
            Assignment::Retry(reason) => SearchStep::Retry { signature, reason },
        }
    }
}

fn validate(keywords: &[Keyword]) -> Result<()> {
    if keywords.is_empty() {
        return Err(KeywordTableError::EmptyKeywordSet);
    }
    for kw in keywords {
        let reason = if kw.is_empty() {
            "empty keyword"
        } else if !kw.text.is_ascii() {
            "keyword is not ASCII"
        } else {
            continue;
        };
        return Err(KeywordTableError::InvalidKeyword {
            keyword: kw.text.clone(),
            reason,
        });
    }
    check_unique(keywords)
}

fn length_range(keywords: &[Keyword]) -> Option<(usize, usize)> {
    let min = keywords.iter().map(Keyword::len).min()?;
    let max = keywords.iter().map(Keyword::len).max()?;
    Some((min, max))
}

pub fn build_keyword_table(keywords: Vec<Keyword>, cfg: &GenConfig) -> Result<KeywordTable> {
    let t0 = Instant::now();
    let mut search = Search::new(&keywords, cfg.max_tries)?;

    let (signature, asso, table, adjustments) = loop {
        match search.step() {
            SearchStep::Success {
                signature,
                asso,
                table,
                adjustments,
            } => break (signature, asso, table, adjustments),
            SearchStep::Retry { signature, reason } => {
                log::debug!("[search] {signature} rejected: {reason:?}");
            }
            SearchStep::GiveUp => {
                let signatures_tried = search.signatures_tried();
                log::error!(
                    "[search] gave up after {signatures_tried} signatures ({} keywords)",
                    keywords.len()
                );
                return Err(KeywordTableError::GiveUp { signatures_tried });
            }
        }
    };

    let stats = SearchStats {
        signatures_tried: search.signatures_tried(),
        adjustments,
    };
    log::info!(
        "[search] {} keywords: signature {signature} after {} candidates, {} adjustments ({} ms)",
        keywords.len(),
        stats.signatures_tried,
        stats.adjustments,
        t0.elapsed().as_millis()
    );

    Ok(finalize(keywords, signature, asso, &table, stats))
}

fn finalize(
    keywords: Vec<Keyword>,
    signature: SignatureIndex,
    asso_values: AssociatedValues,
    table: &HashTable,
    stats: SearchStats,
) -> KeywordTable {
    let max_hash = table.keys().copied().max().unwrap_or(0);
    let mut slots = vec![None; max_hash + 1];
    for (&h, &idx) in table {
        slots[h] = Some(idx);
    }

    let (min_word_length, max_word_length) = length_range(&keywords).unwrap_or((0, 0));
    KeywordTable {
        keywords,
        signature,
        asso_values,
        slots,
        min_word_length,
        max_word_length,
        stats,
    }
}
