// src/tables/io.rs
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::{
    ASCII_LEN, AssociatedValues, KeywordTable, SearchStats, UNUSED, emit::write_atomic,
    keywords::Keyword, signature::SignatureIndex,
};
use crate::error::{KeywordTableError, Result};

// -------------------- JSON (de)serialization --------------------

#[serde_as]
#[derive(Serialize, Deserialize)]
struct TableDisk {
    keywords: Vec<Keyword>,
    signature: Vec<usize>,
    #[serde_as(as = "[_; 128]")]
    asso_values: [i32; ASCII_LEN],
    slots: Vec<Option<usize>>,
    min_word_length: usize,
    max_word_length: usize,
    signatures_tried: usize,
    adjustments: usize,
}

impl From<&KeywordTable> for TableDisk {
    fn from(t: &KeywordTable) -> Self {
        Self {
            keywords: t.keywords.clone(),
            signature: t.signature.offsets().to_vec(),
            asso_values: *t.asso_values.as_array(),
            slots: t.slots.clone(),
            min_word_length: t.min_word_length,
            max_word_length: t.max_word_length,
            signatures_tried: t.stats.signatures_tried,
            adjustments: t.stats.adjustments,
        }
    }
}

impl TableDisk {
    fn into_table(self) -> Result<KeywordTable> {
        let signature = SignatureIndex::new(self.signature).ok_or_else(|| {
            KeywordTableError::InvalidTable("signature offsets must be strictly increasing".into())
        })?;

        let n = self.keywords.len();
        let mut owners = vec![0usize; n];
        for &i in self.slots.iter().flatten() {
            if i >= n {
                return Err(KeywordTableError::InvalidTable(format!(
                    "slot points at keyword #{i}, table has {n}"
                )));
            }
            owners[i] += 1;
        }
        if let Some(i) = owners.iter().position(|&c| c != 1) {
            return Err(KeywordTableError::InvalidTable(format!(
                "keyword `{}` occupies {} slots",
                self.keywords[i].text, owners[i]
            )));
        }

        let max_hash = self.slots.len().saturating_sub(1);
        if let Some(c) = self
            .asso_values
            .iter()
            .position(|&v| v != UNUSED && !(0..=max_hash as i64).contains(&(v as i64)))
        {
            return Err(KeywordTableError::InvalidTable(format!(
                "associated value {} for {:?} outside -1..={max_hash}",
                self.asso_values[c], c as u8 as char
            )));
        }

        Ok(KeywordTable {
            keywords: self.keywords,
            signature,
            asso_values: AssociatedValues::from_array(self.asso_values),
            slots: self.slots,
            min_word_length: self.min_word_length,
            max_word_length: self.max_word_length,
            stats: SearchStats {
                signatures_tried: self.signatures_tried,
                adjustments: self.adjustments,
            },
        })
    }
}

/// Pretty JSON, written through the same temp-file-and-rename path as the source.
pub fn save_table_json(path: &Path, t: &KeywordTable) -> Result<()> {
    let data = serde_json::to_vec_pretty(&TableDisk::from(t))?;
    write_atomic(path, &data)
}

pub fn load_table_json_bytes(data: &[u8]) -> Result<KeywordTable> {
    serde_json::from_slice::<TableDisk>(data)?.into_table()
}

pub fn load_table_json(path: &Path) -> Result<KeywordTable> {
    let data = std::fs::read(path).map_err(|e| KeywordTableError::io(path, e))?;
    load_table_json_bytes(&data)
}
