// src/tables/assign.rs
// Associated-value search for a single signature.
//
// hash(word) = len(word) + Σ asso[word[o]] over signature offsets o < len(word).
// Start from all-zero values; on the first collision bump the least used
// character that appears in exactly one of the two realized signatures.

use hashbrown::{HashMap, HashSet};

use super::{keywords::Keyword, signature::SignatureIndex};

pub const ASCII_LEN: usize = 128;

/// Associated value of a character no keyword samples.
pub const UNUSED: i32 = -1;

/// Weight of the occurrence count in the adjustment order; code point breaks ties.
const OCCURRENCE_WEIGHT: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociatedValues([i32; ASCII_LEN]);

impl AssociatedValues {
    pub fn zeroed() -> Self {
        Self([0; ASCII_LEN])
    }

    pub fn from_array(values: [i32; ASCII_LEN]) -> Self {
        Self(values)
    }

    #[inline]
    pub fn as_array(&self) -> &[i32; ASCII_LEN] {
        &self.0
    }

    /// Non-ASCII bytes read as [`UNUSED`].
    #[inline]
    pub fn get(&self, c: u8) -> i32 {
        self.0.get(c as usize).copied().unwrap_or(UNUSED)
    }

    #[inline]
    pub fn is_unused(&self, c: u8) -> bool {
        self.get(c) == UNUSED
    }

    #[inline]
    pub fn bump(&mut self, c: u8) {
        self.0[c as usize] += 1;
    }

    fn retire_unsampled(&mut self, occurrence: &OccurrenceCount) {
        for (c, v) in self.0.iter_mut().enumerate() {
            if occurrence.0[c] == 0 {
                *v = UNUSED;
            }
        }
    }
}

/// How often each character shows up at a sampled offset across the keyword set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceCount([u32; ASCII_LEN]);

impl OccurrenceCount {
    pub fn count(keywords: &[Keyword], sig: &SignatureIndex) -> Self {
        let mut counts = [0u32; ASCII_LEN];
        for kw in keywords {
            for c in sig.realize(kw.as_bytes()) {
                counts[c as usize] += 1;
            }
        }
        Self(counts)
    }

    #[inline]
    pub fn get(&self, c: u8) -> u32 {
        self.0.get(c as usize).copied().unwrap_or(0)
    }
}

/// Hash value -> index of the owning keyword.
pub type HashTable = HashMap<usize, usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryReason {
    /// The colliding keywords share the same realized character set; no
    /// single adjustment can separate them under this signature.
    Unresolvable { keyword: usize, other: usize },
    TriesExhausted { tries: usize },
}

#[derive(Debug, Clone)]
pub enum Assignment {
    Success {
        asso: AssociatedValues,
        table: HashTable,
        adjustments: usize,
    },
    Retry(RetryReason),
}

/// Hashes every keyword in order. On the first collision returns
/// `(keyword, owner)` where `owner` already holds the hash.
pub fn hash_all(
    keywords: &[Keyword],
    sig: &SignatureIndex,
    asso: &AssociatedValues,
) -> Result<HashTable, (usize, usize)> {
    let mut table = HashTable::with_capacity(keywords.len());
    for (i, kw) in keywords.iter().enumerate() {
        let h = sig.hash(kw.as_bytes(), asso);
        debug_assert!(h >= 0, "negative hash for {:?}", kw.text);
        if let Some(&owner) = table.get(&(h as usize)) {
            return Err((i, owner));
        }
        table.insert(h as usize, i);
    }
    Ok(table)
}

/// Characters in exactly one of the two realized signatures, best candidate first.
pub fn adjustment_candidates(a: &[u8], b: &[u8], occurrence: &OccurrenceCount) -> Vec<u8> {
    let a: HashSet<u8> = a.iter().copied().collect();
    let b: HashSet<u8> = b.iter().copied().collect();
    let mut candidates: Vec<u8> = a.symmetric_difference(&b).copied().collect();
    candidates.sort_unstable_by_key(|&c| occurrence.get(c) as u64 * OCCURRENCE_WEIGHT + c as u64);
    candidates
}

pub fn assign(keywords: &[Keyword], sig: &SignatureIndex, max_tries: usize) -> Assignment {
    let occurrence = OccurrenceCount::count(keywords, sig);
    let mut asso = AssociatedValues::zeroed();
    let mut adjustments = 0usize;

    for _ in 0..max_tries {
        let (keyword, other) = match hash_all(keywords, sig, &asso) {
            Ok(table) => {
                asso.retire_unsampled(&occurrence);
                return Assignment::Success {
                    asso,
                    table,
                    adjustments,
                };
            }
            Err(pair) => pair,
        };

        let candidates = adjustment_candidates(
            &sig.realize(keywords[keyword].as_bytes()),
            &sig.realize(keywords[other].as_bytes()),
            &occurrence,
        );
        let Some(&target) = candidates.first() else {
            log::debug!(
                "[assign] {sig}: `{}` and `{}` always collide",
                keywords[keyword].text,
                keywords[other].text
            );
            return Assignment::Retry(RetryReason::Unresolvable { keyword, other });
        };

        log::trace!(
            "[assign] {sig}: `{}` vs `{}` -> bump {:?}",
            keywords[keyword].text,
            keywords[other].text,
            target as char
        );
        asso.bump(target);
        adjustments += 1;
    }

    Assignment::Retry(RetryReason::TriesExhausted { tries: max_tries })
}
