// src/tables/signature.rs
// Keyword signatures: which character offsets of every keyword feed the hash.

use std::fmt;

use super::assign::AssociatedValues;

/// Strictly increasing character offsets sampled from every keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureIndex(Vec<usize>);

impl SignatureIndex {
    pub fn new(offsets: Vec<usize>) -> Option<Self> {
        if offsets.is_empty() || offsets.windows(2).any(|w| w[0] >= w[1]) {
            return None;
        }
        Some(Self(offsets))
    }

    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Offsets that exist in a word of length `len`.
    #[inline]
    pub fn sampled(&self, len: usize) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied().filter(move |&o| o < len)
    }

    /// The realized signature: the characters `word` has at the sampled offsets.
    pub fn realize(&self, word: &[u8]) -> Vec<u8> {
        self.sampled(word.len()).map(|o| word[o]).collect()
    }

    /// `len(word) + sum of asso[word[o]]` over the sampled offsets.
    pub fn hash(&self, word: &[u8], asso: &AssociatedValues) -> i64 {
        let mut h = word.len() as i64;
        for o in self.sampled(word.len()) {
            h += asso.get(word[o]) as i64;
        }
        h
    }
}

impl fmt::Display for SignatureIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Lazy enumeration of candidate signatures, cheapest first.
///
/// Starts at `{0}`; singletons range over `[0, min_len)`, longer signatures
/// over `[0, max_len)`. Finite and never repeats; rebuild it from
/// `(min_len, max_len)` to start over.
#[derive(Debug, Clone)]
pub struct SignatureIndexes {
    current: Option<Vec<usize>>,
    min_len: usize,
    max_len: usize,
    max_sig_len: usize,
}

impl SignatureIndexes {
    pub fn new(min_len: usize, max_len: usize) -> Self {
        assert!(
            0 < min_len && min_len <= max_len,
            "invalid keyword length range {min_len}..={max_len}"
        );
        // Sets of one length still get two-offset signatures to fall back on.
        let max_sig_len = (max_len - min_len + 1).max(max_len.min(2));
        Self {
            current: Some(vec![0]),
            min_len,
            max_len,
            max_sig_len,
        }
    }

    /// Longest signature this enumerator will produce.
    pub fn max_signature_len(&self) -> usize {
        self.max_sig_len
    }

    fn advance(&self, sig: &[usize]) -> Option<Vec<usize>> {
        let mut next = sig.to_vec();
        let length = next.len();
        let bound = if length > 1 { self.max_len } else { self.min_len };

        if next[length - 1] + 1 < bound {
            next[length - 1] += 1;
            return Some(next);
        }
        if length == 1 {
            return (self.max_sig_len >= 2).then(|| vec![0, 1]);
        }

        // Rightmost gap: the offset that still has room before its successor.
        let mut index = length - 1;
        while index > 0 {
            index -= 1;
            if next[index] + 1 != next[index + 1] {
                break;
            }
        }

        if index > 0 {
            let start = next[index] + 1;
            fill_run(&mut next[index..], start);
            Some(next)
        } else if next[0] + 1 < self.min_len && next[0] + length < self.max_len {
            fill_run(&mut next, sig[0] + 1);
            Some(next)
        } else if length < self.max_sig_len {
            Some((0..=length).collect())
        } else {
            None
        }
    }
}

#[inline]
fn fill_run(slots: &mut [usize], start: usize) {
    for (i, slot) in slots.iter_mut().enumerate() {
        *slot = start + i;
    }
}

impl Iterator for SignatureIndexes {
    type Item = SignatureIndex;

    fn next(&mut self) -> Option<SignatureIndex> {
        let sig = self.current.take()?;
        self.current = self.advance(&sig);
        Some(SignatureIndex(sig))
    }
}
