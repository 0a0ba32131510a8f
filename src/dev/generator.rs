// src/dev/generator.rs
// Random identifier-shaped probes for exercising a keyword table.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::tables::KeywordTable;

/// Characters a lexer would hand to keyword classification.
pub const IDENT_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";

pub fn gen_probe<R: Rng>(rng: &mut R, max_len: usize) -> String {
    let len = rng.random_range(0..=max_len);
    (0..len)
        .map(|_| IDENT_ALPHABET[rng.random_range(0..IDENT_ALPHABET.len())] as char)
        .collect()
}

pub fn gen_probes(seed: u64, count: usize, max_len: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| gen_probe(&mut rng, max_len)).collect()
}

/// Mutates a keyword by one character so the probe lands near real entries.
pub fn gen_near_miss<R: Rng>(rng: &mut R, table: &KeywordTable) -> Option<String> {
    if table.keywords.is_empty() {
        return None;
    }
    let kw = &table.keywords[rng.random_range(0..table.keywords.len())];
    let mut bytes = kw.as_bytes().to_vec();
    let at = rng.random_range(0..bytes.len());
    bytes[at] = IDENT_ALPHABET[rng.random_range(0..IDENT_ALPHABET.len())];
    String::from_utf8(bytes).ok()
}

/// A word of length `len` built only from identifier characters that no
/// keyword samples, or `None` when every such character is in use.
pub fn sentinel_word<R: Rng>(rng: &mut R, table: &KeywordTable, len: usize) -> Option<String> {
    let unused: Vec<u8> = IDENT_ALPHABET
        .iter()
        .copied()
        .filter(|&c| table.asso_values.is_unused(c))
        .collect();
    if unused.is_empty() {
        return None;
    }
    Some(
        (0..len)
            .map(|_| unused[rng.random_range(0..unused.len())] as char)
            .collect(),
    )
}
