// Keyword table for `if_in_int.kw`.
// @generated by gen_keyword_table. DO NOT EDIT.
//
// Signature offsets: [1]

pub const MIN_WORD_LENGTH: usize = 2;
pub const MAX_WORD_LENGTH: usize = 3;
pub const MAX_HASH_VALUE: usize = 4;

// Characters no keyword samples hold MAX_HASH_VALUE + 1.
static ASSO_VALUES: [u8; 128] = [
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 2, 5, 5, 5, 5, 5, 5, 5,
    0, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5,
];

#[inline]
fn asso(byte: u8) -> usize {
    match ASSO_VALUES.get(byte as usize) {
        Some(&v) => v as usize,
        None => MAX_HASH_VALUE + 1,
    }
}

fn hash(word: &[u8]) -> usize {
    let mut hval = word.len();
    match word.len() {
        2.. => {
            hval += asso(word[1]);
        }
        _ => {}
    }
    hval
}

static WORDLIST: [(&str, Option<Tok>); MAX_HASH_VALUE + 1] = [
    ("", None),
    ("", None),
    ("in", Some(Tok::In)),
    ("int", Some(Tok::Int)),
    ("if", Some(Tok::If)),
];

pub fn lookup(word: &str) -> Option<Tok> {
    if !(MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&word.len()) {
        return None;
    }
    let key = hash(word.as_bytes());
    if key > MAX_HASH_VALUE {
        return None;
    }
    match WORDLIST[key] {
        (name, Some(kind)) if name == word => Some(kind),
        _ => None,
    }
}
