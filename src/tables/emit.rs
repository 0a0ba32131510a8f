// src/tables/emit.rs
// Renders a finalized table as Rust source for the lexer.
//
// Output is a pure function of the table and options (no timestamps), so
// regenerating from unchanged keywords never produces a diff.

use std::{
    fmt::{self, Write as _},
    io::Write as _,
    path::Path,
};

use tempfile::NamedTempFile;

use super::{ASCII_LEN, KeywordTable};
use crate::error::{KeywordTableError, Result};

const ASSO_PER_ROW: usize = 10;
const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Type of the payload expressions; must be `Copy`.
    pub payload_type: String,
    /// Name of the keyword definition file, quoted in the header.
    pub source_name: String,
}

pub fn render_rust(table: &KeywordTable, opts: &EmitOptions) -> String {
    let mut out = String::new();
    write_table(&mut out, table, opts).expect("formatting into a String is infallible");
    out
}

fn write_table(w: &mut String, table: &KeywordTable, opts: &EmitOptions) -> fmt::Result {
    writeln!(w, "// Keyword table for `{}`.", opts.source_name)?;
    writeln!(w, "// @generated by gen_keyword_table. DO NOT EDIT.")?;
    writeln!(w, "//")?;
    writeln!(w, "// Signature offsets: {}", table.signature)?;
    writeln!(w)?;
    writeln!(w, "pub const MIN_WORD_LENGTH: usize = {};", table.min_word_length)?;
    writeln!(w, "pub const MAX_WORD_LENGTH: usize = {};", table.max_word_length)?;
    writeln!(w, "pub const MAX_HASH_VALUE: usize = {};", table.max_hash_value())?;
    writeln!(w)?;
    write_asso_values(w, table)?;
    writeln!(w)?;
    write_hash_fn(w, table)?;
    writeln!(w)?;
    write_wordlist(w, table, opts)?;
    writeln!(w)?;
    write_lookup_fn(w, opts)
}

fn elem_type(max: usize) -> &'static str {
    if max <= u8::MAX as usize {
        "u8"
    } else if max <= u16::MAX as usize {
        "u16"
    } else {
        "u32"
    }
}

fn write_asso_values(w: &mut String, table: &KeywordTable) -> fmt::Result {
    let sentinel = table.sentinel();
    let width = sentinel.to_string().len();
    let values = table.dense_asso_values();

    writeln!(w, "// Characters no keyword samples hold MAX_HASH_VALUE + 1.")?;
    writeln!(
        w,
        "static ASSO_VALUES: [{}; {ASCII_LEN}] = [",
        elem_type(sentinel)
    )?;
    for row in values.chunks(ASSO_PER_ROW) {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>width$}")).collect();
        writeln!(w, "{INDENT}{},", cells.join(", "))?;
    }
    writeln!(w, "];")?;
    writeln!(w)?;
    writeln!(w, "#[inline]")?;
    writeln!(w, "fn asso(byte: u8) -> usize {{")?;
    writeln!(w, "{INDENT}match ASSO_VALUES.get(byte as usize) {{")?;
    writeln!(w, "{INDENT}{INDENT}Some(&v) => v as usize,")?;
    writeln!(w, "{INDENT}{INDENT}None => MAX_HASH_VALUE + 1,")?;
    writeln!(w, "{INDENT}}}")?;
    writeln!(w, "}}")
}

/// Length arms, longest first: each arm covers the lengths that reach the
/// same set of offsets and adds them from the largest offset down.
fn length_arms(offsets: &[usize]) -> Vec<(String, Vec<usize>)> {
    let mut desc = offsets.to_vec();
    desc.sort_unstable_by(|a, b| b.cmp(a));

    let mut arms = Vec::with_capacity(desc.len());
    for (i, &o) in desc.iter().enumerate() {
        let lower = o + 1;
        let pattern = match i.checked_sub(1).map(|j| desc[j]) {
            None => format!("{lower}.."),
            Some(upper) if upper == lower => lower.to_string(),
            Some(upper) => format!("{lower}..={upper}"),
        };
        arms.push((pattern, desc[i..].to_vec()));
    }
    arms
}

fn write_hash_fn(w: &mut String, table: &KeywordTable) -> fmt::Result {
    writeln!(w, "fn hash(word: &[u8]) -> usize {{")?;
    writeln!(w, "{INDENT}let mut hval = word.len();")?;
    writeln!(w, "{INDENT}match word.len() {{")?;
    for (pattern, offsets) in length_arms(table.signature.offsets()) {
        writeln!(w, "{INDENT}{INDENT}{pattern} => {{")?;
        for o in offsets {
            writeln!(w, "{INDENT}{INDENT}{INDENT}hval += asso(word[{o}]);")?;
        }
        writeln!(w, "{INDENT}{INDENT}}}")?;
    }
    writeln!(w, "{INDENT}{INDENT}_ => {{}}")?;
    writeln!(w, "{INDENT}}}")?;
    writeln!(w, "{INDENT}hval")?;
    writeln!(w, "}}")
}

fn write_wordlist(w: &mut String, table: &KeywordTable, opts: &EmitOptions) -> fmt::Result {
    writeln!(
        w,
        "static WORDLIST: [(&str, Option<{}>); MAX_HASH_VALUE + 1] = [",
        opts.payload_type
    )?;
    for h in 0..=table.max_hash_value() {
        match table.slot(h) {
            Some(kw) => writeln!(w, "{INDENT}({:?}, Some({})),", kw.text, kw.payload)?,
            None => writeln!(w, "{INDENT}(\"\", None),")?,
        }
    }
    writeln!(w, "];")
}

fn write_lookup_fn(w: &mut String, opts: &EmitOptions) -> fmt::Result {
    writeln!(
        w,
        "pub fn lookup(word: &str) -> Option<{}> {{",
        opts.payload_type
    )?;
    writeln!(
        w,
        "{INDENT}if !(MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&word.len()) {{"
    )?;
    writeln!(w, "{INDENT}{INDENT}return None;")?;
    writeln!(w, "{INDENT}}}")?;
    writeln!(w, "{INDENT}let key = hash(word.as_bytes());")?;
    writeln!(w, "{INDENT}if key > MAX_HASH_VALUE {{")?;
    writeln!(w, "{INDENT}{INDENT}return None;")?;
    writeln!(w, "{INDENT}}}")?;
    writeln!(w, "{INDENT}match WORDLIST[key] {{")?;
    writeln!(
        w,
        "{INDENT}{INDENT}(name, Some(kind)) if name == word => Some(kind),"
    )?;
    writeln!(w, "{INDENT}{INDENT}_ => None,")?;
    writeln!(w, "{INDENT}}}")?;
    writeln!(w, "}}")
}

/// Writes `text` to `path` through a temporary file in the same directory,
/// so a failed run never leaves a truncated artifact behind.
pub fn write_source(path: &Path, text: &str) -> Result<()> {
    write_atomic(path, text.as_bytes())
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| KeywordTableError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| KeywordTableError::io(dir, e))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| KeywordTableError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| KeywordTableError::io(path, e.error))?;
    Ok(())
}
