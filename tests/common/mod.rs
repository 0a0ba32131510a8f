#![allow(dead_code)]

use std::{path::PathBuf, sync::Once};

use kwtable::{
    GenConfig, KeywordTable,
    tables::{Keyword, build_keyword_table, parse_keywords},
};

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub fn manifest_path(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(rel)
}

pub fn lanius_keywords() -> Vec<Keyword> {
    let src = include_str!("../../keywords/lanius.kw");
    let loaded = parse_keywords(src).expect("bundled keywords parse");
    assert!(loaded.skipped.is_empty(), "bundled keywords: {:?}", loaded.skipped);
    loaded.keywords
}

pub fn lanius_table() -> KeywordTable {
    init_logging();
    build_keyword_table(lanius_keywords(), &GenConfig::default()).expect("bundled keywords build")
}

pub fn keywords(pairs: &[(&str, &str)]) -> Vec<Keyword> {
    pairs.iter().map(|(w, p)| Keyword::new(*w, *p)).collect()
}

/// Writes `contents` as a keyword file inside `dir`.
pub fn write_kw(dir: &std::path::Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write keyword file");
    path
}
