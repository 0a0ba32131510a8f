// src/main.rs
use std::process::ExitCode;

use kwtable::{
    GenConfig, Result,
    tables::{build_keyword_table, parse_keywords},
};

const SAMPLE_KEYWORDS: &str = include_str!("../keywords/lanius.kw");

fn run(src: &str, cfg: &GenConfig) -> Result<()> {
    let loaded = parse_keywords(src)?;
    let table = build_keyword_table(loaded.keywords, cfg)?;

    println!(
        "TABLE: {} keywords, signature {}, max hash {}",
        table.keywords.len(),
        table.signature,
        table.max_hash_value()
    );
    for word in ["while", "whilst", "doFirst", "dofirst", "in", "is", "x", "operator"] {
        let h = table.hash(word.as_bytes());
        match table.payload(word) {
            Some(kind) => println!("{word:>10}  hash={h:<4} {kind}"),
            None => println!("{word:>10}  hash={h:<4} <identifier>"),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(SAMPLE_KEYWORDS, &GenConfig::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("table error: {e}");
            ExitCode::FAILURE
        }
    }
}
