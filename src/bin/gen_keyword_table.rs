// src/bin/gen_keyword_table.rs
// Build the keyword perfect hash table and write it as Rust source.
// Usage:
//   cargo run --bin gen_keyword_table                         # keywords/lanius.kw -> generated/keyword_table.rs
//   cargo run --bin gen_keyword_table -- in.kw out.rs
//   KWTABLE_JSON=tables/keywords.json cargo run --bin gen_keyword_table
//
// Exits non-zero without touching the output when no collision-free table exists.

use std::{env, path::PathBuf, process::ExitCode};

use anyhow::Context;
use kwtable::{GenConfig, KeywordTableError, tables::generate};

fn run() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| "keywords/lanius.kw".to_string()));
    let output = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "generated/keyword_table.rs".to_string()),
    );
    let cfg = GenConfig::from_env();

    println!(
        "[gen_keyword_table] {} -> {} (max tries {}, payload {})",
        input.display(),
        output.display(),
        cfg.max_tries,
        cfg.payload_type
    );

    let table = generate(&input, &output, &cfg).with_context(|| {
        format!("failed to generate keyword table from {}", input.display())
    })?;

    println!(
        "[gen_keyword_table] {} keywords, length {}..={}, signature {}, max hash {}",
        table.keywords.len(),
        table.min_word_length,
        table.max_word_length,
        table.signature,
        table.max_hash_value()
    );
    println!(
        "[gen_keyword_table] {} signatures tried, {} adjustments",
        table.stats.signatures_tried, table.stats.adjustments
    );
    println!("[gen_keyword_table] wrote {}", output.display());
    if let Some(json) = &cfg.json_out {
        println!("[gen_keyword_table] wrote {}", json.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if matches!(
                e.downcast_ref::<KeywordTableError>(),
                Some(KeywordTableError::GiveUp { .. })
            ) {
                eprintln!("         no table written; try a larger KWTABLE_MAX_TRIES");
            }
            ExitCode::FAILURE
        }
    }
}
