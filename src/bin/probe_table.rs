// src/bin/probe_table.rs
// Throw random identifier-shaped probes at a keyword table and count how the
// runtime lookup disposes of them. Any false positive is a hard failure.
//
// Usage:
//   cargo run --release --bin probe_table                     # builds keywords/lanius.kw
//   cargo run --release --bin probe_table -- table.json       # saved JSON dump
//   cargo run --release --bin probe_table -- other.kw
// Env:
//   PROBE_COUNT=<n>     random probes (default 1_000_000)
//   PROBE_SEED=<u64>    RNG seed (default: time-based)
//   PROBE_MAX_LEN=<n>   longest probe (default: longest keyword + 2)

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use anyhow::Context;
use kwtable::{
    GenConfig, KeywordTable,
    dev::generator::{gen_near_miss, gen_probes, sentinel_word},
    tables::{build_keyword_table, load_table_json, read_keywords, verify},
};
use rand::{SeedableRng, rngs::StdRng};

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
}

fn load(path: &Path) -> anyhow::Result<KeywordTable> {
    if path.extension().and_then(|e| e.to_str()) == Some("json") {
        return load_table_json(path).with_context(|| format!("loading {}", path.display()));
    }
    let loaded = read_keywords(path).with_context(|| format!("reading {}", path.display()))?;
    build_keyword_table(loaded.keywords, &GenConfig::from_env())
        .with_context(|| format!("building table for {}", path.display()))
}

fn run() -> anyhow::Result<bool> {
    let path = PathBuf::from(
        env::args()
            .nth(1)
            .unwrap_or_else(|| "keywords/lanius.kw".to_string()),
    );
    let table = load(&path)?;
    verify::verify_table(&table)?;

    let time_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let seed = env_u64("PROBE_SEED", time_seed);
    let count = env_usize("PROBE_COUNT", 1_000_000);
    let max_len = env_usize("PROBE_MAX_LEN", table.max_word_length + 2);

    let t0 = Instant::now();
    let mut probes = gen_probes(seed, count, max_len);
    let mut rng = StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
    for _ in 0..count / 16 {
        probes.extend(gen_near_miss(&mut rng, &table));
    }
    for len in table.min_word_length..=table.max_word_length {
        probes.extend(sentinel_word(&mut rng, &table, len));
    }
    println!(
        "[probe] {} probes (seed {seed}, max len {max_len}) generated in {} ms",
        probes.len(),
        t0.elapsed().as_millis()
    );

    let t1 = Instant::now();
    let summary = verify::summarize_probes(&table, &probes);
    println!(
        "[probe] hits={} out_of_range={} slot_mismatch={} false_positives={} ({} ms)",
        summary.keyword_hits,
        summary.out_of_range,
        summary.slot_mismatch,
        summary.false_positives,
        t1.elapsed().as_millis()
    );

    if summary.false_positives > 0 {
        for word in verify::false_positives(&table, &probes).iter().take(10) {
            eprintln!("[probe] false positive: {word:?}");
        }
        return Ok(false);
    }
    Ok(true)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
