//! End-to-end scenarios: small keyword sets through search, lookup and the
//! generator pipeline, including the failure paths that must not write output.

mod common;

use common::{init_logging, keywords, write_kw};
use kwtable::{
    GenConfig, KeywordTableError, build_keyword_table,
    tables::{Search, SearchStep, assign::RetryReason, generate},
};

#[test]
fn if_in_int_routes_every_keyword() {
    init_logging();
    let table = build_keyword_table(
        keywords(&[("if", "TOK_IF"), ("in", "TOK_IN"), ("int", "TOK_INT")]),
        &GenConfig::default(),
    )
    .unwrap();

    assert_eq!(table.min_word_length, 2);
    assert_eq!(table.max_word_length, 3);
    assert_eq!(table.payload("if"), Some("TOK_IF"));
    assert_eq!(table.payload("in"), Some("TOK_IN"));
    assert_eq!(table.payload("int"), Some("TOK_INT"));
    for word in ["is", "ifs", "", "i", "nt", "IF", "into"] {
        assert_eq!(table.payload(word), None, "{word:?} is not a keyword");
    }

    let mut hashes: Vec<usize> = ["if", "in", "int"]
        .iter()
        .map(|w| table.hash(w.as_bytes()))
        .collect();
    hashes.sort_unstable();
    hashes.dedup();
    assert_eq!(hashes.len(), 3);
}

#[test]
fn collision_outside_first_signature_forces_adjustment() {
    init_logging();
    // Same length, only offset 1 differs; signature {0} cannot tell them apart.
    let kws = keywords(&[("ab", "Tok::Ab"), ("ac", "Tok::Ac")]);

    let mut search = Search::new(&kws, 10_000).unwrap();
    assert!(matches!(
        search.step(),
        SearchStep::Retry {
            reason: RetryReason::Unresolvable { .. },
            ..
        }
    ));

    let table = build_keyword_table(kws, &GenConfig::default()).unwrap();
    assert_eq!(table.signature.offsets(), &[1]);
    assert!(table.stats.adjustments >= 1);
    assert!(table.stats.adjustments < GenConfig::default().max_tries);
    assert_eq!(table.payload("ab"), Some("Tok::Ab"));
    assert_eq!(table.payload("ac"), Some("Tok::Ac"));
    assert_eq!(table.payload("ad"), None);
}

const ABC_PERMUTATIONS: &str =
    "abc Tok::A\nacb Tok::B\nbac Tok::C\nbca Tok::D\ncab Tok::E\ncba Tok::F\n";

#[test]
fn anagrams_at_every_offset_exhaust_all_signatures() {
    init_logging();
    // Every offset subset sees the same multiset of characters twice over,
    // so each signature hits a pair with identical realized signatures.
    let kws = keywords(&[
        ("abc", "Tok::A"),
        ("acb", "Tok::B"),
        ("bac", "Tok::C"),
        ("bca", "Tok::D"),
        ("cab", "Tok::E"),
        ("cba", "Tok::F"),
    ]);
    let cfg = GenConfig::default();

    let mut search = Search::new(&kws, cfg.max_tries).unwrap();
    let mut rejected = Vec::new();
    loop {
        match search.step() {
            SearchStep::Retry { signature, reason } => {
                assert!(
                    matches!(reason, RetryReason::Unresolvable { .. }),
                    "{signature}: {reason:?}"
                );
                rejected.push(signature.offsets().to_vec());
            }
            SearchStep::GiveUp => break,
            SearchStep::Success { signature, .. } => panic!("{signature} separated anagrams"),
        }
    }
    assert_eq!(
        rejected,
        vec![vec![0], vec![1], vec![2], vec![0, 1], vec![0, 2], vec![1, 2]]
    );

    let dir = tempfile::tempdir().unwrap();
    let input = write_kw(dir.path(), "anagrams.kw", ABC_PERMUTATIONS);
    let output = dir.path().join("out").join("keyword_table.rs");
    let json = dir.path().join("table.json");
    let cfg = GenConfig {
        json_out: Some(json.clone()),
        ..cfg
    };

    match generate(&input, &output, &cfg) {
        Err(KeywordTableError::GiveUp { signatures_tried }) => assert_eq!(signatures_tried, 6),
        other => panic!("expected give-up, got {other:?}"),
    }
    assert!(!output.exists());
    assert!(!output.parent().unwrap().exists());
    assert!(!json.exists());
}

#[test]
fn attempt_cap_is_fatal_and_writes_nothing() {
    init_logging();
    // Separable under the default cap; one attempt per signature is not enough.
    let kws = keywords(&[("ab", "Tok::Ab"), ("ba", "Tok::Ba")]);
    assert!(build_keyword_table(kws.clone(), &GenConfig::default()).is_ok());

    let mut search = Search::new(&kws, 1).unwrap();
    assert!(matches!(
        search.step(),
        SearchStep::Retry {
            reason: RetryReason::TriesExhausted { tries: 1 },
            ..
        }
    ));

    let dir = tempfile::tempdir().unwrap();
    let input = write_kw(dir.path(), "pair.kw", "ab Tok::Ab\nba Tok::Ba\n");
    let output = dir.path().join("out").join("keyword_table.rs");
    let json = dir.path().join("table.json");
    let cfg = GenConfig {
        max_tries: 1,
        json_out: Some(json.clone()),
        ..GenConfig::default()
    };

    match generate(&input, &output, &cfg) {
        Err(KeywordTableError::GiveUp { signatures_tried }) => assert_eq!(signatures_tried, 3),
        other => panic!("expected give-up, got {other:?}"),
    }
    assert!(!output.exists());
    assert!(!output.parent().unwrap().exists());
    assert!(!json.exists());
}

#[test]
fn failed_run_leaves_previous_artifact_untouched() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = write_kw(dir.path(), "anagrams.kw", ABC_PERMUTATIONS);
    let output = dir.path().join("keyword_table.rs");
    std::fs::write(&output, "// previous table\n").unwrap();

    assert!(generate(&input, &output, &GenConfig::default()).is_err());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "// previous table\n");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn empty_keyword_set_is_distinct_from_give_up() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = write_kw(dir.path(), "empty.kw", "# nothing here\n\n   # still nothing\n");
    let output = dir.path().join("keyword_table.rs");

    assert!(matches!(
        generate(&input, &output, &GenConfig::default()),
        Err(KeywordTableError::EmptyKeywordSet)
    ));
    assert!(!output.exists());
}

#[test]
fn duplicate_keyword_rejected_before_search() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = write_kw(
        dir.path(),
        "dup.kw",
        "if Tok::If\nin Tok::In\n# comment\nif Tok::IfAgain\n",
    );
    let output = dir.path().join("keyword_table.rs");

    match generate(&input, &output, &GenConfig::default()) {
        Err(KeywordTableError::DuplicateKeyword {
            keyword,
            line,
            first_line,
        }) => {
            assert_eq!(keyword, "if");
            assert_eq!((line, first_line), (4, 1));
        }
        other => panic!("expected duplicate keyword, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn malformed_lines_are_skipped_and_generation_continues() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = write_kw(
        dir.path(),
        "messy.kw",
        "if Tok::If\nthis-is-not-a-record\nin Tok::In\norphan\nint Tok::Int\n",
    );
    let output = dir.path().join("keyword_table.rs");
    let json = dir.path().join("keyword_table.json");
    let cfg = GenConfig {
        payload_type: "Tok".into(),
        json_out: Some(json.clone()),
        ..GenConfig::default()
    };

    let table = generate(&input, &output, &cfg).unwrap();
    assert_eq!(table.keywords.len(), 3);
    assert!(output.exists());
    assert!(json.exists());

    let reloaded = kwtable::tables::load_table_json(&json).unwrap();
    assert_eq!(reloaded.payload("int"), Some("Tok::Int"));
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("keyword_table.rs");
    assert!(matches!(
        generate(&dir.path().join("nope.kw"), &output, &GenConfig::default()),
        Err(KeywordTableError::Io { .. })
    ));
    assert!(!output.exists());
}
