use std::io::Write;

use topk_hui::{
    enumerate, load_dataset, parse_str, render, HuiError, Itemset, MinerConfig, OutputFormat,
    TopKMiner, TransactionStore,
};

fn top(store: &TransactionStore, config: MinerConfig) -> Vec<(Vec<String>, i64)> {
    let result = TopKMiner::new(config).mine(store).unwrap();
    result
        .resolve(store.vocabulary())
        .into_iter()
        .map(|r| (r.items.iter().map(|s| s.to_string()).collect(), r.utility))
        .collect()
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn parsed_dataset_ranks_like_in_memory_records() {
    let parsed = parse_str("A B:8:5 3\nA C:6:2 4\n").unwrap();
    let built = TransactionStore::from_records(vec![
        vec![("A", 5), ("B", 3)],
        vec![("A", 2), ("C", 4)],
    ]);
    let config = MinerConfig::default().with_k(2);
    let expected = vec![(owned(&["A", "B"]), 8), (owned(&["A"]), 7)];
    assert_eq!(top(&parsed, config.clone()), expected);
    assert_eq!(top(&built, config), expected);
}

#[test]
fn triple_beats_pairs_and_singletons() {
    let store = parse_str("X Y Z:3:1 1 1\n").unwrap();
    let all = top(&store, MinerConfig::default().with_k(10));
    assert_eq!(all.len(), 7);
    assert_eq!(all[0], (owned(&["X", "Y", "Z"]), 3));
    assert!(all[1..4].iter().all(|(items, u)| items.len() == 2 && *u == 2));
    assert!(all[4..].iter().all(|(items, u)| items.len() == 1 && *u == 1));
}

#[test]
fn negative_utilities_push_itemsets_down() {
    let store = parse_str("a b:1:4 -3\na b:1:4 -3\n").unwrap();
    let ranked = top(&store, MinerConfig::default().with_k(3));
    assert_eq!(
        ranked,
        vec![
            (owned(&["a"]), 8),
            (owned(&["a", "b"]), 2),
            (owned(&["b"]), -6),
        ]
    );
}

#[test]
fn file_round_trip_through_cli_formats() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "@CONVERTED_FROM_TEXT").unwrap();
    writeln!(file, "bread milk:7:4 3").unwrap();
    writeln!(file, "bread eggs:9:2 7").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "milk eggs:6:1 5").unwrap();

    let store = load_dataset(file.path()).unwrap();
    assert_eq!(store.len(), 3);

    let result = TopKMiner::new(MinerConfig::default().with_k(2).with_parallel(true))
        .mine(&store)
        .unwrap();
    let spmf = render(&result, store.vocabulary(), OutputFormat::Spmf).unwrap();
    // eggs 7+5, bread+eggs 2+7
    assert_eq!(spmf, "eggs #UTIL: 12\nbread eggs #UTIL: 9\n");
}

#[test]
fn malformed_record_reports_line() {
    let err = parse_str("a:1:1\n# fine\na b:2:1\n").unwrap_err();
    match err {
        HuiError::DataFormat { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn enumerate_is_public_and_canonical() {
    let store = TransactionStore::from_records(vec![vec![("q", 1), ("p", 2)]]);
    let sets = enumerate(&store.transactions()[0]).unwrap();
    let q = store.vocabulary().get("q").unwrap();
    let p = store.vocabulary().get("p").unwrap();
    assert_eq!(sets.len(), 3);
    assert!(sets.contains(&Itemset::from_items([p, q])));
    assert!(sets.contains(&Itemset::from_items([q, p])));
}

#[test]
fn oversized_utilities_fail_parsing_instead_of_wrapping() {
    let err = parse_str("a:0:9223372036854775807\na:0:9223372036854775807\n").unwrap_err();
    assert!(matches!(err, HuiError::DataFormat { line: 1, .. }));

    let store = parse_str("a:2147483647:2147483647\na:2147483647:2147483647\n").unwrap();
    let ranked = top(&store, MinerConfig::default().with_k(1));
    assert_eq!(ranked, vec![(owned(&["a"]), 2 * i32::MAX as i64)]);
}
