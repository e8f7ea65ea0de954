use std::time::Instant;

use topk_hui::{MinerConfig, TopKMiner, TransactionStore};

fn hash(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

fn main() {
    let n_transactions = 20_000;
    let n_items = 120;
    let max_width = 12;

    // Deterministic synthetic data: widths 1..=max_width, skewed item popularity
    let records: Vec<Vec<(String, i32)>> = (0..n_transactions)
        .map(|t| {
            let width = (hash(t as u64 + 1) % max_width as u64) as usize + 1;
            (0..width)
                .map(|j| {
                    let h = hash((t * 31 + j) as u64 + 7);
                    let item = (h % n_items as u64) * (h % 3 + 1) % n_items as u64;
                    let utility = (h % 40) as i32 - 5;
                    (format!("i{item}"), utility)
                })
                .collect()
        })
        .collect();
    let store = TransactionStore::from_records(records);

    for parallel in [false, true] {
        let miner = TopKMiner::new(MinerConfig::default().with_k(10).with_parallel(parallel));
        let start = Instant::now();
        let result = miner.mine(&store).expect("mining failed");
        println!(
            "parallel={parallel} took {:?} (top utility {:?})",
            start.elapsed(),
            result.entries().first().map(|e| e.utility)
        );
    }
}
