use arxiv_authors_core::transform::{Accumulator, PaperAccumulator, PaperRow};
use arxiv_authors_core::{PaperTable, get_unique_authors, schema};

/// `n` papers with 4 authors each, drawn from a pool of `pool` names.
fn synthetic_table(n: usize, pool: usize) -> PaperTable {
    let mut acc = PaperAccumulator::new();
    let mut batches = Vec::new();
    for i in 0..n {
        let authors_parsed = (0..4)
            .map(|k| {
                let a = (i * 7 + k * 13) % pool;
                vec![
                    Some(format!("Last{a}")),
                    Some(format!("F{}", a % 26)),
                    Some(String::new()),
                ]
            })
            .collect();
        acc.push(PaperRow {
            id: format!("{i:07}"),
            authors_parsed,
            ..Default::default()
        });
        if acc.is_full() {
            batches.push(acc.take_batch().unwrap());
        }
    }
    if !acc.is_empty() {
        batches.push(acc.take_batch().unwrap());
    }
    PaperTable::new(schema::papers().clone(), batches).unwrap()
}

#[divan::bench(args = [10_000, 100_000])]
fn unique_authors(bencher: divan::Bencher, n: usize) {
    let table = synthetic_table(n, n / 3);
    bencher.bench(|| get_unique_authors(&table).unwrap().len());
}

fn main() {
    divan::main();
}
