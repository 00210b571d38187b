//! Benchmarks for taxonomy loading and similarity queries.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lexnet::path;
use lexnet::similarity;
use lexnet::store::GraphStore;

/// Write a synthetic binary-tree noun taxonomy of `n` synsets, one lemma
/// each, rooted at offset 1 (node i hangs under i/2).
fn write_corpus(dir: &Path, n: u64) {
    let mut index = String::new();
    let mut data = String::new();
    for i in 1..=n {
        writeln!(index, "w{i} n 1 1 @ 1 0 {i:08}").unwrap();
        if i == 1 {
            writeln!(data, "{i:08} 05 n 01 w{i} 0 000 | node {i}").unwrap();
        } else {
            let parent = i / 2;
            writeln!(
                data,
                "{i:08} 05 n 01 w{i} 0 001 @ {parent:08} n 0000 | node {i}"
            )
            .unwrap();
        }
    }
    fs::write(dir.join("index.noun"), index).unwrap();
    fs::write(dir.join("data.noun"), data).unwrap();
    for suffix in ["verb", "adj", "adv"] {
        fs::write(dir.join(format!("index.{suffix}")), "").unwrap();
        fs::write(dir.join(format!("data.{suffix}")), "").unwrap();
    }
}

fn bench_load(c: &mut Criterion) {
    let dir = tempfile::TempDir::new().unwrap();
    write_corpus(dir.path(), 1_000);

    c.bench_function("load_1k_synsets", |bench| {
        bench.iter(|| black_box(GraphStore::load(dir.path(), false).unwrap()))
    });
}

fn bench_hypernym_distances(c: &mut Criterion) {
    let dir = tempfile::TempDir::new().unwrap();
    write_corpus(dir.path(), 4_096);
    let store = GraphStore::load(dir.path(), false).unwrap();
    let leaf = store.synset_by_id(lexnet::PartOfSpeech::Noun, 4_095).unwrap();

    c.bench_function("hypernym_distances_depth_11", |bench| {
        bench.iter(|| black_box(path::shortest_hypernym_distances(&store, leaf, false).unwrap()))
    });
}

fn bench_path_similarity(c: &mut Criterion) {
    let dir = tempfile::TempDir::new().unwrap();
    write_corpus(dir.path(), 4_096);
    let store = GraphStore::load(dir.path(), false).unwrap();
    let a = store.synset_by_id(lexnet::PartOfSpeech::Noun, 4_095).unwrap();
    let b = store.synset_by_id(lexnet::PartOfSpeech::Noun, 2_049).unwrap();

    c.bench_function("path_similarity_cross_tree", |bench| {
        bench.iter(|| black_box(similarity::path_similarity(&store, a, b, true).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_load,
    bench_hypernym_distances,
    bench_path_similarity
);
criterion_main!(benches);
