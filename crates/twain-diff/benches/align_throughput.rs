//! Benchmarks: unified diff parsing and alignment throughput.
//!
//! Run with: cargo bench --package twain-diff

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use twain_diff::{Aligner, DiffComputer};

// ── Data generators ──

/// A file of `n` lines and a copy where every 7th line is replaced and every
/// 11th line gets an inserted neighbour, plus the matching unified diff.
fn gen_pair(n: usize) -> (Vec<String>, Vec<String>, String) {
    let from: Vec<String> = (0..n).map(|i| format!("fn line_{i}() {{}}")).collect();
    let mut to = Vec::with_capacity(n + n / 11);
    // The parser only reads the start lines of a hunk header.
    let mut diff = format!("--- from\n+++ to\n@@ -1,{n} +1,{n} @@\n");
    for (i, line) in from.iter().enumerate() {
        if i % 7 == 3 {
            diff.push_str(&format!("-{line}\n+changed {i}\n"));
            to.push(format!("changed {i}"));
        } else {
            diff.push_str(&format!(" {line}\n"));
            to.push(line.clone());
        }
        if i % 11 == 5 {
            diff.push_str(&format!("+inserted {i}\n"));
            to.push(format!("inserted {i}"));
        }
    }
    (from, to, diff)
}

// ── Benchmarks ──

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_unified");
    for &n in &[1_000usize, 10_000, 100_000] {
        let (_, _, diff) = gen_pair(n);
        group.throughput(Throughput::Bytes(diff.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &diff, |b, diff| {
            b.iter(|| DiffComputer::new().compute_str(black_box(diff)))
        });
    }
    group.finish();
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align");
    for &n in &[1_000usize, 10_000, 100_000] {
        let (from, to, diff) = gen_pair(n);
        let changes = DiffComputer::new().compute_str(&diff);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &changes, |b, changes| {
            b.iter(|| Aligner::new().align(black_box(&from), black_box(&to), changes))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_align);
criterion_main!(benches);
