use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndb::parser::parse_records;
use ndb::search::search;
use std::fmt::Write;
use std::hint::black_box;

/// Generate a host database with `n` multi-line records
fn host_db(n: usize) -> String {
    let mut text = String::from("# generated\n");
    for i in 0..n {
        writeln!(
            text,
            "sys=host{i} ip=10.{}.{}.{} dom=host{i}.example.org",
            i / 65536,
            (i / 256) % 256,
            i % 256
        )
        .unwrap();
        writeln!(text, "\tether={:012x} proto=tcp proto=il", i).unwrap();
        writeln!(text, "\tmotd=\"host number {i}\"  # generated").unwrap();
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for n in [100, 1_000, 10_000] {
        let text = host_db(n);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| parse_records(black_box(text.as_bytes())).unwrap())
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    let records = parse_records(host_db(10_000).as_bytes()).unwrap();
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("exact_hit", |b| {
        b.iter(|| search([&records], black_box("sys"), black_box("host5000")))
    });
    group.bench_function("exact_miss", |b| {
        b.iter(|| search([&records], black_box("sys"), black_box("nonesuch")))
    });
    group.bench_function("presence", |b| {
        b.iter(|| search([&records], black_box("ether"), black_box("")))
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_search);
criterion_main!(benches);
