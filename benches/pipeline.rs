//! Benchmarks for the splatter pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use splatter::types::{Colour, Palette, Raster, SheetRule, SheetRuleSet, SourceImage};
use splatter::{compose, match_rules, render::encode_png};

// -- Matching benchmarks --

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");

    let directions = ["n", "ne", "e", "se", "s", "sw", "w", "nw"];
    let mut files = Vec::new();
    for prefix in ["hero", "slime", "bat", "knight"] {
        for dir in directions {
            for frame in 0..16 {
                files.push(format!("{}_{:02}_{}.png", prefix, frame, dir));
            }
        }
    }
    files.push("readme.txt".to_string());

    let rules = SheetRuleSet::new(vec![
        SheetRule::with_prefixes(&["hero", "knight"], &directions),
        SheetRule::with_prefixes(&["slime", "bat"], &directions),
    ]);

    group.bench_function("match_rules_512_frames", |b| {
        b.iter(|| match_rules(black_box(&rules), files.iter().cloned()))
    });

    group.finish();
}

// -- Composition benchmarks --

fn direct_frames(count: usize, size: u32) -> Vec<SourceImage> {
    (0..count)
        .map(|i| {
            let pixels = (0..size * size)
                .map(|p| Colour::rgb((p % 256) as u8, (i * 16 % 256) as u8, 128))
                .collect();
            Raster::direct(size, size, pixels).unwrap()
        })
        .collect()
}

fn indexed_frames(count: usize, size: u32) -> Vec<SourceImage> {
    let palette = Palette::new((0..16).map(|i| Colour::rgb(i * 16, i * 16, i * 16)).collect()).unwrap();
    (0..count)
        .map(|_| {
            let indices = (0..size * size).map(|p| (p % 15) as u8 + 1).collect();
            Raster::indexed(size, size, palette.clone(), indices).unwrap()
        })
        .collect()
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");

    let direct = direct_frames(16, 64);
    let indexed = indexed_frames(16, 64);
    let mask = Raster::direct(
        64,
        64,
        (0..64 * 64)
            .map(|p| if p % 3 == 0 { Colour::BLACK } else { Colour::TRANSPARENT })
            .collect(),
    )
    .unwrap();

    group.bench_function("compose_direct", |b| {
        b.iter(|| compose(black_box(&direct), None, 1).unwrap())
    });

    group.bench_function("compose_direct_masked", |b| {
        b.iter(|| compose(black_box(&direct), Some(&mask), 1).unwrap())
    });

    group.bench_function("compose_indexed_masked", |b| {
        b.iter(|| compose(black_box(&indexed), Some(&mask), 1).unwrap())
    });

    group.finish();
}

// -- Encoding benchmarks --

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");

    let direct = compose(&direct_frames(16, 64), None, 0).unwrap();
    let indexed = compose(&indexed_frames(16, 64), None, 0).unwrap();

    group.bench_function("encode_direct", |b| {
        b.iter(|| encode_png(black_box(&direct)).unwrap())
    });

    group.bench_function("encode_indexed", |b| {
        b.iter(|| encode_png(black_box(&indexed)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_matching, bench_compose, bench_encoding);
criterion_main!(benches);
