//! Criterion benchmarks for the preferences XML codec.
//!
//! Encoding runs on every save and decoding once per candidate location at
//! start-up, so both are measured for a default record and for one with
//! long folder paths that need escaping.
//!
//! Run with:
//! ```bash
//! cargo bench --package prefs-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use prefs_core::{decode, encode, ButtonMap, EncodeOptions, Platform, SettingsRecord};

const OPTIONS: EncodeOptions<'static> = EncodeOptions {
    app_name: "FCE Ultra GX",
    app_version: "3.5.3",
    platform: Platform::Wii,
    budget: 512 * 1024,
};

// ── Record fixtures ───────────────────────────────────────────────────────────

fn make_default() -> SettingsRecord {
    SettingsRecord::default()
}

fn make_long_paths() -> SettingsRecord {
    let mut record = SettingsRecord::default();
    let long = "games & <demos>/".repeat(60);
    record.load_folder = long.clone();
    record.last_file_loaded = format!("{long}Super Mario Bros. (W) [!].nes");
    record.save_folder = long;
    record
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_encode(c: &mut Criterion) {
    let records = [("default", make_default()), ("long_paths", make_long_paths())];
    let buttons = ButtonMap::default();

    let mut group = c.benchmark_group("encode");
    for (name, record) in &records {
        group.bench_with_input(BenchmarkId::new("record", name), record, |b, record| {
            b.iter(|| encode(black_box(record), black_box(&buttons), &OPTIONS).unwrap())
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let records = [("default", make_default()), ("long_paths", make_long_paths())];
    let buttons = ButtonMap::default();

    let mut group = c.benchmark_group("decode");
    for (name, record) in &records {
        let bytes = encode(record, &buttons, &OPTIONS).expect("encode must succeed for benchmark setup");
        group.bench_with_input(BenchmarkId::new("record", name), &bytes, |b, bytes| {
            b.iter(|| {
                let mut record = SettingsRecord::default();
                let mut buttons = ButtonMap::default();
                decode(black_box(bytes), &mut record, &mut buttons).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
