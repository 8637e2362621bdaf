//! Benchmarking record decoding, using tiny files
extern crate criterion;
use criterion::{criterion_group, criterion_main, Criterion};

use rinex_stream::prelude::{NavDecoder, NavStats, ObsDecoder};

fn obs_decoding(path: &str) {
    let decoder = ObsDecoder::from_file(path).unwrap();
    for epoch in decoder {
        let _ = epoch.unwrap();
    }
}

fn nav_decoding(path: &str, fast: bool) {
    let decoder = NavDecoder::from_file(path).unwrap().fast_mode(fast);
    for eph in decoder {
        let _ = eph.unwrap();
    }
}

fn benchmark(c: &mut Criterion) {
    let mut decoding_grp = c.benchmark_group("decoding");

    // Small RINEX OBS (V2)
    decoding_grp.bench_function("OBS/V2", |b| {
        b.iter(|| {
            obs_decoding("test_resources/OBS/V2/delf0010.21o");
        })
    });

    // Small RINEX OBS (V3)
    decoding_grp.bench_function("OBS/V3", |b| {
        b.iter(|| {
            obs_decoding("test_resources/OBS/V3/ACOR00ESP_R_20183101900_01H_30S_MO.rnx");
        })
    });

    decoding_grp.bench_function("NAV/V3", |b| {
        b.iter(|| {
            nav_decoding("test_resources/NAV/V3/BRDC00WRD_R_20201690000_01D_MN.rnx", false);
        })
    });

    decoding_grp.bench_function("NAV/V3/fast", |b| {
        b.iter(|| {
            nav_decoding("test_resources/NAV/V3/BRDC00WRD_R_20201690000_01D_MN.rnx", true);
        })
    });

    decoding_grp.finish();

    let mut stats_grp = c.benchmark_group("stats");
    stats_grp.bench_function("NAV/V2", |b| {
        b.iter(|| {
            let decoder = NavDecoder::from_file("test_resources/NAV/V2/brdc1690.20n").unwrap();
            let _ = NavStats::from_decoder(decoder).unwrap();
        })
    });
    stats_grp.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
