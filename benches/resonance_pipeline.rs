use criterion::{black_box, criterion_group, criterion_main, Criterion};

use arkos::{ResonanceAnalyzer, ResonanceNetwork, SymbolFactory};

fn bench_resonance_pipeline(c: &mut Criterion) {
    let factory = SymbolFactory::default();
    let analyzer = ResonanceAnalyzer::default();
    let entity = factory.create("EXO:BENCH", 117.0).expect("entity");

    let mut group = c.benchmark_group("resonance_pipeline");

    group.bench_function("create_symbol", |b| {
        b.iter(|| {
            let entity = factory.create("EXO:BENCH", black_box(117.0)).expect("entity");
            black_box(entity);
        });
    });

    group.bench_function("analyze_symbol", |b| {
        b.iter(|| black_box(analyzer.analyze(&entity)));
    });

    group.bench_function("network_32", |b| {
        b.iter(|| {
            let mut network = ResonanceNetwork::default();
            for i in 0..32 {
                network
                    .create_entity(format!("EXO:BENCH-{i:03}"), None)
                    .expect("entity");
            }
            black_box(network.export());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_resonance_pipeline);
criterion_main!(benches);
