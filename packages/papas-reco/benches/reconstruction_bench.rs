//! Reconstruction benchmarks
//!
//! Synthetic events of growing size: each "jet" is a track pointing at two
//! hcals (forcing a split) plus an ecal, so both passes are exercised.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use papas_reco::config::ReconstructionConfig;
use papas_reco::features::block_graph::{Block, Edge, ElementStore};
use papas_reco::features::reconstruction::PFReconstructor;
use papas_reco::pipeline::PapasEvent;
use papas_reco::shared::models::{
    Cluster, ElementKind, Identifier, Layer, Path, Subtype, Track, Vector3,
};

fn id(kind: ElementKind, subtype: Subtype, i: u64) -> Identifier {
    Identifier::new(kind, subtype, i)
}

fn synthetic_event(jets: u64) -> PapasEvent {
    let mut store = ElementStore::new();
    let mut blocks = Vec::new();
    for j in 0..jets {
        let direction = Vector3::new(1.0, (j as f64 * 0.37).sin(), (j as f64 * 0.11).cos());
        let t = id(ElementKind::Track, Subtype::Smeared, j + 1);
        let e = id(ElementKind::EcalCluster, Subtype::Merged, j + 1);
        let h1 = id(ElementKind::HcalCluster, Subtype::Merged, 2 * j + 1);
        let h2 = id(ElementKind::HcalCluster, Subtype::Merged, 2 * j + 2);

        store.add_track(Track::new(t, direction * 10.0, 1, Path::helix(Vector3::origin())));
        store.add_cluster(Cluster::new(e, 3.0, direction, Layer::EcalIn));
        store.add_cluster(Cluster::new(h1, 15.0, direction, Layer::HcalIn));
        store.add_cluster(Cluster::new(h2, 4.0, direction, Layer::HcalIn));

        let edges = [
            Edge::linked(t, h1, 0.01),
            Edge::linked(t, h2, 0.2),
            Edge::linked(t, e, 0.05),
        ]
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
        blocks.push(Block::new(
            id(ElementKind::Block, Subtype::Reconstructed, j + 1),
            vec![t, e, h1, h2],
            edges,
        ));
    }

    let mut event = PapasEvent::new(store);
    for block in blocks {
        event.insert_block(block);
    }
    event
}

fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct_event");
    let reconstructor = PFReconstructor::new(&ReconstructionConfig::default());

    for jets in [10u64, 100, 1000] {
        group.throughput(Throughput::Elements(jets));
        group.bench_with_input(BenchmarkId::from_parameter(jets), &jets, |b, &jets| {
            b.iter_batched(
                || synthetic_event(jets),
                |mut event| black_box(reconstructor.reconstruct(&mut event).unwrap()),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_reconstruct_without_history(c: &mut Criterion) {
    let config = ReconstructionConfig::default().with_history(false);
    let reconstructor = PFReconstructor::new(&config);
    c.bench_function("reconstruct_event_no_history_100", |b| {
        b.iter_batched(
            || synthetic_event(100).without_history(),
            |mut event| black_box(reconstructor.reconstruct(&mut event).unwrap()),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_reconstruct, bench_reconstruct_without_history);
criterion_main!(benches);
