use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flowcut::cs::graph::FlowNetwork;
use num_bigint::BigInt;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn layered_network(layers: usize, width: usize, big: bool) -> FlowNetwork {
    let mut rng = StdRng::seed_from_u64(42);
    let n = layers * width + 2;
    let (source, sink) = (n - 2, n - 1);
    let mut network = FlowNetwork::new(n, source, sink).unwrap();
    let scale = if big {
        BigInt::from(10).pow(60)
    } else {
        BigInt::from(1)
    };

    for v in 0..width {
        network.add_edge(source, v, &scale * 1000u32).unwrap();
        network.add_edge((layers - 1) * width + v, sink, &scale * 1000u32).unwrap();
    }
    for layer in 0..layers - 1 {
        for u in 0..width {
            for _ in 0..3 {
                let v = rng.gen_range(0..width);
                let capacity = &scale * rng.gen_range(1..100u32);
                network
                    .add_edge(layer * width + u, (layer + 1) * width + v, capacity)
                    .unwrap();
            }
        }
    }
    network
}

fn bench_max_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("edmonds_karp");
    for &(layers, width) in &[(4, 8), (8, 16), (16, 32)] {
        for big in [false, true] {
            let label = if big { "bigint" } else { "small" };
            let template = layered_network(layers, width, big);
            group.bench_with_input(
                BenchmarkId::new(label, format!("{layers}x{width}")),
                &template,
                |b, template| {
                    b.iter(|| {
                        let mut network = template.clone();
                        black_box(network.max_flow())
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_max_flow);
criterion_main!(benches);
