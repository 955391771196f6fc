use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kopis::ranking::ranker::SimilarityRanker;
use kopis::vector::SimilarityMetric;

fn generate_test_vectors(count: usize, dimension: usize) -> Vec<Vec<f32>> {
    let mut vectors = Vec::with_capacity(count);
    for i in 0..count {
        let mut data = Vec::with_capacity(dimension);
        for j in 0..dimension {
            let value = ((i as f32 * 0.1 + j as f32 * 0.01).sin() * 0.5 + 0.5) * 2.0 - 1.0;
            data.push(value);
        }
        vectors.push(data);
    }
    vectors
}

fn bench_metrics(c: &mut Criterion) {
    let dimension = 1024;
    let vectors = generate_test_vectors(101, dimension);
    let query = &vectors[0];
    let targets = &vectors[1..101];

    let mut group = c.benchmark_group("similarity_metrics");

    for metric in [
        SimilarityMetric::DotProduct,
        SimilarityMetric::Cosine,
        SimilarityMetric::Euclidean,
    ] {
        group.bench_function(metric.name(), |b| {
            b.iter(|| {
                for target in targets {
                    let _ = black_box(
                        metric.score(black_box(query), black_box(target)).unwrap(),
                    );
                }
            })
        });
    }

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let dimension = 1024;
    let ranker = SimilarityRanker::new(SimilarityMetric::DotProduct);

    let mut group = c.benchmark_group("rank_top_10");

    for count in [100usize, 1000, 10000] {
        let vectors = generate_test_vectors(count + 1, dimension);
        let query = vectors[0].clone();
        let documents: Vec<&[f32]> = vectors[1..].iter().map(|v| v.as_slice()).collect();

        group.bench_function(format!("n_{count}"), |b| {
            b.iter(|| {
                let ranking = ranker
                    .rank_slices(black_box(&query), black_box(&documents), 10)
                    .unwrap();
                black_box(ranking)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_metrics, bench_rank);
criterion_main!(benches);
