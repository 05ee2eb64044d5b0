use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use headline_clusters::{Article, Pipeline, TfidfVectorizer, MAX_ARTICLES};
use std::time::Duration;

const WORDS: [&str; 24] = [
    "election", "markets", "football", "weather", "storm", "minister", "budget", "strike",
    "championship", "court", "ruling", "police", "inquiry", "energy", "prices", "transfer",
    "festival", "climate", "summit", "hospital", "waiting", "trial", "rescue", "flood",
];

/// Deterministic headline-like titles of four to six words
fn synthetic_titles(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let len = 4 + i % 3;
            (0..len)
                .map(|j| WORDS[(i * 7 + j * 5) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn synthetic_articles(n: usize) -> Vec<Article> {
    synthetic_titles(n)
        .iter()
        .enumerate()
        .map(|(i, title)| Article::new(title, format!("https://example.com/news/{}", i)).unwrap())
        .collect()
}

fn benchmark_vectorizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("vectorizer");
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    for n in [MAX_ARTICLES, 200, 2_000] {
        let titles = synthetic_titles(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &titles, |b, titles| {
            b.iter(|| {
                TfidfVectorizer::new()
                    .fit_transform(black_box(titles.as_slice()))
                    .unwrap()
            });
        });
    }
    group.finish();
}

fn benchmark_pipeline_varying_clusters(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_clusters");
    group.sample_size(20);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let articles = synthetic_articles(MAX_ARTICLES);
    let pipeline = Pipeline::default();

    for k in [2, 5, 10, 20] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| pipeline.cluster_batch(black_box(&articles), k).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_vectorizer,
    benchmark_pipeline_varying_clusters
);
criterion_main!(benches);
