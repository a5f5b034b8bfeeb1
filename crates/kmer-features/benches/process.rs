use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kmer_features::{FeatureConfig, FeatureGenerator, AMINO_ACIDS};

/// Deterministic pool of CDR3-like sequences for `n_samples` samples
fn synthetic_repertoire(n_samples: usize, seqs_per_sample: usize) -> Vec<String> {
    let symbols: Vec<char> = AMINO_ACIDS.chars().collect();
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    (0..n_samples)
        .map(|_| {
            (0..seqs_per_sample)
                .map(|_| {
                    let len = 10 + (next() % 8) as usize;
                    let body: String = (0..len)
                        .map(|_| symbols[(next() % symbols.len() as u64) as usize])
                        .collect();
                    format!("CASS{}F", body)
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");

    for &n_samples in &[4usize, 16] {
        let data = synthetic_repertoire(n_samples, 200);
        let bytes: usize = data.iter().map(String::len).sum();
        group.throughput(Throughput::Bytes(bytes as u64));

        group.bench_with_input(BenchmarkId::new("string_p3", n_samples), &data, |b, data| {
            let mut generator = FeatureGenerator::new(FeatureConfig::string(3)).unwrap();
            b.iter(|| generator.process(black_box(data.as_slice())).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("fisher_p3", n_samples), &data, |b, data| {
            let mut generator = FeatureGenerator::new(FeatureConfig::fisher(3)).unwrap();
            b.iter(|| generator.process(black_box(data.as_slice())).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_process);
criterion_main!(benches);
