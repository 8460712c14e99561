//! 検証・整形パフォーマンスベンチマーク

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shirabe::json::{JsonCodec, SerdeJsonCodec};
use shirabe::validate::{DebouncedValidator, ValidatorConfig};
use std::time::{Duration, Instant};

/// ベンチマーク用のネストしたJSON文書を生成
fn sample_document(entries: usize) -> String {
    let items: Vec<String> = (0..entries)
        .map(|i| {
            format!(
                "{{\"id\":{},\"name\":\"item-{}\",\"tags\":[\"a\",\"b\"],\"nested\":{{\"ok\":true}}}}",
                i, i
            )
        })
        .collect();
    format!("{{\"items\":[{}]}}", items.join(","))
}

fn bench_validate(c: &mut Criterion) {
    let codec = SerdeJsonCodec::new();
    let small = sample_document(10);
    let large = sample_document(1000);

    c.bench_function("validate_small_document", |b| {
        b.iter(|| codec.validate(black_box(&small)))
    });

    c.bench_function("validate_large_document", |b| {
        b.iter(|| codec.validate(black_box(&large)))
    });
}

fn bench_format(c: &mut Criterion) {
    let codec = SerdeJsonCodec::new();
    let compact = sample_document(100);
    let pretty = codec.to_pretty(&compact).unwrap();

    c.bench_function("format_pretty", |b| {
        b.iter(|| codec.to_pretty(black_box(&compact)).unwrap())
    });

    c.bench_function("format_compact", |b| {
        b.iter(|| codec.to_compact(black_box(&pretty)).unwrap())
    });
}

fn bench_debounce_cycle(c: &mut Criterion) {
    let document = sample_document(100);

    c.bench_function("debounce_notify_and_poll", |b| {
        let mut validator = DebouncedValidator::new(
            SerdeJsonCodec::new(),
            ValidatorConfig {
                quiet_interval: Duration::from_millis(0),
            },
        );
        b.iter(|| {
            let now = Instant::now();
            validator.notify_change(now);
            validator.poll(now + Duration::from_millis(1), black_box(&document))
        })
    });
}

criterion_group!(benches, bench_validate, bench_format, bench_debounce_cycle);
criterion_main!(benches);
