//! Catalogue loading and message formatting benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rpchat::models::{Format, Settings};
use rpchat::services::{AutoFormatter, BUFF_CORPUS, BuffRepository, GameData, SettingsBackend};
use std::hint::black_box;
use std::sync::Arc;

struct NullBackend;

impl SettingsBackend for NullBackend {
    fn save_settings(&self, _settings: &Settings) -> anyhow::Result<()> {
        Ok(())
    }

    fn request_notification_permission(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

fn formatter() -> AutoFormatter {
    let settings = Settings {
        apply_auto_formats: true,
        auto_formats: vec![
            Format {
                bold: true,
                ..Format::default()
            },
            Format {
                start_tag: "*".to_string(),
                end_tag: "*".to_string(),
                italic: true,
                exclude_tags: true,
                ..Format::default()
            },
            Format {
                start_tag: "((".to_string(),
                end_tag: "))".to_string(),
                color: "gray".to_string(),
                ..Format::default()
            },
        ],
        ..Settings::default()
    };
    AutoFormatter::new(settings, Arc::new(NullBackend))
}

fn bench_corpus(c: &mut Criterion) {
    c.bench_function("buff_catalogue", |b| {
        b.iter(|| BuffRepository::from_corpus(black_box(BUFF_CORPUS)))
    });
    c.bench_function("game_data_load", |b| b.iter(GameData::load));
}

fn bench_formatting(c: &mut Criterion) {
    let formatter = formatter();
    let mut group = c.benchmark_group("apply_formats");

    for repeats in [1usize, 10, 100] {
        let message = r#"*waves* "Hello there," she said. ((brb)) "#.repeat(repeats);
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &message, |b, message| {
            b.iter(|| formatter.apply_formats(black_box(message), Some("alice")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_corpus, bench_formatting);
criterion_main!(benches);
