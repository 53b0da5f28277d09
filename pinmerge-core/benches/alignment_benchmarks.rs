//! Alignment throughput over synthetic mixed-script lines

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pinmerge_core::align::Aligner;
use pinmerge_core::normalize::NormalizationRules;
use pinmerge_core::repetition::repetition_found;
use pinmerge_core::script::is_chinese;
use pinmerge_core::segmenter::ScriptRunSegmenter;
use pinmerge_core::traits::{ContextAwareRomanizer, ContextFreeRomanizer};
use pinmerge_core::Result;
use std::hint::black_box;

/// Reads every Chinese character as the same syllable
struct Flat;

impl ContextFreeRomanizer for Flat {
    fn romanize(&self, segment: &str, _sandhi: bool) -> Result<Vec<String>> {
        Ok(segment
            .chars()
            .map(|c| if is_chinese(c) { "zi4".to_string() } else { c.to_string() })
            .collect())
    }
}

impl ContextAwareRomanizer for Flat {
    fn romanize_sentence(&self, sentence: &str) -> Result<Vec<String>> {
        Ok(sentence
            .chars()
            .filter(|c| is_chinese(*c))
            .map(|_| "zi4".to_string())
            .collect())
    }
}

/// Generate a line of roughly `chars` characters
fn generate_line(chars: usize) -> String {
    let base = "今天天气很好, let's go 去公园散步; 价格是100元。";
    let base_len = base.chars().count();
    base.repeat(chars / base_len + 1).chars().take(chars).collect()
}

fn bench_align_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("align_line");
    let segmenter = ScriptRunSegmenter::new();
    let rules = NormalizationRules::default();
    let aligner = Aligner::new(&segmenter, &Flat, &Flat, &rules);

    for size in [32, 256, 2048] {
        let line = generate_line(size);
        group.throughput(Throughput::Bytes(line.len() as u64));
        group.bench_with_input(BenchmarkId::new("polyphone", size), &line, |b, line| {
            b.iter(|| aligner.align_line(black_box(line), true))
        });
        group.bench_with_input(BenchmarkId::new("per_char", size), &line, |b, line| {
            b.iter(|| aligner.align_line(black_box(line), false))
        });
    }

    group.finish();
}

fn bench_repetition(c: &mut Criterion) {
    let mut group = c.benchmark_group("repetition_found");

    for size in [256, 4096] {
        let line = generate_line(size);
        group.throughput(Throughput::Bytes(line.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &line, |b, line| {
            b.iter(|| repetition_found(black_box(line), 2, usize::MAX))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_align_line, bench_repetition);
criterion_main!(benches);
