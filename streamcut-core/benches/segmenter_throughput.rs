//! Throughput benchmark for the streaming segmenter

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use streamcut_core::StreamSegmenter;

fn fragment(text: &str, size: usize) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + size).min(text.len());
        while !text.is_char_boundary(end) {
            end += 1;
        }
        fragments.push(text[start..end].to_string());
        start = end;
    }
    fragments
}

fn bench_segmenter(c: &mut Criterion) {
    let text = "The quick brown fox jumps over the lazy dog. \
                Pack my box with five dozen liquor jugs! \
                How vexingly quick daft zebras jump?\n"
        .repeat(512);
    let fragments = fragment(&text, 64);

    let mut group = c.benchmark_group("segmenter");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("sentences_64b_fragments", |b| {
        b.iter(|| {
            let segmenter = StreamSegmenter::builder()
                .sentence_callback(|s| {
                    black_box(s.len());
                })
                .build()
                .unwrap();
            black_box(segmenter.run(fragments.iter().map(String::as_str)))
        })
    });

    group.bench_function("markers_64b_fragments", |b| {
        let marked = format!("<aside>{text}</aside>");
        let marked_fragments = fragment(&marked, 64);
        b.iter(|| {
            let segmenter = StreamSegmenter::builder()
                .marker("<aside>", "</aside>", |r| {
                    black_box(r.len());
                })
                .build()
                .unwrap();
            black_box(segmenter.run(marked_fragments.iter().map(String::as_str)))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_segmenter);
criterion_main!(benches);
