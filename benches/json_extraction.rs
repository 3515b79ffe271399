//! Benchmarks for JSON extraction from model replies
//!
//! Replies arrive bare or fenced; prose replies take the rejection path.
//! Every story operation runs through the extractor once per request.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use storyteller_llm::extract_json;

const BARE: &str = r#"{"title": "The Lost Kite", "desc": "Tom chases a kite across town."}"#;

const FENCED: &str = r#"```json
{
    "part": {
        "text": "He crept into the kitchen and found the tuna can empty!",
        "keymoment": "An empty tuna can rolling across a tiled kitchen floor.",
        "sentiment": "sad",
        "who": ["Johnny"],
        "where": "kitchen",
        "objects": ["tuna"]
    }
}
```"#;

const PROSE: &str = r#"Sure! Here are the premises you asked for:

```json
{"list": [{"title": "Moon Picnic", "desc": "Tom packs a picnic for the moon."}]}
```

Let me know if you want more."#;

fn large_reply(parts: usize) -> String {
    let list: Vec<String> = (0..parts)
        .map(|i| format!(r#"{{"title": "Premise {i}", "desc": "A story premise number {i} with some detail."}}"#))
        .collect();
    format!("```json\n{{\"list\": [{}]}}\n```", list.join(",\n"))
}

fn bench_reply_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_json");

    for (name, reply) in [("bare", BARE), ("fenced", FENCED), ("prose_rejected", PROSE)] {
        group.throughput(Throughput::Bytes(reply.len() as u64));
        group.bench_with_input(BenchmarkId::new("shape", name), &reply, |b, reply| {
            b.iter(|| extract_json(black_box(reply)));
        });
    }

    group.finish();
}

fn bench_reply_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_json_size");

    for parts in [1, 10, 100] {
        let reply = large_reply(parts);
        group.throughput(Throughput::Bytes(reply.len() as u64));
        group.bench_with_input(BenchmarkId::new("premises", parts), &reply, |b, reply| {
            b.iter(|| extract_json(black_box(reply)));
        });
    }

    group.finish();
}

fn bench_unparsable(c: &mut Criterion) {
    c.bench_function("extract_json_refusal", |b| {
        b.iter(|| extract_json(black_box("I'm sorry, I can't write that story.")));
    });
}

criterion_group!(benches, bench_reply_shapes, bench_reply_sizes, bench_unparsable);
criterion_main!(benches);
