//! Benchmarks for prompt rendering
//!
//! Tests placeholder substitution across the instruction templates.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use storyteller_common::Complexity;
use storyteller_llm::knobs::PartKnobs;
use storyteller_llm::{templates, PromptVars};

fn part_vars() -> PromptVars {
    let knobs = PartKnobs::roll();
    PromptVars::new()
        .with_var("convergence", knobs.convergence)
        .with_var("setting", knobs.setting)
        .with_var("length", knobs.length.to_string())
        .with_var("complexity", Complexity::Level(2).prompt())
}

fn bench_templates(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_template");
    let vars = part_vars();

    for template in [
        templates::STORY_PART,
        templates::MOTION_PART,
        templates::PART_IMPROV,
        templates::INITIALIZE_STORY,
    ] {
        group.bench_with_input(
            BenchmarkId::new("template", template.name()),
            &template,
            |b, template| {
                b.iter(|| template.render(black_box(&vars)));
            },
        );
    }

    // No placeholders (baseline)
    let empty = PromptVars::new();
    group.bench_function(BenchmarkId::new("template", "hello"), |b| {
        b.iter(|| templates::HELLO.render(black_box(&empty)));
    });

    group.finish();
}

fn bench_hint_vars(c: &mut Criterion) {
    let vars = PromptVars::new()
        .with_var("language", "Italian")
        .with_var("count", "2")
        .with_var("who_key", "chi")
        .with_var("who_example", "Il Papa")
        .with_var("place_key", "dove")
        .with_var("place_example", "Una casa infestata")
        .with_var("what_key", "cosa")
        .with_var("what_example", "Ha trovato un passaggio segreto in cantina.");

    c.bench_function("render_init_hints", |b| {
        b.iter(|| templates::INIT_HINTS.render(black_box(&vars)));
    });
}

fn bench_knob_roll(c: &mut Criterion) {
    c.bench_function("part_knobs_roll", |b| b.iter(PartKnobs::roll));
}

criterion_group!(benches, bench_templates, bench_hint_vars, bench_knob_roll);
criterion_main!(benches);
