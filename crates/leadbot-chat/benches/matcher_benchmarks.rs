//! Benchmarks for utterance routing.
//!
//! Measures the cost of a full engine turn for the three common shapes of
//! input: a square-footage quote, a keyword question, and an unmatched
//! message that falls through every rule.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use leadbot_chat::{ConversationEngine, IntentMatcher};

const QUOTE: &str = "I have a leak and need help, my roof is 2000 sq ft";
const KEYWORD: &str = "What kind of warranty do you offer on a full replacement?";
const UNMATCHED: &str =
    "Hi, I was referred by my neighbour down the street and wanted to say hello before the storm season.";

fn bench_matcher(c: &mut Criterion) {
    let matcher = IntentMatcher::default();
    let lowered = UNMATCHED.to_lowercase();

    c.bench_function("extract_quote_hit", |b| {
        b.iter(|| matcher.extract_quote(black_box(QUOTE)))
    });
    c.bench_function("extract_quote_miss", |b| {
        b.iter(|| matcher.extract_quote(black_box(UNMATCHED)))
    });
    c.bench_function("keyword_miss", |b| {
        b.iter(|| {
            matcher.match_phrase(black_box(&lowered));
            matcher.match_keyword(black_box(&lowered))
        })
    });
}

fn bench_turns(c: &mut Criterion) {
    let engine = ConversationEngine::default();

    for (name, text) in [("turn_quote", QUOTE), ("turn_keyword", KEYWORD), ("turn_unmatched", UNMATCHED)] {
        c.bench_function(name, |b| {
            b.iter_batched(
                || {
                    let mut state = engine.start();
                    // Leave the collection flow so every rule is consulted.
                    for step in ["Jane", "555-0100", "jane@example.com"] {
                        engine.handle_user_turn(&mut state, step);
                    }
                    state
                },
                |mut state| engine.handle_user_turn(&mut state, black_box(text)),
                criterion::BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(benches, bench_matcher, bench_turns);
criterion_main!(benches);
