use criterion::{criterion_group, criterion_main, Criterion};
use lemru::{apply_lemma_rule, gen_lemma_rule, RuleVocab};
use pprof::criterion::{Output, PProfProfiler};

const SEED_PAIRS: &[(&str, &str)] = &[
    ("domu", "dům"),
    ("koček", "kočka"),
    ("nejnovějšímu", "nový"),
    ("Häusern", "Haus"),
    ("Katzen", "Katze"),
    ("children", "child"),
    ("mice", "mouse"),
    ("went", "go"),
    ("running", "run"),
    ("McDonald's", "McDonald"),
];

/// Repeats the seed pairs into a corpus-sized workload. Rule generation is
/// called once per corpus token during loading, so the interesting number is
/// throughput over many short words rather than a single call.
fn build_corpus(repeats: usize) -> (Vec<&'static str>, Vec<&'static str>) {
    let mut forms = Vec::with_capacity(SEED_PAIRS.len() * repeats);
    let mut lemmas = Vec::with_capacity(SEED_PAIRS.len() * repeats);
    for _ in 0..repeats {
        for (form, lemma) in SEED_PAIRS {
            forms.push(*form);
            lemmas.push(*lemma);
        }
    }
    (forms, lemmas)
}

fn benchmark_gen_lemma_rule(c: &mut Criterion) {
    let (forms, lemmas) = build_corpus(1000);
    c.bench_function("gen_lemma_rule_corpus", |b| {
        b.iter(|| {
            forms
                .iter()
                .zip(lemmas.iter())
                .map(|(form, lemma)| gen_lemma_rule(form, lemma))
                .collect::<Vec<_>>()
        })
    });
}

fn benchmark_apply_lemma_rule(c: &mut Criterion) {
    let (forms, lemmas) = build_corpus(1000);
    let rules: Vec<String> = forms
        .iter()
        .zip(lemmas.iter())
        .map(|(form, lemma)| gen_lemma_rule(form, lemma))
        .collect();
    c.bench_function("apply_lemma_rule_corpus", |b| {
        b.iter(|| {
            forms
                .iter()
                .zip(rules.iter())
                .map(|(form, rule)| apply_lemma_rule(form, rule))
                .collect::<Vec<_>>()
        })
    });
}

fn benchmark_vocab_from_pairs(c: &mut Criterion) {
    let (forms, lemmas) = build_corpus(1000);
    c.bench_function("rule_vocab_from_pairs", |b| {
        b.iter(|| RuleVocab::from_pairs(&forms, &lemmas, 2))
    });
}

criterion_group!(
    name=rule_codec_benches;
    config = Criterion::default().sample_size(100).with_profiler(PProfProfiler::new(3000, Output::Flamegraph(None)));
    targets =
    benchmark_gen_lemma_rule,
    benchmark_apply_lemma_rule,
    benchmark_vocab_from_pairs,
);
criterion_main!(rule_codec_benches);
