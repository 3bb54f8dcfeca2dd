//! Benchmarks for rewrite matching and site configuration assembly.

use criterion::{Criterion, criterion_group, criterion_main};
use ppdocs_config::Config;
use ppdocs_site::{Locales, RewriteRuleSet, SiteConfig};

fn bench_rewrite(c: &mut Criterion) {
    let rules = RewriteRuleSet::defaults();

    let mut group = c.benchmark_group("rewrite");

    group.bench_function("exact", |b| b.iter(|| rules.rewrite("index.md")));

    group.bench_function("capture", |b| {
        b.iter(|| rules.rewrite("configuration/config-file.md"))
    });

    group.bench_function("passthrough", |b| {
        b.iter(|| rules.rewrite("public/logo.svg"))
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let config = Config::default();
    let locales = Locales::builtin();

    let mut group = c.benchmark_group("build");

    group.bench_function("sidebar", |b| b.iter(|| locales.build_sidebar("root")));

    group.bench_function("site_config", |b| {
        b.iter(|| SiteConfig::build_with(&config, &locales))
    });

    group.finish();
}

criterion_group!(benches, bench_rewrite, bench_build);
criterion_main!(benches);
