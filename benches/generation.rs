use criterion::{criterion_group, criterion_main, Criterion};
use pedgen::export::{format_ped, PedDelimiter, PedigreeGraph};
use pedgen::{generate_pedigree, GeneratorConfig, InheritanceModel};

fn bench_generation(c: &mut Criterion) {
    let default_config = GeneratorConfig::default().with_seed(1);
    c.bench_function("generate_default_3gen", |b| {
        b.iter(|| generate_pedigree(&default_config))
    });

    let sprawling = GeneratorConfig::sprawling().with_seed(1);
    c.bench_function("generate_sprawling_5gen", |b| {
        b.iter(|| generate_pedigree(&sprawling))
    });

    c.bench_function("inheritance_model_build", |b| {
        b.iter(|| InheritanceModel::new(0.1))
    });

    let pedigree = generate_pedigree(&sprawling).unwrap();
    c.bench_function("ped_export_sprawling", |b| {
        b.iter(|| format_ped(&pedigree, PedDelimiter::Tab))
    });

    c.bench_function("graph_dot_sprawling", |b| {
        b.iter(|| PedigreeGraph::from_pedigree(&pedigree).to_dot("bench"))
    });
}

criterion_group!(benches, bench_generation);
criterion_main!(benches);
