use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hopscotch_lint::profile::ProfileRegistry;
use hopscotch_lint::validation::validate_document;
use hopscotch_lint::Profile;

/// Generate a document with `blocks` fenced blocks for a given scenario.
fn generate_document(blocks: usize, scenario: &str) -> String {
    let mut doc = String::from("---\nhopscotchVersion: 0.3.0\n---\n\n");
    doc.push_str("```hopscotch:world id=world.main\nname: Aerth\n```\n");

    for i in 0..blocks {
        let block = match scenario {
            "all_valid" => format!(
                "```hopscotch:npc id=npc.n{i}\nname: Npc {i}\nscope: world.main\n```\n"
            ),
            "missing_required" => match i % 3 {
                0 => format!("```hopscotch:npc id=npc.n{i}\nname: Npc {i}\n```\n"),
                1 => format!(
                    "```hopscotch:clock id=clock.c{i}\nname: Clock {i}\nscope: world.main\n```\n"
                ),
                _ => format!(
                    "```hopscotch:npc id=npc.n{i}\nname: Npc {i}\nscope: world.main\n```\n"
                ),
            },
            "unknown_types" => match i % 4 {
                0 => format!("```hopscotch:castle id=castle.c{i}\nname: Castle {i}\n```\n"),
                _ => format!(
                    "```hopscotch:npc id=npc.n{i}\nname: Npc {i}\nscope: world.main\n```\n"
                ),
            },
            "dialogue_heavy" => format!(
                "```hopscotch:scene id=scene.s{i}\n\
                 title: Scene {i}\n\
                 summary: Generated scene.\n\
                 dialogue:\n  \
                 - speaker: narrator\n    \
                 says: Line one.\n  \
                 - type: conditional\n    \
                 conditions:\n      \
                 if: flag{i}\n      \
                 says: Conditional line.\n```\n"
            ),
            "mixed_errors" => match i % 5 {
                0 => format!("```hopscotch:npc id=npc.n{i}\nname: Npc {i}\n```\n"),
                1 => format!("```hopscotch:castle id=castle.c{i}\nname: Castle {i}\n```\n"),
                2 => format!(
                    "```hopscotch:destination id=destination.d{i}\nname: Dest {i}\nparent: region.r\nkind: castle\n```\n"
                ),
                _ => format!(
                    "```hopscotch:npc id=npc.n{i}\nname: Npc {i}\nscope: world.main\n```\n"
                ),
            },
            _ => format!(
                "```hopscotch:npc id=npc.n{i}\nname: Npc {i}\nscope: world.main\n```\n"
            ),
        };
        doc.push_str(&block);
    }

    doc
}

fn builtin_profile() -> Profile {
    let registry = ProfileRegistry::with_builtin().expect("builtin profile");
    registry.active_profile().expect("active profile").clone()
}

/// Benchmark validation with different error densities
fn bench_validation_error_density(c: &mut Criterion) {
    let profile = builtin_profile();

    let scenarios = vec![
        "all_valid",
        "missing_required",
        "unknown_types",
        "dialogue_heavy",
        "mixed_errors",
    ];

    let mut group = c.benchmark_group("validation_error_density");

    for scenario in scenarios {
        let content = generate_document(1_000, scenario);

        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("scenario", scenario),
            &content,
            |b, content| {
                b.iter(|| {
                    let report = validate_document(black_box(content), black_box(&profile));
                    black_box(report)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark validation scalability with different document sizes
fn bench_validation_scalability(c: &mut Criterion) {
    let profile = builtin_profile();

    let block_counts = vec![100, 500, 1_000, 5_000, 10_000];

    let mut group = c.benchmark_group("validation_scalability");

    for &count in &block_counts {
        let content = generate_document(count, "mixed_errors");

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("blocks", count), &content, |b, content| {
            b.iter(|| {
                let report = validate_document(black_box(content), black_box(&profile));
                black_box(report)
            })
        });
    }

    group.finish();
}

/// Benchmark hierarchy reconstruction over deep node chains
fn bench_hierarchy_depth(c: &mut Criterion) {
    let profile = builtin_profile();

    let mut content = String::from("```hopscotch:world id=world.main\nname: Aerth\n```\n");
    for i in 0..200 {
        content.push_str(&format!(
            "```hopscotch:continent id=continent.c{i}\nname: Continent {i}\nparent: world.main\n```\n"
        ));
        content.push_str(&format!(
            "```hopscotch:region id=region.r{i}\nname: Region {i}\nparent: continent.c{i}\n```\n"
        ));
        content.push_str(&format!(
            "```hopscotch:destination id=destination.d{i}\nname: Dest {i}\nparent: region.r{i}\nkind: settlement\n```\n"
        ));
    }

    c.bench_function("hierarchy_600_nodes", |b| {
        b.iter(|| {
            let report = validate_document(black_box(&content), black_box(&profile));
            black_box(report)
        })
    });
}

criterion_group!(
    validation_benches,
    bench_validation_error_density,
    bench_validation_scalability,
    bench_hierarchy_depth
);

criterion_main!(validation_benches);
