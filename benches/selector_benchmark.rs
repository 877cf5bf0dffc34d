use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fs;
use summarise::rules::RuleOrigin;
use summarise::{aggregate, RuleSet, Selector};
use tempfile::TempDir;

// Build a tree of `modules` directories with `files_per_module` sources each,
// plus excluded noise (node_modules, build output, logs)
fn create_test_tree(modules: usize, files_per_module: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    for m in 0..modules {
        let module = root.join(format!("src/module{m}"));
        fs::create_dir_all(&module).unwrap();
        for f in 0..files_per_module {
            fs::write(
                module.join(format!("file{f}.rs")),
                format!("pub fn function{f}() {{\n    println!(\"{m}\");\n}}\n"),
            )
            .unwrap();
        }
        fs::write(module.join("debug.log"), "log line\n").unwrap();
    }

    let deps = root.join("node_modules/pkg/lib");
    fs::create_dir_all(&deps).unwrap();
    for f in 0..50 {
        fs::write(deps.join(format!("dep{f}.js")), "module.exports = {};\n").unwrap();
    }

    fs::create_dir_all(root.join("target/debug")).unwrap();
    fs::write(root.join("target/debug/app"), "binary").unwrap();
    fs::write(root.join("README.md"), "# Bench\n").unwrap();

    temp_dir
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");

    for (name, modules, files) in [("small", 2, 5), ("medium", 10, 20), ("large", 40, 50)] {
        let tree = create_test_tree(modules, files);
        let mut rules = RuleSet::with_defaults();
        rules.add_text("!important.log\nsrc/**/file1*.rs\n", RuleOrigin::Config);
        let selector = Selector::new(rules);

        group.bench_with_input(BenchmarkId::from_parameter(name), &tree, |b, tree| {
            b.iter(|| selector.select(black_box(tree.path())).unwrap())
        });
    }

    group.finish();
}

fn bench_rule_evaluation(c: &mut Criterion) {
    let rules = RuleSet::with_defaults();
    let paths = [
        "src/module3/file12.rs",
        "web/node_modules",
        "deep/a/b/c/d/e/f/server.log",
        "README.md",
    ];

    c.bench_function("rules/is_excluded", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(rules.is_excluded(black_box(path), false));
            }
        })
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let tree = create_test_tree(10, 20);
    let selection = Selector::new(RuleSet::with_defaults())
        .select(tree.path())
        .unwrap();

    c.bench_function("aggregate/medium", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(64 * 1024);
            aggregate(tree.path(), &selection, &mut out).unwrap();
            black_box(out)
        })
    });
}

criterion_group!(benches, bench_select, bench_rule_evaluation, bench_aggregate);
criterion_main!(benches);
