//! Diffing engine benchmark: Measure diff + script expansion over node lists.
//!
//! Target: < 100µs for 500 nodes with a changed tail

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use typist::{build_script, diff, ContentNode, NodeId, NodeKind};

const WORDS: [&str; 8] = ["alpha ", "beta ", "gamma ", "delta ", "epsilon ", "zeta ", "eta ", "theta "];

/// Create `count` nodes alternating text runs and bold elements.
fn create_nodes(count: usize, seed: usize, first_id: u64) -> Vec<ContentNode> {
    (0..count)
        .map(|i| {
            let kind = if i % 2 == 0 {
                NodeKind::Text
            } else {
                NodeKind::element("b")
            };
            let text = WORDS[(i + seed) % WORDS.len()].repeat(3);
            ContentNode::new(NodeId(first_id + i as u64), kind, text)
        })
        .collect()
}

fn diff_identical_nodes(c: &mut Criterion) {
    let current = create_nodes(500, 0, 0);
    let target = create_nodes(500, 0, 10_000);

    c.bench_function("diff_500_identical", |b| {
        b.iter(|| diff(black_box(&current), black_box(&target)))
    });
}

fn diff_changed_tail(c: &mut Criterion) {
    let current = create_nodes(500, 0, 0);
    let mut target = create_nodes(500, 0, 10_000);
    // Retype the last tenth
    for node in target.iter_mut().skip(450) {
        node.text = node.text.to_uppercase();
    }

    c.bench_function("diff_script_500_changed_tail", |b| {
        b.iter(|| {
            let difference = diff(black_box(&current), black_box(&target));
            build_script(&difference)
        })
    });
}

fn diff_partial_word_edit(c: &mut Criterion) {
    let current = vec![ContentNode::new(NodeId(0), NodeKind::Text, "word ".repeat(2_000))];
    let mut text = "word ".repeat(1_999);
    text.push_str("world");
    let target = vec![ContentNode::new(NodeId(1), NodeKind::Text, text)];

    c.bench_function("diff_script_10k_char_partial", |b| {
        b.iter(|| {
            let difference = diff(black_box(&current), black_box(&target));
            build_script(&difference)
        })
    });
}

fn diff_various_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_by_size");

    for count in [10, 100, 500, 2_000] {
        let current = create_nodes(count, 0, 0);
        let target = create_nodes(count, 1, 100_000);

        group.bench_with_input(
            BenchmarkId::new("full_change", count),
            &(current, target),
            |b, (current, target)| {
                b.iter(|| {
                    let difference = diff(black_box(current), black_box(target));
                    build_script(&difference)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    diff_identical_nodes,
    diff_changed_tail,
    diff_partial_word_edit,
    diff_various_sizes,
);
criterion_main!(benches);
