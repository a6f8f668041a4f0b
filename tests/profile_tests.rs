use pretty_assertions::assert_eq;
use proxy_profiler::profile::{merge_tree, CallTree};
use proxy_profiler::{CallKey, ClassProfileStore, FlatStat, ProfileError, ProfileRegistry, TreeStat};
use std::sync::{Arc, Barrier};
use std::thread;

const EPSILON: f64 = 1e-9;

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < EPSILON
}

/// A (0.20s) calls B (0.10s) then C (0.05s)
fn single_chain(store: &ClassProfileStore) {
    store.push("A");
    store.push("B");
    store.pop("B", 0.10).unwrap();
    store.push("C");
    store.pop("C", 0.05).unwrap();
    store.pop("A", 0.20).unwrap();
}

#[test]
fn test_single_chain_flat_times() {
    let store = ClassProfileStore::new("Spam");
    single_chain(&store);

    let data = store.snapshot();
    assert_eq!(data.flat_times["A"], vec![0.20]);
    assert_eq!(data.flat_times["B"], vec![0.10]);
    assert_eq!(data.flat_times["C"], vec![0.05]);

    let flat: Vec<FlatStat> = store.flat_stats().collect();
    let names: Vec<&str> = flat.iter().map(|s| s.method.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    for (stat, expected) in flat.iter().zip([0.20, 0.10, 0.05]) {
        assert_eq!(stat.calls, 1);
        assert!(approx(stat.total_time, expected));
        assert!(approx(stat.avg_time, expected));
    }
}

#[test]
fn test_single_chain_tree() {
    let store = ClassProfileStore::new("Spam");
    single_chain(&store);

    let data = store.snapshot();
    let a = &data.root_tree[&CallKey::method("A")];
    assert!(approx(a.total_time, 0.20));
    assert!(approx(a.children[&CallKey::method("B")].total_time, 0.10));
    assert!(approx(a.children[&CallKey::method("C")].total_time, 0.05));
    assert!(approx(a.self_time(), 0.05));

    let tree: Vec<TreeStat> = store.tree_stats().collect();
    assert_eq!(tree.len(), 4);
    assert_eq!((tree[0].level, tree[0].method.as_str()), (0, "A"));
    assert!(approx(tree[0].percent, 100.0));

    assert_eq!((tree[1].level, tree[1].method.as_str()), (1, "B"));
    assert!(approx(tree[1].percent, 50.0));

    assert_eq!((tree[2].level, tree[2].method.as_str()), (1, "C"));
    assert!(approx(tree[2].percent, 25.0));

    assert_eq!((tree[3].level, tree[3].method.as_str()), (1, "(body)"));
    assert!(approx(tree[3].percent, 25.0));
}

#[test]
fn test_body_listed_after_named_call_with_equal_time() {
    // A 0.5s calls B 0.25s and C 0.125s, leaving exactly 0.125s of body time
    let store = ClassProfileStore::new("Spam");
    store.push("A");
    store.push("B");
    store.pop("B", 0.25).unwrap();
    store.push("C");
    store.pop("C", 0.125).unwrap();
    store.pop("A", 0.5).unwrap();

    let tree: Vec<TreeStat> = store.tree_stats().collect();
    let order: Vec<&str> = tree.iter().map(|stat| stat.method.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C", "(body)"]);
    assert_eq!(tree[2].time, tree[3].time);
}

#[test]
fn test_repeated_calls() {
    let store = ClassProfileStore::new("Spam");
    for elapsed in [0.20, 0.30] {
        store.push("A");
        store.pop("A", elapsed).unwrap();
    }

    let data = store.snapshot();
    assert_eq!(data.flat_times["A"], vec![0.20, 0.30]);

    let flat: Vec<FlatStat> = store.flat_stats().collect();
    assert!(approx(flat[0].avg_time, 0.25));

    let a = &data.root_tree[&CallKey::method("A")];
    assert!(approx(a.total_time, 0.50));
    assert_eq!(a.call_count, 2);
}

#[test]
fn test_conservation_for_each_node() {
    let store = ClassProfileStore::new("Spam");
    store.push("run");
    store.push("parse");
    store.push("tokenize");
    store.pop("tokenize", 0.3).unwrap();
    store.pop("parse", 0.5).unwrap();
    store.push("emit");
    store.pop("emit", 0.25).unwrap();
    store.pop("run", 1.0).unwrap();

    fn check(tree: &CallTree) {
        for (key, record) in tree {
            if key.is_body() {
                continue;
            }
            assert!(approx(record.self_time() + record.subcall_time(), record.total_time));
            check(&record.children);
        }
    }
    check(&store.snapshot().root_tree);
}

#[test]
fn test_merge_is_order_independent() {
    let first = ClassProfileStore::new("First");
    let second = ClassProfileStore::new("Second");

    let sequence_x = |store: &ClassProfileStore| {
        store.push("m");
        store.push("n");
        store.pop("n", 0.125).unwrap();
        store.pop("m", 0.5).unwrap();
    };
    let sequence_y = |store: &ClassProfileStore| {
        store.push("m");
        store.pop("m", 0.25).unwrap();
    };

    sequence_x(&first);
    sequence_y(&first);
    sequence_y(&second);
    sequence_x(&second);

    assert_eq!(first.snapshot().root_tree, second.snapshot().root_tree);

    // Folding both trees together doubles every count
    let mut combined = first.snapshot().root_tree;
    merge_tree(&mut combined, &second.snapshot().root_tree);
    assert_eq!(combined[&CallKey::method("m")].call_count, 4);
}

#[test]
fn test_flat_and_tree_totals_agree() {
    let store = ClassProfileStore::new("Spam");
    single_chain(&store);
    store.push("B");
    store.pop("B", 0.5).unwrap();
    store.push("D");
    store.push("B");
    store.pop("B", 0.25).unwrap();
    store.pop("D", 0.375).unwrap();

    let tree: Vec<TreeStat> = store.tree_stats().collect();
    for flat in store.flat_stats() {
        let tree_total: f64 = tree
            .iter()
            .filter(|stat| stat.method == flat.method)
            .map(|stat| stat.time)
            .sum();
        assert!(approx(tree_total, flat.total_time), "mismatch for {}", flat.method);
    }
}

#[test]
fn test_stack_balance_and_reset() {
    let store = ClassProfileStore::new("Spam");
    single_chain(&store);
    assert_eq!(store.active_depth(), 0);

    store.reset();
    store.reset();
    assert!(store.is_empty());
    assert_eq!(store.flat_stats().count(), 0);
    assert_eq!(store.tree_stats().count(), 0);
}

#[test]
fn test_protocol_violation_is_reported() {
    let store = ClassProfileStore::new("Spam");
    store.push("A");

    let err = store.pop("B", 0.1).unwrap_err();
    assert_eq!(
        err,
        ProfileError::ProtocolViolation {
            expected: "A".to_string(),
            found: "B".to_string(),
        }
    );
    assert_eq!(store.active_depth(), 1);
}

#[test]
fn test_concurrent_chains_keep_nesting() {
    let registry = ProfileRegistry::new();
    let store = registry.get_or_create("Shared");
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..50 {
                    store.push("outer");
                    store.push("inner");
                    store.pop("inner", 0.001).unwrap();
                    store.pop("outer", 0.002).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let data = store.snapshot();
    assert_eq!(data.root_tree.len(), 1);
    let outer = &data.root_tree[&CallKey::method("outer")];
    assert_eq!(outer.call_count, 200);
    assert_eq!(outer.children[&CallKey::method("inner")].call_count, 200);
    assert_eq!(data.flat_times["inner"].len(), 200);
}

#[test]
fn test_guard_timing_nests() {
    let registry = ProfileRegistry::new();
    let store = registry.get_or_create("Timed");
    {
        let _outer = store.enter("outer");
        let _inner = store.enter("inner");
        thread::sleep(std::time::Duration::from_millis(5));
    }

    let data = store.snapshot();
    let outer = &data.root_tree[&CallKey::method("outer")];
    let inner = &outer.children[&CallKey::method("inner")];
    assert!(inner.total_time >= 0.005);
    assert!(outer.total_time >= inner.total_time);
}
