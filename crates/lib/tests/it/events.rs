//! Change notification tests
//!
//! Covers the three per-node channels, bubbling to every ancestor exactly once,
//! muting, relay removal on detach, weak subscribers and deferred reaction
//! through an event queue.

use std::{cell::RefCell, rc::Rc};

use fractree::{
    NodeId, Tree, Value,
    signal::{EventQueue, Handler, handler},
    tree::{NameChanged, StructureChanged, StructureEvent, ValueChanged},
};

use crate::helpers::*;

/// A handler that records every event it sees.
fn recorder<E: Clone + 'static>() -> (Rc<RefCell<Vec<E>>>, Handler<E>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let h = handler(move |event: &E| sink.borrow_mut().push(event.clone()));
    (log, h)
}

fn watch_values(tree: &mut Tree, id: NodeId) -> (Rc<RefCell<Vec<ValueChanged>>>, Handler<ValueChanged>) {
    let (log, h) = recorder();
    tree.signals_mut(id).unwrap().value_changed.connect(&h);
    (log, h)
}

#[test]
fn test_value_change_fires_with_old_and_new() {
    let mut tree = setup_sample_tree();
    let root = tree.root();
    let branch = tree.lookup(root, "branchB").unwrap();
    let (log, _h) = watch_values(&mut tree, branch);

    tree.set_value(branch, 3).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![ValueChanged {
            node: branch,
            old: Some(Value::Int(2)),
            new: Some(Value::Int(3)),
        }]
    );
}

#[test]
fn test_unchanged_value_fires_nothing() {
    let mut tree = setup_sample_tree();
    let root = tree.root();
    let branch = tree.lookup(root, "branchB").unwrap();
    let (log, _h) = watch_values(&mut tree, branch);

    tree.set_value(branch, 2).unwrap();
    assert!(log.borrow().is_empty());

    tree.clear_value(branch).unwrap();
    tree.clear_value(branch).unwrap();
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(log.borrow()[0].new, None);
}

#[test]
fn test_events_bubble_to_every_ancestor_once() {
    let mut tree = setup_sample_tree();
    let root = tree.root();
    let branch = tree.lookup(root, "branchA").unwrap();
    let leaf = tree.lookup(root, "branchA.leafA").unwrap();

    let (at_root, _h1) = watch_values(&mut tree, root);
    let (at_branch, _h2) = watch_values(&mut tree, branch);
    let (at_leaf, _h3) = watch_values(&mut tree, leaf);

    tree.set_value(leaf, "changed").unwrap();

    for log in [&at_root, &at_branch, &at_leaf] {
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].node, leaf);
    }

    // Events below a node never reach its siblings
    let sibling = tree.lookup(root, "branchB").unwrap();
    let (at_sibling, _h4) = watch_values(&mut tree, sibling);
    tree.set_value(leaf, "again").unwrap();
    assert!(at_sibling.borrow().is_empty());
    assert_eq!(at_root.borrow().len(), 2);
}

#[test]
fn test_structure_events() {
    let mut tree = setup_sample_tree();
    let root = tree.root();
    let branch = tree.lookup(root, "branchA").unwrap();
    let (log, h) = recorder::<StructureChanged>();
    tree.signals_mut(root)
        .unwrap()
        .structure_changed
        .connect(&h);

    let added = tree.resolve(branch, "newLeaf").unwrap();
    tree.remove(added).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            StructureChanged {
                node: added,
                parent: branch,
                kind: StructureEvent::Added,
            },
            StructureChanged {
                node: added,
                parent: branch,
                kind: StructureEvent::Removed,
            },
        ]
    );
}

#[test]
fn test_collision_rename_fires_name_changed() {
    let mut tree = Tree::new("root");
    let root = tree.root();
    add_children(&mut tree, root, &["a"]);
    let (log, h) = recorder::<NameChanged>();
    tree.signals_mut(root).unwrap().name_changed.connect(&h);

    let newcomer = tree.create_node("a");
    tree.signals_mut(newcomer)
        .unwrap()
        .name_changed
        .connect(&h);
    tree.add_child(root, newcomer).unwrap();

    // Fired on the detached newcomer before it joined, so the root never saw it
    assert_eq!(
        *log.borrow(),
        vec![NameChanged {
            node: newcomer,
            old: "a".into(),
            new: "aB".into(),
        }]
    );

    tree.set_name(newcomer, "b").unwrap();
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn test_set_index_fires_nothing() {
    let mut tree = Tree::new("root");
    let root = tree.root();
    let ids = add_children(&mut tree, root, &["a", "b"]);
    let (log, h) = recorder::<StructureChanged>();
    tree.signals_mut(root)
        .unwrap()
        .structure_changed
        .connect(&h);

    tree.set_index(ids[1], 0).unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_detached_node_stops_relaying() {
    let mut tree = setup_sample_tree();
    let root = tree.root();
    let branch = tree.lookup(root, "branchA").unwrap();
    let leaf = tree.lookup(root, "branchA.leafA").unwrap();
    let (at_root, _h) = watch_values(&mut tree, root);

    tree.remove(branch).unwrap();
    tree.set_value(leaf, "orphaned").unwrap();
    assert!(at_root.borrow().is_empty());

    tree.add_child(root, branch).unwrap();
    tree.set_value(leaf, "home").unwrap();
    assert_eq!(at_root.borrow().len(), 1);
}

#[test]
fn test_muted_node_neither_delivers_nor_relays() {
    let mut tree = setup_sample_tree();
    let root = tree.root();
    let branch = tree.lookup(root, "branchA").unwrap();
    let leaf = tree.lookup(root, "branchA.leafA").unwrap();
    let (at_root, _h1) = watch_values(&mut tree, root);
    let (at_branch, _h2) = watch_values(&mut tree, branch);

    tree.mute_signals(branch).unwrap();
    tree.set_value(leaf, "quiet").unwrap();
    tree.set_value(branch, "quiet").unwrap();
    assert!(at_branch.borrow().is_empty());
    assert!(at_root.borrow().is_empty());

    tree.activate_signals(branch).unwrap();
    tree.set_value(leaf, "loud").unwrap();
    assert_eq!(at_branch.borrow().len(), 1);
    assert_eq!(at_root.borrow().len(), 1);
}

#[test]
fn test_dropped_handler_is_not_called() {
    let mut tree = setup_sample_tree();
    let root = tree.root();
    let (log, h) = watch_values(&mut tree, root);

    drop(h);
    tree.set_at(root, "branchB", 5).unwrap();
    assert!(log.borrow().is_empty());
    assert_eq!(
        tree.signals(root).unwrap().value_changed.subscriber_count(),
        0
    );
}

#[test]
fn test_queue_defers_reactive_mutation() {
    let mut tree = setup_sample_tree();
    let root = tree.root();
    let queue = EventQueue::new();
    tree.signals_mut(root)
        .unwrap()
        .value_changed
        .connect_queue(&queue);

    tree.set_at(root, "branchA.leafA", 10).unwrap();
    tree.set_at(root, "branchB", 20).unwrap();
    assert_eq!(queue.len(), 2);

    // React once the triggering calls have returned: mirror each value into an audit branch
    for event in queue.drain() {
        let name = tree.name(event.node).unwrap().to_string();
        let audit = tree.resolve(root, ["audit", name.as_str()]).unwrap();
        if let Some(value) = event.new {
            tree.set_value(audit, value).unwrap();
        }
    }

    assert_eq!(tree.get(root, "audit.leafA"), Some(&Value::Int(10)));
    assert_eq!(tree.get(root, "audit.branchB"), Some(&Value::Int(20)));
    // The audit writes were queued in turn
    assert_eq!(queue.len(), 2);
}
