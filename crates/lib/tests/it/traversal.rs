//! Traversal, search and duplication tests

use std::rc::Rc;

use fractree::{Tree, Value, types::NodeClass};

use crate::helpers::*;

#[test]
fn test_all_branches_modes() {
    let tree = setup_sample_tree();
    let root = tree.root();
    let names = |ids: Vec<fractree::NodeId>| -> Vec<String> {
        ids.into_iter()
            .map(|id| tree.name(id).unwrap().to_string())
            .collect()
    };

    assert_eq!(
        names(tree.all_branches(root, true, true)),
        vec!["testRoot", "branchA", "leafA", "branchB"]
    );
    assert_eq!(
        names(tree.all_branches(root, false, false)),
        vec!["branchA", "branchB", "leafA"]
    );
}

#[test]
fn test_leaves_and_search() {
    let mut tree = setup_sample_tree();
    let root = tree.root();
    tree.resolve(root, "branchB.leafB").unwrap();

    let leaves: Vec<_> = tree
        .leaves(root)
        .into_iter()
        .map(|id| tree.string_address(id))
        .collect();
    assert_eq!(leaves, vec!["branchA.leafA", "branchB.leafB"]);

    let found: Vec<_> = tree
        .search(root, "leaf", true)
        .into_iter()
        .map(|id| tree.string_address(id))
        .collect();
    assert_eq!(found, vec!["branchA.leafA", "branchB.leafB"]);

    assert!(tree.search(root, "testRoot", true).is_empty());
    assert_eq!(tree.search(root, "testRoot", false), vec![root]);
}

#[test]
fn test_search_replace_goes_through_collision_handling() {
    let mut tree = Tree::new("root");
    let root = tree.root();
    let ids = add_children(&mut tree, root, &["oldA", "newA"]);

    tree.search_replace(root, "old", "new", true, false, true)
        .unwrap();

    assert_eq!(tree.name(ids[0]), Some("newB"));
    assert_unique_names(&tree, root);
}

#[test]
fn test_duplicate_is_equivalent_with_fresh_identity() {
    let custom = Rc::new(NodeClass::new("CustomTree", "tests.nodes"));
    let mut tree = setup_sample_tree();
    let root = tree.root();
    let branch = tree.lookup(root, "branchA").unwrap();
    let typed = tree.create_node_of(Rc::clone(&custom), "typed");
    tree.add_child(branch, typed).unwrap();
    tree.set_default(typed, 5).unwrap();

    let copy = tree.duplicate(branch).unwrap();

    assert_ne!(copy, branch);
    assert!(tree.is_equivalent(branch, copy));
    assert!(tree.node(copy).unwrap().is_root());
    let copied_typed = tree.lookup(copy, "typed").unwrap();
    assert_ne!(copied_typed, typed);
    assert_eq!(tree.node(copied_typed).unwrap().class(), &custom);

    // The copies are independent
    tree.set_value(copied_typed, 6).unwrap();
    assert_eq!(tree.peek_value(typed), Some(&Value::Int(5)));
    assert!(!tree.is_equivalent(branch, copy));
}

#[test]
fn test_root_of_and_ancestry() {
    let tree = setup_sample_tree();
    let root = tree.root();
    let leaf = tree.lookup(root, "branchA.leafA").unwrap();
    let branch = tree.lookup(root, "branchA").unwrap();

    assert_eq!(tree.root_of(leaf), root);
    assert!(tree.is_ancestor(root, leaf));
    assert!(tree.is_ancestor(branch, leaf));
    assert!(!tree.is_ancestor(leaf, branch));
    assert!(!tree.is_ancestor(leaf, leaf));
}
