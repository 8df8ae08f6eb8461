use fractree::{NodeId, Tree};

/// Build the tree used across most tests:
///
/// ```text
/// testRoot
/// ├── branchA = "first branch"
/// │   └── leafA = "first leaf"
/// └── branchB = 2
/// ```
pub fn setup_sample_tree() -> Tree {
    let mut tree = Tree::new("testRoot");
    let root = tree.root();
    tree.set_at(root, "branchA", "first branch").unwrap();
    tree.set_at(root, "branchA.leafA", "first leaf").unwrap();
    tree.set_at(root, "branchB", 2).unwrap();
    tree
}

/// Names of `id`'s children, in order.
pub fn child_names(tree: &Tree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .map(|child| tree.name(*child).unwrap().to_string())
        .collect()
}

/// Add one child per name under `parent`, returning their ids.
pub fn add_children(tree: &mut Tree, parent: NodeId, names: &[&str]) -> Vec<NodeId> {
    names
        .iter()
        .map(|name| {
            let child = tree.create_node(*name);
            tree.add_child(parent, child).unwrap()
        })
        .collect()
}

/// Assert that no two children of any node share a name.
pub fn assert_unique_names(tree: &Tree, id: NodeId) {
    for node in tree.all_branches(id, true, true) {
        let mut names = child_names(tree, node);
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count, "duplicate child names under {node}");
    }
}
