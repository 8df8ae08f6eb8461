//! Record serialization tests
//!
//! Covers the record shape, type tags on heterogeneous trees, round trips
//! through records and JSON, lenient restoration of malformed children, format
//! version checks and tree metadata.

use std::rc::Rc;

use fractree::{
    Tree, Value,
    constants::FORMAT_VERSION,
    serial::{Record, SerialError},
    types::{NodeClass, TypeRegistry, TypeTag},
};
use serde_json::json;

use crate::helpers::*;

fn registry_with(classes: &[&Rc<NodeClass>]) -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    for class in classes {
        registry.register_shared(Rc::clone(class));
    }
    registry
}

#[test]
fn test_record_shape() {
    let tree = setup_sample_tree();
    let json = serde_json::to_value(tree.to_record(tree.root()).unwrap()).unwrap();

    assert_eq!(
        json,
        json!({
            "?NAME": "testRoot",
            "?FORMAT_VERSION": FORMAT_VERSION,
            "?CHILDREN": [
                {
                    "?NAME": "branchA",
                    "?VALUE": "first branch",
                    "?CHILDREN": [{ "?NAME": "leafA", "?VALUE": "first leaf" }],
                },
                { "?NAME": "branchB", "?VALUE": 2 },
            ],
        })
    );
}

#[test]
fn test_round_trip_is_equivalent_not_identical() {
    let mut tree = setup_sample_tree();
    let root = tree.root();
    let leaf = tree.lookup(root, "branchA.leafA").unwrap();
    tree.set_breakpoint(leaf, true).unwrap();
    tree.set_at(root, "branchC.list", vec![Value::from(1), Value::from("two")])
        .unwrap();
    tree.set_at(root, "branchC.nothing", Value::Null).unwrap();

    let json = tree.to_json(root).unwrap();
    let restored = Tree::from_json(&json, &TypeRegistry::new()).unwrap();

    assert!(tree.equivalent_across(&restored, root, restored.root()));
    assert_ne!(root, restored.root());
    assert_eq!(
        restored.get(restored.root(), "branchC.nothing"),
        Some(&Value::Null)
    );
    let restored_leaf = restored.lookup(restored.root(), "branchA.leafA").unwrap();
    assert!(restored.is_breakpoint(restored_leaf));
}

#[test]
fn test_round_trip_preserves_order_after_reindex() {
    let mut tree = Tree::new("root");
    let root = tree.root();
    let ids = add_children(&mut tree, root, &["a", "b", "c"]);
    tree.set_index(ids[2], 0).unwrap();

    let restored = Tree::from_record(&tree.to_record(root).unwrap(), &TypeRegistry::new()).unwrap();
    assert_eq!(child_names(&restored, restored.root()), vec!["c", "a", "b"]);
}

#[test]
fn test_heterogeneous_tree_tags_only_class_changes() {
    let custom = Rc::new(NodeClass::new("CustomTree", "tests.nodes"));
    let mut tree = Tree::new("root");
    let root = tree.root();
    let parent = tree.resolve(root, "parent").unwrap();
    let grandchild = tree.create_node_of(Rc::clone(&custom), "grandchild");
    tree.add_child(parent, grandchild).unwrap();
    tree.resolve(grandchild, "underCustom").unwrap();

    let record = tree.to_record(root).unwrap();
    let parent_record = &record.children[0];
    let grandchild_record = &parent_record.children[0];

    assert_eq!(record.type_tag, None);
    assert_eq!(parent_record.type_tag, None);
    assert_eq!(
        grandchild_record.type_tag.as_deref(),
        Some("CustomTree|@|tests.nodes")
    );
    // Implicit children of a non-inheriting class take the default class, which differs again
    assert_eq!(
        grandchild_record.children[0].type_tag,
        Some(NodeClass::base().tag().to_string())
    );

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json["?CHILDREN"][0]["?CHILDREN"][0]["?TYPE"],
        "CustomTree|@|tests.nodes"
    );

    let restored = Tree::from_record(&record, &registry_with(&[&custom])).unwrap();
    let restored_grandchild = restored
        .lookup(restored.root(), "parent.grandchild")
        .unwrap();
    assert_eq!(restored.node(restored_grandchild).unwrap().class(), &custom);
    let restored_parent = restored.lookup(restored.root(), "parent").unwrap();
    assert_eq!(
        restored.node(restored_parent).unwrap().class().tag(),
        NodeClass::base().tag()
    );
    assert!(tree.equivalent_across(&restored, root, restored.root()));
}

#[test]
fn test_untagged_children_inherit_parent_class() {
    let custom = Rc::new(NodeClass::new("CustomTree", "tests.nodes").inheriting());
    let mut tree = Tree::new("root");
    let root = tree.root();
    let branch = tree.create_node_of(Rc::clone(&custom), "branch");
    tree.add_child(root, branch).unwrap();
    tree.resolve(branch, "a.b").unwrap();

    let record = tree.to_record(root).unwrap();
    assert_eq!(record.children[0].children[0].type_tag, None);

    let restored = Tree::from_record(&record, &registry_with(&[&custom])).unwrap();
    let deep = restored.lookup(restored.root(), "branch.a.b").unwrap();
    assert_eq!(restored.node(deep).unwrap().class(), &custom);
}

#[test]
fn test_custom_root_class_is_tagged() {
    let custom = Rc::new(NodeClass::new("CustomRoot", "tests.nodes"));
    let tree = Tree::new("root").with_default_class(Rc::clone(&custom));

    let record = tree.to_record(tree.root()).unwrap();
    assert_eq!(record.type_tag, Some(custom.tag().to_string()));

    let restored = Tree::from_record(&record, &registry_with(&[&custom])).unwrap();
    assert_eq!(restored.node(restored.root()).unwrap().class(), &custom);
}

#[test]
fn test_unknown_tag_falls_back_to_default_class() {
    let record: Record = serde_json::from_value(json!({
        "?NAME": "root",
        "?CHILDREN": [{ "?NAME": "mystery", "?TYPE": "Gone|@|nowhere", "?VALUE": 1 }],
    }))
    .unwrap();

    let restored = Tree::from_record(&record, &TypeRegistry::new()).unwrap();
    let mystery = restored.lookup(restored.root(), "mystery").unwrap();
    assert_eq!(
        restored.node(mystery).unwrap().class().tag(),
        NodeClass::base().tag()
    );
    assert_eq!(restored.peek_value(mystery), Some(&Value::Int(1)));
}

#[test]
fn test_closure_resolver() {
    let custom = Rc::new(NodeClass::new("Closure", "tests"));
    let resolver = {
        let custom = Rc::clone(&custom);
        move |tag: &TypeTag| (tag == custom.tag()).then(|| Rc::clone(&custom))
    };
    let json = r#"{"?NAME": "root", "?CHILDREN": [{"?NAME": "c", "?TYPE": "Closure|@|tests"}]}"#;

    let restored = Tree::from_json(json, &resolver).unwrap();
    let child = restored.lookup(restored.root(), "c").unwrap();
    assert_eq!(restored.node(child).unwrap().class(), &custom);
}

#[test]
fn test_lenient_child_restoration() {
    let record: Record = serde_json::from_value(json!({
        "?NAME": "root",
        "?CHILDREN": [
            { "?NAME": "dup", "?VALUE": "first" },
            {},
            { "?EXTRAS": { "readOnly": true } },
            { "?NAME": "dup", "?VALUE": "second" },
            { "?NAME": "kept" },
        ],
    }))
    .unwrap();

    let restored = Tree::from_record(&record, &TypeRegistry::new()).unwrap();
    let root = restored.root();
    assert_eq!(child_names(&restored, root), vec!["dup", "kept"]);
    assert_eq!(restored.get(root, "dup"), Some(&Value::from("second")));
    // The replaced duplicate is discarded, not left detached
    assert!(restored.detached_roots().is_empty());
    assert_eq!(restored.len(), 3);
}

#[test]
fn test_top_level_errors() {
    let empty = Tree::from_json("{}", &TypeRegistry::new()).unwrap_err();
    assert!(matches!(
        empty,
        fractree::Error::Serial(SerialError::EmptyRecord)
    ));

    let newer = json!({ "?NAME": "root", "?FORMAT_VERSION": FORMAT_VERSION + 1 }).to_string();
    let err = Tree::from_json(&newer, &TypeRegistry::new()).unwrap_err();
    assert!(err.is_serialization_error());
    assert!(matches!(
        err,
        fractree::Error::Serial(SerialError::UnsupportedVersion { .. })
    ));

    let err = Tree::from_json("not json", &TypeRegistry::new()).unwrap_err();
    assert_eq!(err.module(), "serialize");
}

#[test]
fn test_unparsable_tag_falls_back_to_default_class() {
    let json = r#"{"?NAME":"root","?CHILDREN":[{"?NAME":"ok"},{"?NAME":"bad","?TYPE":"Legacy"}]}"#;

    let restored = Tree::from_json(json, &TypeRegistry::new()).unwrap();
    let root = restored.root();
    assert_eq!(child_names(&restored, root), vec!["ok", "bad"]);
    let bad = restored.lookup(root, "bad").unwrap();
    assert_eq!(
        restored.node(bad).unwrap().class().tag(),
        restored.default_class().tag()
    );

    let broken_root = r#"{"?NAME": "root", "?TYPE": "no-separator"}"#;
    let restored = Tree::from_json(broken_root, &TypeRegistry::new()).unwrap();
    assert_eq!(
        restored.node(restored.root()).unwrap().class().tag(),
        NodeClass::base().tag()
    );
}

#[test]
fn test_deep_chain_round_trips_through_json() {
    let depth = 200;
    let mut tree = Tree::new("root");
    let root = tree.root();
    let address = vec!["n"; depth].join(".");
    tree.set_at(root, address.as_str(), 1).unwrap();

    let json = tree.to_json(root).unwrap();
    let restored = Tree::from_json(&json, &TypeRegistry::new()).unwrap();

    assert_eq!(restored.len(), depth + 1);
    assert_eq!(restored.get(restored.root(), address.as_str()), Some(&Value::Int(1)));
    assert!(tree.equivalent_across(&restored, root, restored.root()));
}

#[test]
fn test_non_finite_float_is_refused_by_json() {
    let mut tree = Tree::new("root");
    let root = tree.root();
    tree.set_at(root, "ratio", f64::NAN).unwrap();

    let err = tree.to_json(root).unwrap_err();
    assert!(err.is_serialization_error());
    assert_eq!(err.module(), "serialize");

    // Records keep the value; only the JSON form is refused
    let record = tree.to_record(root).unwrap();
    assert!(matches!(record.children[0].value, Some(Value::Float(f)) if f.is_nan()));

    tree.set_at(root, "ratio", 0.25).unwrap();
    assert!(tree.to_json(root).is_ok());
}

#[test]
fn test_metadata_travels_with_main_root_only() {
    let mut tree = setup_sample_tree();
    let root = tree.root();
    tree.metadata_mut()
        .insert("author".to_string(), Value::from("tests"));

    let record = tree.to_record(root).unwrap();
    assert!(record.root_data.is_some());
    let branch = tree.lookup(root, "branchA").unwrap();
    assert!(tree.to_record(branch).unwrap().root_data.is_none());

    let restored = Tree::from_record(&record, &TypeRegistry::new()).unwrap();
    assert_eq!(restored.metadata(), tree.metadata());
}

#[test]
fn test_insert_record_replaces_same_named_child() {
    let mut tree = setup_sample_tree();
    let root = tree.root();
    let record: Record = serde_json::from_value(json!({
        "?NAME": "branchB",
        "?VALUE": "replaced",
        "?CHILDREN": [{ "?NAME": "extra" }],
    }))
    .unwrap();

    let inserted = tree
        .insert_record(root, &record, &TypeRegistry::new())
        .unwrap();

    assert_eq!(tree.lookup(root, "branchB").unwrap(), inserted);
    assert_eq!(tree.get(root, "branchB"), Some(&Value::from("replaced")));
    assert!(tree.find(root, "branchB.extra").is_some());
    assert!(tree.detached_roots().is_empty());
    assert_eq!(child_names(&tree, root), vec!["branchA", "branchB"]);
}

#[test]
fn test_display_is_pretty_json() {
    let tree = setup_sample_tree();
    let text = tree.display(tree.root()).unwrap();
    assert!(text.contains('\n'));
    let parsed: Record = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.name.as_deref(), Some("testRoot"));
    assert_eq!(parsed.count(), 4);
}
