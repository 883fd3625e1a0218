//! Integration tests for record serialization and bulk loading.

use dtree_engine::{Draft, Record, Tree};
use dtree_foundation::Value;

// =============================================================================
// Round trip
// =============================================================================

#[test]
fn spec_example_round_trip() {
    // [{name:"A", columns:[], children:[{name:"B", columns:[1]}]}]
    let records = vec![
        Record::node("A").with_children(vec![Record::leaf("B").with_column(1)]),
    ];

    let mut tree = Tree::new();
    tree.populate(tree.root(), &records).unwrap();

    let b = tree.resolve_path(tree.root(), "/A/B").unwrap();
    assert_eq!(tree.columns(b).unwrap(), &[Some(Value::Int(1))]);

    assert_eq!(tree.to_records(tree.root()), records);
}

#[test]
fn round_trip_is_isomorphic_but_renumbers() {
    let mut tree = Tree::new().with_columns(["code", "kind"]);
    let root = tree.root();
    let de = tree.append(root, Draft::node("DE").with_column(276)).unwrap();
    tree.append(de, Draft::leaf("BY").with_column("state")).unwrap();
    tree.append(de, Draft::node("HH")).unwrap();

    let dump = tree.to_records(root);

    let mut rebuilt = Tree::new().with_columns(["code", "kind"]);
    let created = rebuilt.populate(rebuilt.root(), &dump).unwrap();

    // Same shape, names, and column values
    assert_eq!(rebuilt.to_records(rebuilt.root()), dump);
    // But ids are allocation-order artifacts of the new tree
    assert_eq!(created.len(), 3);
    assert_eq!(
        rebuilt.name(created[0]).unwrap(),
        tree.name(de).unwrap()
    );
}

#[test]
fn container_terminal_distinction_survives() {
    let mut tree = Tree::new();
    let root = tree.root();
    tree.append(root, Draft::node("empty_node")).unwrap();
    tree.append(root, Draft::leaf("leaf")).unwrap();

    let dump = tree.to_records(root);
    assert!(dump[0].is_container());
    assert!(!dump[1].is_container());

    let mut rebuilt = Tree::new();
    let created = rebuilt.populate(rebuilt.root(), &dump).unwrap();
    assert!(rebuilt.is_container(created[0]));
    assert!(!rebuilt.is_container(created[1]));
}

// =============================================================================
// Bulk loading
// =============================================================================

#[test]
fn creation_order_supports_bulk_post_processing() {
    let records = vec![
        Record::node("US").with_children(vec![Record::leaf("CA"), Record::leaf("NY")]),
        Record::node("MX").with_children(vec![Record::leaf("BC")]),
    ];

    let mut tree = Tree::new().with_columns(["visited"]);
    let created = tree.populate(tree.root(), &records).unwrap();

    // Assign columns after the structural load
    for &id in &created {
        tree.set_columns(id, [(1, Value::Bool(true))]);
    }
    for &id in &created {
        assert_eq!(tree.column(id, 1), Some(Value::Bool(true)));
    }
}

#[test]
fn loading_pads_to_the_target_schema() {
    let records = vec![Record::leaf("x").with_column(1)];

    let mut wide = Tree::new().with_columns(["a", "b", "c"]);
    let created = wide.populate(wide.root(), &records).unwrap();

    assert_eq!(
        wide.columns(created[0]).unwrap(),
        &[Some(Value::Int(1)), None, None]
    );
}

#[test]
fn populate_failure_keeps_earlier_records() {
    let mut tree = Tree::new();
    let records = vec![Record::leaf("a"), Record::leaf("b"), Record::leaf("a")];

    let err = tree.populate(tree.root(), &records).unwrap_err();
    assert!(format!("{err}").contains("duplicate name"));
    // a and b landed before the collision aborted the load
    assert_eq!(tree.children(tree.root()).len(), 2);
}
