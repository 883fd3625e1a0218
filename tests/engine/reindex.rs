//! Integration tests for id reindexing.

use dtree_engine::{Draft, Tree};
use dtree_foundation::NodeId;

#[test]
fn reindex_closes_gaps_left_by_deletions() {
    let mut tree = Tree::new();
    let root = tree.root();
    let a = tree.append(root, Draft::node("a")).unwrap(); // 1
    let b = tree.append(a, Draft::leaf("b")).unwrap(); // 2
    let c = tree.append(root, Draft::node("c")).unwrap(); // 3
    tree.append(c, Draft::leaf("d")).unwrap(); // 4

    tree.delete(b).unwrap();
    tree.reindex(0);

    // Depth-first child order: a, c, d
    assert_eq!(tree.query(root, "a"), Some(NodeId::new(1)));
    assert_eq!(tree.query(root, "c"), Some(NodeId::new(2)));
    assert_eq!(tree.query(root, "d"), Some(NodeId::new(3)));
    assert_eq!(tree.query(root, 4u64), None);
}

#[test]
fn reindex_keeps_structure_intact() {
    let mut tree = Tree::new();
    let root = tree.root();
    let a = tree.append(root, Draft::node("a")).unwrap();
    tree.append(a, Draft::node("b")).unwrap();

    let before = tree.to_records(root);
    tree.reindex(10);
    assert_eq!(tree.to_records(root), before);
    assert_eq!(tree.path(tree.query(root, "b").unwrap()), "/a/b");
}

#[test]
fn allocation_resumes_after_reindex() {
    let mut tree = Tree::new();
    let root = tree.root();
    tree.append(root, Draft::leaf("x")).unwrap();
    tree.append(root, Draft::leaf("y")).unwrap();
    tree.delete(tree.query(root, "x").unwrap()).unwrap();

    tree.reindex(0);
    let z = tree.append(root, Draft::leaf("z")).unwrap();
    assert_eq!(z, NodeId::new(2));
}
