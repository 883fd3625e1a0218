//! Integration tests for node identifiers.

use dtree_foundation::NodeId;

#[test]
fn root_id_is_reserved_zero() {
    assert_eq!(NodeId::ROOT, NodeId::new(0));
    assert!(NodeId::ROOT.is_root());
}

#[test]
fn ids_order_by_raw_value() {
    let mut ids = vec![NodeId::new(3), NodeId::new(1), NodeId::new(2)];
    ids.sort();
    assert_eq!(ids, vec![NodeId::new(1), NodeId::new(2), NodeId::new(3)]);
}

#[test]
fn from_u64_conversion() {
    let id: NodeId = 7u64.into();
    assert_eq!(id.raw(), 7);
}
