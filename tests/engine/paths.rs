//! Integration tests for path resolution and search.

use dtree_engine::{Draft, Query, Tree};
use dtree_foundation::NodeId;

/// root ├ DE ├ BY ─ Munich
///      │    └ BE
///      └ FR ─ IDF ─ Paris
fn europe() -> (Tree, NodeId, NodeId, NodeId, NodeId, NodeId, NodeId) {
    let mut tree = Tree::new();
    let root = tree.root();
    let de = tree.append(root, Draft::node("DE")).unwrap();
    let by = tree.append(de, Draft::node("BY")).unwrap();
    let munich = tree.append(by, Draft::leaf("Munich")).unwrap();
    let be = tree.append(de, Draft::leaf("BE")).unwrap();
    let fr = tree.append(root, Draft::node("FR")).unwrap();
    let idf = tree.append(fr, Draft::node("IDF")).unwrap();
    tree.append(idf, Draft::leaf("Paris")).unwrap();
    (tree, de, by, munich, be, fr, idf)
}

// =============================================================================
// Path round trip
// =============================================================================

#[test]
fn every_entity_resolves_through_its_computed_path() {
    let (tree, de, by, munich, be, fr, idf) = europe();
    let root = tree.root();

    for id in [de, by, munich, be, fr, idf] {
        let path = tree.path(id);
        assert!(path.starts_with('/'));
        assert_eq!(tree.resolve_path(root, &path), Some(id), "path {path}");
    }
}

#[test]
fn root_contributes_no_visible_segment() {
    let (tree, de, ..) = europe();
    assert_eq!(tree.path(tree.root()), "");
    assert_eq!(tree.path(de), "/DE");
}

// =============================================================================
// Resolution modes
// =============================================================================

#[test]
fn relative_resolution_starts_at_the_given_node() {
    let (tree, de, by, munich, ..) = europe();

    assert_eq!(tree.resolve_path(de, "BY"), Some(by));
    assert_eq!(tree.resolve_path(de, "BY/Munich"), Some(munich));
    // Paris is not below DE
    assert_eq!(tree.resolve_path(de, "Paris"), None);
}

#[test]
fn partial_paths_skip_intermediate_segments() {
    let (tree, _, _, munich, ..) = europe();
    // The DE segment is never supplied
    assert_eq!(tree.resolve_path(tree.root(), "BY/Munich"), Some(munich));
}

#[test]
fn query_unifies_both_addressing_modes() {
    let (tree, de, _, munich, ..) = europe();
    let root = tree.root();

    assert_eq!(tree.query(root, de.raw()), Some(de));
    assert_eq!(tree.query(root, "/DE/BY/Munich"), Some(munich));
    assert_eq!(tree.query(root, Query::Path("Munich".to_string())), Some(munich));
    assert_eq!(tree.query(root, Query::Id(0)), None); // root is not its own child
}

#[test]
fn lookup_misses_are_options_and_chain() {
    let (tree, ..) = europe();
    let root = tree.root();

    // A miss anywhere in the chain flows through as None
    let result = tree
        .query(root, "/DE")
        .and_then(|de| tree.query(de, "nonexistent"))
        .and_then(|x| tree.query(x, "deeper"));
    assert_eq!(result, None);
}

// =============================================================================
// Multi-match search
// =============================================================================

#[test]
fn find_all_over_paths_matches_whole_subtrees() {
    let (tree, _, by, munich, ..) = europe();

    let found = tree.find_all(tree.root(), "DE/BY", true);
    assert!(found.contains(&by));
    assert!(found.contains(&munich));
    assert!(!found.is_empty());
}

#[test]
fn find_all_without_recursion_stays_shallow_for_slash_queries() {
    let (tree, _, by, munich, ..) = europe();

    // One level of fan-out reaches BY; Munich sits a level deeper and needs
    // the recursive mode
    assert_eq!(tree.find_all(tree.root(), "DE/BY", false), vec![by]);

    let deep = tree.find_all(tree.root(), "DE/BY", true);
    assert!(deep.contains(&by));
    assert!(deep.contains(&munich));
}

// =============================================================================
// Properties
// =============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any chain of distinctly named containers resolves through its own
        /// computed path, whatever the depth. (Repeated names along a chain
        /// can legally resolve to a shallower match through the
        /// substring-of-path rule, so distinctness is part of the property.)
        #[test]
        fn deep_chains_round_trip(names in proptest::collection::vec("[A-Za-z]{1,8}", 1..12)) {
            let mut tree = Tree::new();
            let mut cursor = tree.root();
            let mut ids = Vec::new();
            for (depth, name) in names.iter().enumerate() {
                let name = format!("{name}{depth}");
                cursor = tree.append(cursor, Draft::node(name)).unwrap();
                ids.push(cursor);
            }

            let deepest = *ids.last().unwrap();
            let path = tree.path(deepest);
            prop_assert_eq!(tree.resolve_path(tree.root(), &path), Some(deepest));
        }
    }
}
