//! Integration tests for the FamilyTree API
//!
//! These tests drive a session only through requests, the way a front end does.

use float_cmp::assert_approx_eq;

use kinship::{
    FamilyTree, KinshipError,
    config::{AppConfig, DeletePolicy, LayoutConfig, StoreConfig, StyleConfig},
    identifier::PersonId,
    layout::{EdgeKind, LayoutError, LayoutResult},
    request::{AddRelationshipRequest, DeleteRequest, RelationshipKind, SearchRequest},
    store::StoreError,
};

fn add(
    tree: &mut FamilyTree,
    name: &str,
    kind: RelationshipKind,
    related: &[PersonId],
) -> Result<PersonId, KinshipError> {
    tree.apply(&AddRelationshipRequest::new(name, kind).related_to(related.iter().copied()))
}

/// Alice → child Bob → Carol married to Bob → Dana, child of Bob and Carol.
fn family(tree: &mut FamilyTree) -> [PersonId; 4] {
    let alice = add(tree, "Alice", RelationshipKind::Root, &[]).expect("root");
    let bob = add(tree, "Bob", RelationshipKind::Child, &[alice]).expect("child");
    let carol = add(tree, "Carol", RelationshipKind::Spouse, &[bob]).expect("spouse");
    let dana = add(tree, "Dana", RelationshipKind::Child, &[bob, carol]).expect("child");
    [alice, bob, carol, dana]
}

#[test]
fn test_couple_child_scenario() {
    let mut tree = FamilyTree::default();
    let [_, bob, carol, dana] = family(&mut tree);

    let layout = tree.layout().expect("Failed to lay out");
    let layout = layout.tree().expect("Expected a tree");
    assert_eq!(layout.node_count(), 4);

    let bob = layout.node(bob).unwrap().position();
    let carol = layout.node(carol).unwrap().position();
    let dana = layout.node(dana).unwrap().position();

    assert_approx_eq!(f32, dana.x(), (bob.x() + carol.x()) / 2.0);
    assert_approx_eq!(
        f32,
        dana.y() - bob.y(),
        tree.config().layout().vertical_spacing()
    );
}

#[test]
fn test_sibling_of_root_is_rejected() {
    let mut tree = FamilyTree::default();
    let alice = add(&mut tree, "Alice", RelationshipKind::Root, &[]).unwrap();

    let result = add(&mut tree, "Eve", RelationshipKind::Sibling, &[alice]);
    assert!(matches!(
        result,
        Err(KinshipError::Store(StoreError::NoParent(id))) if id == alice
    ));
    assert_eq!(tree.store().len(), 1);
}

#[test]
fn test_empty_tree_is_sentinel() {
    let tree = FamilyTree::default();
    assert_eq!(tree.layout().unwrap(), LayoutResult::Empty);

    let svg = tree.render_svg().expect("Empty trees still render");
    assert!(svg.contains("</svg>"));
}

#[test]
fn test_second_root_is_rejected() {
    let mut tree = FamilyTree::default();
    let alice = add(&mut tree, "Alice", RelationshipKind::Root, &[]).unwrap();

    let result = add(&mut tree, "Zed", RelationshipKind::Root, &[]);
    assert!(matches!(
        result,
        Err(KinshipError::Store(StoreError::DuplicateRoot(id))) if id == alice
    ));
    assert_eq!(tree.store().members().filter(|p| p.is_root()).count(), 1);
}

#[test]
fn test_spouses_point_at_each_other() {
    let mut tree = FamilyTree::default();
    let [_, bob, carol, _] = family(&mut tree);

    assert_eq!(tree.store().get(bob).unwrap().spouse(), Some(carol));
    assert_eq!(tree.store().get(carol).unwrap().spouse(), Some(bob));

    let result = add(&mut tree, "Fay", RelationshipKind::Spouse, &[bob]);
    assert!(matches!(
        result,
        Err(KinshipError::Store(StoreError::AlreadyMarried(_)))
    ));
}

#[test]
fn test_two_parents_must_be_married() {
    let mut tree = FamilyTree::default();
    let alice = add(&mut tree, "Alice", RelationshipKind::Root, &[]).unwrap();
    let bob = add(&mut tree, "Bob", RelationshipKind::Child, &[alice]).unwrap();
    let cleo = add(&mut tree, "Cleo", RelationshipKind::Child, &[alice]).unwrap();

    let result = add(&mut tree, "Dan", RelationshipKind::Child, &[bob, cleo]);
    assert!(matches!(
        result,
        Err(KinshipError::Store(StoreError::NotASpouseCouple(..)))
    ));

    let result = add(&mut tree, "Dan", RelationshipKind::Child, &[alice, bob, cleo]);
    assert!(matches!(
        result,
        Err(KinshipError::Store(StoreError::TooManyParents(3)))
    ));
}

#[test]
fn test_layout_is_deterministic() {
    let mut tree = FamilyTree::default();
    family(&mut tree);

    assert_eq!(tree.layout().unwrap(), tree.layout().unwrap());
    assert_eq!(tree.render_svg().unwrap(), tree.render_svg().unwrap());
}

#[test]
fn test_delete_leaves_no_dangling_references() {
    let mut tree = FamilyTree::default();
    let [alice, bob, carol, dana] = family(&mut tree);

    let removed = tree.delete(&DeleteRequest::new(bob)).unwrap();
    assert_eq!(removed, vec![bob]);

    for person in tree.store().members() {
        assert!(!person.has_parent(bob));
        assert_ne!(person.spouse(), Some(bob));
    }
    assert!(tree.store().get(dana).unwrap().has_parent(carol));

    // Carol's branch now floats beside Alice's.
    let layout = tree.layout().unwrap();
    let layout = layout.tree().unwrap();
    assert_eq!(layout.node_count(), 3);
    assert!(layout.node(carol).unwrap().position().x() > layout.node(alice).unwrap().position().x());
}

#[test]
fn test_cascade_policy_from_config() {
    let config = AppConfig::new(
        StoreConfig::new(false, DeletePolicy::Cascade),
        LayoutConfig::default(),
        StyleConfig::default(),
    );
    let mut tree = FamilyTree::new(config);
    let [alice, bob, ..] = family(&mut tree);

    let removed = tree.delete(&DeleteRequest::new(bob)).unwrap();
    assert_eq!(removed.len(), 3);
    assert_eq!(
        tree.store().members().map(|p| p.id()).collect::<Vec<_>>(),
        vec![alice]
    );
}

#[test]
fn test_search_by_name() {
    let mut tree = FamilyTree::default();
    family(&mut tree);
    add(&mut tree, "Caroline", RelationshipKind::Child, &[PersonId::new(1)]).unwrap();

    let names = |query: &str| -> Vec<String> {
        tree.search(&SearchRequest::new(query))
            .into_iter()
            .map(|p| p.name().to_string())
            .collect()
    };

    assert_eq!(names("caro"), vec!["Carol", "Caroline"]);
    assert_eq!(names(" DANA "), vec!["Dana"]);
    assert!(names("a").is_empty());
}

#[test]
fn test_edges_reach_every_relationship() {
    let mut tree = FamilyTree::default();
    let [_, bob, carol, dana] = family(&mut tree);
    let eli = add(&mut tree, "Eli", RelationshipKind::Sibling, &[dana]).unwrap();

    let layout = tree.layout().unwrap();
    let edges = layout.tree().unwrap().edges();

    assert!(edges.iter().any(|e| e.kind() == EdgeKind::Spouse && e.from() == bob && e.to() == carol));
    assert!(edges.iter().any(|e| e.kind() == EdgeKind::SiblingGuide && e.from() == dana && e.to() == eli));
    assert_eq!(
        edges.iter().filter(|e| e.kind() == EdgeKind::ParentChild && e.to() == eli).count(),
        2
    );
}

#[test]
fn test_layout_errors_have_generic_user_message() {
    let err = KinshipError::from(LayoutError::NoRoot);
    assert_eq!(err.user_message(), "the family tree cannot be displayed");
}

#[test]
fn test_revision_tracks_successful_mutations() {
    let mut tree = FamilyTree::default();
    assert_eq!(tree.store().revision(), 0);

    family(&mut tree);
    assert_eq!(tree.store().revision(), 4);

    let _ = add(&mut tree, "", RelationshipKind::Child, &[PersonId::new(1)]);
    assert_eq!(tree.store().revision(), 4);
}
