//! Tests for the move module.

use std::collections::HashSet;

use super::*;

#[test]
fn test_equality_ignores_origin() {
    let a = ChangeMove::new(1, Some(0), 2);
    let b = ChangeMove::new(1, None, 2);
    let c = ChangeMove::new(1, Some(0), 3);
    assert_eq!(a, b);
    assert_ne!(a, c);

    let set: HashSet<ChangeMove> = [a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_total_order() {
    let mut moves = vec![
        ChangeMove::new(2, Some(0), 1),
        ChangeMove::new(0, Some(1), 3),
        ChangeMove::new(0, Some(2), 1),
        ChangeMove::new(1, None, 0),
    ];
    moves.sort();
    let keys: Vec<_> = moves.iter().map(|m| (m.client, m.to)).collect();
    assert_eq!(keys, vec![(0, 1), (0, 3), (1, 0), (2, 1)]);
}

#[test]
fn test_display() {
    assert_eq!(ChangeMove::new(0, Some(2), 1).to_string(), "0:2->1");
    assert_eq!(ChangeMove::new(5, None, 0).to_string(), "5:-->0");
}

#[test]
fn test_parse() {
    let mv: ChangeMove = "12:3->7".parse().unwrap();
    assert_eq!((mv.client, mv.from, mv.to), (12, Some(3), 7));

    let mv: ChangeMove = " 4:-->0 ".parse().unwrap();
    assert_eq!((mv.client, mv.from, mv.to), (4, None, 0));

    assert!("4-3->2".parse::<ChangeMove>().is_err());
    assert!("4:3-2".parse::<ChangeMove>().is_err());
    assert!("x:3->2".parse::<ChangeMove>().is_err());
    assert!("4:3->".parse::<ChangeMove>().is_err());
}

#[test]
fn test_noop_and_undo() {
    assert!(ChangeMove::new(0, Some(1), 1).is_noop());
    assert!(!ChangeMove::new(0, None, 1).is_noop());

    let undo = ChangeMove::new(0, Some(1), 2).undo().unwrap();
    assert_eq!((undo.from, undo.to), (Some(2), 1));
    assert!(ChangeMove::new(0, None, 2).undo().is_none());
}

#[test]
fn test_from_state() {
    let instance = allocforge_test::scenario_instance();
    let mut state = allocforge_core::Assignment::new(&instance);
    state.assign(1, 1);
    let mv = ChangeMove::from_state(&state, 1, 0);
    assert_eq!(mv.from, Some(1));
    assert_eq!(ChangeMove::from_state(&state, 0, 0).from, None);
}
