use super::*;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn ids_follow_node_count() {
    let mut s = SceneStore::new();
    assert_eq!(s.add_node(p(0.0, 0.0)), NodeId(1));
    assert_eq!(s.add_node(p(5.0, 5.0)), NodeId(2));
    assert_eq!(s.history_len(), 2);
}

#[test]
fn snapping_applies_to_add_and_move() {
    let grid = GridConfig::default().with_snap(true);
    let mut s = SceneStore::new().with_grid(grid);
    let id = s.add_node(p(29.0, 31.0));
    assert_eq!(s.node(id).unwrap().pos, p(20.0, 40.0));

    assert!(s.move_node(id, p(-10.0, 51.0)));
    assert_eq!(s.node(id).unwrap().pos, p(0.0, 60.0));
}

#[test]
fn move_does_not_snapshot() {
    let mut s = SceneStore::new();
    let id = s.add_node(p(0.0, 0.0));
    s.begin_move();
    for i in 0..10 {
        s.move_node(id, p(i as f64, 0.0));
    }
    assert_eq!(s.history_len(), 2);

    // One undo reverts the whole drag.
    s.undo();
    assert_eq!(s.node(id).unwrap().pos, p(0.0, 0.0));
}

#[test]
fn move_unknown_node_is_rejected() {
    let mut s = SceneStore::new();
    assert!(!s.move_node(NodeId(7), p(1.0, 1.0)));
}

#[test]
fn path_rejects_duplicates_and_unknown_ids() {
    let mut s = SceneStore::new();
    let a = s.add_node(p(0.0, 0.0));
    let b = s.add_node(p(10.0, 0.0));

    assert!(s.append_to_path(a));
    assert!(s.append_to_path(b));
    assert!(!s.append_to_path(a));
    assert!(!s.append_to_path(NodeId(99)));
    assert_eq!(s.path(), &[a, b]);
    // two adds + two appends
    assert_eq!(s.history_len(), 4);
}

#[test]
fn n_mutations_then_n_undos_restore_initial_state() {
    let mut s = SceneStore::new();
    let a = s.add_node(p(1.0, 2.0));
    s.append_to_path(a);
    let before_nodes = s.nodes().to_vec();
    let before_path = s.path().to_vec();

    let b = s.add_node(p(30.0, 0.0));
    s.append_to_path(b);
    s.begin_move();
    s.move_node(a, p(100.0, 100.0));
    let c = s.add_node(p(60.0, 0.0));
    s.append_to_path(c);

    for _ in 0..5 {
        assert!(s.undo());
    }
    assert_eq!(s.nodes(), before_nodes.as_slice());
    assert_eq!(s.path(), before_path.as_slice());
}

#[test]
fn undo_on_empty_history_is_noop() {
    let mut s = SceneStore::new();
    assert!(!s.undo());
    assert!(s.nodes().is_empty());
}

#[test]
fn undo_resolves_path_by_id_after_drag() {
    let mut s = SceneStore::new();
    let a = s.add_node(p(0.0, 0.0));
    let b = s.add_node(p(10.0, 0.0));
    s.append_to_path(a);
    s.append_to_path(b);

    s.begin_move();
    s.move_node(b, p(50.0, 50.0));
    s.undo();

    assert_eq!(s.path(), &[a, b]);
    assert_eq!(s.path_points(), vec![p(0.0, 0.0), p(10.0, 0.0)]);
}

#[test]
fn restore_drops_ids_missing_from_snapshot_nodes() {
    let nodes = vec![Node::new(NodeId(1), p(0.0, 0.0))];
    let snap = Snapshot::capture(&nodes, &[NodeId(1), NodeId(2)]);
    let (restored_nodes, path) = snap.restore();
    assert_eq!(restored_nodes.len(), 1);
    assert_eq!(path, vec![NodeId(1)]);
}

#[test]
fn clear_path_keeps_nodes() {
    let mut s = SceneStore::new();
    let a = s.add_node(p(0.0, 0.0));
    s.append_to_path(a);
    s.clear_path();
    assert!(s.path().is_empty());
    assert_eq!(s.nodes().len(), 1);
}
