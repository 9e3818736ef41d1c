//! Integration tests: input events → engine → graph, host and frames.
//!
//! Every event is preceded by a render, the way a host drives the engine,
//! so hit testing always runs against the last drawn frame.

use nc_core::{Bounds, NodeId, NodeKind, ReferenceContent, Side};
use nc_editor::*;
use nc_render::ApproxMeasure;
use pretty_assertions::assert_eq;

fn engine() -> CanvasEngine<RecordingHost> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut e = CanvasEngine::new(RecordingHost::default(), EditorConfig::default());
    e.resize_surface(1200.0, 800.0);
    e.load_json(include_str!("fixtures/board.canvas")).unwrap();
    e
}

fn send(e: &mut CanvasEngine<RecordingHost>, event: InputEvent) -> bool {
    e.render(&ApproxMeasure::default());
    e.handle_input(&event)
}

fn click(e: &mut CanvasEngine<RecordingHost>, x: f32, y: f32) {
    send(e, InputEvent::down(x, y));
    send(e, InputEvent::up(x, y));
}

fn command(key: &str) -> InputEvent {
    InputEvent::Key {
        key: key.to_string(),
        modifiers: Modifiers::CTRL,
    }
}

fn bounds(e: &CanvasEngine<RecordingHost>, id: &str) -> Bounds {
    e.graph().node(NodeId::intern(id)).unwrap().bounds
}

// ─── Gestures ────────────────────────────────────────────────────────────

#[test]
fn drag_moves_selection_and_persists_on_release() {
    let mut e = engine();
    let before = bounds(&e, "n2");

    send(&mut e, InputEvent::down(150.0, 150.0));
    send(&mut e, InputEvent::moved(180.0, 140.0));
    send(&mut e, InputEvent::moved(200.0, 130.0));
    assert_eq!(e.host().persisted().count(), 0, "no saves mid-drag");
    send(&mut e, InputEvent::up(200.0, 130.0));

    let n1 = bounds(&e, "n1");
    assert_eq!((n1.x, n1.y), (150.0, 80.0));
    assert_eq!(bounds(&e, "n2"), before);
    assert_eq!(e.host().persisted().count(), 1);
    assert!(e.host().persisted().next().unwrap().contains("\"y\": 80"));
}

#[test]
fn resize_from_the_south_east_handle_respects_the_floor() {
    let mut e = engine();
    click(&mut e, 150.0, 150.0);

    send(&mut e, InputEvent::down(350.0, 220.0));
    send(&mut e, InputEvent::moved(380.0, 230.0));
    send(&mut e, InputEvent::up(380.0, 230.0));
    assert_eq!(bounds(&e, "n1"), Bounds::new(100.0, 100.0, 280.0, 130.0));

    send(&mut e, InputEvent::down(380.0, 230.0));
    send(&mut e, InputEvent::moved(80.0, 230.0));
    send(&mut e, InputEvent::up(80.0, 230.0));
    assert_eq!(bounds(&e, "n1"), Bounds::new(100.0, 100.0, 100.0, 130.0));
}

#[test]
fn connect_modifier_wins_over_resize_handle() {
    let mut e = engine();
    click(&mut e, 150.0, 150.0);
    send(&mut e, InputEvent::down_with(350.0, 160.0, Modifiers::SHIFT));
    assert_eq!(e.controller().mode().name(), "connecting");
    assert_eq!(bounds(&e, "n1").width, 250.0);
}

#[test]
fn drawn_connection_lands_on_release() {
    let mut e = engine();
    send(&mut e, InputEvent::down_with(225.0, 220.0, Modifiers::SHIFT));
    send(&mut e, InputEvent::moved(300.0, 450.0));
    send(&mut e, InputEvent::up(300.0, 450.0));

    let edges: Vec<_> = e
        .graph()
        .edges()
        .map(|edge| (edge.from.as_str().to_string(), edge.to.as_str().to_string(), edge.from_side, edge.to_side))
        .collect();
    assert_eq!(edges.len(), 2);
    assert_eq!(
        edges[1],
        ("n1".to_string(), "r1".to_string(), Some(Side::Bottom), Some(Side::Top))
    );
}

#[test]
fn escape_mid_drag_keeps_geometry() {
    let mut e = engine();
    send(&mut e, InputEvent::down(150.0, 150.0));
    send(&mut e, InputEvent::moved(170.0, 150.0));
    send(&mut e, InputEvent::key("Escape"));
    assert!(e.controller().is_idle());
    assert_eq!(bounds(&e, "n1").x, 120.0);
    assert_eq!(e.host().persisted().count(), 1);

    send(&mut e, InputEvent::moved(400.0, 400.0));
    assert_eq!(bounds(&e, "n1").x, 120.0);
}

#[test]
fn double_click_on_empty_canvas_creates_and_edits() {
    let mut e = engine();
    send(&mut e, InputEvent::double_click(900.0, 600.0));

    assert_eq!(e.graph().node_count(), 4);
    let created = e.editing().unwrap();
    assert_eq!(e.graph().selected_nodes(), vec![created]);
    assert_eq!(bounds(&e, created.as_str()), Bounds::new(775.0, 540.0, 250.0, 120.0));
    assert!(
        e.host()
            .calls
            .iter()
            .any(|c| matches!(c, HostCall::BeginTextEdit(s) if s.node == created))
    );

    assert!(e.commit_edit("fresh idea"));
    let node = e.graph().node(created).unwrap();
    assert_eq!(node.kind, NodeKind::content("fresh idea"));
    assert!(!node.editing);
    assert!(e.host().persisted().last().unwrap().contains("fresh idea"));
}

// ─── Host round trips ────────────────────────────────────────────────────

#[test]
fn reload_makes_earlier_content_responses_stale() {
    let mut e = engine();
    let first = e.host().content_requests()[0].1;

    e.load_json(include_str!("fixtures/board.canvas")).unwrap();
    let requests = e.host().content_requests();
    assert_eq!(requests.len(), 2);
    let second = requests[1].1;
    assert_ne!(first, second);
    assert_eq!(e.pending_requests(), 1);

    assert!(!e.content_loaded(first, "stale"));
    assert!(e.content_loaded(second, "- [ ] ship it"));
    let r1 = e.graph().node(NodeId::intern("r1")).unwrap();
    assert!(matches!(&r1.kind, NodeKind::Reference { content: ReferenceContent::Loaded(t), .. } if t == "- [ ] ship it"));
}

#[test]
fn unavailable_content_is_reported_in_the_frame() {
    let mut e = engine();
    let id = e.host().content_requests()[0].1;
    assert!(e.content_unavailable(id));
    let list = e.render(&ApproxMeasure::default());
    assert!(list.texts().any(|t| t == "Content unavailable"));
}

#[test]
fn ideas_attach_to_the_selected_node() {
    let mut e = engine();
    click(&mut e, 500.0, 150.0);
    send(&mut e, command("g"));

    let (id, request) = e.host().generation_requests()[0].clone();
    assert_eq!(
        request,
        GenerationRequest {
            prompt: "Second thought".into(),
            context: vec!["First thought".into()],
            count: 3,
        }
    );

    let created = e.generation_completed(id, &["alpha".into(), "".into(), "beta".into()]);
    assert_eq!(created.len(), 2);
    assert_eq!(e.graph().node_count(), 5);
    assert_eq!(e.graph().edge_count(), 3);
    for idea in &created {
        let node = e.graph().node(*idea).unwrap();
        assert_eq!(node.provenance.as_deref(), Some("generated"));
        assert!(node.bounds.x > bounds(&e, "n2").right());
    }
    assert!(e.host().persisted().count() >= 1);
}

#[test]
fn failed_generation_leaves_no_trace() {
    let mut e = engine();
    let n2 = NodeId::intern("n2");
    let id = e.generate_ideas(n2).unwrap();
    let nodes = e.graph().node_count();
    let saves = e.host().persisted().count();

    assert!(e.generation_failed(id, "quota exceeded"));
    assert_eq!(e.graph().node_count(), nodes);
    assert_eq!(e.host().persisted().count(), saves);
    let notice = e.host().notices().last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("quota exceeded"));

    // A late success for the failed request creates nothing.
    assert!(e.generation_completed(id, &["late".into()]).is_empty());
    assert_eq!(e.graph().node_count(), nodes);
}

#[test]
fn generation_times_out_with_a_notice() {
    let mut e = engine();
    let id = e.generate_ideas(NodeId::intern("n1")).unwrap();
    assert!(e.tick(10_000));
    assert!(e.host().notices().any(|n| n.message.contains("timed out")));
    assert!(e.generation_completed(id, &["too late".into()]).is_empty());
}

#[test]
fn empty_generation_result_notifies() {
    let mut e = engine();
    let id = e.generate_ideas(NodeId::intern("n1")).unwrap();
    assert!(e.generation_completed(id, &["  ".into()]).is_empty());
    assert_eq!(e.host().notices().last().unwrap().level, NoticeLevel::Warning);
}

// ─── Clipboard ───────────────────────────────────────────────────────────

#[test]
fn copy_paste_uses_fresh_ids() {
    let mut e = engine();
    click(&mut e, 150.0, 150.0);
    send(&mut e, command("c"));
    assert!(matches!(e.host().calls.last(), Some(HostCall::WriteClipboard(json)) if json.contains("First thought")));

    send(&mut e, command("v"));
    let pasted = e.graph().selected_nodes();
    assert_eq!(pasted.len(), 1);
    assert!(!["n1", "n2", "r1"].contains(&pasted[0].as_str()));
    assert_eq!(e.graph().node(pasted[0]).unwrap().kind, NodeKind::content("First thought"));
    assert_eq!(e.graph().edge_count(), 1);
}

#[test]
fn cut_removes_after_copying() {
    let mut e = engine();
    click(&mut e, 150.0, 150.0);
    send(&mut e, command("x"));
    assert_eq!(e.graph().node_count(), 2);
    assert_eq!(e.graph().edge_count(), 0);

    let json = match e.host().calls.iter().rev().find(|c| matches!(c, HostCall::WriteClipboard(_))) {
        Some(HostCall::WriteClipboard(json)) => json.clone(),
        _ => panic!("nothing written to the clipboard"),
    };
    let pasted = e.paste_json(&json).unwrap();
    assert_eq!(pasted.len(), 1);
    assert_eq!(e.graph().node_count(), 3);
}

#[test]
fn pasted_references_request_their_content() {
    let mut e = engine();
    let json = r#"{"nodes":[{"id":"n1","type":"file","file":"other.md","x":0,"y":0,"width":400,"height":300}]}"#;
    let pasted = e.paste_json(json).unwrap();
    assert_ne!(pasted[0], NodeId::intern("n1"));
    assert!(e.host().content_requests().iter().any(|(path, _)| path == "other.md"));
}

// ─── Repaint ─────────────────────────────────────────────────────────────

#[test]
fn repaints_coalesce_until_the_next_frame() {
    let mut e = engine();
    e.render(&ApproxMeasure::default());

    assert!(e.handle_input(&InputEvent::wheel(900.0, 100.0, 30.0, 0.0)));
    assert!(!e.handle_input(&InputEvent::wheel(900.0, 100.0, 30.0, 0.0)));
    assert_eq!(e.graph().viewport.offset_x, -60.0);

    e.render(&ApproxMeasure::default());
    assert!(e.handle_input(&InputEvent::wheel(900.0, 100.0, 30.0, 0.0)));
}

#[test]
fn invisible_events_do_not_repaint() {
    let mut e = engine();
    e.render(&ApproxMeasure::default());
    assert!(!e.handle_input(&InputEvent::moved(900.0, 100.0)));
    assert!(!e.handle_input(&InputEvent::key("q")));
}
