//! End-to-end tests for conceptual dependency graphs.
//!
//! These tests build whole scenes, run slot inference over them and
//! propagate state changes, checking that the graph, the knowledge base and
//! the engine agree with each other.

use std::cell::RefCell;
use std::rc::Rc;

use conceptual_dependency::act::{Act, INSTRUMENTS_SLOT, Primitive};
use conceptual_dependency::config::CdConfig;
use conceptual_dependency::error::{ActError, InferError};
use conceptual_dependency::graph::{
    ConceptualDependencyGraph, ConceptualDependencyRelation, add_control_state_change,
    add_ownership_change,
};
use conceptual_dependency::infer::{
    FailUnresolved, InferResult, InferenceEngine, PromptProvider, ResolutionSource, SlotProvider,
    SlotRequest,
};
use conceptual_dependency::knowledge::KnowledgeBase;
use conceptual_dependency::node::Filler;
use conceptual_dependency::pp::{Category, Pp};
use conceptual_dependency::sample::park_trip;
use conceptual_dependency::state::{State, StateType};

#[test]
fn park_trip_scene_structure() {
    let scene = park_trip().unwrap();
    let graph = &scene.graph;

    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.relation_count(), 2);

    let went = graph.act(scene.went).unwrap();
    assert_eq!(went.label(), "PTRANS");
    assert_eq!(went.nested_actions(), &[scene.grasp]);
    assert_eq!(went.slot("agent"), Some(&Filler::Node(scene.john)));
    assert_eq!(went.slot("to_location"), Some(&Filler::Node(scene.park)));

    let grasp = graph.act(scene.grasp).unwrap();
    assert_eq!(grasp.slot("object"), Some(&Filler::Node(scene.bicycle)));

    let from_john = graph.relations_from(scene.john);
    assert_eq!(from_john.len(), 1);
    assert_eq!(from_john[0].to, scene.mary);
    assert_eq!(from_john[0].relation_type, "co-agent");

    let rendered = graph.render_acts();
    assert!(rendered.contains("PTRANS"));
    assert!(rendered.contains("Nested Actions:"));
}

#[test]
fn rule_fills_object_without_prompting() {
    let mut scene = park_trip().unwrap();

    let mut kb = KnowledgeBase::new();
    kb.add_rule("PTRANS", "object", "luggage");

    let mut engine = InferenceEngine::new(Some(kb)).with_provider(FailUnresolved);
    engine.add_action(scene.went);
    let report = engine.run(&mut scene.graph).unwrap();

    let went = scene.graph.act(scene.went).unwrap();
    assert_eq!(went.slot("object"), Some(&Filler::from("luggage")));
    assert_eq!(report.resolutions.len(), 1);
    assert_eq!(
        report.resolution(scene.went, "object").map(|r| r.source),
        Some(ResolutionSource::Rule)
    );

    // The nested GRASP was already complete.
    assert!(report.from_source(ResolutionSource::Elicited).next().is_none());
    assert!(report.render(&scene.graph).contains("PTRANS.object = luggage (rule)"));
}

#[test]
fn unanswerable_slot_stops_the_run() {
    let mut scene = park_trip().unwrap();
    let mut engine = InferenceEngine::new(None).with_provider(FailUnresolved);
    engine.add_action(scene.went);

    let err = engine.run(&mut scene.graph).unwrap_err();
    assert!(matches!(
        err,
        InferError::UnresolvedSlot { ref action, ref slot } if action == "PTRANS" && slot == "object"
    ));
}

#[test]
fn operator_answers_are_taken_literally() {
    let mut scene = park_trip().unwrap();
    let provider = PromptProvider::new("a backpack\n".as_bytes(), Vec::new());
    let mut engine = InferenceEngine::new(None).with_provider(provider);
    engine.add_action(scene.went);
    engine.run(&mut scene.graph).unwrap();

    assert_eq!(
        scene.graph.act(scene.went).unwrap().slot("object"),
        Some(&Filler::from("a backpack"))
    );
}

/// A provider answering "x" that records each request as `ACTION.slot`.
fn recording() -> (Rc<RefCell<Vec<String>>>, impl SlotProvider + 'static) {
    let asked = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&asked);
    let provider = move |request: &SlotRequest<'_>| -> InferResult<Filler> {
        log.borrow_mut()
            .push(format!("{}.{}", request.action, request.slot));
        Ok(Filler::from("x"))
    };
    (asked, provider)
}

#[test]
fn only_one_level_of_nesting_is_resolved() {
    let mut graph = ConceptualDependencyGraph::new();
    let top = graph.add_node(Act::new(Primitive::Cause));
    let middle = graph.add_node(Act::new(Primitive::Do));
    let bottom = graph.add_node(Act::new(Primitive::Speak));
    graph.add_nested_action(top, middle).unwrap();
    graph.add_nested_action(middle, bottom).unwrap();

    let (asked, provider) = recording();
    let mut engine = InferenceEngine::new(None).with_provider(provider);
    engine.add_action(top);
    let report = engine.run(&mut graph).unwrap();

    assert_eq!(report.resolutions.len(), 4);
    assert_eq!(
        *asked.borrow(),
        vec!["CAUSE.agent", "CAUSE.effect", "DO.agent", "DO.object"]
    );
    assert!(graph.act(middle).unwrap().is_slot_filled("object"));
    assert!(!graph.act(bottom).unwrap().is_slot_filled("speaker"));
}

#[test]
fn resolution_follows_queue_nesting_and_slot_order() {
    let mut graph = ConceptualDependencyGraph::new();
    let give = graph.add_node(Act::new(Primitive::Atrans));
    let grasp = graph.add_node(Act::new(Primitive::Grasp));
    let speak = graph.add_node(Act::new(Primitive::Speak));
    graph.add_nested_action(give, grasp).unwrap();

    let (asked, provider) = recording();
    let mut engine = InferenceEngine::new(None).with_provider(provider);
    engine.add_action(give);
    engine.add_action(speak);
    let report = engine.run(&mut graph).unwrap();

    let order: Vec<String> = report
        .resolutions
        .iter()
        .map(|r| format!("{}.{}", r.action_label, r.slot))
        .collect();
    let expected = vec![
        "ATRANS.agent",
        "ATRANS.object",
        "ATRANS.recipient",
        "GRASP.agent",
        "GRASP.object",
        "SPEAK.speaker",
        "SPEAK.utterance",
    ];
    assert_eq!(order, expected);
    assert_eq!(*asked.borrow(), expected);
    assert_eq!(report.actions, vec![give, speak]);
}

#[test]
fn instruments_are_never_resolved() {
    let mut scene = park_trip().unwrap();
    let graph = &mut scene.graph;
    {
        let grasp = graph.act_mut(scene.grasp).unwrap();
        grasp.fill_slot(INSTRUMENTS_SLOT, scene.bicycle);
        grasp.clear_slot(INSTRUMENTS_SLOT);
    }
    graph.set_instruments(scene.went, &[scene.bicycle]).unwrap();

    let mut kb = KnowledgeBase::new();
    kb.add_rule("PTRANS", "object", "luggage");
    let (asked, provider) = recording();
    let mut engine = InferenceEngine::new(Some(kb)).with_provider(provider);
    engine.add_action(scene.went);
    let report = engine.run(graph).unwrap();

    assert!(asked.borrow().is_empty());
    assert!(report.resolutions.iter().all(|r| r.slot != INSTRUMENTS_SLOT));
    assert!(graph.act(scene.grasp).unwrap().instruments().is_empty());
    assert_eq!(graph.act(scene.went).unwrap().instruments(), &[scene.bicycle]);
}

#[test]
fn find_relations_matches_properties_only() {
    let scene = park_trip().unwrap();
    let mut graph = scene.graph;
    graph
        .add_relation(
            ConceptualDependencyRelation::new(scene.went, scene.bicycle, "uses")
                .with_property("type", "instrument"),
        )
        .unwrap();
    graph
        .add_relation(
            ConceptualDependencyRelation::new(scene.john, scene.mary, "accompanies")
                .with_property("type", "co-agent"),
        )
        .unwrap();

    let found = graph.find_relations(&[("type", "instrument".into())]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].relation_type, "uses");

    assert_eq!(graph.relations_of_type("instrument").len(), 1);
    assert_eq!(graph.find_relations(&[]).len(), 4);
}

#[test]
fn grasp_moves_control_to_object_and_instrument() {
    let mut scene = park_trip().unwrap();
    let graph = &mut scene.graph;
    let hand = graph.add_node(Pp::new("Hand", Category::Object));
    let free = graph.add_node(State::new("free", StateType::Control));
    let held = graph.add_node(State::new("held by John", StateType::Control));

    add_control_state_change(graph, scene.grasp, free, held).unwrap();
    graph.set_instruments(scene.grasp, &[hand]).unwrap();
    let applied = graph.process_state_changes(scene.grasp).unwrap();

    assert_eq!(applied.len(), 2);
    assert!(applied.iter().any(|change| change.via_instrument));
    assert_eq!(
        graph.pp(scene.bicycle).unwrap().get_state(&StateType::Control),
        Some("held by John")
    );
    assert_eq!(
        graph.pp(hand).unwrap().get_state(&StateType::Control),
        Some("held by John")
    );
}

#[test]
fn non_control_changes_skip_instruments() {
    let mut graph = ConceptualDependencyGraph::new();
    let book = graph.add_node(Pp::new("Book", Category::Object));
    let pen = graph.add_node(Pp::new("Pen", Category::Object));
    let john = graph.add_node(State::new("owned by John", StateType::Ownership));
    let mary = graph.add_node(State::new("owned by Mary", StateType::Ownership));

    let mut give = Act::new(Primitive::Atrans);
    give.fill_slot("object", book);
    let give = graph.add_node(give);

    add_ownership_change(&mut graph, give, john, mary).unwrap();
    graph.set_instruments(give, &[pen]).unwrap();
    graph.process_state_changes(give).unwrap();

    assert_eq!(
        graph.pp(book).unwrap().get_state(&StateType::Ownership),
        Some("owned by Mary")
    );
    assert!(graph.pp(pen).unwrap().current_states().is_empty());
}

#[test]
fn invalid_edits_leave_the_act_untouched() {
    let scene = park_trip().unwrap();
    let mut graph = scene.graph;

    assert!(matches!(
        graph.add_nested_action(scene.went, scene.john),
        Err(ActError::InvalidNestedAction { .. })
    ));
    assert!(matches!(
        graph.add_nested_action(scene.grasp, scene.went),
        Err(ActError::NestingCycle { .. })
    ));
    assert!(matches!(
        graph.set_instruments(scene.went, &[scene.grasp]),
        Err(ActError::InvalidInstrument { .. })
    ));
    assert!(matches!(
        add_control_state_change(&mut graph, scene.grasp, scene.john, scene.mary),
        Err(ActError::InvalidStateChange { .. })
    ));

    let went = graph.act(scene.went).unwrap();
    assert_eq!(went.nested_actions(), &[scene.grasp]);
    assert!(went.instruments().is_empty());
    assert!(graph.act(scene.grasp).unwrap().state_changes().is_empty());
}

#[test]
fn config_drives_the_engine_from_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("kb.toml"),
        "[states]\nlocation = \"home\"\n\n[defaults]\nobject = \"umbrella\"\n",
    )
    .unwrap();
    let config_path = dir.path().join("cdg.toml");
    std::fs::write(
        &config_path,
        "elicitation = \"fail\"\nknowledge_base = \"kb.toml\"\n",
    )
    .unwrap();

    let config = CdConfig::load(&config_path).unwrap();
    let mut engine = config.build_engine().unwrap();

    let mut graph = ConceptualDependencyGraph::new();
    let mut walk = Act::new(Primitive::Ptrans);
    walk.fill_slot("agent", "John");
    walk.clear_slot("from");
    let walk = graph.add_node(walk);

    engine.add_action(walk);
    let report = engine.run(&mut graph).unwrap();

    let act = graph.act(walk).unwrap();
    assert_eq!(act.slot("object"), Some(&Filler::from("umbrella")));
    assert_eq!(act.slot("from"), Some(&Filler::from("home")));
    assert_eq!(
        report.resolution(walk, "from").map(|r| r.source),
        Some(ResolutionSource::StateHint)
    );
}
