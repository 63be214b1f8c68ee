//! A ready-made scene: "John went to the park with Mary on a bicycle."
//!
//! Used by `cdg demo`, the integration tests and the benchmarks.

use crate::act::{Act, Primitive};
use crate::error::CdResult;
use crate::graph::{ConceptualDependencyGraph, ConceptualDependencyRelation};
use crate::node::NodeId;
use crate::pp::{Category, Pp};

/// The sentence the scene encodes.
pub const PARK_TRIP_SENTENCE: &str = "John went to the park with Mary on a bicycle.";

/// The park trip graph and handles to its nodes.
#[derive(Debug, Clone)]
pub struct ParkTrip {
    pub graph: ConceptualDependencyGraph,
    pub john: NodeId,
    pub mary: NodeId,
    pub park: NodeId,
    pub bicycle: NodeId,
    /// PTRANS: John goes to the park. `object` is left unfilled.
    pub went: NodeId,
    /// GRASP nested under `went`: John takes the bicycle.
    pub grasp: NodeId,
}

/// Build the park trip scene.
pub fn park_trip() -> CdResult<ParkTrip> {
    let mut graph = ConceptualDependencyGraph::new();

    let john = graph.add_node(Pp::new("John", Category::Person));
    let mary = graph.add_node(Pp::new("Mary", Category::Person));
    let park = graph.add_node(Pp::new("Park", Category::Location));
    let bicycle = graph.add_node(Pp::new("Bicycle", Category::Vehicle));

    let mut went = Act::new(Primitive::Ptrans).with_tense("past");
    went.fill_slot("agent", john);
    went.clear_slot("object");
    went.fill_slot("to_location", park);
    let went = graph.add_node(went);

    let mut grasp = Act::new(Primitive::Grasp).with_tense("past");
    grasp.fill_slot("agent", john);
    grasp.fill_slot("object", bicycle);
    let grasp = graph.add_node(grasp);

    graph.add_nested_action(went, grasp)?;

    graph.add_relation(ConceptualDependencyRelation::new(john, mary, "co-agent"))?;
    graph.add_relation(ConceptualDependencyRelation::new(went, bicycle, "instrument"))?;

    Ok(ParkTrip {
        graph,
        john,
        mary,
        park,
        bicycle,
        went,
        grasp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_shape() {
        let scene = park_trip().unwrap();
        assert_eq!(scene.graph.node_count(), 6);
        assert_eq!(scene.graph.relation_count(), 2);

        let went = scene.graph.act(scene.went).unwrap();
        assert_eq!(went.nested_actions(), &[scene.grasp]);
        assert!(!went.is_slot_filled("object"));
        assert_eq!(went.slot_names(), vec!["agent", "object", "to_location"]);
    }
}
