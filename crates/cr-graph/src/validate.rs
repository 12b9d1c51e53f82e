//! Search-graph validation logic.

use crate::error::{GraphError, GraphResult};
use crate::graph::SearchGraph;
use crate::provenance::MidpointProvenance;

/// Every adjacency entry must point at a node that lists it back.
pub(crate) fn validate_structure(graph: &SearchGraph) -> GraphResult<()> {
    for (&a, neighbors) in &graph.adjacency {
        for &b in neighbors {
            match graph.adjacency.get(&b) {
                None => return Err(GraphError::DanglingEdge { a, b }),
                Some(back) if !back.contains(&a) => {
                    return Err(GraphError::AsymmetricEdge { a, b });
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}

/// Every node must have a provenance entry for detail routing.
pub(crate) fn validate_provenance(
    graph: &SearchGraph,
    provenance: &MidpointProvenance,
) -> GraphResult<()> {
    match graph.nodes().find(|&node| !provenance.contains(node)) {
        Some(node) => Err(GraphError::MissingProvenance { node }),
        None => Ok(()),
    }
}
