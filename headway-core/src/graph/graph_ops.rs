use std::collections::HashSet;

use itertools::Itertools;
use rayon::prelude::*;

use crate::graph::graph_error::GraphError;
use crate::graph::node_ops::normalize_stop_tag;
use crate::model::{Connection, Stop, TransitGraphEdge};

/// builds the sequential edges for one direction: one directed edge per
/// consecutive pair of stops along the direction's stop order. a
/// direction with n usable stops yields exactly n-1 edges; zero or one
/// stop yields none.
///
/// stops are ordered by `stop_along_direction` internally, so callers may
/// pass rows in any order. rows without usable coordinates are dropped
/// before pairing and their neighbors become consecutive.
pub fn build_direction_edges(direction_tag: &str, stops: &[Stop]) -> Vec<TransitGraphEdge> {
    let located = stops
        .iter()
        .filter(|s| s.location().is_some())
        .sorted_by_key(|s| s.stop_along_direction)
        .collect_vec();

    located
        .windows(2)
        .map(|pair| {
            let (s1, s2) = (pair[0], pair[1]);
            TransitGraphEdge {
                key: format!("{}_{}_{}", s1.tag, s2.tag, direction_tag),
                stop_tag1: s1.tag.clone(),
                stop_tag2: s2.tag.clone(),
                node1: normalize_stop_tag(&s1.tag).to_string(),
                node2: normalize_stop_tag(&s2.tag).to_string(),
                direction_tag: Some(direction_tag.to_string()),
                is_connection: false,
            }
        })
        .collect()
}

/// transfers the connections relation into the transit graph: each
/// directed connection row becomes one connection edge, reusing the
/// connection's key and carrying no direction.
pub fn connection_edges(connections: &[Connection]) -> Vec<TransitGraphEdge> {
    connections
        .iter()
        .map(|c| TransitGraphEdge {
            key: c.key.clone(),
            stop_tag1: c.stop1.clone(),
            stop_tag2: c.stop2.clone(),
            node1: normalize_stop_tag(&c.stop1).to_string(),
            node2: normalize_stop_tag(&c.stop2).to_string(),
            direction_tag: None,
            is_connection: true,
        })
        .collect()
}

/// assembles the full transit graph as the union of per-direction
/// sequential edges and connection edges, keyed by edge key.
///
/// duplicate (node1, node2) pairs under distinct keys are expected and
/// retained; a duplicate key is a data-integrity fault and fails the
/// batch, since silently overwriting would break the
/// `|edges| == sum(direction stops - 1) + |connections|` invariant.
pub fn build_transit_graph(
    directions: &[(String, Vec<Stop>)],
    connections: &[Connection],
) -> Result<Vec<TransitGraphEdge>, GraphError> {
    let mut edges: Vec<TransitGraphEdge> = directions
        .par_iter()
        .flat_map_iter(|(direction_tag, stops)| build_direction_edges(direction_tag, stops))
        .collect();
    edges.extend(connection_edges(connections));

    let mut seen: HashSet<&str> = HashSet::with_capacity(edges.len());
    for edge in edges.iter() {
        if !seen.insert(edge.key.as_str()) {
            return Err(GraphError::DuplicateEdgeKey(edge.key.clone()));
        }
    }

    log::info!(
        "assembled transit graph: {} edges from {} directions and {} connections",
        edges.len(),
        directions.len(),
        connections.len()
    );

    Ok(edges)
}
