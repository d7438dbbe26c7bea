use serde::{Deserialize, Serialize};

use crate::model::Keyed;

/// a directed edge in the merged transit graph. two provenance classes
/// share this relation:
///   - sequential edges between consecutive stops on a direction, with
///     `direction_tag` set and `is_connection = false`;
///   - connection edges transferred from the connections relation, with
///     `direction_tag = None` and `is_connection = true`.
///
/// `stop_tag1`/`stop_tag2` keep the raw tags for joining back to the stops
/// relation; `node1`/`node2` are the canonical physical-stop identities
/// with directional suffixes removed. duplicate (node1, node2) pairs under
/// distinct keys are expected and retained, they represent physically
/// distinct traversal options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitGraphEdge {
    /// sequential: `{stop_tag1}_{stop_tag2}_{direction_tag}`;
    /// connection: the connection row's key. unique across both classes.
    pub key: String,
    pub stop_tag1: String,
    pub stop_tag2: String,
    pub node1: String,
    pub node2: String,
    pub direction_tag: Option<String>,
    pub is_connection: bool,
}

impl Keyed for TransitGraphEdge {
    fn key(&self) -> &str {
        &self.key
    }
}
