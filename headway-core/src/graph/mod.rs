mod graph_error;
mod graph_ops;
mod node_ops;

pub use graph_error::GraphError;
pub use graph_ops::{build_direction_edges, build_transit_graph, connection_edges};
pub use node_ops::normalize_stop_tag;
