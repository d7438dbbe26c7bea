mod connection;
mod stop;
mod stop_time_prediction;
mod transit_graph_edge;
mod vehicle_ping;

pub use connection::Connection;
pub use stop::Stop;
pub use stop_time_prediction::StopTimePrediction;
pub use transit_graph_edge::TransitGraphEdge;
pub use vehicle_ping::VehiclePing;

/// a derived relation row addressable by its primary key. all derived
/// relations are recomputed wholesale each batch run and delivered to
/// storage through an upsert-by-key interface, so the key is the only
/// identity a row carries.
pub trait Keyed {
    fn key(&self) -> &str;
}
