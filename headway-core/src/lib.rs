//! computation core for the headway transit data preparation pipeline.
//! consumes immutable snapshots of stop and vehicle telemetry records and
//! derives the connections relation, the transit graph relation, and
//! per-trip stop arrival time estimates.
pub mod cluster;
pub mod config;
pub mod estimate;
pub mod graph;
pub mod model;
