//! batch pipeline operations. each operation reads the current snapshot
//! through the store, runs the headway-core computation, and upserts the
//! derived relation back by primary key; running an operation twice
//! against the same snapshot is idempotent.
use clap::Subcommand;
use headway_core::cluster::build_connections;
use headway_core::config::PrepConfig;
use headway_core::estimate::predict_stop_times;
use headway_core::graph::build_transit_graph;
use headway_core::model::Stop;

use crate::app::app_error::AppError;
use crate::store::{CsvStore, StoreError};

#[derive(Debug, Clone, Subcommand)]
pub enum Operation {
    /// cluster nearby stops into the directed connections relation
    Connections,
    /// merge sequential and connection edges into the transit graph relation
    TransitGraph,
    /// estimate per-trip stop visit times from vehicle pings
    PredictTimes,
    /// run connections, transit graph, and time estimation in sequence
    All,
}

impl Operation {
    pub fn run(&self, config: &PrepConfig, store: &CsvStore) -> Result<(), AppError> {
        match self {
            Operation::Connections => run_connections(config, store),
            Operation::TransitGraph => run_transit_graph(config, store),
            Operation::PredictTimes => run_predict_times(config, store),
            Operation::All => {
                run_connections(config, store)?;
                run_transit_graph(config, store)?;
                run_predict_times(config, store)
            }
        }
    }
}

fn run_connections(config: &PrepConfig, store: &CsvStore) -> Result<(), AppError> {
    let stops = store.stop_snapshot(&config.agency_tag)?;
    let connections = build_connections(&stops, config)?;
    let written = store.upsert_connections(&connections)?;
    log::info!("connections operation upserted {written} rows");
    Ok(())
}

fn run_transit_graph(config: &PrepConfig, store: &CsvStore) -> Result<(), AppError> {
    let directions: Vec<(String, Vec<Stop>)> = store
        .direction_tags(&config.agency_tag)?
        .into_iter()
        .map(|tag| {
            let stops = store.direction_stops(&tag, &config.agency_tag)?;
            Ok((tag, stops))
        })
        .collect::<Result<Vec<_>, StoreError>>()?;
    let connections = store.connections()?;
    let edges = build_transit_graph(&directions, &connections)?;
    let written = store.upsert_transit_graph(&edges)?;
    log::info!("transit graph operation upserted {written} rows");
    Ok(())
}

fn run_predict_times(config: &PrepConfig, store: &CsvStore) -> Result<(), AppError> {
    let pings = store.vehicle_pings(&config.agency_tag)?;
    let stops = store.stop_snapshot(&config.agency_tag)?;
    let predictions = predict_stop_times(&pings, &stops)?;
    let written = store.upsert_predictions(&predictions)?;
    log::info!("time estimation operation upserted {written} rows");
    Ok(())
}
