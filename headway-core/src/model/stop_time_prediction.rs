use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::Keyed;

/// the estimated time a vehicle visited a stop during one trip, regressed
/// from that trip's location pings. one row per stop per qualifying trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopTimePrediction {
    /// `{stop_tag}_{vehicle_id}_{direction_tag}_{trip_number}`
    pub key: String,
    pub stop_tag: String,
    /// ordinal position of the stop along the trip's direction
    pub stop_order: u32,
    pub lat: f64,
    pub lon: f64,
    pub vehicle_id: String,
    pub direction_tag: String,
    pub trip_number: u32,
    pub predicted_time: NaiveDateTime,
}

impl Keyed for StopTimePrediction {
    fn key(&self) -> &str {
        &self.key
    }
}
