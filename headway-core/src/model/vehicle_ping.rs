use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// a single vehicle location observation. pings arrive already segmented
/// into trips upstream: the (vehicle_id, direction_tag, trip_number)
/// triple scopes one traversal of a direction by one vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehiclePing {
    pub vehicle_id: String,
    pub direction_tag: String,
    pub trip_number: u32,
    pub lat: f64,
    pub lon: f64,
    pub read_time: NaiveDateTime,
    pub agency_tag: String,
}
