use std::collections::HashMap;

use chrono::DateTime;
use geo::Point;
use rayon::prelude::*;

use crate::estimate::estimate_error::EstimateError;
use crate::estimate::knn::KnnRegressor;
use crate::model::{Stop, StopTimePrediction, VehiclePing};

/// neighbors used by the per-trip regression. trips with fewer pings
/// than this carry too little evidence to regress and are skipped.
pub const REGRESSION_NEIGHBORS: usize = 3;

/// one traversal of a direction by one vehicle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TripKey {
    vehicle_id: String,
    direction_tag: String,
    trip_number: u32,
}

/// estimates the time each trip visited each stop on its direction.
///
/// pings are grouped into trips by (vehicle_id, direction_tag,
/// trip_number). for each trip with at least [`REGRESSION_NEIGHBORS`]
/// pings, a distance-weighted k-nearest-neighbor regressor is fit from
/// ping position to ping timestamp, then evaluated at each stop location
/// on the trip's direction. trips with fewer pings are skipped silently;
/// they are noise, not an error. returns no rows when no trip qualifies.
pub fn predict_stop_times(
    pings: &[VehiclePing],
    stops: &[Stop],
) -> Result<Vec<StopTimePrediction>, EstimateError> {
    // located stop geometry per direction, in stop order
    let mut direction_stops: HashMap<&str, Vec<(&Stop, Point<f64>)>> = HashMap::new();
    for stop in stops {
        if let Some(location) = stop.location() {
            direction_stops
                .entry(stop.direction_tag.as_str())
                .or_default()
                .push((stop, location));
        }
    }
    for located in direction_stops.values_mut() {
        located.sort_by_key(|(stop, _)| stop.stop_along_direction);
    }

    let mut trips: HashMap<TripKey, Vec<&VehiclePing>> = HashMap::new();
    for ping in pings {
        let key = TripKey {
            vehicle_id: ping.vehicle_id.clone(),
            direction_tag: ping.direction_tag.clone(),
            trip_number: ping.trip_number,
        };
        trips.entry(key).or_default().push(ping);
    }

    let mut groups: Vec<(TripKey, Vec<&VehiclePing>)> = trips.into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| {
        (&a.vehicle_id, &a.direction_tag, a.trip_number)
            .cmp(&(&b.vehicle_id, &b.direction_tag, b.trip_number))
    });

    let skipped = groups
        .iter()
        .filter(|(_, group)| group.len() < REGRESSION_NEIGHBORS)
        .count();
    if skipped > 0 {
        log::debug!("skipped {skipped} trips with fewer than {REGRESSION_NEIGHBORS} pings");
    }

    let per_trip: Vec<Vec<StopTimePrediction>> = groups
        .par_iter()
        .filter(|(_, group)| group.len() >= REGRESSION_NEIGHBORS)
        .map(|(trip, group)| predict_trip(trip, group, &direction_stops))
        .collect::<Result<Vec<_>, EstimateError>>()?;

    let predictions: Vec<StopTimePrediction> = per_trip.into_iter().flatten().collect();
    log::info!(
        "estimated {} stop visit times across {} trips",
        predictions.len(),
        groups.len() - skipped
    );
    Ok(predictions)
}

fn predict_trip(
    trip: &TripKey,
    group: &[&VehiclePing],
    direction_stops: &HashMap<&str, Vec<(&Stop, Point<f64>)>>,
) -> Result<Vec<StopTimePrediction>, EstimateError> {
    let samples: Vec<([f64; 2], f64)> = group
        .iter()
        .map(|ping| {
            (
                [ping.lat, ping.lon],
                ping.read_time.and_utc().timestamp_millis() as f64,
            )
        })
        .collect();
    let knn = KnnRegressor::fit(REGRESSION_NEIGHBORS, samples)?;

    let located = direction_stops
        .get(trip.direction_tag.as_str())
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    located
        .iter()
        .map(|(stop, location)| {
            let millis = knn.predict([location.y(), location.x()]);
            if !millis.is_finite() {
                return Err(EstimateError::TimestampOutOfRange(millis));
            }
            let predicted_time = DateTime::from_timestamp_millis(millis.round() as i64)
                .map(|dt| dt.naive_utc())
                .ok_or(EstimateError::TimestampOutOfRange(millis))?;
            Ok(StopTimePrediction {
                key: format!(
                    "{}_{}_{}_{}",
                    stop.tag, trip.vehicle_id, trip.direction_tag, trip.trip_number
                ),
                stop_tag: stop.tag.clone(),
                stop_order: stop.stop_along_direction,
                lat: location.y(),
                lon: location.x(),
                vehicle_id: trip.vehicle_id.clone(),
                direction_tag: trip.direction_tag.clone(),
                trip_number: trip.trip_number,
                predicted_time,
            })
        })
        .collect()
}
