use geo::Point;
use serde::{Deserialize, Serialize};

/// a transit stop row as delivered by the upstream snapshot, one row per
/// appearance of a stop on a route direction. the same physical stop may
/// appear under several tags (directional suffix variants) and on several
/// directions.
///
/// `lat`/`lon` are optional at the ingest boundary: a stop row may arrive
/// without coordinates, in which case it is excluded from clustering and
/// from sequential edge construction but does not fail the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    /// stop identifier within the agency, possibly carrying a directional
    /// suffix such as `_IB`, `_OB` or `_ar`
    pub tag: String,
    /// human-readable stop name
    pub title: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// route this stop row belongs to
    pub route_tag: String,
    /// direction this stop row belongs to
    pub direction_tag: String,
    /// 1-based ordinal position of this stop along its direction, unique
    /// per (direction_tag, stop_along_direction)
    pub stop_along_direction: u32,
    pub agency_tag: String,
}

impl Stop {
    /// the stop location as a lon,lat point, if both coordinates are
    /// present and finite. non-finite coordinates are treated the same as
    /// absent ones so that NaN never reaches a distance computation.
    pub fn location(&self) -> Option<Point<f64>> {
        match (self.lon, self.lat) {
            (Some(lon), Some(lat)) if lon.is_finite() && lat.is_finite() => {
                Some(Point::new(lon, lat))
            }
            _ => None,
        }
    }
}
