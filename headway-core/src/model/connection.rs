use geo::Point;
use serde::{Deserialize, Serialize};

use crate::model::Keyed;

/// a directed proximity edge between two stop tags whose true great-circle
/// distance is within the configured cluster distance. every unordered pair
/// within threshold appears as two rows, one per direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// `{stop1}_{stop2}`, globally unique
    pub key: String,
    pub stop1: String,
    pub lat1: f64,
    pub lon1: f64,
    pub stop2: String,
    pub lat2: f64,
    pub lon2: f64,
    /// exact great-circle distance between the two stops. invariant:
    /// never greater than the cluster distance the row was built with.
    pub distance_meters: f64,
}

impl Connection {
    /// builds the directed row from `stop1` to `stop2`. locations are
    /// lon,lat points.
    pub fn directed(
        stop1: &str,
        location1: &Point<f64>,
        stop2: &str,
        location2: &Point<f64>,
        distance_meters: f64,
    ) -> Connection {
        Connection {
            key: format!("{stop1}_{stop2}"),
            stop1: stop1.to_string(),
            lat1: location1.y(),
            lon1: location1.x(),
            stop2: stop2.to_string(),
            lat2: location2.y(),
            lon2: location2.x(),
            distance_meters,
        }
    }
}

impl Keyed for Connection {
    fn key(&self) -> &str {
        &self.key
    }
}
