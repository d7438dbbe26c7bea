use geo::Point;

use crate::cluster::cluster_error::ClusterError;
use crate::cluster::distance::great_circle_meters;

/// coordinate-space half-widths, in degrees, of the rectangular search
/// box used to prune candidate pairs during clustering. a box of these
/// half-widths around any stop in the dataset the thresholds were fit to
/// is guaranteed to contain every other stop within the physical cluster
/// distance; points inside the box may still fail the exact distance
/// test (false positives are fine, false negatives are not).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborhoodThresholds {
    pub lat_degrees: f64,
    pub lon_degrees: f64,
}

/// both half-widths start at ~10m worth of degrees and grow by the same
/// step until the offset point clears the cluster distance
const SEED_DEGREES: f64 = 1e-4;
const INCREMENT_DEGREES: f64 = 1e-4;

/// upper bound on increments per axis (10 degrees, over 1100km of
/// latitude). city-scale cluster distances converge in a handful of
/// steps; hitting this bound means the input or the configuration is
/// pathological and the batch must fail rather than spin.
const MAX_INCREMENTS: usize = 100_000;

enum Axis {
    Lat,
    Lon,
}

impl Axis {
    fn offset(&self, p: &Point<f64>, degrees: f64) -> (Point<f64>, Point<f64>) {
        match self {
            Axis::Lat => (
                Point::new(p.x(), p.y() + degrees),
                Point::new(p.x(), p.y() - degrees),
            ),
            Axis::Lon => (
                Point::new(p.x() + degrees, p.y()),
                Point::new(p.x() - degrees, p.y()),
            ),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Axis::Lat => "latitude",
            Axis::Lon => "longitude",
        }
    }
}

/// converts the physical cluster distance into per-axis degree
/// half-widths, fit against the full stop snapshot.
///
/// for each stop and each axis independently, the candidate half-width is
/// grown until offsetting the stop by that half-width along the axis (in
/// whichever offset direction is nearer) lands strictly beyond the
/// cluster distance. the running maximum is carried across all stops, so
/// one global pair of half-widths serves the whole dataset: growing a
/// half-width for a later stop only widens earlier stops' boxes, which
/// can only add false positives.
pub fn find_neighborhood_thresholds(
    locations: &[Point<f64>],
    cluster_distance_meters: f64,
) -> Result<NeighborhoodThresholds, ClusterError> {
    if !cluster_distance_meters.is_finite() || cluster_distance_meters <= 0.0 {
        return Err(ClusterError::InvalidClusterDistance(cluster_distance_meters));
    }

    let lat_degrees = fit_axis(Axis::Lat, locations, cluster_distance_meters)?;
    let lon_degrees = fit_axis(Axis::Lon, locations, cluster_distance_meters)?;

    log::debug!(
        "neighborhood thresholds for {}m cluster distance: lat {:.4} deg, lon {:.4} deg",
        cluster_distance_meters,
        lat_degrees,
        lon_degrees
    );

    Ok(NeighborhoodThresholds {
        lat_degrees,
        lon_degrees,
    })
}

fn fit_axis(
    axis: Axis,
    locations: &[Point<f64>],
    cluster_distance_meters: f64,
) -> Result<f64, ClusterError> {
    let mut threshold = SEED_DEGREES;
    let mut increments: usize = 0;

    for p in locations {
        loop {
            let (plus, minus) = axis.offset(p, threshold);
            let dist = f64::min(
                great_circle_meters(p, &plus),
                great_circle_meters(p, &minus),
            );
            if dist > cluster_distance_meters {
                break;
            }
            threshold += INCREMENT_DEGREES;
            increments += 1;
            if increments > MAX_INCREMENTS {
                return Err(ClusterError::ThresholdSearchDiverged {
                    axis: axis.name().to_string(),
                    limit: MAX_INCREMENTS,
                    cluster_distance_meters,
                });
            }
        }
    }

    Ok(threshold)
}
