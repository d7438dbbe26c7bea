use std::collections::HashSet;

use geo::Point;
use rayon::prelude::*;
use rstar::{primitives::GeomWithData, RTree, AABB};

use crate::cluster::cluster_error::ClusterError;
use crate::cluster::distance::great_circle_meters;
use crate::cluster::neighborhood::find_neighborhood_thresholds;
use crate::config::PrepConfig;
use crate::model::{Connection, Stop};

/// stop location in the spatial index, as [lon, lat] degrees, carrying
/// the anchor index back into the deduplicated stop list
type IndexedLocation = GeomWithData<[f64; 2], usize>;

/// clusters all stops of the snapshot that sit within the configured
/// cluster distance of each other, producing the directed connections
/// relation.
///
/// candidate pairs are pruned with an R-tree box query sized by the
/// neighborhood thresholds, then confirmed against the exact great-circle
/// distance. each unordered pair is discovered exactly once (the box scan
/// only accepts candidates above the anchor in index order) and emitted
/// as two directed rows, so the both-directions invariant holds by
/// construction rather than by double-visiting every anchor.
///
/// stop rows without usable coordinates are excluded and do not fail the
/// batch. a stop with no neighbors contributes no rows. two distinct tags
/// at numerically identical coordinates cluster at distance zero.
pub fn build_connections(
    stops: &[Stop],
    config: &PrepConfig,
) -> Result<Vec<Connection>, ClusterError> {
    let cluster_distance = config.cluster_distance_meters;

    // one anchor per distinct tag; the snapshot repeats a tag once per
    // direction it appears on, with the same coordinates
    let mut seen: HashSet<&str> = HashSet::new();
    let mut anchors: Vec<(&str, Point<f64>)> = Vec::new();
    let mut unlocated: usize = 0;
    for stop in stops {
        match stop.location() {
            Some(location) => {
                if seen.insert(stop.tag.as_str()) {
                    anchors.push((stop.tag.as_str(), location));
                }
            }
            None => unlocated += 1,
        }
    }
    if unlocated > 0 {
        log::warn!("excluded {unlocated} stop rows without usable coordinates from clustering");
    }

    let locations: Vec<Point<f64>> = anchors.iter().map(|(_, p)| *p).collect();
    let thresholds = find_neighborhood_thresholds(&locations, cluster_distance)?;

    let tree: RTree<IndexedLocation> = RTree::bulk_load(
        anchors
            .iter()
            .enumerate()
            .map(|(i, (_, p))| GeomWithData::new([p.x(), p.y()], i))
            .collect(),
    );

    let connections: Vec<Connection> = anchors
        .par_iter()
        .enumerate()
        .flat_map_iter(|(i, (tag1, p1))| {
            let envelope = AABB::from_corners(
                [
                    p1.x() - thresholds.lon_degrees,
                    p1.y() - thresholds.lat_degrees,
                ],
                [
                    p1.x() + thresholds.lon_degrees,
                    p1.y() + thresholds.lat_degrees,
                ],
            );
            let mut rows: Vec<Connection> = Vec::new();
            for candidate in tree.locate_in_envelope(&envelope) {
                // accept only candidates above the anchor in index order
                // so each unordered pair is handled exactly once
                if candidate.data <= i {
                    continue;
                }
                let (tag2, p2) = anchors[candidate.data];
                let dist = great_circle_meters(p1, &p2);
                if dist <= cluster_distance {
                    rows.push(Connection::directed(tag1, p1, tag2, &p2, dist));
                    rows.push(Connection::directed(tag2, &p2, tag1, p1, dist));
                }
            }
            rows
        })
        .collect();

    log::info!(
        "clustered {} stops into {} directed connection rows at {}m",
        anchors.len(),
        connections.len(),
        cluster_distance
    );

    Ok(connections)
}
