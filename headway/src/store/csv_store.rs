use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use csv::QuoteStyle;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use itertools::Itertools;
use kdam::tqdm;
use serde::de::DeserializeOwned;
use serde::Serialize;

use headway_core::model::{
    Connection, Keyed, Stop, StopTimePrediction, TransitGraphEdge, VehiclePing,
};

use crate::store::store_error::StoreError;

const STOPS_FILENAME: &str = "stops.csv";
const VEHICLE_PINGS_FILENAME: &str = "vehicle_locations.csv";
const CONNECTIONS_FILENAME: &str = "connections.csv";
const TRANSIT_GRAPH_FILENAME: &str = "transit_graph.csv";
const PREDICTIONS_FILENAME: &str = "predicted_stop_times.csv.gz";

/// file-backed snapshot source and derived-relation sink. snapshot csv
/// files are read from the input directory; derived relations are
/// written to the output directory with upsert-by-primary-key semantics,
/// so repeated batch runs against the same directory converge on the
/// latest computation instead of accumulating stale rows.
pub struct CsvStore {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl CsvStore {
    pub fn new(input_dir: &Path, output_dir: &Path) -> Result<CsvStore, StoreError> {
        std::fs::create_dir_all(output_dir).map_err(|e| StoreError::IoError {
            path: display_path(output_dir),
            source: e,
        })?;
        Ok(CsvStore {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// all stop rows for an agency, in file order. rows with absent
    /// coordinate fields deserialize with `None` coordinates; rows with
    /// malformed fields fail the read with the offending record
    /// identified.
    pub fn stop_snapshot(&self, agency_tag: &str) -> Result<Vec<Stop>, StoreError> {
        let path = self.input_dir.join(STOPS_FILENAME);
        let rows: Vec<Stop> = read_relation(&path)?;
        Ok(rows
            .into_iter()
            .filter(|s| s.agency_tag == agency_tag)
            .collect())
    }

    /// distinct direction tags for an agency, sorted for deterministic
    /// batch ordering
    pub fn direction_tags(&self, agency_tag: &str) -> Result<Vec<String>, StoreError> {
        let stops = self.stop_snapshot(agency_tag)?;
        Ok(stops
            .into_iter()
            .map(|s| s.direction_tag)
            .sorted()
            .dedup()
            .collect_vec())
    }

    /// stop rows on one direction, ordered by position along the direction
    pub fn direction_stops(
        &self,
        direction_tag: &str,
        agency_tag: &str,
    ) -> Result<Vec<Stop>, StoreError> {
        let stops = self.stop_snapshot(agency_tag)?;
        Ok(stops
            .into_iter()
            .filter(|s| s.direction_tag == direction_tag)
            .sorted_by_key(|s| s.stop_along_direction)
            .collect_vec())
    }

    /// the connections relation produced by an earlier run of the
    /// connections operation
    pub fn connections(&self) -> Result<Vec<Connection>, StoreError> {
        let path = self.output_dir.join(CONNECTIONS_FILENAME);
        if !path.exists() {
            return Err(StoreError::MissingRelation {
                path: display_path(&path),
                operation: String::from("connections"),
            });
        }
        read_relation(&path)
    }

    /// all vehicle ping rows for an agency. this is the widest input
    /// file of a batch, so the read reports progress.
    pub fn vehicle_pings(&self, agency_tag: &str) -> Result<Vec<VehiclePing>, StoreError> {
        let path = self.input_dir.join(VEHICLE_PINGS_FILENAME);
        let reader = open_reader(&path)?;
        let rows: Vec<VehiclePing> =
            tqdm!(reader.into_deserialize::<VehiclePing>(), desc = "read vehicle pings")
                .map(|row| {
                    row.map_err(|e| StoreError::ReadError {
                        path: display_path(&path),
                        source: e,
                    })
                })
                .collect::<Result<Vec<_>, StoreError>>()?;
        Ok(rows
            .into_iter()
            .filter(|p| p.agency_tag == agency_tag)
            .collect())
    }

    pub fn upsert_connections(&self, rows: &[Connection]) -> Result<usize, StoreError> {
        self.upsert_relation(CONNECTIONS_FILENAME, rows)
    }

    pub fn upsert_transit_graph(&self, rows: &[TransitGraphEdge]) -> Result<usize, StoreError> {
        self.upsert_relation(TRANSIT_GRAPH_FILENAME, rows)
    }

    pub fn upsert_predictions(&self, rows: &[StopTimePrediction]) -> Result<usize, StoreError> {
        self.upsert_relation(PREDICTIONS_FILENAME, rows)
    }

    /// merges rows into the named relation by primary key: an existing
    /// key is overwritten in place, a new key is appended, untouched
    /// rows survive. the merged relation is rewritten wholesale.
    fn upsert_relation<R>(&self, filename: &str, rows: &[R]) -> Result<usize, StoreError>
    where
        R: Serialize + DeserializeOwned + Keyed + Clone,
    {
        let path = self.output_dir.join(filename);
        let mut merged: Vec<R> = if path.exists() {
            read_relation(&path)?
        } else {
            Vec::new()
        };
        let mut index: HashMap<String, usize> = merged
            .iter()
            .enumerate()
            .map(|(i, row)| (row.key().to_string(), i))
            .collect();

        for row in rows {
            match index.get(row.key()) {
                Some(&i) => merged[i] = row.clone(),
                None => {
                    index.insert(row.key().to_string(), merged.len());
                    merged.push(row.clone());
                }
            }
        }

        write_relation(&path, &merged)?;
        log::debug!(
            "upserted {} rows into '{}' ({} total)",
            rows.len(),
            display_path(&path),
            merged.len()
        );
        Ok(rows.len())
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn open_reader(path: &Path) -> Result<csv::Reader<Box<dyn Read>>, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::IoError {
        path: display_path(path),
        source: e,
    })?;
    let raw: Box<dyn Read> = if is_gzip(path) {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(csv::ReaderBuilder::new().from_reader(raw))
}

fn read_relation<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>, StoreError> {
    let reader = open_reader(path)?;
    reader
        .into_deserialize::<R>()
        .map(|row| {
            row.map_err(|e| StoreError::ReadError {
                path: display_path(path),
                source: e,
            })
        })
        .collect()
}

fn write_relation<R: Serialize>(path: &Path, rows: &[R]) -> Result<(), StoreError> {
    let file = File::create(path).map_err(|e| StoreError::IoError {
        path: display_path(path),
        source: e,
    })?;
    let raw: Box<dyn Write> = if is_gzip(path) {
        Box::new(GzEncoder::new(file, Compression::default()))
    } else {
        Box::new(file)
    };
    let mut writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(raw);
    for row in rows {
        writer.serialize(row).map_err(|e| StoreError::WriteError {
            path: display_path(path),
            source: e,
        })?;
    }
    writer.flush().map_err(|e| StoreError::IoError {
        path: display_path(path),
        source: e,
    })
}

#[cfg(test)]
mod test {
    use super::{CsvStore, CONNECTIONS_FILENAME, PREDICTIONS_FILENAME, STOPS_FILENAME};
    use crate::store::StoreError;
    use chrono::NaiveDate;
    use flate2::read::GzDecoder;
    use headway_core::model::{Connection, StopTimePrediction};
    use std::fs::File;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn test_dirs(label: &str) -> (PathBuf, PathBuf) {
        let n = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let base = std::env::temp_dir().join(format!(
            "headway-store-test-{}-{label}-{n}",
            std::process::id()
        ));
        let input = base.join("snapshot");
        let output = base.join("derived");
        std::fs::create_dir_all(&input).expect("test input dir");
        (input, output)
    }

    fn connection(key_from: &str, key_to: &str, distance_meters: f64) -> Connection {
        Connection {
            key: format!("{key_from}_{key_to}"),
            stop1: key_from.to_string(),
            lat1: 43.0,
            lon1: -79.0,
            stop2: key_to.to_string(),
            lat2: 43.0005,
            lon2: -79.0,
            distance_meters,
        }
    }

    #[test]
    fn test_stop_snapshot_handles_absent_coordinates_and_filters_agency() {
        let (input, output) = test_dirs("stops");
        std::fs::write(
            input.join(STOPS_FILENAME),
            "tag,title,lat,lon,route_tag,direction_tag,stop_along_direction,agency_tag\n\
             1000,Main St,43.0,-79.0,501,D1,1,ttc\n\
             1001,No Coords,,,501,D1,2,ttc\n\
             9000,Elsewhere,43.0,-79.0,501,D1,1,other\n",
        )
        .expect("write test stops");

        let store = CsvStore::new(&input, &output).expect("store should open");
        let stops = store.stop_snapshot("ttc").expect("snapshot should read");
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].lat, Some(43.0));
        assert_eq!(stops[1].lat, None);
        assert_eq!(stops[1].lon, None);
    }

    #[test]
    fn test_malformed_coordinate_is_rejected_not_nulled() {
        let (input, output) = test_dirs("malformed");
        std::fs::write(
            input.join(STOPS_FILENAME),
            "tag,title,lat,lon,route_tag,direction_tag,stop_along_direction,agency_tag\n\
             1000,Main St,not-a-number,-79.0,501,D1,1,ttc\n",
        )
        .expect("write test stops");

        let store = CsvStore::new(&input, &output).expect("store should open");
        let result = store.stop_snapshot("ttc");
        assert!(matches!(result, Err(StoreError::ReadError { .. })));
    }

    #[test]
    fn test_direction_tags_are_distinct_and_sorted() {
        let (input, output) = test_dirs("directions");
        std::fs::write(
            input.join(STOPS_FILENAME),
            "tag,title,lat,lon,route_tag,direction_tag,stop_along_direction,agency_tag\n\
             1000,A,43.0,-79.0,501,D2,1,ttc\n\
             1001,B,43.0,-79.0,501,D1,1,ttc\n\
             1002,C,43.0,-79.0,501,D2,2,ttc\n",
        )
        .expect("write test stops");

        let store = CsvStore::new(&input, &output).expect("store should open");
        let tags = store.direction_tags("ttc").expect("tags should read");
        assert_eq!(tags, vec!["D1", "D2"]);
    }

    #[test]
    fn test_upsert_overwrites_by_key_and_appends_new_keys() {
        let (input, output) = test_dirs("upsert");
        let store = CsvStore::new(&input, &output).expect("store should open");

        store
            .upsert_connections(&[connection("A", "B", 55.0), connection("B", "A", 55.0)])
            .expect("first upsert");
        store
            .upsert_connections(&[connection("A", "B", 60.0), connection("A", "C", 80.0)])
            .expect("second upsert");

        let merged = store.connections().expect("read back");
        assert_eq!(merged.len(), 3);
        let ab = merged
            .iter()
            .find(|c| c.key == "A_B")
            .expect("A_B should survive");
        assert_eq!(ab.distance_meters, 60.0);
        assert!(merged.iter().any(|c| c.key == "B_A"));
        assert!(merged.iter().any(|c| c.key == "A_C"));
    }

    #[test]
    fn test_missing_connections_relation_names_the_operation() {
        let (input, output) = test_dirs("missing");
        let store = CsvStore::new(&input, &output).expect("store should open");
        let result = store.connections();
        assert!(
            matches!(result, Err(StoreError::MissingRelation { operation, .. }) if operation == "connections")
        );
    }

    #[test]
    fn test_predictions_roundtrip_through_gzip() {
        let (input, output) = test_dirs("gzip");
        let store = CsvStore::new(&input, &output).expect("store should open");

        let prediction = StopTimePrediction {
            key: String::from("1000_v1_D1_1"),
            stop_tag: String::from("1000"),
            stop_order: 1,
            lat: 43.0,
            lon: -79.0,
            vehicle_id: String::from("v1"),
            direction_tag: String::from("D1"),
            trip_number: 1,
            predicted_time: NaiveDate::from_ymd_opt(2023, 6, 1)
                .expect("valid test date")
                .and_hms_opt(12, 0, 30)
                .expect("valid test time"),
        };
        store
            .upsert_predictions(&[prediction.clone()])
            .expect("upsert predictions");

        let file = File::open(output.join(PREDICTIONS_FILENAME)).expect("gz file exists");
        let rows: Vec<StopTimePrediction> = csv::Reader::from_reader(GzDecoder::new(file))
            .into_deserialize()
            .collect::<Result<Vec<_>, _>>()
            .expect("gz relation should deserialize");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, prediction.key);
        assert_eq!(rows[0].predicted_time, prediction.predicted_time);
    }

    #[test]
    fn test_connections_file_lands_in_output_dir() {
        let (input, output) = test_dirs("paths");
        let store = CsvStore::new(&input, &output).expect("store should open");
        store
            .upsert_connections(&[connection("A", "B", 55.0)])
            .expect("upsert");
        assert!(output.join(CONNECTIONS_FILENAME).exists());
    }
}
