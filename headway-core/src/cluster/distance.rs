use geo::Point;

/// Earth radius in kilometers used by the great-circle formula. the
/// upstream system this pipeline replaces used 6373.0 km rather than the
/// conventional 6371.0 km mean radius; the value is kept so that every
/// distance-threshold boundary decision matches the recorded relations
/// (the two radii differ by ~0.03% on every distance).
pub const EARTH_RADIUS_KM: f64 = 6373.0;

/// great-circle distance in meters between two lon,lat points, via the
/// haversine formula. non-negative and symmetric; zero exactly when the
/// two points are coordinate-identical. NaN coordinates propagate as a
/// NaN distance, to be rejected by the caller.
///
/// implemented directly rather than through a geodesy library measure so
/// the radius constant above is the one in effect.
pub fn great_circle_meters(p1: &Point<f64>, p2: &Point<f64>) -> f64 {
    if p1 == p2 {
        return 0.0;
    }

    let lat1 = p1.y().to_radians();
    let lon1 = p1.x().to_radians();
    let lat2 = p2.y().to_radians();
    let lon2 = p2.x().to_radians();

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c * 1000.0
}

#[cfg(test)]
mod test {
    use super::{great_circle_meters, EARTH_RADIUS_KM};
    use approx::assert_relative_eq;
    use geo::Point;

    #[test]
    fn test_identical_points_are_zero_distance() {
        let points = [
            Point::new(-79.0, 43.0),
            Point::new(0.0, 0.0),
            Point::new(139.69, 35.68),
        ];
        for p in points {
            assert_eq!(great_circle_meters(&p, &p), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Point::new(-79.3832, 43.6532);
        let b = Point::new(-79.3871, 43.6426);
        assert_eq!(great_circle_meters(&a, &b), great_circle_meters(&b, &a));
    }

    #[test]
    fn test_distance_is_positive_for_distinct_points() {
        let a = Point::new(-79.3832, 43.6532);
        let b = Point::new(-79.3832, 43.6533);
        assert!(great_circle_meters(&a, &b) > 0.0);
    }

    #[test]
    fn test_milli_degree_of_latitude() {
        // 0.001 degrees of latitude subtends R * radians(0.001) meters
        // of arc regardless of longitude
        let a = Point::new(-79.0, 43.0);
        let b = Point::new(-79.0, 43.001);
        let expected = EARTH_RADIUS_KM * 1000.0 * 0.001_f64.to_radians();
        assert_relative_eq!(great_circle_meters(&a, &b), expected, max_relative = 1e-6);
    }

    #[test]
    fn test_nan_coordinate_propagates() {
        let a = Point::new(f64::NAN, 43.0);
        let b = Point::new(-79.0, 43.0);
        assert!(great_circle_meters(&a, &b).is_nan());
    }
}
