//! Great-circle math on a spherical Earth.
//!
//! Both functions use the WGS84 equatorial radius as the sphere radius, so
//! distances and destinations are consistent with each other even though the
//! radius is not the mean Earth radius.

use std::f64::consts::{PI, TAU};

use crate::models::Coordinate;

/// Sphere radius in meters
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Point reached by travelling `distance_m` from `origin` along the initial
/// compass bearing `bearing_deg` (0 = north, 90 = east).
///
/// Longitude is wrapped into [-180, 180). Nothing special happens near the
/// poles.
pub fn destination_point(origin: Coordinate, distance_m: f64, bearing_deg: f64) -> Coordinate {
    let lat = origin.lat.to_radians();
    let lng = origin.lng.to_radians();
    let angular = distance_m / EARTH_RADIUS_M;
    let course = bearing_deg.to_radians();

    let new_lat =
        (lat.sin() * angular.cos() + lat.cos() * angular.sin() * course.cos()).asin();

    let delta_lng = (course.sin() * angular.sin() * lat.cos())
        .atan2(angular.cos() - lat.sin() * new_lat.sin());

    let new_lng = (lng + delta_lng + PI).rem_euclid(TAU) - PI;

    Coordinate::new(new_lat.to_degrees(), new_lng.to_degrees())
}

/// Haversine distance between two points in meters
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + (d_lng / 2.0).sin().powi(2) * lat_a.cos() * lat_b.cos();

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
