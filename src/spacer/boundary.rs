//! Inclusive point-in-rectangle test.

use crate::models::Coordinate;

/// Whether `point` lies inside the rectangle spanned by two opposite corners,
/// edges included. Corner order does not matter.
pub fn inclusive(point: &Coordinate, corner_a: &Coordinate, corner_b: &Coordinate) -> bool {
    let max_lat = corner_a.lat.max(corner_b.lat);
    let min_lat = corner_a.lat.min(corner_b.lat);
    let max_lng = corner_a.lng.max(corner_b.lng);
    let min_lng = corner_a.lng.min(corner_b.lng);

    (min_lat..=max_lat).contains(&point.lat) && (min_lng..=max_lng).contains(&point.lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO: Coordinate = Coordinate::new(0.0, 0.0);
    const ONE: Coordinate = Coordinate::new(1.0, -1.0);

    #[test]
    fn test_center_is_inside() {
        let half = Coordinate::new(0.4999809639485908, -0.5000000014497166);
        assert!(inclusive(&half, &ZERO, &ONE));
        assert!(inclusive(&half, &ONE, &ZERO));
    }

    #[test]
    fn test_far_point_is_outside() {
        let pioneer = Coordinate::new(45.51867299282918, -122.67871393198214);
        assert!(!inclusive(&pioneer, &ZERO, &ONE));
    }

    #[test]
    fn test_edges_and_corners_are_inside() {
        assert!(inclusive(&ZERO, &ZERO, &ONE));
        assert!(inclusive(&ONE, &ZERO, &ONE));
        assert!(inclusive(&Coordinate::new(1.0, -0.3), &ZERO, &ONE));
        assert!(!inclusive(&Coordinate::new(1.0, 0.1), &ZERO, &ONE));
    }
}
