//! Square-spiral point generation.
//!
//! Starting at the approximate center of the rectangle, the walk moves one
//! spacing hop at a time in an expanding clockwise square spiral (run lengths
//! 1, 1, 2, 2, 3, 3, ...). Every hop that lands inside the rectangle is kept.
//! The walk stops once its reach has overshot all four edges, or when the
//! point cap is hit. Legs never grow past a length derived from the
//! rectangle's diagonal, so inputs that can never be enclosed (corners close
//! to a pole or straddling the antimeridian) still terminate.

use tracing::debug;

use super::boundary::inclusive;
use super::geodesic::{destination_point, haversine_distance};
use crate::models::Coordinate;

/// Bearing from the NW corner towards the SE corner
const SOUTHEAST: f64 = 135.0;

/// Leg length allowance, in diagonals per spacing
const LEG_DIAGONALS: f64 = 4.0;

/// Extra hops per leg on top of the diagonal allowance
const LEG_SLACK: f64 = 8.0;

/// Cardinal walking direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Next direction after a right turn
    pub fn clockwise(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Compass bearing in degrees
    pub fn bearing(self) -> f64 {
        match self {
            Direction::North => 0.0,
            Direction::East => 90.0,
            Direction::South => 180.0,
            Direction::West => 270.0,
        }
    }
}

/// Position within the spiral's leg structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiralState {
    pub direction: Direction,
    /// Hops in the current leg
    pub segment_length: u32,
    /// Hops left before the next turn, including the upcoming one
    pub steps_remaining: u32,
    /// Set after every odd turn; the leg grows on the turn that clears it
    pub turn_parity: bool,
}

impl SpiralState {
    pub fn new() -> Self {
        Self {
            direction: Direction::North,
            segment_length: 1,
            steps_remaining: 1,
            turn_parity: false,
        }
    }

    /// True before the first hop of a leg
    pub fn at_leg_start(&self) -> bool {
        self.steps_remaining == self.segment_length
    }

    /// State after taking one hop in `self.direction`
    pub fn advance(self) -> Self {
        if self.steps_remaining > 1 {
            return Self {
                steps_remaining: self.steps_remaining - 1,
                ..self
            };
        }

        let segment_length = if self.turn_parity {
            self.segment_length + 1
        } else {
            self.segment_length
        };

        Self {
            direction: self.direction.clockwise(),
            segment_length,
            steps_remaining: segment_length,
            turn_parity: !self.turn_parity,
        }
    }
}

impl Default for SpiralState {
    fn default() -> Self {
        Self::new()
    }
}

/// Furthest latitude and longitude the walk has touched on each side.
///
/// Tracks the walk itself, not the accepted points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reach {
    pub max_lat: f64,
    pub max_lng: f64,
    pub min_lat: f64,
    pub min_lng: f64,
}

impl Reach {
    pub fn new(origin: Coordinate) -> Self {
        Self {
            max_lat: origin.lat,
            max_lng: origin.lng,
            min_lat: origin.lat,
            min_lng: origin.lng,
        }
    }

    /// Record a hop that moved in `direction` and landed at `position`
    pub fn extend(&mut self, direction: Direction, position: Coordinate) {
        match direction {
            Direction::North => self.max_lat = position.lat,
            Direction::East => self.max_lng = position.lng,
            Direction::South => self.min_lat = position.lat,
            Direction::West => self.min_lng = position.lng,
        }
    }

    /// All four edges of the `nw`/`se` rectangle have been overshot
    pub fn encloses(&self, nw: &Coordinate, se: &Coordinate) -> bool {
        self.max_lat > nw.lat
            && self.min_lat < se.lat
            && self.max_lng > se.lng
            && self.min_lng < nw.lng
    }
}

/// Approximate midpoint of the rectangle: half the diagonal south-east of `nw`
pub fn center(nw: Coordinate, se: Coordinate) -> Coordinate {
    destination_point(nw, haversine_distance(nw, se) / 2.0, SOUTHEAST)
}

/// Longest leg the walk may take. A leg of this length overshoots any edge
/// of a well-formed rectangle several times over.
pub fn max_leg_length(nw: Coordinate, se: Coordinate, spacing_m: f64) -> f64 {
    LEG_DIAGONALS * (haversine_distance(nw, se) / spacing_m).ceil() + LEG_SLACK
}

/// Fill the rectangle spanned by `nw` and `se` with points roughly
/// `spacing_m` apart.
///
/// The first point is the approximate center and is always present; every
/// other point lies inside the rectangle. At most `max_points` points are
/// returned, center included.
///
/// The caller must pass `spacing_m > 0`, `max_points >= 1` and a `nw` that
/// is north-west of `se`. Other inputs are not rejected here; they produce
/// degenerate output, cut short by the cap or the leg length limit.
pub fn generate(
    nw: Coordinate,
    se: Coordinate,
    spacing_m: f64,
    max_points: usize,
) -> Vec<Coordinate> {
    let center = center(nw, se);
    let max_leg = max_leg_length(nw, se, spacing_m);
    let too_long = |length: u32| max_leg.is_nan() || f64::from(length) > max_leg;

    let mut points = vec![center];
    let mut current = center;
    let mut state = SpiralState::new();
    let mut reach = Reach::new(center);

    while points.len() < max_points {
        if state.at_leg_start() && (reach.encloses(&nw, &se) || too_long(state.segment_length)) {
            break;
        }

        let direction = state.direction;
        current = destination_point(current, spacing_m, direction.bearing());
        reach.extend(direction, current);

        if inclusive(&current, &nw, &se) {
            points.push(current);
        }

        state = state.advance();
    }

    debug!(
        "Generated {} points from center {} (leg length {})",
        points.len(),
        center,
        state.segment_length
    );

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    const NW: Coordinate = Coordinate::new(1.0, -1.0);
    const SE: Coordinate = Coordinate::new(0.0, 0.0);

    fn assert_same_point(actual: &Coordinate, expected: &Coordinate) {
        assert!(
            (actual.lat - expected.lat).abs() < 1e-12
                && (actual.lng - expected.lng).abs() < 1e-12,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_direction_cycle() {
        let mut d = Direction::North;
        let mut bearings = Vec::new();
        for _ in 0..5 {
            bearings.push(d.bearing());
            d = d.clockwise();
        }
        assert_eq!(bearings, vec![0.0, 90.0, 180.0, 270.0, 0.0]);
    }

    #[test]
    fn test_run_lengths() {
        let mut state = SpiralState::new();
        let mut legs = Vec::new();

        while legs.len() < 8 {
            if state.at_leg_start() {
                legs.push((state.direction, state.segment_length));
            }
            state = state.advance();
        }

        assert_eq!(
            legs,
            vec![
                (Direction::North, 1),
                (Direction::East, 1),
                (Direction::South, 2),
                (Direction::West, 2),
                (Direction::North, 3),
                (Direction::East, 3),
                (Direction::South, 4),
                (Direction::West, 4),
            ]
        );
    }

    #[test]
    fn test_mid_leg_is_not_leg_start() {
        // N, E, then first hop of the first two-hop leg
        let state = SpiralState::new().advance().advance().advance();
        assert_eq!(state.direction, Direction::South);
        assert_eq!(state.steps_remaining, 1);
        assert!(!state.at_leg_start());
    }

    #[test]
    fn test_reach_encloses_only_when_all_edges_overshot() {
        let mut reach = Reach::new(Coordinate::new(0.5, -0.5));
        reach.extend(Direction::North, Coordinate::new(1.1, -0.5));
        reach.extend(Direction::East, Coordinate::new(1.1, 0.1));
        reach.extend(Direction::South, Coordinate::new(-0.1, 0.1));
        assert!(!reach.encloses(&NW, &SE));

        reach.extend(Direction::West, Coordinate::new(-0.1, -1.0));
        assert!(!reach.encloses(&NW, &SE), "touching an edge is not overshooting");

        reach.extend(Direction::West, Coordinate::new(-0.1, -1.1));
        assert!(reach.encloses(&NW, &SE));
    }

    #[test]
    fn test_single_ring() {
        let points = generate(NW, SE, 28000.0, 50_000);

        let expected = [
            Coordinate::new(0.4999809639485908, -0.5000000014497166),
            Coordinate::new(0.7515092435020568, -0.5000000014497166),
            Coordinate::new(0.7515020015288297, -0.24845008446180564),
            Coordinate::new(0.49997372197536377, -0.24845008446180564),
            Coordinate::new(0.2484454424218978, -0.24845008446180564),
            Coordinate::new(0.2484430483816972, -0.4999807286902337),
            Coordinate::new(0.24844065436456605, -0.7515113728730652),
            Coordinate::new(0.4999689339180321, -0.7515113728730652),
            Coordinate::new(0.751497213471498, -0.7515113728730652),
        ];

        assert_eq!(points.len(), expected.len());
        for (actual, expected) in points.iter().zip(expected.iter()) {
            assert_same_point(actual, expected);
        }
    }

    #[test]
    fn test_points_stay_inside() {
        let points = generate(NW, SE, 5000.0, 50_000);
        assert!(points.len() > 100);
        assert!(points[1..].iter().all(|p| inclusive(p, &NW, &SE)));
    }

    #[test]
    fn test_deterministic() {
        let a = generate(NW, SE, 3000.0, 10_000);
        let b = generate(NW, SE, 3000.0, 10_000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_cap_of_one_is_center_only() {
        let points = generate(NW, SE, 10.0, 1);
        assert_eq!(points.len(), 1);
        assert_same_point(
            &points[0],
            &Coordinate::new(0.4999809639485908, -0.5000000014497166),
        );
    }

    #[test]
    fn test_cap_truncates() {
        let full = generate(NW, SE, 1000.0, 1_000_000);
        let capped = generate(NW, SE, 1000.0, 500);

        assert!(full.len() > 500);
        assert_eq!(capped.len(), 500);
        assert_eq!(capped[..], full[..500]);
    }

    #[test]
    fn test_near_pole_terminates() {
        // The walk can never overshoot the northern edge this close to the pole
        let nw = Coordinate::new(89.999, -1.0);
        let se = Coordinate::new(89.0, 1.0);

        let points = generate(nw, se, 1000.0, 10_000);

        assert!(points.len() < 10_000);
        assert!(points[1..].iter().all(|p| inclusive(p, &nw, &se)));
    }

    #[test]
    fn test_swapped_corners_are_degenerate() {
        let points = generate(SE, NW, 28000.0, 100);
        assert_eq!(points.len(), 1);
        assert_same_point(&points[0], &center(SE, NW));

        let points = generate(SE, NW, 1000.0, 100);
        assert!(points.len() <= 100);
        assert!(points[1..].iter().all(|p| inclusive(p, &NW, &SE)));
    }

    #[test]
    fn test_leg_limit_does_not_cut_valid_walks() {
        // 1 km lattice over a 1°x1° square: a 111 x 111 grid
        let points = generate(NW, SE, 1000.0, 1_000_000);
        assert_eq!(points.len(), 12_321);
        assert!(max_leg_length(NW, SE, 1000.0) > 2.0 * 111.0);
    }

    #[test]
    fn test_spacing_larger_than_area() {
        let points = generate(NW, SE, 500_000.0, 100);
        assert_eq!(points.len(), 1);
    }
}
