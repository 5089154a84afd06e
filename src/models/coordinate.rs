//! Coordinate and bounding rectangle types.

use serde::{Deserialize, Serialize};

use crate::error::SpacerError;
use crate::spacer::boundary;

/// Geographic point in decimal degrees.
///
/// Serialized in the document-store geopoint shape:
/// `{"latitude": .., "longitude": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "latitude")]
    pub lat: f64,
    #[serde(rename = "longitude")]
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that both axes are finite and in range. The poles themselves are
    /// rejected since the spiral walk never overshoots them.
    pub fn validate(&self) -> Result<(), SpacerError> {
        let valid = self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() < 90.0
            && self.lng.abs() <= 180.0;

        if !valid {
            return Err(SpacerError::InvalidCoordinate {
                latitude: self.lat,
                longitude: self.lng,
            });
        }

        Ok(())
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = String;

    /// Parse "lat,lng"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| format!("invalid coordinate '{}': {}", s, e))?;

        match parts.as_slice() {
            [lat, lng] => Ok(Self::new(*lat, *lng)),
            _ => Err(format!("expected 'lat,lng', got '{}'", s)),
        }
    }
}

impl From<Coordinate> for geo_types::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo_types::Coord { x: c.lng, y: c.lat }
    }
}

impl From<geo_types::Coord<f64>> for Coordinate {
    fn from(c: geo_types::Coord<f64>) -> Self {
        Self::new(c.y, c.x)
    }
}

impl From<Coordinate> for geo_types::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo_types::Point::new(c.lng, c.lat)
    }
}

impl From<geo_types::Point<f64>> for Coordinate {
    fn from(p: geo_types::Point<f64>) -> Self {
        Self::new(p.y(), p.x())
    }
}

/// Area to fill, given by its north-west and south-east corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub nw: Coordinate,
    pub se: Coordinate,
}

impl Rectangle {
    pub fn new(nw: Coordinate, se: Coordinate) -> Self {
        Self { nw, se }
    }

    /// Inclusive containment check
    pub fn contains(&self, point: &Coordinate) -> bool {
        boundary::inclusive(point, &self.nw, &self.se)
    }

    /// Verify that both corners are valid and that `nw` lies strictly
    /// north-west of `se`.
    pub fn validate(&self) -> Result<(), SpacerError> {
        self.nw.validate()?;
        self.se.validate()?;

        if self.nw.lat <= self.se.lat || self.nw.lng >= self.se.lng {
            return Err(SpacerError::MisorientedRectangle {
                nw: self.nw,
                se: self.se,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Intersects;

    #[test]
    fn test_parse_coordinate() {
        let c: Coordinate = "45.518673, -122.679996".parse().unwrap();
        assert_eq!(c, Coordinate::new(45.518673, -122.679996));

        assert!("45.5".parse::<Coordinate>().is_err());
        assert!("north,west".parse::<Coordinate>().is_err());
        assert!("1,2,3".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_geopoint_serialization() {
        let c = Coordinate::new(1.5, -2.25);
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json, serde_json::json!({"latitude": 1.5, "longitude": -2.25}));

        let back: Coordinate = serde_json::from_value(json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_geo_types_axis_order() {
        let point: geo_types::Point<f64> = Coordinate::new(10.0, 20.0).into();
        assert_eq!(point.x(), 20.0);
        assert_eq!(point.y(), 10.0);
        assert_eq!(Coordinate::from(point), Coordinate::new(10.0, 20.0));
    }

    #[test]
    fn test_validate_rectangle() {
        let rect = Rectangle::new(Coordinate::new(1.0, -1.0), Coordinate::new(0.0, 0.0));
        assert!(rect.validate().is_ok());

        let flipped = Rectangle::new(rect.se, rect.nw);
        assert!(matches!(
            flipped.validate(),
            Err(SpacerError::MisorientedRectangle { .. })
        ));

        let polar = Rectangle::new(Coordinate::new(90.0, -1.0), Coordinate::new(0.0, 0.0));
        assert!(matches!(
            polar.validate(),
            Err(SpacerError::InvalidCoordinate { .. })
        ));

        let nan = Rectangle::new(Coordinate::new(f64::NAN, -1.0), Coordinate::new(0.0, 0.0));
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_contains_matches_geo_rect() {
        let rect = Rectangle::new(Coordinate::new(1.0, -1.0), Coordinate::new(0.0, 0.0));
        let geo_rect = geo_types::Rect::new(rect.nw, rect.se);

        let samples = [
            Coordinate::new(0.5, -0.5),
            Coordinate::new(1.0, -1.0),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0000001, -0.5),
            Coordinate::new(0.5, 0.0000001),
            Coordinate::new(-0.5, -0.5),
        ];

        for sample in samples {
            let coord: geo_types::Coord<f64> = sample.into();
            assert_eq!(
                rect.contains(&sample),
                geo_rect.intersects(&coord),
                "disagreement at {}",
                sample
            );
        }
    }
}
