//! Geometric primitives: [`Point`] and [`TimedPoint`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Sub;
use thiserror::Error;

/// Milliseconds on the engine clock.
pub type Millis = f64;

/// Error building a [`Point`] from loosely typed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointError {
    /// The coordinate key is absent.
    #[error("missing coordinate `{0}`")]
    MissingCoordinate(&'static str),
    /// The coordinate is present but not a finite number.
    #[error("coordinate `{0}` is not a number")]
    NotNumeric(&'static str),
}

/// A sampled screen coordinate (client space, CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }

    /// Plain `{"x": .., "y": ..}` representation.
    #[must_use]
    pub fn to_dict(&self) -> Value {
        let mut dict = Map::new();
        dict.insert("x".to_owned(), Value::from(self.x));
        dict.insert("y".to_owned(), Value::from(self.y));
        Value::Object(dict)
    }

    /// Build a point from a `{"x": .., "y": ..}` value.
    pub fn from_dict(dict: &Value) -> Result<Self, PointError> {
        let coordinate = |key: &'static str| -> Result<f64, PointError> {
            let value = dict.get(key).ok_or(PointError::MissingCoordinate(key))?;
            value
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or(PointError::NotNumeric(key))
        };
        Ok(Self::new(coordinate("x")?, coordinate("y")?))
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A [`Point`] stamped with the time it was sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimedPoint {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Sample time.
    pub at: Millis,
}

impl TimedPoint {
    /// Stamp a point with a sample time.
    #[must_use]
    pub const fn stamp(point: Point, at: Millis) -> Self {
        Self {
            x: point.x,
            y: point.y,
            at,
        }
    }

    /// The coordinate without its timestamp.
    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
