//! Opaque geometric primitives.
//!
//! These types carry coordinates and point references only; no geometric
//! algorithms are provided.

use crate::primitives::attribute::AttributeMap;
use crate::primitives::id::{LineStringId, PointId, PolygonId};

/// A 3D point.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3d {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub attributes: AttributeMap,
}

impl Point3d {
    pub fn new(id: PointId, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            x,
            y,
            z,
            attributes: AttributeMap::new(),
        }
    }
}

/// An open polyline through an ordered list of points.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineString3d {
    pub id: LineStringId,
    pub points: Vec<PointId>,
    #[serde(default)]
    pub attributes: AttributeMap,
}

impl LineString3d {
    pub fn new(id: LineStringId, points: Vec<PointId>) -> Self {
        Self {
            id,
            points,
            attributes: AttributeMap::new(),
        }
    }
}

/// A closed ring through an ordered list of points.
///
/// The closing edge from the last to the first point is implicit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polygon3d {
    pub id: PolygonId,
    pub points: Vec<PointId>,
    #[serde(default)]
    pub attributes: AttributeMap,
}

impl Polygon3d {
    pub fn new(id: PolygonId, points: Vec<PointId>) -> Self {
        Self {
            id,
            points,
            attributes: AttributeMap::new(),
        }
    }
}
