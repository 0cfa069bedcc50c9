//! Map primitives: ids, attributes, geometry and lanelets.
//!
//! Primitives are plain data owned by the [`LaneletMap`](crate::map::LaneletMap)
//! arena and referenced everywhere else by their typed id.

pub mod attribute;
pub mod geometry;
pub mod id;
pub mod lanelet;

pub use attribute::{AttributeMap, AttributeName, AttributeValue, AttributeValueString};
pub use geometry::{LineString3d, Point3d, Polygon3d};
pub use id::{Id, LaneletId, LineStringId, PointId, PolygonId, RegElemId};
pub use lanelet::Lanelet;
