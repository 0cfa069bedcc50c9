//! # lanelet-roundabout
//!
//! Roundabout regulatory element for lanelet-style HD maps, together with the
//! registry that lets a generic map loader rebuild typed regulatory elements
//! from their kind label.
//!
//! ## Features
//! - Typed, non-zero id handles for every map primitive
//! - Generic regulatory element records (attributes + role → parameters)
//! - [`Roundabout`](regulatory::Roundabout): governing lanelet, area polygons
//!   and entry stop lines, with duplicate-free area mutation
//! - A rule name → factory [`Registry`](regulatory::Registry), usable as a
//!   plain value or installed once process-wide
//! - [`LaneletMap`](map::LaneletMap): an arena owning the primitives, with
//!   typed retrieval of regulatory elements
//!
//! ## Usage
//!
//! ```rust
//! use lanelet_roundabout::prelude::*;
//!
//! let registry = lanelet_roundabout::regulatory::registry::init_default();
//! let rb = Roundabout::make(
//!     RegElemId::new(1),
//!     AttributeMap::new(),
//!     LaneletId::new(10),
//!     PolygonId::new(20),
//!     [LineStringId::new(30)],
//! );
//!
//! // A loader only sees the generic record; the registry restores the type.
//! let elem = registry.create(rb.data().clone()).unwrap();
//! assert_eq!(elem.downcast_ref::<Roundabout>(), Some(&rb));
//! ```
//!
//! ## Invariant checking
//! Mutating operations re-check their invariants in debug builds. Enable the
//! `check-invariants` feature to keep the checks in release builds.
//!
//! ## Logging
//! The crate logs through the [`log`] facade: registrations and factory
//! dispatch at `debug`, area mutations at `trace`, records kept generic and
//! ignored duplicate registrations at `warn`.

pub mod debug_invariants;
pub mod map;
pub mod map_error;
pub mod primitives;
pub mod regulatory;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::map::LaneletMap;
    pub use crate::map_error::MapError;
    pub use crate::primitives::attribute::{AttributeMap, AttributeValue};
    pub use crate::primitives::geometry::{LineString3d, Point3d, Polygon3d};
    pub use crate::primitives::id::{Id, LaneletId, LineStringId, PointId, PolygonId, RegElemId};
    pub use crate::primitives::lanelet::Lanelet;
    pub use crate::regulatory::data::{RegulatoryElementData, RoleName, RuleParameter, RuleParameterMap};
    pub use crate::regulatory::element::{
        GenericRegulatoryElement, RegulatoryElement, RegulatoryElementKind,
    };
    pub use crate::regulatory::registry::{LoaderConfig, Registry, RegistryConfig};
    pub use crate::regulatory::roundabout::{ROUNDABOUT_POLYGON_ROLE, Roundabout};
}
