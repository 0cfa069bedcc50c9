//! Regulatory elements: generic records, the polymorphic element traits,
//! the roundabout kind and the rule name registry.

pub mod data;
pub mod element;
pub mod registry;
pub mod roundabout;

pub use data::{RegulatoryElementData, RoleName, RuleParameter, RuleParameterMap};
pub use element::{GenericRegulatoryElement, RegulatoryElement, RegulatoryElementKind};
pub use registry::{LoaderConfig, Registry, RegistryConfig};
pub use roundabout::{ROUNDABOUT_POLYGON_ROLE, Roundabout};
