//! Lanelets: atomic drivable lane segments.

use crate::primitives::attribute::{AttributeMap, AttributeName, AttributeValueString};
use crate::primitives::id::{LaneletId, LineStringId, RegElemId};

/// A lane segment bounded by a left and a right line string.
///
/// `regulatory_elements` lists the elements that apply to this lanelet; the
/// map keeps it in sync when a regulatory element referring to the lanelet
/// is inserted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Lanelet {
    pub id: LaneletId,
    pub left_bound: LineStringId,
    pub right_bound: LineStringId,
    #[serde(default)]
    pub attributes: AttributeMap,
    #[serde(default)]
    pub regulatory_elements: Vec<RegElemId>,
}

impl Lanelet {
    pub fn new(id: LaneletId, left_bound: LineStringId, right_bound: LineStringId) -> Self {
        let mut attributes = AttributeMap::new();
        attributes.insert(AttributeName::TYPE, AttributeValueString::LANELET);
        Self {
            id,
            left_bound,
            right_bound,
            attributes,
            regulatory_elements: Vec::new(),
        }
    }
}
