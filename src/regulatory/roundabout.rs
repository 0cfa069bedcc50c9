//! Roundabout regulatory element.
//!
//! A roundabout ties one governing lanelet to the polygons describing the
//! circular road surface and to the stop lines controlling entry. The
//! element is a typed view over a generic [`RegulatoryElementData`] record
//! laid out as:
//!
//! | role                 | parameters                 |
//! |----------------------|----------------------------|
//! | `refers`             | exactly one lanelet        |
//! | `roundabout_polygon` | polygons                   |
//! | `ref_line`           | stop line strings          |
//!
//! Only the `refers` lanelet is required. Entries of another primitive kind in
//! the other two roles are kept in the record but skipped by the accessors.
//!
//! Area mutations write straight into the record, so re-deriving the typed
//! view from [`Roundabout::data`] always reflects them.

use std::any::Any;

use crate::debug_invariants::DebugInvariants;
use crate::map_error::MapError;
use crate::primitives::attribute::AttributeMap;
use crate::primitives::id::{LaneletId, LineStringId, PolygonId, RegElemId};
use crate::regulatory::data::{
    ParameterKind, RegulatoryElementData, RoleName, RuleParameter, RuleParameterMap,
};
use crate::regulatory::element::{RegulatoryElement, RegulatoryElementKind};

/// Role tagging the polygons that make up the roundabout area.
pub const ROUNDABOUT_POLYGON_ROLE: &str = "roundabout_polygon";

/// Roundabout regulatory element.
///
/// # Invariants
///
/// - The `refers` role holds exactly one lanelet, and it never changes.
/// - The `roundabout_polygon` role holds no polygon twice.
/// - Id and rule name are fixed for the element's lifetime.
///
/// These invariants are checked after mutations in debug builds and when the
/// `check-invariants` feature is enabled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roundabout {
    data: RegulatoryElementData,
    lanelet: LaneletId,
}

impl Roundabout {
    /// Kind label stored in the `subtype` attribute.
    pub const RULE_NAME: &'static str = "roundabout";
    /// See [`ROUNDABOUT_POLYGON_ROLE`].
    pub const ROUNDABOUT_POLYGON_ROLE: &'static str = ROUNDABOUT_POLYGON_ROLE;

    /// Builds a roundabout from its parts.
    ///
    /// `attributes` is extended with `type = regulatory_element` and
    /// `subtype = roundabout`. The initial area collection is `[area]`.
    ///
    /// # Example
    /// ```rust
    /// use lanelet_roundabout::prelude::*;
    ///
    /// let rb = Roundabout::make(
    ///     RegElemId::new(100),
    ///     AttributeMap::new(),
    ///     LaneletId::new(1),
    ///     PolygonId::new(2),
    ///     [LineStringId::new(3)],
    /// );
    /// assert_eq!(rb.roundabout_lanelet(), LaneletId::new(1));
    /// assert_eq!(rb.roundabout_area(), vec![PolygonId::new(2)]);
    /// assert_eq!(rb.stop_lines(), vec![LineStringId::new(3)]);
    /// ```
    pub fn make<I>(
        id: RegElemId,
        attributes: AttributeMap,
        roundabout_lanelet: LaneletId,
        roundabout_area: PolygonId,
        stop_lines: I,
    ) -> Self
    where
        I: IntoIterator<Item = LineStringId>,
    {
        let mut parameters = RuleParameterMap::new();
        parameters.insert(RoleName::REFERS, [roundabout_lanelet]);
        parameters.insert(ROUNDABOUT_POLYGON_ROLE, [roundabout_area]);
        parameters.insert(RoleName::REF_LINE, stop_lines);

        let mut data = RegulatoryElementData::new(id, attributes, parameters);
        data.set_rule_name(Self::RULE_NAME);

        let rb = Self {
            data,
            lanelet: roundabout_lanelet,
        };
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        rb.debug_assert_invariants();
        rb
    }

    /// Polygons of the roundabout area, in insertion order.
    pub fn roundabout_area(&self) -> Vec<PolygonId> {
        self.param_ids(ROUNDABOUT_POLYGON_ROLE)
    }

    /// Entry stop lines.
    pub fn stop_lines(&self) -> Vec<LineStringId> {
        self.param_ids(RoleName::REF_LINE)
    }

    /// The lanelet this roundabout applies to.
    #[inline]
    pub fn roundabout_lanelet(&self) -> LaneletId {
        self.lanelet
    }

    /// Appends `area` unless the same polygon is already part of the area.
    pub fn add_roundabout_area(&mut self, area: PolygonId) {
        if self.roundabout_area().contains(&area) {
            log::trace!("roundabout {}: polygon {area} already present", self.data.id);
            return;
        }
        self.data.parameters.push(ROUNDABOUT_POLYGON_ROLE, area);
        log::trace!("roundabout {}: added polygon {area}", self.data.id);
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        self.debug_assert_invariants();
    }

    /// Removes `area` from the roundabout area.
    ///
    /// Returns true if the polygon was present and has been removed.
    pub fn remove_roundabout_area(&mut self, area: PolygonId) -> bool {
        let removed = self
            .data
            .parameters
            .remove(ROUNDABOUT_POLYGON_ROLE, &RuleParameter::Polygon(area));
        if removed {
            log::trace!("roundabout {}: removed polygon {area}", self.data.id);
            #[cfg(any(debug_assertions, feature = "check-invariants"))]
            self.debug_assert_invariants();
        }
        removed
    }

    fn param_ids<T: ParameterKind>(&self, role: &str) -> Vec<T> {
        self.data
            .parameters
            .get(role)
            .iter()
            .filter_map(T::from_parameter)
            .collect()
    }
}

impl RegulatoryElement for Roundabout {
    fn data(&self) -> &RegulatoryElementData {
        &self.data
    }

    fn into_data(self: Box<Self>) -> RegulatoryElementData {
        self.data
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl RegulatoryElementKind for Roundabout {
    const RULE_NAME: &'static str = Roundabout::RULE_NAME;

    /// Rebuilds a roundabout from a generic record.
    ///
    /// # Errors
    /// - [`MapError::MissingRole`] if `refers` is absent or empty.
    /// - [`MapError::RoleCardinality`] if `refers` lists several lanelets.
    /// - [`MapError::WrongParameterKind`] if `refers` holds another primitive.
    ///
    /// A polygon listed more than once in `roundabout_polygon` is kept at its
    /// first position only.
    fn from_data(mut data: RegulatoryElementData) -> Result<Self, MapError> {
        let lanelet = data.single_parameter::<LaneletId>(RoleName::REFERS)?;
        drop_repeated_areas(&mut data);
        Ok(Self { data, lanelet })
    }
}

fn drop_repeated_areas(data: &mut RegulatoryElementData) {
    let params = data.parameters.get(ROUNDABOUT_POLYGON_ROLE);
    let mut kept: Vec<RuleParameter> = Vec::with_capacity(params.len());
    for param in params {
        let repeated = matches!(param, RuleParameter::Polygon(_)) && kept.contains(param);
        if !repeated {
            kept.push(*param);
        }
    }
    if kept.len() != params.len() {
        log::debug!(
            "roundabout {}: dropped {} repeated area polygon(s)",
            data.id,
            params.len() - kept.len()
        );
        data.parameters.insert(ROUNDABOUT_POLYGON_ROLE, kept);
    }
}

impl DebugInvariants for Roundabout {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Roundabout");
    }

    fn validate_invariants(&self) -> Result<(), MapError> {
        self.data.single_parameter::<LaneletId>(RoleName::REFERS)?;

        let areas = self.roundabout_area();
        for (i, area) in areas.iter().enumerate() {
            if areas[..i].contains(area) {
                return Err(MapError::DuplicateParameter {
                    id: self.data.id.id(),
                    role: ROUNDABOUT_POLYGON_ROLE.to_string(),
                    param: area.id(),
                });
            }
        }
        Ok(())
    }
}
