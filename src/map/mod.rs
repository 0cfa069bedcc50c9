//! `LaneletMap`: arena owning every map primitive.
//!
//! Primitives are stored by id in ordered layers; everything else refers to
//! them through typed handles. Regulatory elements are stored as trait
//! objects, so the map can hold kinds it only knows through a
//! [`Registry`], and typed access goes through downcasting.
//!
//! # Invariants
//!
//! - Ids are unique within each layer.
//! - Every id referenced by a line string, polygon, lanelet or regulatory
//!   element resolves in the matching layer at insertion time.
//! - Each lanelet lists every regulatory element that references it.
//!
//! Regulatory elements obtained through
//! [`regulatory_element_as_mut`](LaneletMap::regulatory_element_as_mut) can be
//! edited in place; [`validate_invariants`](DebugInvariants::validate_invariants)
//! re-checks references afterwards.

use std::collections::BTreeMap;

use crate::debug_invariants::DebugInvariants;
use crate::map_error::MapError;
use crate::primitives::geometry::{LineString3d, Point3d, Polygon3d};
use crate::primitives::id::{Id, LaneletId, LineStringId, PointId, PolygonId, RegElemId};
use crate::primitives::lanelet::Lanelet;
use crate::regulatory::data::{RegulatoryElementData, RuleParameter};
use crate::regulatory::element::{RegulatoryElement, RegulatoryElementKind};
use crate::regulatory::registry::{LoaderConfig, Registry};

/// Arena of points, line strings, polygons, lanelets and regulatory elements.
#[derive(Debug, Default)]
pub struct LaneletMap {
    points: BTreeMap<PointId, Point3d>,
    line_strings: BTreeMap<LineStringId, LineString3d>,
    polygons: BTreeMap<PolygonId, Polygon3d>,
    lanelets: BTreeMap<LaneletId, Lanelet>,
    regulatory_elements: BTreeMap<RegElemId, Box<dyn RegulatoryElement>>,
}

impl LaneletMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, point: Point3d) -> Result<PointId, MapError> {
        let id = point.id;
        if self.points.contains_key(&id) {
            return Err(MapError::DuplicateId {
                kind: PointId::KIND,
                id: id.id(),
            });
        }
        self.points.insert(id, point);
        Ok(id)
    }

    pub fn add_line_string(&mut self, line: LineString3d) -> Result<LineStringId, MapError> {
        let id = line.id;
        if self.line_strings.contains_key(&id) {
            return Err(MapError::DuplicateId {
                kind: LineStringId::KIND,
                id: id.id(),
            });
        }
        self.check_points(LineStringId::KIND, id.id(), &line.points)?;
        self.line_strings.insert(id, line);
        Ok(id)
    }

    pub fn add_polygon(&mut self, polygon: Polygon3d) -> Result<PolygonId, MapError> {
        let id = polygon.id;
        if self.polygons.contains_key(&id) {
            return Err(MapError::DuplicateId {
                kind: PolygonId::KIND,
                id: id.id(),
            });
        }
        self.check_points(PolygonId::KIND, id.id(), &polygon.points)?;
        self.polygons.insert(id, polygon);
        Ok(id)
    }

    /// Inserts a lanelet whose bounds are already in the map.
    ///
    /// The lanelet's `regulatory_elements` list is rebuilt from the elements
    /// already in the map that refer to it; whatever the caller put there is
    /// discarded.
    pub fn add_lanelet(&mut self, mut lanelet: Lanelet) -> Result<LaneletId, MapError> {
        let id = lanelet.id;
        if self.lanelets.contains_key(&id) {
            return Err(MapError::DuplicateId {
                kind: LaneletId::KIND,
                id: id.id(),
            });
        }
        for bound in [lanelet.left_bound, lanelet.right_bound] {
            if !self.line_strings.contains_key(&bound) {
                return Err(dangling(LaneletId::KIND, id.id(), LineStringId::KIND, bound.id()));
            }
        }
        lanelet.regulatory_elements = self
            .regulatory_elements
            .iter()
            .filter(|(_, e)| {
                e.data()
                    .parameters
                    .all_parameters()
                    .any(|p| *p == RuleParameter::Lanelet(id))
            })
            .map(|(reg, _)| *reg)
            .collect();
        self.lanelets.insert(id, lanelet);
        Ok(id)
    }

    /// Inserts a typed regulatory element.
    ///
    /// Every primitive the element references must already be in the map.
    /// Lanelets referenced by the element get the element appended to their
    /// `regulatory_elements` list.
    pub fn add_regulatory_element<T: RegulatoryElement>(
        &mut self,
        element: T,
    ) -> Result<RegElemId, MapError> {
        self.insert_regulatory_element(Box::new(element))
    }

    /// Reconstructs a generic record through `registry` and inserts it.
    ///
    /// This is the loader path: the record's rule name selects the factory,
    /// and `config` decides what happens to unregistered rule names.
    pub fn load_regulatory_element(
        &mut self,
        data: RegulatoryElementData,
        registry: &Registry,
        config: &LoaderConfig,
    ) -> Result<RegElemId, MapError> {
        if self.regulatory_elements.contains_key(&data.id) {
            return Err(MapError::DuplicateId {
                kind: RegElemId::KIND,
                id: data.id.id(),
            });
        }
        let element = registry.load(data, config)?;
        self.insert_regulatory_element(element)
    }

    /// Loads several records, stopping at the first failure.
    ///
    /// Records may only reference regulatory elements loaded before them.
    pub fn load_regulatory_elements<I>(
        &mut self,
        records: I,
        registry: &Registry,
        config: &LoaderConfig,
    ) -> Result<Vec<RegElemId>, MapError>
    where
        I: IntoIterator<Item = RegulatoryElementData>,
    {
        records
            .into_iter()
            .map(|data| self.load_regulatory_element(data, registry, config))
            .collect()
    }

    fn insert_regulatory_element(
        &mut self,
        element: Box<dyn RegulatoryElement>,
    ) -> Result<RegElemId, MapError> {
        let id = element.id();
        if self.regulatory_elements.contains_key(&id) {
            return Err(MapError::DuplicateId {
                kind: RegElemId::KIND,
                id: id.id(),
            });
        }
        for param in element.data().parameters.all_parameters() {
            if !self.resolves(param) && *param != RuleParameter::RegulatoryElement(id) {
                return Err(dangling(RegElemId::KIND, id.id(), param.kind(), param.id()));
            }
        }
        for param in element.data().parameters.all_parameters() {
            if let RuleParameter::Lanelet(lanelet_id) = param {
                if let Some(lanelet) = self.lanelets.get_mut(lanelet_id) {
                    if !lanelet.regulatory_elements.contains(&id) {
                        lanelet.regulatory_elements.push(id);
                    }
                }
            }
        }
        log::debug!("inserted `{}` regulatory element {id}", element.rule_name());
        self.regulatory_elements.insert(id, element);
        Ok(id)
    }

    /// Removes a regulatory element and its lanelet back-references.
    ///
    /// Referenced primitives stay in the map.
    pub fn remove_regulatory_element(
        &mut self,
        id: RegElemId,
    ) -> Option<Box<dyn RegulatoryElement>> {
        let element = self.regulatory_elements.remove(&id)?;
        for lanelet in self.lanelets.values_mut() {
            lanelet.regulatory_elements.retain(|r| *r != id);
        }
        Some(element)
    }

    pub fn point(&self, id: PointId) -> Option<&Point3d> {
        self.points.get(&id)
    }

    pub fn line_string(&self, id: LineStringId) -> Option<&LineString3d> {
        self.line_strings.get(&id)
    }

    pub fn polygon(&self, id: PolygonId) -> Option<&Polygon3d> {
        self.polygons.get(&id)
    }

    pub fn lanelet(&self, id: LaneletId) -> Option<&Lanelet> {
        self.lanelets.get(&id)
    }

    pub fn regulatory_element(&self, id: RegElemId) -> Option<&dyn RegulatoryElement> {
        self.regulatory_elements.get(&id).map(|e| e.as_ref())
    }

    /// The element `id` as a `T`.
    ///
    /// # Errors
    /// - [`MapError::NotFound`] if no element has this id.
    /// - [`MapError::KindMismatch`] if the element is of another kind.
    pub fn regulatory_element_as<T: RegulatoryElementKind>(
        &self,
        id: RegElemId,
    ) -> Result<&T, MapError> {
        let element = self
            .regulatory_elements
            .get(&id)
            .ok_or(MapError::NotFound {
                kind: RegElemId::KIND,
                id: id.id(),
            })?;
        element
            .downcast_ref::<T>()
            .ok_or_else(|| kind_mismatch::<T>(id, element.rule_name()))
    }

    /// Mutable counterpart of [`regulatory_element_as`](Self::regulatory_element_as).
    pub fn regulatory_element_as_mut<T: RegulatoryElementKind>(
        &mut self,
        id: RegElemId,
    ) -> Result<&mut T, MapError> {
        let element = self
            .regulatory_elements
            .get_mut(&id)
            .ok_or(MapError::NotFound {
                kind: RegElemId::KIND,
                id: id.id(),
            })?;
        if !element.is::<T>() {
            return Err(kind_mismatch::<T>(id, element.rule_name()));
        }
        element
            .downcast_mut::<T>()
            .ok_or_else(|| kind_mismatch::<T>(id, T::RULE_NAME))
    }

    /// All regulatory elements of kind `T`, in id order.
    pub fn regulatory_elements_of<T: RegulatoryElement>(&self) -> impl Iterator<Item = &T> + '_ {
        self.regulatory_elements
            .values()
            .filter_map(|e| e.downcast_ref::<T>())
    }

    /// Regulatory elements listed on `lanelet`, in insertion order.
    pub fn regulatory_elements_of_lanelet(
        &self,
        lanelet: LaneletId,
    ) -> Vec<&dyn RegulatoryElement> {
        self.lanelets
            .get(&lanelet)
            .map_or_else(Vec::new, |ll| {
                ll.regulatory_elements
                    .iter()
                    .filter_map(|id| self.regulatory_element(*id))
                    .collect()
            })
    }

    /// All regulatory elements, in id order.
    pub fn regulatory_elements(&self) -> impl Iterator<Item = &dyn RegulatoryElement> + '_ {
        self.regulatory_elements.values().map(|e| e.as_ref())
    }

    pub fn num_regulatory_elements(&self) -> usize {
        self.regulatory_elements.len()
    }

    fn check_points(
        &self,
        owner_kind: &'static str,
        owner: Id,
        points: &[PointId],
    ) -> Result<(), MapError> {
        match points.iter().find(|p| !self.points.contains_key(*p)) {
            Some(missing) => Err(dangling(owner_kind, owner, PointId::KIND, missing.id())),
            None => Ok(()),
        }
    }

    fn resolves(&self, param: &RuleParameter) -> bool {
        match param {
            RuleParameter::Point(id) => self.points.contains_key(id),
            RuleParameter::LineString(id) => self.line_strings.contains_key(id),
            RuleParameter::Polygon(id) => self.polygons.contains_key(id),
            RuleParameter::Lanelet(id) => self.lanelets.contains_key(id),
            RuleParameter::RegulatoryElement(id) => self.regulatory_elements.contains_key(id),
        }
    }
}

impl DebugInvariants for LaneletMap {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "LaneletMap");
    }

    fn validate_invariants(&self) -> Result<(), MapError> {
        for (id, element) in &self.regulatory_elements {
            for param in element.data().parameters.all_parameters() {
                if !self.resolves(param) {
                    return Err(dangling(RegElemId::KIND, id.id(), param.kind(), param.id()));
                }
            }
        }
        for (id, lanelet) in &self.lanelets {
            for reg in &lanelet.regulatory_elements {
                if !self.regulatory_elements.contains_key(reg) {
                    return Err(dangling(LaneletId::KIND, id.id(), RegElemId::KIND, reg.id()));
                }
            }
        }
        Ok(())
    }
}

fn dangling(owner_kind: &'static str, owner: Id, kind: &'static str, id: Id) -> MapError {
    MapError::DanglingReference {
        owner_kind,
        owner,
        kind,
        id,
    }
}

fn kind_mismatch<T: RegulatoryElementKind>(id: RegElemId, actual: &str) -> MapError {
    MapError::KindMismatch {
        id: id.id(),
        requested: T::RULE_NAME,
        actual: actual.to_string(),
    }
}
