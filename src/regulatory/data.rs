//! Generic regulatory element records.
//!
//! A [`RegulatoryElementData`] is the untyped form every regulatory element
//! is stored and loaded in: an id, an attribute map and a role → parameters
//! map. Typed elements such as [`Roundabout`](crate::regulatory::Roundabout)
//! are views over one of these records.

use std::collections::BTreeMap;

use crate::map_error::MapError;
use crate::primitives::attribute::{AttributeMap, AttributeName, AttributeValueString};
use crate::primitives::id::{Id, LaneletId, LineStringId, PointId, PolygonId, RegElemId};

/// Standard role names.
pub struct RoleName;

impl RoleName {
    pub const REFERS: &'static str = "refers";
    pub const REF_LINE: &'static str = "ref_line";
}

/// A reference to a map primitive held in a role.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleParameter {
    Point(PointId),
    LineString(LineStringId),
    Polygon(PolygonId),
    Lanelet(LaneletId),
    RegulatoryElement(RegElemId),
}

impl RuleParameter {
    /// Human-readable primitive kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RuleParameter::Point(_) => PointId::KIND,
            RuleParameter::LineString(_) => LineStringId::KIND,
            RuleParameter::Polygon(_) => PolygonId::KIND,
            RuleParameter::Lanelet(_) => LaneletId::KIND,
            RuleParameter::RegulatoryElement(_) => RegElemId::KIND,
        }
    }

    /// Untyped id of the referenced primitive.
    pub fn id(&self) -> Id {
        match *self {
            RuleParameter::Point(p) => p.id(),
            RuleParameter::LineString(l) => l.id(),
            RuleParameter::Polygon(p) => p.id(),
            RuleParameter::Lanelet(l) => l.id(),
            RuleParameter::RegulatoryElement(r) => r.id(),
        }
    }
}

/// Typed handles that can be stored as a [`RuleParameter`].
pub trait ParameterKind: Copy + Sized {
    const KIND: &'static str;

    fn from_parameter(param: &RuleParameter) -> Option<Self>;
    fn into_parameter(self) -> RuleParameter;
}

macro_rules! parameter_kind {
    ($ty:ty, $variant:ident) => {
        impl ParameterKind for $ty {
            const KIND: &'static str = <$ty>::KIND;

            #[inline]
            fn from_parameter(param: &RuleParameter) -> Option<Self> {
                match *param {
                    RuleParameter::$variant(id) => Some(id),
                    _ => None,
                }
            }

            #[inline]
            fn into_parameter(self) -> RuleParameter {
                RuleParameter::$variant(self)
            }
        }

        impl From<$ty> for RuleParameter {
            #[inline]
            fn from(id: $ty) -> Self {
                RuleParameter::$variant(id)
            }
        }
    };
}

parameter_kind!(PointId, Point);
parameter_kind!(LineStringId, LineString);
parameter_kind!(PolygonId, Polygon);
parameter_kind!(LaneletId, Lanelet);
parameter_kind!(RegElemId, RegulatoryElement);

/// Ordered role name → parameters mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RuleParameterMap {
    roles: BTreeMap<String, Vec<RuleParameter>>,
}

impl RuleParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the parameters of `role`, returning the previous ones.
    pub fn insert<I>(&mut self, role: impl Into<String>, params: I) -> Option<Vec<RuleParameter>>
    where
        I: IntoIterator,
        I::Item: Into<RuleParameter>,
    {
        self.roles
            .insert(role.into(), params.into_iter().map(Into::into).collect())
    }

    /// Parameters of `role`; empty if the role is absent.
    pub fn get(&self, role: &str) -> &[RuleParameter] {
        self.roles.get(role).map_or(&[], Vec::as_slice)
    }

    /// Appends `param` to `role`, creating the role if needed.
    pub fn push(&mut self, role: &str, param: impl Into<RuleParameter>) {
        self.roles
            .entry(role.to_string())
            .or_default()
            .push(param.into());
    }

    /// Removes the first occurrence of `param` from `role`.
    ///
    /// Returns true if an entry was removed. The role key is kept even when it
    /// becomes empty.
    pub fn remove(&mut self, role: &str, param: &RuleParameter) -> bool {
        let Some(params) = self.roles.get_mut(role) else {
            return false;
        };
        match params.iter().position(|p| p == param) {
            Some(pos) => {
                params.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Every parameter across all roles.
    pub fn all_parameters(&self) -> impl Iterator<Item = &RuleParameter> + '_ {
        self.roles.values().flatten()
    }
}

/// The generic record backing every regulatory element.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegulatoryElementData {
    pub id: RegElemId,
    #[serde(default)]
    pub attributes: AttributeMap,
    #[serde(default)]
    pub parameters: RuleParameterMap,
}

impl RegulatoryElementData {
    pub fn new(id: RegElemId, attributes: AttributeMap, parameters: RuleParameterMap) -> Self {
        Self {
            id,
            attributes,
            parameters,
        }
    }

    /// Stamps `type = regulatory_element` and `subtype = rule_name`.
    pub fn set_rule_name(&mut self, rule_name: &str) {
        self.attributes
            .insert(AttributeName::TYPE, AttributeValueString::REGULATORY_ELEMENT);
        self.attributes.insert(AttributeName::SUBTYPE, rule_name);
    }

    /// The kind label, read from the `subtype` attribute.
    pub fn rule_name(&self) -> Option<&str> {
        self.attributes.subtype()
    }

    /// All parameters of `role` as typed handles.
    ///
    /// An absent role yields an empty vector. Any entry of a different kind
    /// fails with [`MapError::WrongParameterKind`].
    pub fn typed_parameters<T: ParameterKind>(&self, role: &str) -> Result<Vec<T>, MapError> {
        self.parameters
            .get(role)
            .iter()
            .map(|param| {
                T::from_parameter(param).ok_or_else(|| MapError::WrongParameterKind {
                    id: self.id.id(),
                    role: role.to_string(),
                    expected: T::KIND,
                    found: param.kind(),
                })
            })
            .collect()
    }

    /// The single parameter of `role`.
    ///
    /// Fails with [`MapError::MissingRole`] if the role is absent or empty and
    /// with [`MapError::RoleCardinality`] if it holds more than one entry.
    pub fn single_parameter<T: ParameterKind>(&self, role: &str) -> Result<T, MapError> {
        let params = self.typed_parameters::<T>(role)?;
        match params.as_slice() {
            [] => Err(MapError::MissingRole {
                id: self.id.id(),
                role: role.to_string(),
            }),
            [single] => Ok(*single),
            many => Err(MapError::RoleCardinality {
                id: self.id.id(),
                role: role.to_string(),
                expected: 1,
                found: many.len(),
            }),
        }
    }
}
