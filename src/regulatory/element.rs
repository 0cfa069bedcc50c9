//! Polymorphic regulatory elements.
//!
//! Every stored regulatory element implements the object-safe
//! [`RegulatoryElement`] trait, so a map can hold elements of kinds it was
//! not compiled against. Kinds known at compile time additionally implement
//! [`RegulatoryElementKind`], which ties a rule name to a constructor from
//! the generic [`RegulatoryElementData`] record and is what
//! [`Registry::register`](crate::regulatory::registry::Registry::register)
//! consumes.

use std::any::Any;
use std::fmt;

use crate::map_error::MapError;
use crate::primitives::attribute::AttributeMap;
use crate::primitives::id::RegElemId;
use crate::regulatory::data::RegulatoryElementData;

/// Object-safe interface shared by all regulatory element kinds.
pub trait RegulatoryElement: Any + fmt::Debug + Send + Sync {
    /// The generic record this element is a view over.
    fn data(&self) -> &RegulatoryElementData;

    /// Consumes the element, returning its generic record.
    fn into_data(self: Box<Self>) -> RegulatoryElementData;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn id(&self) -> RegElemId {
        self.data().id
    }

    fn attributes(&self) -> &AttributeMap {
        &self.data().attributes
    }

    /// The kind label; empty when the record carries no `subtype`.
    fn rule_name(&self) -> &str {
        self.data().rule_name().unwrap_or_default()
    }
}

/// A regulatory element kind with a fixed rule name.
pub trait RegulatoryElementKind: RegulatoryElement + Sized {
    /// Kind label under which the kind is registered.
    const RULE_NAME: &'static str;

    /// Rebuilds the typed element from a generic record.
    fn from_data(data: RegulatoryElementData) -> Result<Self, MapError>;
}

impl dyn RegulatoryElement {
    /// Returns true if the element is a `T`.
    pub fn is<T: RegulatoryElement>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: RegulatoryElement>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: RegulatoryElement>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Fallback view for records whose rule name has no registered kind.
///
/// The record is kept verbatim so no information is lost on load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericRegulatoryElement {
    data: RegulatoryElementData,
}

impl GenericRegulatoryElement {
    pub fn new(data: RegulatoryElementData) -> Self {
        Self { data }
    }
}

impl RegulatoryElement for GenericRegulatoryElement {
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
