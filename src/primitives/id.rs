//! Strong, zero-cost handles for map primitives.
//!
//! Every primitive in a lanelet map (point, line string, polygon, lanelet,
//! regulatory element) is addressed by an opaque, host-assigned identifier.
//! [`Id`] wraps a nonzero `u64` so that 0 stays reserved as an invalid or
//! sentinel value. The typed handles ([`LaneletId`], [`PolygonId`], ...)
//! wrap an [`Id`] and keep the primitive kind in the type, so a polygon
//! handle can never be passed where a lanelet is expected.
//!
//! Handles are plain `Copy` values. Holding one never keeps the referenced
//! primitive alive; the [`LaneletMap`](crate::map::LaneletMap) arena owns the
//! primitives.

use std::{fmt, num::NonZeroU64};

use crate::map_error::MapError;

/// Untyped primitive identifier.
///
/// # Memory layout
/// This type is `repr(transparent)` over `NonZeroU64`, so `Option<Id>` has
/// the same size as a `u64`.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct Id(NonZeroU64);

impl Id {
    /// Creates a new `Id` from a raw `u64` value.
    ///
    /// # Panics
    ///
    /// Panics if `raw == 0`. Use [`Id::try_new`] for untrusted input.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use lanelet_roundabout::primitives::id::Id;
    /// let id = Id::new(1);
    /// assert_eq!(id.get(), 1);
    /// ```
    #[inline]
    pub fn new(raw: u64) -> Self {
        Id(NonZeroU64::new(raw).expect("Id must be non-zero"))
    }

    /// Creates a new `Id`, returning [`MapError::InvalidId`] for `raw == 0`.
    #[inline]
    pub fn try_new(raw: u64) -> Result<Self, MapError> {
        NonZeroU64::new(raw).map(Id).ok_or(MapError::InvalidId)
    }

    /// Returns the inner `u64` value of this `Id`.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.get()).finish()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl TryFrom<u64> for Id {
    type Error = MapError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Id::try_new(raw)
    }
}

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[repr(transparent)]
        #[serde(transparent)]
        pub struct $name(Id);

        impl $name {
            /// Human-readable primitive kind, used in error messages.
            pub const KIND: &'static str = $kind;

            /// Creates a handle from a raw `u64`.
            ///
            /// # Panics
            ///
            /// Panics if `raw == 0`.
            #[inline]
            pub fn new(raw: u64) -> Self {
                $name(Id::new(raw))
            }

            /// Fallible counterpart of `new`.
            #[inline]
            pub fn try_new(raw: u64) -> Result<Self, MapError> {
                Id::try_new(raw).map($name)
            }

            /// The untyped identifier.
            #[inline]
            pub const fn id(self) -> Id {
                self.0
            }

            /// Raw integer value.
            #[inline]
            pub const fn get(self) -> u64 {
                self.0.get()
            }
        }

        impl From<Id> for $name {
            #[inline]
            fn from(id: Id) -> Self {
                $name(id)
            }
        }

        impl From<$name> for Id {
            #[inline]
            fn from(handle: $name) -> Self {
                handle.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.get()).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.get())
            }
        }
    };
}

typed_id!(
    /// Handle to a [`Point3d`](crate::primitives::Point3d).
    PointId,
    "point"
);
typed_id!(
    /// Handle to a [`LineString3d`](crate::primitives::LineString3d).
    LineStringId,
    "line string"
);
typed_id!(
    /// Handle to a [`Polygon3d`](crate::primitives::Polygon3d).
    PolygonId,
    "polygon"
);
typed_id!(
    /// Handle to a [`Lanelet`](crate::primitives::Lanelet).
    LaneletId,
    "lanelet"
);
typed_id!(
    /// Handle to a regulatory element stored in a [`LaneletMap`](crate::map::LaneletMap).
    RegElemId,
    "regulatory element"
);
