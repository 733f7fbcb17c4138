//! Typed indices into the graph's parallel `Vec`s.
//!
//! Ids are `u32` to halve the size of CSR arrays.  `u32::MAX` is reserved
//! as the `INVALID` sentinel, so the largest graph holds `u32::MAX` nodes,
//! edges and features; [`from_index`](NodeId::from_index) reports anything
//! past that instead of wrapping.

use std::fmt;

use crate::{CoreError, CoreResult};

macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident, $kind:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Placeholder for slots not yet assigned.
            pub const INVALID: $name = $name(u32::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Id of the `index`-th element.  Fails when `index` does not
            /// fit below the sentinel.
            #[inline]
            pub fn from_index(index: usize) -> CoreResult<Self> {
                match u32::try_from(index) {
                    Ok(raw) if raw != u32::MAX => Ok($name(raw)),
                    _ => Err(CoreError::IdOverflow { kind: $kind, index }),
                }
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Graph vertex, one per canonical coordinate.
    NodeId, "node"
}

typed_id! {
    /// Directed edge; its position in the CSR edge arrays.
    EdgeId, "edge"
}

typed_id! {
    /// Position of a line feature in the ingestion input.  Every edge keeps
    /// the `FeatureId` of the feature it was cut from.
    FeatureId, "feature"
}
