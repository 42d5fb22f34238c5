//! Arena ids for the entities of a [`Design`](crate::data::Design).
//!
//! Ids are dense `u32` positions into the design's arenas. They print with a
//! one-letter kind tag (`c12`, `m3`, `g0`) and serialize as bare integers.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! arena_id {
    ($($(#[$meta:meta])* $name:ident => $tag:literal;)+) => {$(
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw arena position.
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// The raw arena position.
            pub const fn as_raw(self) -> u32 {
                self.0
            }

            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.0)
            }
        }
    )+};
}

arena_id! {
    /// A cell instance.
    CellId => "c";
    /// A cell master.
    MacroId => "m";
    /// A placement group.
    GroupId => "g";
}
