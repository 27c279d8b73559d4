//! Typed identifiers for vehicles and lights.
//!
//! Both are `Copy + Ord + Hash`: vehicle ids order the backlog and key
//! per-vehicle maps in tests, light ids follow road position.

use std::fmt;

/// Declare a newtype id with a short display prefix (`V17`, `L0`).
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

typed_id! {
    /// Vehicle identity, assigned monotonically in generation order starting
    /// at 1.  Backlog FIFO order therefore equals id order.
    pub struct VehicleId(u64) => "V";
}

typed_id! {
    /// Index of a traffic light in the controller, ordered by road position.
    pub struct LightId(u16) => "L";
}

impl VehicleId {
    /// The id handed to the first generated vehicle of a run.
    pub const FIRST: VehicleId = VehicleId(1);

    /// The id following `self`.
    #[inline]
    pub fn next(self) -> VehicleId {
        VehicleId(self.0 + 1)
    }
}
