//! Named infrastructure presets used for standardised comparison.
//!
//! | Variant | Regular lanes | Dedicated lane |
//! |---------|---------------|----------------|
//! | A       | 3             | no             |
//! | B       | 2             | yes            |
//! | C       | 3             | yes            |
//! | D       | 4             | no             |
//!
//! Every preset places its signals at the side-road junctions and uses the
//! default green ratio.

use std::fmt;
use std::str::FromStr;

use crate::constants::{BUS_TOTAL_SPACE, DEFAULT_GREEN_RATIO};
use crate::{LaneConfiguration, SignalTiming, SimulationParameters};

/// Dedicated-lane capacity used by the presets: buses packed bumper to
/// bumper, in vehicles per km.
pub fn default_dedicated_capacity() -> f64 {
    (1.0 / BUS_TOTAL_SPACE).floor()
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    A,
    B,
    C,
    D,
}

impl Variant {
    pub const ALL: [Variant; 4] = [Variant::A, Variant::B, Variant::C, Variant::D];

    /// (regular lanes, dedicated lane)
    fn layout(self) -> (u16, bool) {
        match self {
            Variant::A => (3, false),
            Variant::B => (2, true),
            Variant::C => (3, true),
            Variant::D => (4, false),
        }
    }

    /// Build the preset's lane configuration for `params`.
    pub fn lane_configuration(self, params: &SimulationParameters) -> LaneConfiguration {
        let (num_regular_lanes, has_dedicated_lane) = self.layout();
        LaneConfiguration {
            num_regular_lanes,
            has_dedicated_lane,
            dedicated_lane_capacity: if has_dedicated_lane { default_dedicated_capacity() } else { 0.0 },
            light_positions: params.side_road_positions.clone(),
            green_ratio: DEFAULT_GREEN_RATIO,
            signal: SignalTiming::default(),
        }
    }

    /// The variant to compare against: B ↔ A and C ↔ D share a total lane
    /// count.
    pub fn counterpart(self) -> Variant {
        match self {
            Variant::A => Variant::B,
            Variant::B => Variant::A,
            Variant::C => Variant::D,
            Variant::D => Variant::C,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::A => "A",
            Variant::B => "B",
            Variant::C => "C",
            Variant::D => "D",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Variant::A),
            "B" => Ok(Variant::B),
            "C" => Ok(Variant::C),
            "D" => Ok(Variant::D),
            other => Err(format!("unknown variant {other:?} (expected A, B, C or D)")),
        }
    }
}
