//! Human-readable configuration descriptions.

use jg_core::LaneConfiguration;
use jg_signal::TrafficLightController;

use crate::Sim;

/// Long form, e.g.
/// `2 regular lanes + bus lane | bus lane capacity 80 veh/km | lights at km [0.50] | green 60% of cycle | cycle 68s`.
pub fn describe(config: &LaneConfiguration, lights: &TrafficLightController) -> String {
    let mut parts = Vec::new();

    let lanes = match config.num_regular_lanes {
        1 => "1 regular lane".to_string(),
        n => format!("{n} regular lanes"),
    };
    if config.has_dedicated_lane {
        parts.push(format!("{lanes} + bus lane"));
        parts.push(format!("bus lane capacity {:.0} veh/km", config.dedicated_lane_capacity));
    } else {
        parts.push(lanes);
    }

    let positions: Vec<String> = lights.lights().iter().map(|l| format!("{:.2}", l.position)).collect();
    parts.push(format!("lights at km [{}]", positions.join(", ")));

    if let Some(first) = lights.lights().first() {
        parts.push(format!(
            "green {:.0}% of cycle",
            first.green_duration / first.cycle_duration * 100.0
        ));
        parts.push(format!("cycle {:.0}s", first.cycle_duration));
    }

    parts.join(" | ")
}

/// Short form for table headers and chart labels, e.g. `2L+Bus, 1S`.
pub fn describe_short(config: &LaneConfiguration, lights: &TrafficLightController) -> String {
    let bus = if config.has_dedicated_lane { "+Bus" } else { "" };
    format!("{}L{bus}, {}S", config.num_regular_lanes, lights.len())
}

impl Sim {
    /// Long configuration description; pure.
    pub fn describe(&self) -> String {
        describe(&self.config, &self.lights)
    }

    /// Short configuration description; pure.
    pub fn describe_short(&self) -> String {
        describe_short(&self.config, &self.lights)
    }
}
