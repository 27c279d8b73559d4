//! Physical constants of the road model.
//!
//! Distances are kilometres, speeds km/h, times seconds.

/// Passenger car length (~4.5 m).
pub const CAR_LENGTH: f64 = 0.0045;

/// Bus length (~12 m).
pub const BUS_LENGTH: f64 = 0.0120;

/// Minimum gap kept between consecutive vehicles in a lane.
pub const VEHICLE_SPACING: f64 = 0.0005;

/// Road space one car needs: length plus spacing.
pub const CAR_TOTAL_SPACE: f64 = CAR_LENGTH + VEHICLE_SPACING;

/// Road space one bus needs: length plus spacing.
pub const BUS_TOTAL_SPACE: f64 = BUS_LENGTH + VEHICLE_SPACING;

/// Look-ahead range for red lights, local density, and entry-segment occupancy.
pub const DETECTION_DISTANCE: f64 = 0.500;

/// Slow vehicles closer than this are part of the same jam stretch.
pub const JAM_THRESHOLD_DISTANCE: f64 = 0.050;

/// Speed below which a vehicle counts as jammed / waiting.
pub const JAM_SPEED_THRESHOLD: f64 = 10.0;

/// Free-flow speed ceiling.
pub const BASE_VEHICLE_SPEED: f64 = 50.0;

/// Clearance over which the following constraint ramps from 0 to free flow.
pub const SAFE_FOLLOWING_DISTANCE: f64 = 0.050;

/// Lower bound on the density slow-down factor.
pub const MIN_DENSITY_FACTOR: f64 = 0.1;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Green share of a signal cycle when the caller does not override it.
pub const DEFAULT_GREEN_RATIO: f64 = 0.6;

pub const DEFAULT_SIDE_ROAD_POSITIONS: [f64; 1] = [0.5];

/// Weight of the travel-time term in bus-lane efficiency.
pub const BUS_EFFICIENCY_TIME_WEIGHT: f64 = 0.7;

/// Weight of the speed term in bus-lane efficiency.
pub const BUS_EFFICIENCY_SPEED_WEIGHT: f64 = 0.3;
