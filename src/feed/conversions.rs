//! Unit conversions for close-approach display values.
//!
//! Constants are fixed approximations.

/// Kilometers per astronomical unit.
pub const AU_TO_KM: f64 = 149_597_870.7;

/// Lunar distances per astronomical unit (rounded ratio, not derived from
/// the mean Earth-Moon distance).
pub const AU_TO_LD: f64 = 389.0;

/// Magnitude zero point of the diameter approximation; assumes a fixed albedo.
pub const DIAMETER_ZERO_POINT_MAG: f64 = 27.8;

/// Estimated diameter in meters from absolute magnitude: `10^((27.8 - H) / 5)`.
pub fn estimated_diameter_m(h: f64) -> f64 {
    10f64.powf((DIAMETER_ZERO_POINT_MAG - h) / 5.0)
}

/// Nominal distance in whole kilometers.
pub fn au_to_km(distance_au: f64) -> f64 {
    round_half_even(distance_au * AU_TO_KM, 0)
}

/// Nominal distance in lunar distances, to one decimal.
pub fn au_to_lunar_distance(distance_au: f64) -> f64 {
    round_half_even(distance_au * AU_TO_LD, 1)
}

/// Round to `decimals` places with ties going to the even neighbour.
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}
