//! Circular-arc helpers for the 360° ecliptic.

/// Width of one zodiac sign in degrees.
pub const SIGN_ARC: f64 = 30.0;
pub const HALF_ARC: f64 = 180.0;
pub const FULL_ARC: f64 = 360.0;

/// Absolute ecliptic position of `degree` inside sign `sign_index` (0 = Aries).
pub fn absolute_degree(sign_index: u8, degree: f64) -> f64 {
    f64::from(sign_index) * SIGN_ARC + degree
}

/// Shortest distance between two absolute positions, always in [0, 180].
pub fn shortest_arc(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs();
    if diff > HALF_ARC {
        FULL_ARC - diff
    } else {
        diff
    }
}
