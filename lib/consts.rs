//! Default physical constants, simulation domain, and time steps, together
//! with the table of named constants that configuration files may refer to.
//!
//! All defaults are in natural units (ħ = m = 1).

/// Reduced Planck constant.
pub const H_BAR: f64 = 1.0;

/// Particle mass.
pub const M: f64 = 1.0;

/// Lower x extent of the default domain.
pub const X_MIN: f64 = -10.0;
/// Upper x extent of the default domain.
pub const X_MAX: f64 = 10.0;
/// Number of x grid points in the default domain.
pub const N_X: usize = 101;

/// Lower y extent of the default domain.
pub const Y_MIN: f64 = -10.0;
/// Upper y extent of the default domain.
pub const Y_MAX: f64 = 10.0;
/// Number of y grid points in the default domain.
pub const N_Y: usize = 101;

/// Default simulated time span.
pub const T_MAX: f64 = 10.0;

/// Default time step for the explicit scheme.
pub const DT_FTCS: f64 = 0.02 / 800.0;
/// Default time step for the backward-time scheme.
pub const DT_BTCS: f64 = 0.02 / 40.0;
/// Default time step for the centered-time scheme.
pub const DT_CTCS: f64 = 0.02 / 4.0;

/// Largest [stability number][crate::timedep::SchemeParameters::stability_number]
/// accepted for the explicit scheme without a warning.
///
/// Each explicit step can amplify the fastest grid mode by at most
/// `sqrt(1 + s²)`; at `s = 0.1` that is half a percent.
pub const FTCS_STABILITY_LIMIT: f64 = 0.1;

/// Special values that configuration arguments may name instead of giving a
/// number.
pub const NAMED_CONSTANTS: &[(&str, f64)] = &[
    // normalization of a unit-width Gaussian
    ("A", FRAC_1_SQRT_2PI),
];

// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Look up a named constant.
pub fn named(name: &str) -> Option<f64> {
    NAMED_CONSTANTS.iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| *v)
}
