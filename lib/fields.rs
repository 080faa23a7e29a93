//! Generators for initial potentials and wavefunctions on a rectangular
//! domain.

use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::{
    consts,
    error::ConfigError,
    utils::{ linspace, split_complex },
};

/// Extents and point counts of the simulated region.
///
/// Grid point `[i, j]` sits at `(xs()[i], ys()[j])`; both ends of each extent
/// are grid points.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub x_min: f64,
    pub x_max: f64,
    pub n_x: usize,
    pub y_min: f64,
    pub y_max: f64,
    pub n_y: usize,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            x_min: consts::X_MIN,
            x_max: consts::X_MAX,
            n_x: consts::N_X,
            y_min: consts::Y_MIN,
            y_max: consts::Y_MAX,
            n_y: consts::N_Y,
        }
    }
}

impl Domain {
    /// Fail unless both axes have at least 3 points and increasing extents.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.n_x < 3 || self.n_y < 3 {
            return Err(ConfigError::BadDomain(format!(
                "need at least 3 points per axis; got {}×{}", self.n_x, self.n_y)));
        }
        if !(self.x_min < self.x_max && self.y_min < self.y_max) {
            return Err(ConfigError::BadDomain(format!(
                "extents must be increasing; got x ∊ [{}, {}], y ∊ [{}, {}]",
                self.x_min, self.x_max, self.y_min, self.y_max,
            )));
        }
        Ok(())
    }

    pub fn shape(&self) -> (usize, usize) { (self.n_x, self.n_y) }

    pub fn xs(&self) -> nd::Array1<f64> { linspace(self.x_min, self.x_max, self.n_x) }

    pub fn ys(&self) -> nd::Array1<f64> { linspace(self.y_min, self.y_max, self.n_y) }

    /// Spacing between x grid points.
    pub fn dx(&self) -> f64 { (self.x_max - self.x_min) / (self.n_x - 1) as f64 }

    /// Spacing between y grid points.
    pub fn dy(&self) -> f64 { (self.y_max - self.y_min) / (self.n_y - 1) as f64 }
}

/// Named potential shapes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    /// No potential.
    #[serde(rename = "zero")]
    Zero,
    /// A wall of height 10 along the middle column.
    #[serde(rename = "barrier")]
    Barrier,
    /// A wall of height 50 along the middle column with two slits.
    #[serde(rename = "youngs_slits")]
    YoungsSlits,
    /// Isotropic harmonic well `(x² + y²) / 9`.
    #[serde(rename = "potential_2D_HO", alias = "harmonic")]
    Harmonic,
}

impl Field {
    pub fn generate(&self, domain: &Domain) -> nd::Array2<f64> {
        match self {
            Self::Zero => nd::Array2::zeros(domain.shape()),
            Self::Barrier => barrier(domain, 10.0),
            Self::YoungsSlits => youngs_slits(domain, 50.0),
            Self::Harmonic => harmonic(domain, 1.0 / 9.0),
        }
    }
}

/// A wall of height `v` on the column `j = n_y / 2`.
pub fn barrier(domain: &Domain, v: f64) -> nd::Array2<f64> {
    let mid = domain.n_y / 2;
    nd::Array2::from_shape_fn(domain.shape(), |(_, j)| if j == mid { v } else { 0.0 })
}

/// A [barrier] of height `v` with single-cell openings at `i = n_x / 2 ± 1`.
pub fn youngs_slits(domain: &Domain, v: f64) -> nd::Array2<f64> {
    let mut v0 = barrier(domain, v);
    let mid_x = domain.n_x / 2;
    let mid_y = domain.n_y / 2;
    v0[[mid_x - 1, mid_y]] = 0.0;
    v0[[mid_x + 1, mid_y]] = 0.0;
    v0
}

/// Harmonic potential `k (x² + y²)`.
pub fn harmonic(domain: &Domain, k: f64) -> nd::Array2<f64> {
    let xs = domain.xs();
    let ys = domain.ys();
    nd::Array2::from_shape_fn(domain.shape(), |(i, j)| k * (xs[i].powi(2) + ys[j].powi(2)))
}

/// Named wavefunction shapes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wave {
    /// Gaussian wave packet; see [`gaussian`].
    Gaussian,
}

impl Wave {
    /// Number of positional arguments the generator takes.
    pub fn arity(&self) -> usize {
        match self {
            Self::Gaussian => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gaussian => "gaussian",
        }
    }

    /// Fail if `args` has the wrong length or holds an unusable value.
    pub fn check(&self, args: &[f64]) -> Result<(), ConfigError> {
        if args.len() != self.arity() {
            return Err(ConfigError::Arity(self.name(), self.arity(), args.len()));
        }
        match self {
            Self::Gaussian => {
                let w = args[2];
                if !(w.is_finite() && w > 0.0) {
                    return Err(ConfigError::BadArgument(self.name(), "w", w));
                }
            },
        }
        Ok(())
    }

    /// Evaluate the wavefunction on `domain`, returning its real and imaginary
    /// parts.
    pub fn generate(&self, domain: &Domain, args: &[f64])
        -> Result<(nd::Array2<f64>, nd::Array2<f64>), ConfigError>
    {
        self.check(args)?;
        let q = match self {
            Self::Gaussian
                => gaussian(domain, args[0], args[1], args[2], args[3], args[4], args[5]),
        };
        Ok(split_complex(&q))
    }
}

/// Gaussian wave packet centered on `(x0, y0)` with width `w`, amplitude `a`,
/// and wavevector `(kx, ky)`:
/// ```text
/// ψ(x, y) = a exp(i (kx x + ky y)) exp(-((x - x0)² + (y - y0)²) / w²)
/// ```
pub fn gaussian(
    domain: &Domain,
    x0: f64,
    y0: f64,
    w: f64,
    a: f64,
    kx: f64,
    ky: f64,
) -> nd::Array2<C64> {
    let xs = domain.xs();
    let ys = domain.ys();
    let w2 = w.powi(2);
    nd::Array2::from_shape_fn(domain.shape(), |(i, j)| {
        let (x, y) = (xs[i], ys[j]);
        let envelope = (-((x - x0).powi(2) + (y - y0).powi(2)) / w2).exp();
        a * envelope * C64::cis(kx * x + ky * y)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small() -> Domain {
        Domain { x_min: -2.0, x_max: 2.0, n_x: 5, y_min: -1.0, y_max: 1.0, n_y: 3 }
    }

    #[test]
    fn default_domain_spacing() {
        let d = Domain::default();
        assert_eq!(d.shape(), (101, 101));
        assert_relative_eq!(d.dx(), 0.2);
        assert_relative_eq!(d.xs()[50], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn bad_domains() {
        let mut d = small();
        d.n_y = 2;
        assert!(matches!(d.check(), Err(ConfigError::BadDomain(_))));
        let mut d = small();
        d.x_max = -3.0;
        assert!(matches!(d.check(), Err(ConfigError::BadDomain(_))));
        assert!(small().check().is_ok());
    }

    #[test]
    fn potentials() {
        let d = small();
        let b = Field::Barrier.generate(&d);
        assert_eq!(b.column(1).to_vec(), vec![10.0; 5]);
        assert_eq!(b.column(0).sum(), 0.0);

        let s = Field::YoungsSlits.generate(&d);
        assert_eq!(s.column(1).to_vec(), vec![50.0, 0.0, 50.0, 0.0, 50.0]);

        let h = Field::Harmonic.generate(&d);
        assert_relative_eq!(h[[0, 0]], (4.0 + 1.0) / 9.0, epsilon = 1e-12);
        assert_eq!(h[[2, 1]], 0.0);
    }

    #[test]
    fn field_names() {
        let f: Field = serde_json::from_str("\"potential_2D_HO\"").unwrap();
        assert_eq!(f, Field::Harmonic);
        let f: Field = serde_json::from_str("\"youngs_slits\"").unwrap();
        assert_eq!(f, Field::YoungsSlits);
    }

    #[test]
    fn gaussian_packet() {
        let d = small();
        let (re, im) = Wave::Gaussian.generate(&d, &[0.0, 0.0, 1.0, 2.0, 0.0, 0.0]).unwrap();
        assert_relative_eq!(re[[2, 1]], 2.0);
        assert_relative_eq!(re[[3, 1]], 2.0 * (-1.0_f64).exp(), epsilon = 1e-12);
        assert!(im.iter().all(|x| *x == 0.0));

        let q = gaussian(&d, 0.0, 0.0, 1.0, 1.0, 1.5, 0.0);
        assert_relative_eq!(q[[3, 1]].arg(), 1.5, epsilon = 1e-12);
        assert!(matches!(
            Wave::Gaussian.generate(&d, &[0.0; 5]),
            Err(ConfigError::Arity("gaussian", 6, 5)),
        ));
    }

    #[test]
    fn gaussian_width_must_be_positive() {
        let d = small();
        for w in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let res = Wave::Gaussian.generate(&d, &[0.0, 0.0, w, 1.0, 0.0, 0.0]);
            assert!(
                matches!(res, Err(ConfigError::BadArgument("gaussian", "w", _))),
                "w = {}", w,
            );
        }
        assert!(Wave::Gaussian.check(&[0.0, 0.0, 1e-3, 1.0, 0.0, 0.0]).is_ok());
    }
}
