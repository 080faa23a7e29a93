//! Ownership of the grids that make up one simulation.

use ndarray as nd;
use crate::error::ShapeError;

/// The potential together with the real and imaginary parts of the
/// wavefunction at the current time.
///
/// All three grids share one fixed `N_X × N_Y` shape. The potential is never
/// modified after construction, and the wavefunction can only be written by
/// the steppers in this crate.
#[derive(Clone, Debug)]
pub struct GridState {
    pub(crate) v: nd::Array2<f64>,
    pub(crate) re: nd::Array2<f64>,
    pub(crate) im: nd::Array2<f64>,
}

impl GridState {
    /// Take ownership of a potential and an initial wavefunction.
    ///
    /// Fails if the grids do not all have the same shape, or if they are
    /// smaller than 3×3.
    pub fn new(
        potential: nd::Array2<f64>,
        re: nd::Array2<f64>,
        im: nd::Array2<f64>,
    ) -> Result<Self, ShapeError>
    {
        ShapeError::check("real part", &potential, &re)?;
        ShapeError::check("imaginary part", &potential, &im)?;
        ShapeError::check_size(potential.dim())?;
        Ok(Self { v: potential, re, im })
    }

    /// Shape of every grid, `(N_X, N_Y)`.
    pub fn dim(&self) -> (usize, usize) { self.v.dim() }

    pub fn potential(&self) -> nd::ArrayView2<'_, f64> { self.v.view() }

    pub fn real_part(&self) -> nd::ArrayView2<'_, f64> { self.re.view() }

    pub fn imag_part(&self) -> nd::ArrayView2<'_, f64> { self.im.view() }

    /// Largest absolute value of the potential.
    pub fn v_max(&self) -> f64 {
        self.v.iter().fold(0.0_f64, |acc, vk| acc.max(vk.abs()))
    }
}
