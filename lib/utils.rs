//! Miscellaneous tools.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::Arr2;

/// Generate `n` evenly spaced points over `[a, b]`, endpoints included.
pub fn linspace(a: f64, b: f64, n: usize) -> nd::Array1<f64> {
    nd::Array1::linspace(a, b, n)
}

/// Calculate the L2 (Frobenius) norm of a wavefunction given as real and
/// imaginary parts, without any volume element.
///
/// *Panics if the two grids have different shapes*.
pub fn wf_norm<S, T>(re: &Arr2<S>, im: &Arr2<T>) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    nd::Zip::from(re).and(im)
        .fold(0.0, |acc, r, i| acc + r * r + i * i)
        .sqrt()
}

/// Calculate the total probability `Σ |ψ|² dx dy` of a wavefunction given as
/// real and imaginary parts.
///
/// *Panics if the two grids have different shapes*.
pub fn wf_probability<S, T>(re: &Arr2<S>, im: &Arr2<T>, dx: f64, dy: f64)
    -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    wf_norm(re, im).powi(2) * dx * dy
}

/// Return the modulus `sqrt(re² + im²)` at every point.
///
/// *Panics if the two grids have different shapes*.
pub fn wf_density<S, T>(re: &Arr2<S>, im: &Arr2<T>) -> nd::Array2<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    nd::Zip::from(re).and(im)
        .map_collect(|r, i| r.hypot(*i))
}

/// Split a complex grid into its real and imaginary parts.
pub fn split_complex<S>(q: &Arr2<S>) -> (nd::Array2<f64>, nd::Array2<f64>)
where S: nd::Data<Elem = C64>
{
    (q.mapv(|qk| qk.re), q.mapv(|qk| qk.im))
}
