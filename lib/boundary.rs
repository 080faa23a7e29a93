//! Values imposed on the edge cells of the grid.

use ndarray as nd;
use num_complex::Complex64 as C64;

/// Fixed (Dirichlet) boundary condition applied to every edge cell after each
/// update.
///
/// The default holds the wavefunction at zero on the edges, which models a
/// particle that never leaves the simulated region. A non-zero value at the
/// edges is not detected as an error; it only means the domain was too small.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundaryPolicy {
    value: C64,
}

impl Default for BoundaryPolicy {
    fn default() -> Self { Self::zero() }
}

impl BoundaryPolicy {
    /// Clamp both parts of the wavefunction to zero.
    pub fn zero() -> Self { Self { value: C64::new(0.0, 0.0) } }

    /// Clamp the real and imaginary parts to the given constants.
    pub fn dirichlet(re: f64, im: f64) -> Self { Self { value: C64::new(re, im) } }

    /// Value to impose on the edges after the `step`-th update.
    pub fn value(&self, _step: usize) -> C64 { self.value }

    /// Overwrite the edge cells of both grids.
    pub fn apply<S, T>(
        &self,
        re: &mut nd::ArrayBase<S, nd::Ix2>,
        im: &mut nd::ArrayBase<T, nd::Ix2>,
        step: usize,
    )
    where
        S: nd::DataMut<Elem = f64>,
        T: nd::DataMut<Elem = f64>,
    {
        let b = self.value(step);
        fill_edges(re, b.re);
        fill_edges(im, b.im);
    }
}

fn fill_edges<S>(a: &mut nd::ArrayBase<S, nd::Ix2>, b: f64)
where S: nd::DataMut<Elem = f64>
{
    let (nx, ny) = a.dim();
    if nx == 0 || ny == 0 { return; }
    a.row_mut(0).fill(b);
    a.row_mut(nx - 1).fill(b);
    a.column_mut(0).fill(b);
    a.column_mut(ny - 1).fill(b);
}

/// Return `true` if every edge cell of `a` equals `b` exactly.
pub fn edges_equal<S>(a: &nd::ArrayBase<S, nd::Ix2>, b: f64) -> bool
where S: nd::Data<Elem = f64>
{
    let (nx, ny) = a.dim();
    a.indexed_iter()
        .filter(|((i, j), _)| *i == 0 || *j == 0 || *i == nx - 1 || *j == ny - 1)
        .all(|(_, ak)| *ak == b)
}
