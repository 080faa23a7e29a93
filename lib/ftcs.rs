//! Forward-time, centered-space (explicit) stepping.
//!
//! With `ψ = re + i im`, the scheme is
//! ```text
//! re' = re + dt (H im) / ħ
//! im' = im - dt (H re) / ħ
//! ```
//! where every term on the right-hand side is taken from the previous time
//! level. The scheme is only conditionally stable; see
//! [`SchemeParameters::stability_number`].

use ndarray::{ self as nd, s };
use crate::{
    Arr2,
    boundary::BoundaryPolicy,
    grid::GridState,
    timedep::SchemeParameters,
};

/// Precomputed coefficients for the explicit update.
#[derive(Copy, Clone, Debug)]
pub struct Ftcs {
    dt: f64,
    hbar: f64,
    alpha_x: f64,
    alpha_y: f64,
}

impl Ftcs {
    pub fn new(params: &SchemeParameters) -> Self {
        Self {
            dt: params.dt,
            hbar: params.hbar,
            alpha_x: params.alpha_x(),
            alpha_y: params.alpha_y(),
        }
    }

    /// Advance `state` by one time step in place, then impose the boundary.
    pub fn step(
        &self,
        state: &mut GridState,
        boundary: &BoundaryPolicy,
        step: usize,
    ) {
        let h_re = apply_hamiltonian(
            &state.re, &state.v, self.alpha_x, self.alpha_y, self.hbar);
        let h_im = apply_hamiltonian(
            &state.im, &state.v, self.alpha_x, self.alpha_y, self.hbar);
        let (nx, ny) = state.dim();
        state.re.slice_mut(s![1..nx - 1, 1..ny - 1]).scaled_add(self.dt, &h_im);
        state.im.slice_mut(s![1..nx - 1, 1..ny - 1]).scaled_add(-self.dt, &h_re);
        boundary.apply(&mut state.re, &mut state.im, step);
    }
}

// evaluate (H a) / ħ on the interior cells of `a`, returning an array two
// cells smaller along each axis
//
// the kinetic part is the five-point Laplacian scaled by ħ/2m; edge cells
// enter only as neighbors
pub(crate) fn apply_hamiltonian<S, T>(
    a: &Arr2<S>,
    v: &Arr2<T>,
    alpha_x: f64,
    alpha_y: f64,
    hbar: f64,
) -> nd::Array2<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let (nx, ny) = a.dim();
    let c = a.slice(s![1..nx - 1, 1..ny - 1]);
    let xm = a.slice(s![..nx - 2, 1..ny - 1]);
    let xp = a.slice(s![2.., 1..ny - 1]);
    let ym = a.slice(s![1..nx - 1, ..ny - 2]);
    let yp = a.slice(s![1..nx - 1, 2..]);
    let vc = v.slice(s![1..nx - 1, 1..ny - 1]);
    let mut h: nd::Array2<f64> = nd::Array2::zeros(c.raw_dim());
    nd::Zip::from(&mut h).and(&c).and(&xm).and(&xp).and(&ym).and(&yp)
        .for_each(|hk, ck, xmk, xpk, ymk, ypk| {
            *hk = -alpha_x * (xpk + xmk - 2.0 * ck)
                - alpha_y * (ypk + ymk - 2.0 * ck);
        });
    nd::Zip::from(&mut h).and(&c).and(&vc)
        .for_each(|hk, ck, vk| { *hk += vk / hbar * ck; });
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn hamiltonian_of_quadratic() {
        // a = x², so the second difference is 2 dx² everywhere
        let a = nd::Array2::from_shape_fn((5, 4), |(i, _)| (i * i) as f64);
        let v = nd::Array2::from_elem((5, 4), 3.0);
        let h = apply_hamiltonian(&a, &v, 0.5, 0.25, 1.5);
        assert_eq!(h.dim(), (3, 2));
        for ((i, _), hk) in h.indexed_iter() {
            let x2 = ((i + 1) * (i + 1)) as f64;
            assert_abs_diff_eq!(*hk, -0.5 * 2.0 + 3.0 / 1.5 * x2, epsilon = 1e-12);
        }
    }
}
