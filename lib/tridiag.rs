//! Direct solution of tridiagonal linear systems.
//!
//! A system of `n` rows is described by four length-`n` vectors: the
//! sub-diagonal `a`, main diagonal `b`, super-diagonal `c`, and right-hand side
//! `d`, so that row `k` reads
//! ```text
//! a[k] x[k - 1] + b[k] x[k] + c[k] x[k + 1] = d[k]
//! ```
//! `a[0]` and `c[n - 1]` fall outside the matrix and are ignored.
//!
//! Both functions here are pure: all working storage is passed in explicitly,
//! so independent lines of a grid can be solved concurrently.

use ndarray as nd;
use num_traits::Num;
use crate::{
    Arr1,
    error::{ LengthError, SingularError, SolveError },
};

pub type SResult<T> = Result<T, SolveError>;

/// Solve a tridiagonal system by forward elimination and back substitution
/// (the Thomas algorithm), returning a new solution array.
///
/// Fails if the input vectors are empty or of unequal length, or if a pivot is
/// exactly zero during elimination. No pivoting is performed, so the system
/// should be diagonally dominant for the result to be accurate.
///
/// See also [`solve_tridiag_into`].
pub fn solve_tridiag<S1, S2, S3, S4, A>(
    a: &Arr1<S1>,
    b: &Arr1<S2>,
    c: &Arr1<S3>,
    d: &Arr1<S4>,
) -> SResult<nd::Array1<A>>
where
    S1: nd::Data<Elem = A>,
    S2: nd::Data<Elem = A>,
    S3: nd::Data<Elem = A>,
    S4: nd::Data<Elem = A>,
    A: Num + Copy,
{
    let mut x: nd::Array1<A> = nd::Array1::from_elem(d.len(), A::zero());
    let mut scratch: nd::Array1<A> = x.clone();
    solve_tridiag_into(a, b, c, d, &mut scratch, &mut x)?;
    Ok(x)
}

/// Like [`solve_tridiag`], but write the solution into `x`, using `scratch` to
/// hold the modified super-diagonal.
///
/// `scratch` and `x` must have the same length as the system.
pub fn solve_tridiag_into<S1, S2, S3, S4, S5, S6, A>(
    a: &Arr1<S1>,
    b: &Arr1<S2>,
    c: &Arr1<S3>,
    d: &Arr1<S4>,
    scratch: &mut Arr1<S5>,
    x: &mut Arr1<S6>,
) -> SResult<()>
where
    S1: nd::Data<Elem = A>,
    S2: nd::Data<Elem = A>,
    S3: nd::Data<Elem = A>,
    S4: nd::Data<Elem = A>,
    S5: nd::DataMut<Elem = A>,
    S6: nd::DataMut<Elem = A>,
    A: Num + Copy,
{
    LengthError::check(b, a)?;
    LengthError::check(b, c)?;
    LengthError::check(b, d)?;
    LengthError::check(b, &*scratch)?;
    LengthError::check(b, &*x)?;
    let n = b.len();

    // forward elimination; x holds the modified right-hand side until the
    // back substitution overwrites it
    let mut pivot: A = b[0];
    if pivot == A::zero() { return Err(SingularError(0).into()); }
    scratch[0] = c[0] / pivot;
    x[0] = d[0] / pivot;
    for k in 1..n {
        pivot = b[k] - a[k] * scratch[k - 1];
        if pivot == A::zero() { return Err(SingularError(k).into()); }
        scratch[k] = c[k] / pivot;
        x[k] = (d[k] - a[k] * x[k - 1]) / pivot;
    }

    for k in (0..n - 1).rev() {
        let xkp1 = x[k + 1];
        x[k] = x[k] - scratch[k] * xkp1;
    }
    Ok(())
}
