//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Finite-difference schemes](#finite-difference-schemes)
//! - [Operator splitting](#operator-splitting)
//! - [Boundary conditions](#boundary-conditions)
//! - [Stability](#stability)
//!
//! # Background
//! The time-dependent Schrödinger equation for a single particle of mass *m*
//! in a static two-dimensional potential *V*(*x*, *y*) reads
//! ```text
//!   ∂ψ      ħ²  ⎛ ∂²ψ   ∂²ψ ⎞
//! iħ -- = - --- ⎜ --- + --- ⎟ + V ψ = H ψ
//!   ∂t      2 m ⎝ ∂x²   ∂y² ⎠
//! ```
//! with formal solution *ψ*(*t* + *δt*) = exp(-*i* *H* *δt* / *ħ*) *ψ*(*t*).
//! Since *H* is Hermitian, this propagator is unitary and the norm of *ψ* is
//! conserved. The schemes below differ in how they approximate the
//! exponential.
//!
//! Space is discretized on a regular grid,
//! ```text
//! x[i] = x₀ + i δx, i ∊ {0, ..., N_X - 1}
//! y[j] = y₀ + j δy, j ∊ {0, ..., N_Y - 1}
//! ψ[i, j] = ψ(x[i], y[j])
//! ```
//! and the Laplacian with the usual three-point second difference along each
//! axis,
//! ```text
//! δ²ₓψ[i, j] = ψ[i + 1, j] - 2 ψ[i, j] + ψ[i - 1, j]
//! ```
//! so that, writing *α*ₓ = *ħ* / 2 *m* *δx*² and *α*ᵧ = *ħ* / 2 *m* *δy*²,
//! ```text
//! (H ψ / ħ)[i, j] = -αₓ δ²ₓψ[i, j] - αᵧ δ²ᵧψ[i, j] + (V[i, j] / ħ) ψ[i, j]
//! ```
//! The spatial error is *O*(*δx*²) + *O*(*δy*²). The wavefunction is stored as
//! separate real and imaginary grids, which turns the multiplication by *i*
//! into an exchange of the two parts.
//!
//! # Finite-difference schemes
//! Three approximations of exp(-*i* *H* *δt* / *ħ*) are provided.
//!
//! **Forward-time, centered-space (FTCS)** takes the first-order Taylor
//! expansion,
//! ```text
//! ψ(t + δt) = (1 - i δt H/ħ) ψ(t)
//! ```
//! or, in terms of real and imaginary parts,
//! ```text
//! Re ψ(t + δt) = Re ψ(t) + δt (H Im ψ(t)) / ħ
//! Im ψ(t + δt) = Im ψ(t) - δt (H Re ψ(t)) / ħ
//! ```
//! Every interior cell is updated from values at the old time level only.
//! The scheme is explicit and cheap, but it is not unitary: every mode of *H*
//! with eigenvalue *E* has its amplitude multiplied by
//! sqrt(1 + (*E* *δt* / *ħ*)²) > 1 every step, so the norm grows without
//! bound and *δt* must be kept very small.
//!
//! **Backward-time, centered-space (BTCS)** takes the first-order expansion of
//! the inverse propagator instead,
//! ```text
//! (1 + i δt H/ħ) ψ(t + δt) = ψ(t)
//! ```
//! Each mode is multiplied by 1 / sqrt(1 + (*E* *δt* / *ħ*)²) < 1, so the
//! scheme is unconditionally stable but slowly damps the wavefunction.
//!
//! **Centered-time, centered-space (CTCS)**, also known as Crank-Nicolson[^1],
//! averages the two,
//! ```text
//! (1 + i δt H/2ħ) ψ(t + δt) = (1 - i δt H/2ħ) ψ(t)
//! ```
//! This is the Cayley form of the propagator: it is exactly unitary and
//! accurate to second order in *δt*. The three schemes are all of the form
//! ```text
//! (1 + i θ δt H/ħ) ψ(t + δt) = (1 - i (1 - θ) δt H/ħ) ψ(t)
//! ```
//! with *θ* = 0, 1, and 1/2, respectively.
//!
//! # Operator splitting
//! For *θ* > 0, the left-hand side couples every grid point to its four
//! neighbors, and solving it directly requires a sparse linear solve over the
//! full grid. Instead, the Hamiltonian is split into two one-dimensional
//! parts[^2],
//! ```text
//! H/ħ = Lₓ + Lᵧ
//! Lₓ = -αₓ δ²ₓ + V/2ħ
//! Lᵧ = -αᵧ δ²ᵧ + V/2ħ
//! ```
//! and each piece is advanced on its own along every grid line. Advancing by
//! *L* over a sub-step *τ* means solving
//! ```text
//! (1 + i θ τ L) ψ* = (1 - i (1 - θ) τ L) ψ
//! ```
//! which is independent along every line of the grid (along x for *L*ₓ, along
//! y for *L*ᵧ) and tridiagonal along it, with
//! ```text
//! sub = sup = -i θ τ α
//! diag[k] = 1 + i θ τ (2 α + V[k] / 2ħ)
//! ```
//! so a step costs *O*(*N_X* *N_Y*) via the Thomas algorithm[^3].
//!
//! BTCS takes the two pieces in sequence, x then y, each over the full *δt*.
//! The sequential split carries an *O*(*δt*) error from the commutator
//! \[*L*ₓ, *L*ᵧ\], which does not vanish once *V* depends on both coordinates
//! (*V*/2ħ appears in both pieces), but BTCS is only first order anyway.
//!
//! For CTCS that would throw away the second-order accuracy of the
//! Crank-Nicolson factors, so the pieces are arranged symmetrically[^4],
//! ```text
//! ψ(t + δt) = Xₓ(δt/2) Xᵧ(δt) Xₓ(δt/2) ψ(t)
//! ```
//! where *X*(*τ*) is the solve above. The leading commutator terms cancel and
//! the step is *O*(*δt*²) accurate. Each factor is a Cayley transform of a
//! Hermitian operator and hence unitary, so the full step is too.
//!
//! The Thomas algorithm is Gaussian elimination without pivoting, specialized
//! to tridiagonal systems. For the systems above the diagonal has real part 1
//! and the off-diagonals are purely imaginary, so the matrix is never singular,
//! but the solver still checks for exactly zero pivots.
//!
//! # Boundary conditions
//! Only interior cells are updated. Edge cells are held at a fixed value
//! (Dirichlet conditions), by default zero, which models a box with infinitely
//! high walls. In the implicit sweeps, the fixed edge values of a line appear
//! in the first and last rows and are moved to the right-hand side:
//! ```text
//! rhs[0]     += i θ τ α ψ_edge
//! rhs[M - 1] += i θ τ α ψ_edge
//! ```
//! A spatially constant wavefunction equal to the edge value is a steady state
//! of all three schemes when *V* = 0, since every second difference vanishes.
//!
//! # Stability
//! The largest eigenvalue of *H*/*ħ* on the grid is bounded by
//! ```text
//! 2 ħ  ⎛ 1     1  ⎞   max|V|
//! --- ⎜ --- + --- ⎟ + ------
//!  m   ⎝ δx²   δy² ⎠     ħ
//! ```
//! and multiplying it by *δt* gives the *stability number* *s*, the largest
//! phase advance of any mode in a single step. FTCS amplifies that mode by up
//! to sqrt(1 + *s*²) per step; in practice *s* should stay around 0.1 or
//! below, which is why FTCS needs time steps a couple of orders of magnitude
//! smaller than the implicit schemes. BTCS and CTCS are stable for any *s*,
//! but their phase errors grow with it.
//!
//! [^1]: J. Crank and P. Nicolson, "A practical method for numerical evaluation
//! of solutions of partial differential equations of the heat-conduction
//! type." Mathematical Proceedings of the Cambridge Philosophical Society
//! **43** 1 (1947).
//!
//! [^2]: D. W. Peaceman and H. H. Rachford, Jr., "The numerical solution of
//! parabolic and elliptic differential equations." Journal of the Society for
//! Industrial and Applied Mathematics **3** 1 (1955).
//!
//! [^3]: L. H. Thomas, "Elliptic problems in linear difference equations over a
//! network." Watson Scientific Computing Laboratory Report, Columbia
//! University (1949).
//!
//! [^4]: G. Strang, "On the construction and comparison of difference
//! schemes." SIAM Journal on Numerical Analysis **5** 3 (1968).
