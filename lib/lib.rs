//! Provides finite-difference integrators for the time-dependent Schrödinger
//! equation of a single particle in a static two-dimensional potential, along
//! with the machinery to configure, checkpoint, resume, and export long runs.
//!
//! Provides implementations for the following numerical routines:
//! - Forward-time, centered-space (explicit Euler)
//! - Backward-time, centered-space (implicit Euler, operator-split)
//! - Centered-time, centered-space (Crank-Nicolson, Strang operator-split)
//! - Thomas algorithm for tridiagonal systems over real or complex numbers
//!
//! The main entry point is [`timedep::Integrator`]; [`monitor`] drives a full
//! run from a JSON [`config`] through a checkpoint [`checkpoint::Store`] to
//! `.vti` files.
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod boundary;
pub mod grid;
pub mod tridiag;
pub mod ftcs;
pub mod sweep;
pub mod timedep;
pub mod utils;
pub mod consts;
pub mod fields;
pub mod config;
pub mod checkpoint;
pub mod export;
pub mod monitor;

pub mod docs;

pub use boundary::BoundaryPolicy;
pub use timedep::{ Integrator, Scheme, SchemeParameters };

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
