//! Time evolution of a two-dimensional wavefunction under a static potential
//! with finite-difference schemes.
//!
//! The public entry point is [`Integrator`], which owns the grids and advances
//! them one step at a time with the scheme chosen at construction:
//! - [`Scheme::Ftcs`]: explicit, first order in time, conditionally stable;
//! - [`Scheme::Btcs`]: implicit, first order in time, unconditionally stable;
//! - [`Scheme::Ctcs`]: Crank-Nicolson, second order in time, unconditionally
//!   stable and norm-preserving.
//!
//! See [`docs`][crate::docs#finite-difference-schemes] for the discretization.

use std::{ fmt, str::FromStr };
use log::{ debug, warn };
use ndarray as nd;
use serde::{ Deserialize, Deserializer, Serialize };
use crate::{
    boundary::BoundaryPolicy,
    consts,
    error::{ IntegratorError, SchemeError },
    ftcs::Ftcs,
    grid::GridState,
    sweep::Sweeper,
    utils::{ wf_density, wf_norm, wf_probability },
};

pub type TResult<T> = Result<T, IntegratorError>;

/// Time-integration scheme.
///
/// Deserialization goes through [`FromStr`], so tags are case-insensitive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Forward-time, centered-space.
    Ftcs,
    /// Backward-time, centered-space.
    Btcs,
    /// Centered-time, centered-space (Crank-Nicolson).
    Ctcs,
}

impl Scheme {
    /// Lowercase tag of the scheme, as used in configuration files.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Ftcs => "ftcs",
            Self::Btcs => "btcs",
            Self::Ctcs => "ctcs",
        }
    }

    /// Default time step for the scheme, from [`consts`].
    pub fn default_dt(&self) -> f64 {
        match self {
            Self::Ftcs => consts::DT_FTCS,
            Self::Btcs => consts::DT_BTCS,
            Self::Ctcs => consts::DT_CTCS,
        }
    }
}

impl FromStr for Scheme {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Ftcs, Self::Btcs, Self::Ctcs].into_iter()
            .find(|scheme| scheme.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SchemeError(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Scheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de>
    {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Scheme selection together with the step sizes and physical constants of a
/// simulation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchemeParameters {
    pub scheme: Scheme,
    /// Grid spacing along x (axis 0).
    pub dx: f64,
    /// Grid spacing along y (axis 1).
    pub dy: f64,
    /// Time step.
    pub dt: f64,
    /// Reduced Planck constant.
    pub hbar: f64,
    /// Particle mass.
    pub mass: f64,
}

impl SchemeParameters {
    /// Construct with the default (natural) values of ħ and m.
    pub fn new(scheme: Scheme, dx: f64, dy: f64, dt: f64) -> Self {
        Self { scheme, dx, dy, dt, hbar: consts::H_BAR, mass: consts::M }
    }

    /// Replace ħ and m.
    pub fn with_constants(mut self, hbar: f64, mass: f64) -> Self {
        self.hbar = hbar;
        self.mass = mass;
        self
    }

    /// Fail unless all steps and constants are positive and finite.
    pub fn check(&self) -> TResult<()> {
        IntegratorError::check_positive("dx", self.dx)?;
        IntegratorError::check_positive("dy", self.dy)?;
        IntegratorError::check_positive("dt", self.dt)?;
        IntegratorError::check_positive("hbar", self.hbar)?;
        IntegratorError::check_positive("mass", self.mass)?;
        Ok(())
    }

    /// Kinetic coupling `ħ / 2 m dx²` along x.
    pub fn alpha_x(&self) -> f64 { self.hbar / (2.0 * self.mass * self.dx.powi(2)) }

    /// Kinetic coupling `ħ / 2 m dy²` along y.
    pub fn alpha_y(&self) -> f64 { self.hbar / (2.0 * self.mass * self.dy.powi(2)) }

    /// Largest phase advance per step of any grid mode,
    /// ```text
    /// s = dt (2 ħ/m (1/dx² + 1/dy²) + max|V| / ħ)
    /// ```
    /// The explicit scheme multiplies the norm of that mode by up to
    /// `sqrt(1 + s²)` every step, so `s` should be kept well below 1.
    pub fn stability_number(&self, v_max: f64) -> f64 {
        let kinetic = 4.0 * (self.alpha_x() + self.alpha_y());
        self.dt * (kinetic + v_max.abs() / self.hbar)
    }
}

// the stepper is chosen once, at construction
#[derive(Clone, Debug)]
enum Stepper {
    Ftcs(Ftcs),
    Btcs(Sweeper),
    Ctcs(Sweeper),
}

impl Stepper {
    fn new(params: &SchemeParameters) -> Self {
        match params.scheme {
            Scheme::Ftcs => Self::Ftcs(Ftcs::new(params)),
            Scheme::Btcs => Self::Btcs(Sweeper::btcs(params)),
            Scheme::Ctcs => Self::Ctcs(Sweeper::ctcs(params)),
        }
    }

    fn step(
        &mut self,
        state: &mut GridState,
        boundary: &BoundaryPolicy,
        step: usize,
    ) -> TResult<()>
    {
        match self {
            Self::Ftcs(ftcs) => ftcs.step(state, boundary, step),
            Self::Btcs(sweeper) | Self::Ctcs(sweeper)
                => sweeper.step(state, boundary, step)?,
        }
        Ok(())
    }
}

/// Advances a wavefunction on a fixed rectangular grid under a static
/// potential.
///
/// Every call to [`step`][Self::step] moves the state exactly one time step
/// ahead; the only bookkeeping kept is the number of steps taken.
///
/// An `Integrator` is not meant to be shared: `step` needs exclusive access.
#[derive(Clone, Debug)]
pub struct Integrator {
    state: GridState,
    params: SchemeParameters,
    boundary: BoundaryPolicy,
    stepper: Stepper,
    steps: usize,
}

impl Integrator {
    /// Take ownership of a potential and initial wavefunction and prepare the
    /// stepper for `params.scheme`.
    ///
    /// Fails if the grids are not all the same shape (or smaller than 3×3), or
    /// if any step or constant in `params` is not positive.
    pub fn new(
        potential: nd::Array2<f64>,
        re: nd::Array2<f64>,
        im: nd::Array2<f64>,
        params: SchemeParameters,
    ) -> TResult<Self>
    {
        params.check()?;
        let state = GridState::new(potential, re, im)?;
        if params.scheme == Scheme::Ftcs {
            let s = params.stability_number(state.v_max());
            if s > consts::FTCS_STABILITY_LIMIT {
                warn!(
                    "explicit time step dt = {} gives stability number {:.3} > {}; \
                    expect the norm to grow",
                    params.dt, s, consts::FTCS_STABILITY_LIMIT,
                );
            }
        }
        debug!(
            "integrator: {} on a {:?} grid, dx = {}, dy = {}, dt = {}",
            params.scheme, state.dim(), params.dx, params.dy, params.dt,
        );
        let stepper = Stepper::new(&params);
        Ok(Self {
            state,
            params,
            boundary: BoundaryPolicy::default(),
            stepper,
            steps: 0,
        })
    }

    /// Like [`Self::new`], but select the scheme by its tag (`"ftcs"`,
    /// `"btcs"`, or `"ctcs"`, case-insensitive).
    #[allow(clippy::too_many_arguments)]
    pub fn from_tag(
        potential: nd::Array2<f64>,
        re: nd::Array2<f64>,
        im: nd::Array2<f64>,
        scheme: &str,
        dx: f64,
        dy: f64,
        dt: f64,
        hbar: f64,
        mass: f64,
    ) -> TResult<Self>
    {
        let scheme: Scheme = scheme.parse()?;
        let params
            = SchemeParameters::new(scheme, dx, dy, dt)
            .with_constants(hbar, mass);
        Self::new(potential, re, im, params)
    }

    /// Replace the default (zero) boundary condition.
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the number of steps already taken, e.g. when resuming from a
    /// checkpoint.
    pub fn with_start(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Advance the wavefunction by one time step.
    ///
    /// If this returns an error, the wavefunction and the step count are left
    /// as they were before the call.
    pub fn step(&mut self) -> TResult<()> {
        self.stepper.step(&mut self.state, &self.boundary, self.steps)?;
        self.steps += 1;
        Ok(())
    }

    /// Advance the wavefunction by `n` time steps.
    pub fn step_n(&mut self, n: usize) -> TResult<()> {
        (0..n).try_for_each(|_| self.step())
    }

    /// Current real part of the wavefunction.
    pub fn real_part(&self) -> nd::ArrayView2<'_, f64> { self.state.real_part() }

    /// Current imaginary part of the wavefunction.
    pub fn imag_part(&self) -> nd::ArrayView2<'_, f64> { self.state.imag_part() }

    pub fn params(&self) -> &SchemeParameters { &self.params }

    pub fn scheme(&self) -> Scheme { self.params.scheme }

    pub fn boundary(&self) -> &BoundaryPolicy { &self.boundary }

    /// Shape of the grids, `(N_X, N_Y)`.
    pub fn dim(&self) -> (usize, usize) { self.state.dim() }

    /// Number of steps taken.
    pub fn steps(&self) -> usize { self.steps }

    /// Elapsed simulated time, `steps * dt`.
    pub fn time(&self) -> f64 { self.steps as f64 * self.params.dt }

    /// L2 norm of the wavefunction (no volume element).
    pub fn norm(&self) -> f64 {
        wf_norm(&self.state.re, &self.state.im)
    }

    /// Total probability `Σ |ψ|² dx dy`.
    pub fn probability(&self) -> f64 {
        wf_probability(&self.state.re, &self.state.im, self.params.dx, self.params.dy)
    }

    /// Modulus `|ψ|` at every grid point.
    pub fn density(&self) -> nd::Array2<f64> {
        wf_density(&self.state.re, &self.state.im)
    }
}
