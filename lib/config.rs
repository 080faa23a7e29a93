//! JSON run configuration.
//!
//! A minimal configuration names the scheme, the potential, the initial
//! wavefunction with its positional arguments, and the number of steps between
//! checkpoints:
//! ```json
//! {
//!     "scheme": "ftcs",
//!     "field": "potential_2D_HO",
//!     "wave": "gaussian",
//!     "args": [0, 0, 2.06, "A", 0, 0],
//!     "span": 100
//! }
//! ```
//! Arguments given as strings are looked up in
//! [`NAMED_CONSTANTS`][crate::consts::NAMED_CONSTANTS]. The keys `domain`,
//! `t_max`, `dt`, `hbar`, and `mass` are optional and default to the values in
//! [`consts`][crate::consts]; unknown keys are ignored.

use std::{ fs, path::Path, str::FromStr };
use ndarray as nd;
use serde::{ Deserialize, Serialize };
use crate::{
    consts,
    error::{ ConfigError, IntegratorError },
    fields::{ Domain, Field, Wave },
    timedep::{ Scheme, SchemeParameters },
};

pub type CResult<T> = Result<T, ConfigError>;

/// A generator argument: either a number or the name of a constant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Arg {
    Number(f64),
    Named(String),
}

impl Arg {
    pub fn resolve(&self) -> CResult<f64> {
        match self {
            Self::Number(x) => Ok(*x),
            Self::Named(name)
                => consts::named(name)
                .ok_or_else(|| ConfigError::UnknownConstant(name.clone())),
        }
    }
}

fn default_t_max() -> f64 { consts::T_MAX }

fn default_hbar() -> f64 { consts::H_BAR }

fn default_mass() -> f64 { consts::M }

/// Everything needed to start a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scheme: Scheme,
    pub field: Field,
    pub wave: Wave,
    #[serde(default)]
    pub args: Vec<Arg>,
    /// Number of steps between checkpoints.
    pub span: usize,
    #[serde(default)]
    pub domain: Domain,
    #[serde(default = "default_t_max")]
    pub t_max: f64,
    /// Time step; defaults to [`Scheme::default_dt`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<f64>,
    #[serde(default = "default_hbar")]
    pub hbar: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> CResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.check()?;
        Ok(config)
    }
}

impl Config {
    /// Read and validate a configuration file.
    pub fn from_file<P>(path: P) -> CResult<Self>
    where P: AsRef<Path>
    {
        fs::read_to_string(path)?.parse()
    }

    /// Fail if the span, domain, or any step or constant is invalid, or if a
    /// generator argument cannot be resolved or is out of range.
    pub fn check(&self) -> CResult<()> {
        if self.span == 0 { return Err(ConfigError::BadSpan); }
        self.domain.check()?;
        self.parameters().check()?;
        if !(self.t_max.is_finite() && self.t_max >= 0.0) {
            return Err(IntegratorError::BadParameter("t_max", self.t_max).into());
        }
        self.wave.check(&self.resolve_args()?)?;
        Ok(())
    }

    /// Time step, falling back to the scheme's default.
    pub fn dt(&self) -> f64 { self.dt.unwrap_or_else(|| self.scheme.default_dt()) }

    pub fn parameters(&self) -> SchemeParameters {
        SchemeParameters::new(self.scheme, self.domain.dx(), self.domain.dy(), self.dt())
            .with_constants(self.hbar, self.mass)
    }

    /// Substitute named constants in the generator arguments.
    pub fn resolve_args(&self) -> CResult<Vec<f64>> {
        self.args.iter().map(Arg::resolve).collect()
    }

    /// Generate the potential and the real and imaginary parts of the initial
    /// wavefunction.
    pub fn init_states(&self)
        -> CResult<(nd::Array2<f64>, nd::Array2<f64>, nd::Array2<f64>)>
    {
        let v0 = self.field.generate(&self.domain);
        let (re, im) = self.wave.generate(&self.domain, &self.resolve_args()?)?;
        Ok((v0, re, im))
    }
}
