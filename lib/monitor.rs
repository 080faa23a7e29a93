//! Run control: start or resume a run, integrate it to the final time while
//! checkpointing, and export the results.
//!
//! A run goes through the following stages, with the checkpoint [`Store`]
//! serving as the only persistent state between invocations:
//! 1. [`generate`]: if the most recent document in the store belongs to an
//!    unfinished run, resume it; otherwise compute the initial state from the
//!    configuration and insert it as the first snapshot of a new run.
//! 2. [`compute`]: rebuild an [`Integrator`] from the latest snapshot of the
//!    run and step it until the configured final time, inserting a snapshot
//!    every `span` steps.
//! 3. [`export_all`]: write every snapshot of the run to a `.vti` file.
//! 4. Insert a [`Sentinel`][crate::checkpoint::Sentinel] to close the run.

use std::{ path::Path, time::Instant };
use log::{ debug, info, warn };
use crate::{
    checkpoint::{ self, Document, Snapshot, Store },
    config::Config,
    error::MonitorError,
    export::{ initial_path, snapshot_path, write_vti },
    timedep::Integrator,
    utils::wf_norm,
};

pub type MResult<T> = Result<T, MonitorError>;

/// How a run was started, with the checksum identifying it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Start {
    /// A new run; its initial snapshot has just been inserted.
    Fresh(String),
    /// An interrupted run found in the store.
    Resume(String),
}

impl Start {
    pub fn checksum(&self) -> &str {
        match self {
            Self::Fresh(checksum) | Self::Resume(checksum) => checksum,
        }
    }

    pub fn is_fresh(&self) -> bool { matches!(self, Self::Fresh(_)) }
}

/// Summary of a call to [`run`].
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub start: Start,
    /// Number of snapshot files written.
    pub exported: usize,
    /// Norm of the final wavefunction, if the run was integrated.
    pub norm: Option<f64>,
}

/// Resume an interrupted run, or insert the initial state of a new one.
pub fn generate<S>(config: &Config, store: &mut S) -> MResult<Start>
where S: Store
{
    if let Some(checksum) = store.latest()?.as_ref().and_then(Document::checksum) {
        warn!("found unfinished run {}", checksum);
        return Ok(Start::Resume(checksum.to_string()));
    }
    let (v0, re, im) = config.init_states()?;
    debug!("initial states set");
    let checksum = checkpoint::checksum(config, &v0, &re, &im)?;
    let norm = wf_norm(&re, &im);
    let snap = Snapshot {
        checksum: checksum.clone(),
        v0,
        psi: checkpoint::Psi { re, im },
        norm,
        scheme: config.scheme,
        span: config.span,
        step: 0,
        t: 0.0,
    };
    store.insert(&snap.into())?;
    info!("initial states of run {} inserted", checksum);
    Ok(Start::Fresh(checksum))
}

// snapshots of the most recent run with this checksum; a rerun of the same
// configuration starts again from step 0
fn current_run<S>(store: &S, checksum: &str) -> MResult<Vec<Snapshot>>
where S: Store
{
    let mut snaps = store.snapshots(checksum)?;
    let first = snaps.iter().rposition(|snap| snap.step == 0).unwrap_or(0);
    snaps.drain(..first);
    Ok(snaps)
}

fn latest_snapshot<S>(store: &S, checksum: &str) -> MResult<Snapshot>
where S: Store
{
    store.snapshots(checksum)?
        .pop()
        .ok_or_else(|| MonitorError::MissingSnapshot(checksum.to_string()))
}

/// Integrate the run `checksum` from its latest snapshot until the simulated
/// time exceeds `config.t_max`, inserting a snapshot every `config.span`
/// steps.
///
/// The scheme stored with the run takes precedence over the one in `config`.
/// Returns the integrator in its final state.
pub fn compute<S>(config: &Config, store: &mut S, checksum: &str)
    -> MResult<Integrator>
where S: Store
{
    let snap = latest_snapshot(store, checksum)?;
    let mut params = config.parameters();
    if snap.scheme != params.scheme {
        warn!(
            "run {} uses scheme {}, but the configuration asks for {}; keeping {}",
            checksum, snap.scheme, params.scheme, snap.scheme,
        );
        params.scheme = snap.scheme;
        params.dt = config.dt.unwrap_or_else(|| snap.scheme.default_dt());
    }
    let span = config.span;
    let Snapshot { v0, psi, step, .. } = snap;
    let mut integ
        = Integrator::new(v0.clone(), psi.re, psi.im, params)?
        .with_start(step);
    info!("starting at step {}, t = {}; norm: {:.6}", step, integ.time(), integ.norm());

    let begin = Instant::now();
    while integ.time() <= config.t_max {
        integ.step()?;
        if integ.steps() % span == 0 {
            debug!("step {}, t = {:.6}; norm: {:.6}", integ.steps(), integ.time(), integ.norm());
            store.insert(&Snapshot::capture(checksum, &v0, &integ, span).into())?;
        }
    }
    info!(
        "calculation terminated after {} steps; time elapsed: {:.3} s",
        integ.steps() - step, begin.elapsed().as_secs_f64(),
    );
    info!("norm: {:.6}", integ.norm());
    Ok(integ)
}

/// Write the initial snapshot of run `checksum` to `initial_state.vti` in
/// `dir`.
pub fn export_initial<S>(
    config: &Config,
    store: &S,
    checksum: &str,
    dir: &Path,
) -> MResult<()>
where S: Store
{
    let snap
        = current_run(store, checksum)?
        .into_iter()
        .next()
        .ok_or_else(|| MonitorError::MissingSnapshot(checksum.to_string()))?;
    let path = initial_path(dir);
    write_vti(
        &path, &snap.v0, &snap.psi.re, &snap.psi.im,
        config.domain.dx(), config.domain.dy(),
    )?;
    info!("initial state written to {}", path.display());
    Ok(())
}

/// Write every snapshot of run `checksum` to `output_vti__NNNN.vti` in `dir`,
/// numbered in insertion order. Returns the number of files written.
///
/// If the same run was started more than once, only the snapshots from the
/// last start are written.
pub fn export_all<S>(
    config: &Config,
    store: &S,
    checksum: &str,
    dir: &Path,
) -> MResult<usize>
where S: Store
{
    let snaps = current_run(store, checksum)?;
    for (k, snap) in snaps.iter().enumerate() {
        write_vti(
            &snapshot_path(dir, k), &snap.v0, &snap.psi.re, &snap.psi.im,
            config.domain.dx(), config.domain.dy(),
        )?;
    }
    info!("{} snapshots written to {}", snaps.len(), dir.display());
    Ok(snaps.len())
}

/// Carry out a full run: [`generate`], [`compute`], [`export_all`], and close
/// the run with a sentinel.
///
/// With `init_only`, a fresh run stops after writing its initial state; the
/// sentinel is still inserted so the next call starts over.
pub fn run<S>(config: &Config, store: &mut S, vti_dir: &Path, init_only: bool)
    -> MResult<Report>
where S: Store
{
    let start = generate(config, store)?;
    let checksum = start.checksum().to_string();
    match &start {
        Start::Fresh(_) => {
            export_initial(config, store, &checksum, vti_dir)?;
            if init_only {
                info!("stopping after initialization");
                store.insert(&Document::sentinel())?;
                return Ok(Report { start, exported: 0, norm: None });
            }
        },
        Start::Resume(_) => {
            info!("previous run interrupted, restarting");
        },
    }
    info!("starting simulation");
    let integ = compute(config, store, &checksum)?;
    let exported = export_all(config, store, &checksum, vti_dir)?;
    store.insert(&Document::sentinel())?;
    Ok(Report { start, exported, norm: Some(integ.norm()) })
}
