//! Checkpoint documents and the stores that hold them.
//!
//! A run is identified by a checksum of its configuration and initial state.
//! While it progresses, a [`Snapshot`] of the wavefunction is inserted into a
//! [`Store`] every `span` steps; a finished (or abandoned) run is closed by a
//! [`Sentinel`], so that the most recent document tells whether there is an
//! interrupted run to resume.

use std::{
    fs::{ self, OpenOptions },
    io::{ BufRead, BufReader, BufWriter, Write },
    path::{ Path, PathBuf },
};
use log::debug;
use md5::{ Digest, Md5 };
use ndarray as nd;
use serde::{ Deserialize, Serialize };
use crate::{
    config::Config,
    error::StoreError,
    timedep::{ Integrator, Scheme },
};

pub type SResult<T> = Result<T, StoreError>;

/// Real and imaginary parts of a stored wavefunction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Psi {
    pub re: nd::Array2<f64>,
    pub im: nd::Array2<f64>,
}

/// State of a run after `step` steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub checksum: String,
    pub v0: nd::Array2<f64>,
    pub psi: Psi,
    pub norm: f64,
    pub scheme: Scheme,
    pub span: usize,
    pub step: usize,
    pub t: f64,
}

impl Snapshot {
    /// Record the current state of `integ`.
    pub fn capture(
        checksum: &str,
        v0: &nd::Array2<f64>,
        integ: &Integrator,
        span: usize,
    ) -> Self
    {
        Self {
            checksum: checksum.to_string(),
            v0: v0.clone(),
            psi: Psi {
                re: integ.real_part().to_owned(),
                im: integ.imag_part().to_owned(),
            },
            norm: integ.norm(),
            scheme: integ.scheme(),
            span,
            step: integ.steps(),
            t: integ.time(),
        }
    }
}

/// Marks the end of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentinel {
    /// Always `null`.
    pub checksum: (),
}

/// Anything that can be inserted into a [`Store`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Document {
    Snapshot(Snapshot),
    Sentinel(Sentinel),
}

impl Document {
    pub fn sentinel() -> Self { Self::Sentinel(Sentinel { checksum: () }) }

    /// Checksum of the run this document belongs to, `None` for a sentinel.
    pub fn checksum(&self) -> Option<&str> {
        match self {
            Self::Snapshot(snap) => Some(&snap.checksum),
            Self::Sentinel(_) => None,
        }
    }

    pub fn into_snapshot(self) -> Option<Snapshot> {
        match self {
            Self::Snapshot(snap) => Some(snap),
            Self::Sentinel(_) => None,
        }
    }
}

impl From<Snapshot> for Document {
    fn from(snap: Snapshot) -> Self { Self::Snapshot(snap) }
}

fn update_grid(hasher: &mut Md5, a: &nd::Array2<f64>) {
    a.iter().for_each(|x| hasher.update(x.to_le_bytes()));
}

/// Identify a run by its configuration and initial state.
///
/// Returns the MD5 digest of the configuration's JSON form followed by the
/// little-endian bytes of the three grids, as 32 lowercase hex digits.
pub fn checksum(
    config: &Config,
    v0: &nd::Array2<f64>,
    re: &nd::Array2<f64>,
    im: &nd::Array2<f64>,
) -> SResult<String>
{
    let json = serde_json::to_string(config)?;
    let mut hasher = Md5::new();
    hasher.update(json.as_bytes());
    update_grid(&mut hasher, v0);
    update_grid(&mut hasher, re);
    update_grid(&mut hasher, im);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Append-only collection of [`Document`]s.
pub trait Store {
    fn insert(&mut self, doc: &Document) -> SResult<()>;

    /// Most recently inserted document, if any.
    fn latest(&self) -> SResult<Option<Document>>;

    /// All snapshots with a given checksum, in insertion order.
    fn snapshots(&self, checksum: &str) -> SResult<Vec<Snapshot>>;
}

/// A [`Store`] kept in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    docs: Vec<Document>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }
}

impl Store for MemoryStore {
    fn insert(&mut self, doc: &Document) -> SResult<()> {
        self.docs.push(doc.clone());
        Ok(())
    }

    fn latest(&self) -> SResult<Option<Document>> {
        Ok(self.docs.last().cloned())
    }

    fn snapshots(&self, checksum: &str) -> SResult<Vec<Snapshot>> {
        let snaps
            = self.docs.iter()
            .filter(|doc| doc.checksum() == Some(checksum))
            .cloned()
            .filter_map(Document::into_snapshot)
            .collect();
        Ok(snaps)
    }
}

/// A [`Store`] backed by a file holding one JSON document per line.
///
/// The file (and its parent directories) is created on the first insert; a
/// missing file reads as an empty store.
#[derive(Clone, Debug)]
pub struct JsonLinesStore {
    path: PathBuf,
}

impl JsonLinesStore {
    pub fn new<P>(path: P) -> Self
    where P: AsRef<Path>
    {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path { &self.path }

    // parse every non-empty line, in order
    fn documents(&self) -> SResult<Vec<Document>> {
        if !self.path.exists() { return Ok(Vec::new()); }
        let reader = BufReader::new(fs::File::open(&self.path)?);
        let mut docs = Vec::new();
        for (k, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let doc = serde_json::from_str(&line)
                .map_err(|e| StoreError::Json(k + 1, e))?;
            docs.push(doc);
        }
        Ok(docs)
    }
}

impl Store for JsonLinesStore {
    fn insert(&mut self, doc: &Document) -> SResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut w = BufWriter::new(file);
        serde_json::to_writer(&mut w, doc)?;
        writeln!(w)?;
        w.flush()?;
        debug!(
            "inserted {} into {}",
            doc.checksum().unwrap_or("sentinel"), self.path.display(),
        );
        Ok(())
    }

    fn latest(&self) -> SResult<Option<Document>> {
        Ok(self.documents()?.pop())
    }

    fn snapshots(&self, checksum: &str) -> SResult<Vec<Snapshot>> {
        let snaps
            = self.documents()?.into_iter()
            .filter(|doc| doc.checksum() == Some(checksum))
            .filter_map(Document::into_snapshot)
            .collect();
        Ok(snaps)
    }
}
