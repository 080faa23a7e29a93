//! VTK XML ImageData (`.vti`) output for viewing runs in ParaView and
//! similar tools.
//!
//! Each file holds one `N_X × N_Y × 1` image with four point-data arrays:
//! `psi_module`, `psi_real_part`, `psi_imag_part`, and `V0`, all written as
//! ASCII `Float32` with x varying fastest.

use std::{
    fs::{ File, create_dir_all },
    io::{ self, BufWriter, Write },
    path::{ Path, PathBuf },
};
use ndarray as nd;
use crate::utils::wf_density;

/// Values written per line inside a `DataArray`.
const VALUES_PER_LINE: usize = 8;

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    Ok(())
}

fn write_array<W>(w: &mut W, name: &str, a: &nd::Array2<f64>) -> io::Result<()>
where W: Write
{
    writeln!(w, "        <DataArray type=\"Float32\" Name=\"{}\" format=\"ascii\">", name)?;
    // VTK point order: x fastest
    let values: Vec<f32> = a.t().iter().map(|x| *x as f32).collect();
    for chunk in values.chunks(VALUES_PER_LINE) {
        write!(w, "         ")?;
        for x in chunk {
            write!(w, " {:e}", x)?;
        }
        writeln!(w)?;
    }
    writeln!(w, "        </DataArray>")?;
    Ok(())
}

/// Write the potential and wavefunction to `path` as a VTK ImageData file,
/// creating parent directories as needed.
pub fn write_vti(
    path: &Path,
    v0: &nd::Array2<f64>,
    re: &nd::Array2<f64>,
    im: &nd::Array2<f64>,
    dx: f64,
    dy: f64,
) -> io::Result<()>
{
    let (nx, ny) = v0.dim();
    if re.dim() != (nx, ny) || im.dim() != (nx, ny) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "grid shape mismatch: V0 {:?}, real part {:?}, imaginary part {:?}",
                v0.dim(), re.dim(), im.dim(),
            ),
        ));
    }
    ensure_parent_dir(path)?;

    let extent = format!("0 {} 0 {} 0 0", nx.saturating_sub(1), ny.saturating_sub(1));
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    writeln!(w, "<?xml version=\"1.0\"?>")?;
    writeln!(w, "<VTKFile type=\"ImageData\" version=\"0.1\" byte_order=\"LittleEndian\">")?;
    writeln!(
        w,
        "  <ImageData WholeExtent=\"{}\" Origin=\"0 0 0\" Spacing=\"{} {} 1\">",
        extent, dx, dy,
    )?;
    writeln!(w, "    <Piece Extent=\"{}\">", extent)?;
    writeln!(w, "      <PointData>")?;
    write_array(&mut w, "psi_module", &wf_density(re, im))?;
    write_array(&mut w, "psi_real_part", re)?;
    write_array(&mut w, "psi_imag_part", im)?;
    write_array(&mut w, "V0", v0)?;
    writeln!(w, "      </PointData>")?;
    writeln!(w, "      <CellData>")?;
    writeln!(w, "      </CellData>")?;
    writeln!(w, "    </Piece>")?;
    writeln!(w, "  </ImageData>")?;
    writeln!(w, "</VTKFile>")?;
    w.flush()?;
    Ok(())
}

/// Path of the initial-state file inside `dir`.
pub fn initial_path(dir: &Path) -> PathBuf { dir.join("initial_state.vti") }

/// Path of the `k`-th snapshot file inside `dir`.
pub fn snapshot_path(dir: &Path, k: usize) -> PathBuf {
    dir.join(format!("output_vti__{:04}.vti", k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        let dir = Path::new("vti");
        assert_eq!(initial_path(dir), Path::new("vti/initial_state.vti"));
        assert_eq!(snapshot_path(dir, 7), Path::new("vti/output_vti__0007.vti"));
        assert_eq!(snapshot_path(dir, 12345), Path::new("vti/output_vti__12345.vti"));
    }

    #[test]
    fn writes_image_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = snapshot_path(&dir.path().join("sub"), 3);
        let v0 = nd::Array2::from_shape_fn((4, 3), |(i, j)| (10 * i + j) as f64);
        let re = nd::Array2::from_elem((4, 3), 3.0);
        let im = nd::Array2::from_elem((4, 3), 4.0);
        write_vti(&path, &v0, &re, &im, 0.5, 0.25).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("WholeExtent=\"0 3 0 2 0 0\""));
        assert!(text.contains("Spacing=\"0.5 0.25 1\""));
        for name in ["psi_module", "psi_real_part", "psi_imag_part", "V0"] {
            assert!(text.contains(&format!("Name=\"{}\"", name)));
        }

        // values of the V0 array, x fastest
        let v0_values: Vec<f32>
            = text.split("Name=\"V0\" format=\"ascii\">").nth(1).unwrap()
            .split("</DataArray>").next().unwrap()
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(v0_values.len(), 12);
        assert_eq!(&v0_values[..5], &[0.0_f32, 10.0, 20.0, 30.0, 1.0]);

        let modulus: Vec<f32>
            = text.split("Name=\"psi_module\" format=\"ascii\">").nth(1).unwrap()
            .split("</DataArray>").next().unwrap()
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        assert!(modulus.iter().all(|m| *m == 5.0));
    }

    #[test]
    fn rejects_mismatched_grids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-written.vti");
        let a = nd::Array2::zeros((4, 3));
        let b = nd::Array2::zeros((3, 4));
        let err = write_vti(&path, &a, &a, &b, 1.0, 1.0).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(!path.exists());
    }
}
