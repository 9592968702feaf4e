use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::perf::ForceMoments;
use crate::sweep::CaseParams;

pub const RESULTS_HEADER: &str = "U (ft/s) Tilt (deg) RPM Fx Fy Fz (lb) Mx My Mz (lb*ft)";

/// Write the column header line.
pub fn write_header<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", RESULTS_HEADER)
}

/// Write one case row: operating point followed by the six hub loads.
pub fn write_row<W: Write>(writer: &mut W, case: &CaseParams, fm: &ForceMoments) -> io::Result<()> {
    writeln!(writer, "{} {} {} {}", case.u_inf, case.tilt, case.rpm, fm)
}

/// Results table on disk. Each row is flushed as soon as it is written so an
/// aborted sweep still leaves every finished case behind.
pub struct ResultsFile {
    path: PathBuf,
    file: File,
}

impl ResultsFile {
    /// Create (truncating) the file and write the header.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::create(&path).map_err(|e| Error::io(&path, e))?;
        write_header(&mut file).map_err(|e| Error::io(&path, e))?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, case: &CaseParams, fm: &ForceMoments) -> Result<()> {
        write_row(&mut self.file, case, fm)
            .and_then(|_| self.file.flush())
            .map_err(|e| Error::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn loads() -> ForceMoments {
        ForceMoments::from_row(&[0.5, 0.0, -12.25, 1.0, 2.0, 3.0]).unwrap()
    }

    #[test]
    fn table_has_header_and_rows() {
        let mut buf = Vec::new();
        write_header(&mut buf).unwrap();
        write_row(&mut buf, &CaseParams::new(4000.0, -90.0, -32.81), &loads()).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], RESULTS_HEADER);
        assert!(lines[1].starts_with("-32.81 -90 4000  5.000000e-01"), "got {}", lines[1]);
        assert_eq!(lines[1].split_whitespace().count(), 9);
    }

    #[test]
    fn file_rows_are_persisted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("charm_force_moments.txt");
        let mut results = ResultsFile::create(&path).unwrap();
        results.append(&CaseParams::new(4000.0, 0.0, 0.0), &loads()).unwrap();
        results.append(&CaseParams::new(4000.0, 0.0, -32.81), &loads()).unwrap();

        let text = std::fs::read_to_string(results.path()).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(2).unwrap().starts_with("-32.81 0 4000 "));
    }
}
