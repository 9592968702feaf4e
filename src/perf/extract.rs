use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::force::ForceMoments;
use super::table::last_row;
use crate::error::{Error, Result};
use crate::process::ShellCommand;

// ---------------------------------------------------------------------------
// Conventional file names
// ---------------------------------------------------------------------------

/// Post-processor output table (one row per revolution).
pub const PERFORMANCE_TABLE: &str = "fort.98";
/// Post-processor input, a copy of the solver's hub loads file.
pub const PROCESS_INPUT: &str = "fort.99";

/// Hub loads artifact the solver writes for `case_name`.
pub fn hub_loads_file(case_name: &str) -> String {
    format!("{}hubacr.dat", case_name)
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Forces and moments from the last row of a performance table.
pub fn load_force_moments(table: impl AsRef<Path>) -> Result<ForceMoments> {
    let table = table.as_ref();
    let row = last_row(table, ForceMoments::LEN)?;
    if row.len() > ForceMoments::LEN {
        debug!(
            "{}: ignoring {} extra column(s)",
            table.display(),
            row.len() - ForceMoments::LEN
        );
    }
    ForceMoments::from_row(&row)
        .ok_or_else(|| Error::malformed(table, "last row has fewer than 6 columns"))
}

/// Read forces and moments when the performance table is already present in
/// `run_dir`.
pub fn performance_nrev(run_dir: impl AsRef<Path>) -> Result<ForceMoments> {
    load_force_moments(run_dir.as_ref().join(PERFORMANCE_TABLE))
}

/// Run the hub load post-processor on `case_name`'s output in `run_dir` and
/// read the forces and moments it produces.
pub fn performance_mrev(
    run_dir: impl AsRef<Path>,
    case_name: &str,
    process: &ShellCommand,
) -> Result<ForceMoments> {
    let run_dir = run_dir.as_ref();
    let hub_loads = run_dir.join(hub_loads_file(case_name));

    // A table left by an earlier run must not pass for this run's output
    let table = run_dir.join(PERFORMANCE_TABLE);
    match fs::remove_file(&table) {
        Ok(()) => debug!("removed stale {}", table.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(&table, e)),
    }

    let scratch = ScratchFile::copy(&hub_loads, run_dir.join(PROCESS_INPUT))?;

    process.run_in(run_dir)?;
    drop(scratch);

    performance_nrev(run_dir)
}

/// Copy of a file that is removed again when dropped.
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// The guard exists before the copy starts, so a partial copy is
    /// removed too.
    fn copy(from: &Path, to: PathBuf) -> Result<Self> {
        let scratch = Self { path: to };
        fs::copy(from, &scratch.path).map_err(|e| Error::io(from, e))?;
        Ok(scratch)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove {}: {}", self.path.display(), e),
        }
    }
}
