use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::case::CaseParams;
use super::config::SweepConfig;
use crate::deck::edit_charm_input;
use crate::error::{Error, Result};
use crate::io::ResultsFile;
use crate::perf::{performance_mrev, ForceMoments};

/// Outcome of one solved case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    pub case: CaseParams,
    pub run_dir: PathBuf,
    pub force_moments: ForceMoments,
}

// ---------------------------------------------------------------------------
// Run directory setup
// ---------------------------------------------------------------------------

/// Copy every regular file of `template_dir` into `run_dir`.
/// Subdirectories are not copied.
fn copy_template(template_dir: &Path, run_dir: &Path) -> Result<usize> {
    let entries = fs::read_dir(template_dir).map_err(|e| Error::io(template_dir, e))?;
    let mut copied = 0;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(template_dir, e))?;
        let src = entry.path();
        if !src.is_file() {
            continue;
        }
        let dst = run_dir.join(entry.file_name());
        fs::copy(&src, &dst).map_err(|e| Error::io(&src, e))?;
        copied += 1;
    }
    Ok(copied)
}

/// Create the run directory for `case` and fill it with patched decks.
pub fn prepare_case(config: &SweepConfig, case: &CaseParams, base_dir: &Path) -> Result<PathBuf> {
    let run_dir = base_dir.join(&config.run_root).join(case.dir_name());
    fs::create_dir_all(&run_dir).map_err(|e| Error::io(&run_dir, e))?;

    let template_dir = base_dir.join(&config.template_dir);
    let copied = copy_template(&template_dir, &run_dir)?;
    if copied == 0 {
        warn!("template directory {} has no files", template_dir.display());
    }

    edit_charm_input(run_dir.join(config.case_deck()), &case.case_deck_edits())?;
    edit_charm_input(
        run_dir.join(&config.rotor_deck),
        &case.rotor_deck_edits(config.tilt_offset),
    )?;

    Ok(run_dir)
}

// ---------------------------------------------------------------------------
// Case execution
// ---------------------------------------------------------------------------

/// Set up, solve and post-process one case.
///
/// Paths in `config` are resolved against `base_dir`; every external
/// command runs with the case's own run directory as working directory.
pub fn run_case(config: &SweepConfig, case: &CaseParams, base_dir: &Path) -> Result<CaseResult> {
    let run_dir = prepare_case(config, case, base_dir)?;

    info!(
        "CHARM running: rpm={} tilt={} U={} in {}",
        case.rpm,
        case.tilt,
        case.u_inf,
        run_dir.display()
    );
    config.charm().run_in(&run_dir)?;

    let force_moments = performance_mrev(&run_dir, &config.case_name, &config.process_mrev())?;
    info!("case forces (lb) and moments (ft*lb): {}", force_moments);

    if let Some(wopwop) = config.wopwop() {
        wopwop.run_in(run_dir.join(config.wopwop_dir()))?;
    }

    Ok(CaseResult {
        case: *case,
        run_dir,
        force_moments,
    })
}

/// Run every case in order, appending each to the results table as soon as
/// it is solved. Stops at the first failing case.
pub fn run_sweep(config: &SweepConfig, base_dir: &Path) -> Result<Vec<CaseResult>> {
    let cases = config.cases()?;
    let mut results_file = ResultsFile::create(base_dir.join(&config.output_file))?;

    let mut results = Vec::with_capacity(cases.len());
    for (i, case) in cases.iter().enumerate() {
        info!("case {}/{}: {}", i + 1, cases.len(), case.dir_name());
        let result = run_case(config, case, base_dir)?;
        results_file.append(&result.case, &result.force_moments)?;
        results.push(result);
    }

    info!(
        "sweep complete: {} case(s) written to {}",
        results.len(),
        results_file.path().display()
    );
    Ok(results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::RESULTS_HEADER;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const CASE_DECK: &str = "\
joby case deck
 NROTOR U YAW
 1 0.0 0.0
";

    const ROTOR_DECK: &str = "\
rotor deck
 NBLADE OMEGA
 5 400.0
 X,Y,Z
 0.0 0.0 0.0 0.0 0.0
";

    /// Template directory plus a config whose "solver" writes the hub loads
    /// file and whose "post-processor" turns it into a one-row table.
    fn setup(base: &Path) -> SweepConfig {
        let template = base.join("INPUT_TEMPLATE");
        fs::create_dir_all(template.join("ignored_subdir")).unwrap();
        fs::write(template.join("joby.inp"), CASE_DECK).unwrap();
        fs::write(template.join("Prop_000_000rw.inp"), ROTOR_DECK).unwrap();

        SweepConfig {
            template_dir: PathBuf::from("INPUT_TEMPLATE"),
            run_root: PathBuf::from("charm_runs"),
            case_name: "joby".into(),
            rotor_deck: "Prop_000_000rw.inp".into(),
            tilt_offset: 3,
            charm_command: "printf 'loads\\n' > jobyhubacr.dat".into(),
            process_mrev_command: "test -f fort.99 && printf '1 2 3 4 5 6\\n' > fort.98".into(),
            wopwop_command: None,
            output_file: PathBuf::from("charm_force_moments.txt"),
            rpms: vec![4000.0, 4000.0],
            tilts: vec![0.0, -90.0],
            u_infs: vec![-32.81, 0.0],
        }
    }

    #[test]
    fn prepare_case_patches_both_decks() {
        let base = tempdir().unwrap();
        let config = setup(base.path());
        let case = CaseParams::new(4000.0, -90.0, -32.81);

        let run_dir = prepare_case(&config, &case, base.path()).unwrap();
        assert!(run_dir.ends_with("charm_runs/U-32_81_tilt-90_00_rpm4000_00"));
        assert!(!run_dir.join("ignored_subdir").exists());

        let case_deck = fs::read_to_string(run_dir.join("joby.inp")).unwrap();
        assert_eq!(case_deck, "joby case deck\n NROTOR U YAW\n 1\t-32.81\t0.0\n");

        let rotor = fs::read_to_string(run_dir.join("Prop_000_000rw.inp")).unwrap();
        let lines: Vec<&str> = rotor.lines().collect();
        assert!(lines[2].starts_with(" 5\t418.87"), "got {:?}", lines[2]);
        assert_eq!(lines[4], " 0.0\t0.0\t0.0\t-90\t0.0");
    }

    #[test]
    fn sweep_writes_one_row_per_case() {
        let base = tempdir().unwrap();
        let config = setup(base.path());

        let results = run_sweep(&config, base.path()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].force_moments.as_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(!results[0].run_dir.join("fort.99").exists());

        let table = fs::read_to_string(base.path().join("charm_force_moments.txt")).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], RESULTS_HEADER);
        assert!(lines[1].starts_with("-32.81 0 4000 "));
        assert!(lines[2].starts_with("0 -90 4000 "));
    }

    #[test]
    fn solver_failure_aborts_sweep() {
        let base = tempdir().unwrap();
        let mut config = setup(base.path());
        config.charm_command = "exit 1".into();

        let err = run_sweep(&config, base.path()).unwrap_err();
        assert!(matches!(err, Error::ExternalProcess { code: Some(1), .. }));

        let table = fs::read_to_string(base.path().join("charm_force_moments.txt")).unwrap();
        assert_eq!(table.lines().count(), 1, "only the header should be written");
    }

    #[test]
    fn wopwop_runs_in_acoustics_dir() {
        let base = tempdir().unwrap();
        let mut config = setup(base.path());
        config.charm_command = "mkdir -p jobyPSU-WOPWOP && printf 'loads\\n' > jobyhubacr.dat".into();
        config.wopwop_command = Some("touch ran".into());

        let result = run_case(&config, &CaseParams::new(4000.0, 0.0, 0.0), base.path()).unwrap();
        assert!(result.run_dir.join("jobyPSU-WOPWOP/ran").exists());
    }

    #[test]
    fn missing_template_is_io_error() {
        let base = tempdir().unwrap();
        let mut config = setup(base.path());
        config.template_dir = PathBuf::from("no_such_template");

        let err = run_case(&config, &CaseParams::new(4000.0, 0.0, 0.0), base.path()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
