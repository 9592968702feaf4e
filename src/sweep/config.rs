use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::case::CaseParams;
use crate::error::{Error, Result};
use crate::process::ShellCommand;

// ---------------------------------------------------------------------------
// Sweep configuration
// ---------------------------------------------------------------------------

/// Everything a sweep needs, loaded from YAML.
///
/// The grid is given as parallel lists; case `i` is
/// `(rpms[i], tilts[i], u_infs[i])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Directory whose files are copied into every run directory.
    pub template_dir: PathBuf,
    #[serde(default = "default_run_root")]
    pub run_root: PathBuf,
    /// Case deck is `{case_name}.inp`; hub loads are `{case_name}hubacr.dat`.
    pub case_name: String,
    pub rotor_deck: String,
    #[serde(default = "default_tilt_offset")]
    pub tilt_offset: isize,
    pub charm_command: String,
    pub process_mrev_command: String,
    #[serde(default)]
    pub wopwop_command: Option<String>,
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    pub rpms: Vec<f64>,
    pub tilts: Vec<f64>,
    pub u_infs: Vec<f64>,
}

fn default_run_root() -> PathBuf {
    PathBuf::from("charm_runs")
}

fn default_tilt_offset() -> isize {
    3
}

fn default_output_file() -> PathBuf {
    PathBuf::from("charm_force_moments.txt")
}

impl SweepConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: SweepConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let n = self.rpms.len();
        if self.tilts.len() != n || self.u_infs.len() != n {
            return Err(Error::Config(format!(
                "case lists differ in length: {} rpms, {} tilts, {} u_infs",
                n,
                self.tilts.len(),
                self.u_infs.len()
            )));
        }
        if n == 0 {
            return Err(Error::Config("no cases defined".into()));
        }
        if self.case_name.trim().is_empty() {
            return Err(Error::Config("case_name is empty".into()));
        }
        Ok(())
    }

    /// The case grid, in run order.
    pub fn cases(&self) -> Result<Vec<CaseParams>> {
        self.validate()?;
        Ok(self
            .rpms
            .iter()
            .zip(&self.tilts)
            .zip(&self.u_infs)
            .map(|((&rpm, &tilt), &u_inf)| CaseParams { rpm, tilt, u_inf })
            .collect())
    }

    pub fn case_deck(&self) -> String {
        format!("{}.inp", self.case_name)
    }

    /// Directory the acoustics tool runs in, relative to a run directory.
    pub fn wopwop_dir(&self) -> String {
        format!("{}PSU-WOPWOP", self.case_name)
    }

    pub fn charm(&self) -> ShellCommand {
        ShellCommand::new(&self.charm_command)
    }

    pub fn process_mrev(&self) -> ShellCommand {
        ShellCommand::new(&self.process_mrev_command)
    }

    pub fn wopwop(&self) -> Option<ShellCommand> {
        self.wopwop_command.as_deref().map(ShellCommand::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const JOBY: &str = "
template_dir: INPUT_TEMPLATE/Hover
case_name: joby
rotor_deck: Prop_000_000rw.inp
charm_command: runv8rlm_nowop . joby
process_mrev_command: processmrev
rpms: [4000, 4000, 4000, 4000]
tilts: [0, 0, -90, -90]
u_infs: [0, -32.81, 0, -32.81]
";

    #[test]
    fn defaults_fill_optional_fields() {
        let config = SweepConfig::from_yaml(JOBY).unwrap();
        assert_eq!(config.run_root, PathBuf::from("charm_runs"));
        assert_eq!(config.tilt_offset, 3);
        assert_eq!(config.output_file, PathBuf::from("charm_force_moments.txt"));
        assert!(config.wopwop().is_none());
        assert_eq!(config.case_deck(), "joby.inp");
        assert_eq!(config.wopwop_dir(), "jobyPSU-WOPWOP");
    }

    #[test]
    fn cases_zip_the_lists() {
        let cases = SweepConfig::from_yaml(JOBY).unwrap().cases().unwrap();
        assert_eq!(cases.len(), 4);
        assert_eq!(cases[1], CaseParams::new(4000.0, 0.0, -32.81));
        assert_eq!(cases[2], CaseParams::new(4000.0, -90.0, 0.0));
    }

    #[test]
    fn unequal_lists_are_rejected() {
        let text = JOBY.replace("tilts: [0, 0, -90, -90]", "tilts: [0, -90]");
        let err = SweepConfig::from_yaml(&text).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("2 tilts"), "got {}", err);
    }

    #[test]
    fn missing_field_is_yaml_error() {
        let text = JOBY.replace("case_name: joby\n", "");
        assert!(matches!(SweepConfig::from_yaml(&text), Err(Error::Yaml(_))));
    }

    #[test]
    fn save_then_load() {
        let config = SweepConfig::from_yaml(JOBY).unwrap();
        let file = NamedTempFile::new().unwrap();
        config.save(file.path()).unwrap();
        assert_eq!(SweepConfig::load(file.path()).unwrap(), config);
    }
}
