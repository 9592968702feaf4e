use std::path::Path;
use std::process::{Command, ExitStatus};

use log::{debug, info};

use crate::error::{Error, Result};

/// Exit status `sh` uses when the program cannot be found.
const SH_NOT_FOUND: i32 = 127;

/// An external program invoked through the shell, e.g. the flow solver or
/// the hub load post-processor.
///
/// Runs block until the child exits; there is no timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    cmdline: String,
}

impl ShellCommand {
    pub fn new(cmdline: impl Into<String>) -> Self {
        Self {
            cmdline: cmdline.into(),
        }
    }

    pub fn cmdline(&self) -> &str {
        &self.cmdline
    }

    /// Run with `dir` as the working directory.
    pub fn run_in(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        info!("running `{}` in {}", self.cmdline, dir.display());

        let status = Command::new("sh")
            .arg("-c")
            .arg(&self.cmdline)
            .current_dir(dir)
            .status()
            .map_err(|e| Error::ExternalProcess {
                command: self.cmdline.clone(),
                code: None,
                reason: format!("could not start in {}: {}", dir.display(), e),
            })?;

        self.check(status)?;
        debug!("`{}` finished", self.cmdline);
        Ok(())
    }

    fn check(&self, status: ExitStatus) -> Result<()> {
        if status.success() {
            return Ok(());
        }
        let reason = match status.code() {
            Some(SH_NOT_FOUND) => format!("command not found (exit status {})", SH_NOT_FOUND),
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        };
        Err(Error::ExternalProcess {
            command: self.cmdline.clone(),
            code: status.code(),
            reason,
        })
    }
}
