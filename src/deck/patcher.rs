use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use super::edit::ParameterEdit;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// In-memory deck
// ---------------------------------------------------------------------------

/// A solver input deck held as lines, each with its original terminator.
///
/// Records follow the two-line convention: a line of parameter names, then a
/// line of values in the same positional order.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    path: PathBuf,
    lines: Vec<String>,
}

/// Result of applying a single edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Applied(AppliedEdit),
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppliedEdit {
    pub parameter: String,
    pub line: usize,  // 1-based, value line
    pub index: usize, // value token position
    pub previous: String,
    pub value: String,
}

/// What a batch of edits did to a deck.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchReport {
    pub path: PathBuf,
    pub applied: Vec<AppliedEdit>,
    pub skipped: Vec<String>,
}

impl PatchReport {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }

    /// Promote the first skipped parameter to an error.
    pub fn require_all(self) -> Result<Self> {
        match self.skipped.first() {
            Some(parameter) => Err(Error::ParameterNotFound {
                path: self.path.clone(),
                parameter: parameter.clone(),
            }),
            None => Ok(self),
        }
    }
}

impl Deck {
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            lines: text.split_inclusive('\n').map(str::to_owned).collect(),
        }
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::parse(path, &text))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    /// Index of the first line carrying `parameter` as a whole token, along
    /// with the token's position on that line.
    pub fn find_key(&self, parameter: &str) -> Option<(usize, usize)> {
        self.lines.iter().enumerate().find_map(|(i, line)| {
            line.split_whitespace()
                .position(|tok| tok == parameter)
                .map(|pos| (i, pos))
        })
    }

    /// Apply one edit to the first matching record.
    pub fn apply(&mut self, edit: &ParameterEdit) -> Result<EditOutcome> {
        let Some((key_idx, key_pos)) = self.find_key(&edit.parameter) else {
            return Ok(EditOutcome::Skipped);
        };

        let value_idx = key_idx + 1;
        let Some(value_line) = self.lines.get(value_idx) else {
            return Err(Error::MissingValueLine {
                path: self.path.clone(),
                parameter: edit.parameter.clone(),
                line: key_idx + 1,
            });
        };

        // The replacement must stay a single token or later values shift
        if edit.value.is_empty() || edit.value.contains(char::is_whitespace) {
            return Err(Error::InvalidValue {
                path: self.path.clone(),
                parameter: edit.parameter.clone(),
                value: edit.value.clone(),
            });
        }

        let mut values: Vec<&str> = value_line.split_whitespace().collect();
        let index = match (key_pos as isize).checked_add(edit.offset) {
            Some(t) if t >= 0 && (t as usize) < values.len() => t as usize,
            target => {
                return Err(Error::ValueIndexOutOfRange {
                    path: self.path.clone(),
                    parameter: edit.parameter.clone(),
                    line: value_idx + 1,
                    index: target.unwrap_or(isize::MAX),
                    len: values.len(),
                });
            }
        };
        let previous = values[index].to_owned();
        values[index] = edit.value.as_str();

        // Solver reads values tab separated, with one leading blank
        let updated = format!(" {}\n", values.join("\t"));
        self.lines[value_idx] = updated;

        Ok(EditOutcome::Applied(AppliedEdit {
            parameter: edit.parameter.clone(),
            line: value_idx + 1,
            index,
            previous,
            value: edit.value.clone(),
        }))
    }

    /// Apply a batch in order. On error the deck is left as it was.
    pub fn apply_all(&mut self, edits: &[ParameterEdit]) -> Result<PatchReport> {
        let snapshot = self.lines.clone();
        let mut report = PatchReport {
            path: self.path.clone(),
            ..Default::default()
        };

        for edit in edits {
            match self.apply(edit) {
                Ok(EditOutcome::Applied(applied)) => {
                    debug!(
                        "{}:{}: {} {} -> {}",
                        self.path.display(),
                        applied.line,
                        applied.parameter,
                        applied.previous,
                        applied.value
                    );
                    report.applied.push(applied);
                }
                Ok(EditOutcome::Skipped) => {
                    warn!(
                        "{}: parameter '{}' not found, edit skipped",
                        self.path.display(),
                        edit.parameter
                    );
                    report.skipped.push(edit.parameter.clone());
                }
                Err(e) => {
                    self.lines = snapshot;
                    return Err(e);
                }
            }
        }

        Ok(report)
    }

    /// Replace the file at `path` with this deck's text.
    ///
    /// Writes to a sibling temporary file and renames it over the target so
    /// a failed write never leaves a truncated deck behind.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        tmp.write_all(self.to_text().as_bytes())
            .map_err(|e| Error::io(tmp.path(), e))?;

        if let Ok(meta) = fs::metadata(path) {
            fs::set_permissions(tmp.path(), meta.permissions())
                .map_err(|e| Error::io(tmp.path(), e))?;
        }

        tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-level entry point
// ---------------------------------------------------------------------------

/// Apply `edits` to the deck at `path` and rewrite it.
///
/// Parameters that do not occur in the deck are skipped and listed in the
/// report. Any fatal error leaves the file untouched.
pub fn edit_charm_input(path: impl AsRef<Path>, edits: &[ParameterEdit]) -> Result<PatchReport> {
    let path = path.as_ref();
    let mut deck = Deck::read(path)?;
    let report = deck.apply_all(edits)?;

    if report.changed() {
        deck.write(path)?;
        info!(
            "{}: {} edit(s) applied, {} skipped",
            path.display(),
            report.applied.len(),
            report.skipped.len()
        );
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
