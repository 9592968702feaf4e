use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::deck::ParameterEdit;

/// Operating point of one solver run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaseParams {
    pub rpm: f64,   // rev/min
    pub tilt: f64,  // deg about the rotor y axis
    pub u_inf: f64, // ft/s, solver frame (negative: vehicle moving into -x)
}

impl CaseParams {
    pub fn new(rpm: f64, tilt: f64, u_inf: f64) -> Self {
        Self { rpm, tilt, u_inf }
    }

    /// Rotor speed, rad/s.
    pub fn omega(&self) -> f64 {
        self.rpm * 2.0 * PI / 60.0
    }

    /// Run directory name, e.g. `U-32_81_tilt0_00_rpm4000_00`.
    pub fn dir_name(&self) -> String {
        format!(
            "U{:.2}_tilt{:.2}_rpm{:.2}",
            self.u_inf, self.tilt, self.rpm
        )
        .replace('.', "_")
    }

    /// Edits for the case deck (`{case}.inp`).
    pub fn case_deck_edits(&self) -> Vec<ParameterEdit> {
        vec![ParameterEdit::new("U", self.u_inf)]
    }

    /// Edits for the rotor deck. The tilt shares its key with the rotor
    /// origin, hence the offset.
    pub fn rotor_deck_edits(&self, tilt_offset: isize) -> Vec<ParameterEdit> {
        vec![
            ParameterEdit::new("OMEGA", self.omega()),
            ParameterEdit::new("X,Y,Z", self.tilt).with_offset(tilt_offset),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn omega_from_rpm() {
        assert_relative_eq!(CaseParams::new(60.0, 0.0, 0.0).omega(), 2.0 * PI);
        assert_relative_eq!(CaseParams::new(4000.0, 0.0, 0.0).omega(), 418.879_020_478_639, epsilon = 1e-9);
    }

    #[test]
    fn dir_name_has_no_dots() {
        let case = CaseParams::new(4000.0, -90.0, -32.81);
        assert_eq!(case.dir_name(), "U-32_81_tilt-90_00_rpm4000_00");
        assert_eq!(CaseParams::new(4000.0, 0.0, 0.0).dir_name(), "U0_00_tilt0_00_rpm4000_00");
    }

    #[test]
    fn rotor_edits_carry_tilt_offset() {
        let edits = CaseParams::new(4000.0, -90.0, 0.0).rotor_deck_edits(3);
        assert_eq!(edits[0].parameter, "OMEGA");
        assert_eq!(edits[1], ParameterEdit::new("X,Y,Z", "-90").with_offset(3));
    }
}
