use std::fmt;

use nalgebra::Vector3;

/// Hub forces and moments in solver units (lb, lb·ft unless the deck says
/// otherwise).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForceMoments {
    pub fx: f64,
    pub fy: f64,
    pub fz: f64,
    pub mx: f64,
    pub my: f64,
    pub mz: f64,
}

impl ForceMoments {
    pub const LEN: usize = 6;

    /// Build from the first six entries of a table row.
    pub fn from_row(row: &[f64]) -> Option<Self> {
        match row {
            [fx, fy, fz, mx, my, mz, ..] => Some(Self {
                fx: *fx,
                fy: *fy,
                fz: *fz,
                mx: *mx,
                my: *my,
                mz: *mz,
            }),
            _ => None,
        }
    }

    pub fn as_array(&self) -> [f64; 6] {
        [self.fx, self.fy, self.fz, self.mx, self.my, self.mz]
    }

    pub fn force(&self) -> Vector3<f64> {
        Vector3::new(self.fx, self.fy, self.fz)
    }

    pub fn moment(&self) -> Vector3<f64> {
        Vector3::new(self.mx, self.my, self.mz)
    }
}

/// Six right-aligned `%13.6e` fields separated by single spaces.
impl fmt::Display for ForceMoments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self
            .as_array()
            .iter()
            .map(|v| format!("{:>13}", sci(*v)))
            .collect();
        write!(f, "{}", fields.join(" "))
    }
}

/// `1.5` -> `1.500000e+00`. Rust's `{:e}` omits the exponent sign and
/// padding that Fortran-side readers expect.
fn sci(v: f64) -> String {
    let s = format!("{:.6e}", v);
    match s.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => format!(
                "{}e{}{:02}",
                mantissa,
                if exp < 0 { '-' } else { '+' },
                exp.abs()
            ),
            Err(_) => s,
        },
        None => s, // NaN, inf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_needs_six_values() {
        assert!(ForceMoments::from_row(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_none());
        let fm = ForceMoments::from_row(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 99.0]).unwrap();
        assert_eq!(fm.as_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(fm.moment(), Vector3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn scientific_format_matches_fortran_style() {
        assert_eq!(sci(7.0), "7.000000e+00");
        assert_eq!(sci(-0.000123456), "-1.234560e-04");
        assert_eq!(sci(12345.0), "1.234500e+04");
        assert_eq!(sci(1.0e-120), "1.000000e-120");
    }

    #[test]
    fn display_is_fixed_width() {
        let fm = ForceMoments::from_row(&[1.0, -2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let s = fm.to_string();
        assert_eq!(s.len(), 6 * 13 + 5);
        assert!(s.starts_with(" 1.000000e+00 -2.000000e+00"));
    }
}
