use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One requested change to a deck: set `parameter` to `value`.
///
/// `offset` shifts the value position relative to the key position, for
/// parameters whose key spans several values (e.g. `X,Y,Z` followed by
/// rotor origin and tilt angles on the data line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterEdit {
    pub parameter: String,
    pub value: String,
    pub offset: isize,
}

impl ParameterEdit {
    /// `value` must render as a single token; `Deck::apply` rejects anything
    /// else with `Error::InvalidValue`.
    pub fn new(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self {
            parameter: parameter.into(),
            value: value.to_string(),
            offset: 0,
        }
    }

    pub fn with_offset(mut self, offset: isize) -> Self {
        self.offset = offset;
        self
    }
}

impl fmt::Display for ParameterEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.parameter, self.value)?;
        if self.offset != 0 {
            write!(f, "@{}", self.offset)?;
        }
        Ok(())
    }
}

/// Parses `NAME=VALUE` or `NAME=VALUE@OFFSET`.
impl FromStr for ParameterEdit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (parameter, rest) = s
            .split_once('=')
            .ok_or_else(|| Error::Config(format!("edit '{}' is not NAME=VALUE[@OFFSET]", s)))?;
        if parameter.is_empty() || parameter.contains(char::is_whitespace) {
            return Err(Error::Config(format!("invalid parameter name in '{}'", s)));
        }
        let (value, offset) = match rest.rsplit_once('@') {
            Some((value, offset)) => {
                let offset = offset
                    .parse::<isize>()
                    .map_err(|e| Error::Config(format!("bad offset in '{}': {}", s, e)))?;
                (value, offset)
            }
            None => (rest, 0),
        };
        if value.is_empty() || value.contains(char::is_whitespace) {
            return Err(Error::Config(format!("invalid value in '{}'", s)));
        }
        Ok(ParameterEdit::new(parameter, value).with_offset(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_uses_display_form() {
        assert_eq!(ParameterEdit::new("OMEGA", 314.2).value, "314.2");
        assert_eq!(ParameterEdit::new("X,Y,Z", -90).value, "-90");
        assert_eq!(ParameterEdit::new("U", -32.81).value, "-32.81");
    }

    #[test]
    fn parse_with_and_without_offset() {
        let e: ParameterEdit = "OMEGA=418.879".parse().unwrap();
        assert_eq!(e, ParameterEdit::new("OMEGA", "418.879"));

        let e: ParameterEdit = "X,Y,Z=-90@3".parse().unwrap();
        assert_eq!(e.parameter, "X,Y,Z");
        assert_eq!(e.value, "-90");
        assert_eq!(e.offset, 3);
        assert_eq!(e.to_string(), "X,Y,Z=-90@3");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("OMEGA".parse::<ParameterEdit>().is_err());
        assert!("=5".parse::<ParameterEdit>().is_err());
        assert!("U=".parse::<ParameterEdit>().is_err());
        assert!("U=1@x".parse::<ParameterEdit>().is_err());
    }
}
