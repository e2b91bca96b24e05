use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const POSITIVE_MARK: char = '✚';
const NEGATIVE_MARK: char = '━';

/// A "fun stat" line from a StatTrack stat sheet, e.g. `✚Stamina (3)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunStat {
    pub name: String,
    pub value: i32,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FunStatError {
    #[error("Fun stat is empty")]
    Empty,

    #[error("Fun stat '{0}' has no parenthesised value")]
    MissingValue(String),

    #[error("Fun stat '{0}' has a non-numeric value")]
    InvalidValue(String),
}

impl FunStat {
    pub fn new(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl FromStr for FunStat {
    type Err = FunStatError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let mut chars = text.chars();
        let mark = chars.next().ok_or(FunStatError::Empty)?;
        let body = chars.as_str();

        let open = body
            .find('(')
            .ok_or_else(|| FunStatError::MissingValue(text.to_string()))?;
        let close = body[open..]
            .find(')')
            .map(|i| i + open)
            .ok_or_else(|| FunStatError::MissingValue(text.to_string()))?;

        let magnitude: i32 = body[open + 1..close]
            .trim()
            .parse()
            .map_err(|_| FunStatError::InvalidValue(text.to_string()))?;

        let value = if mark == NEGATIVE_MARK {
            -magnitude.abs()
        } else {
            magnitude
        };

        Ok(Self {
            name: body[..open].trim().to_string(),
            value,
        })
    }
}

impl fmt::Display for FunStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.value < 0 {
            NEGATIVE_MARK
        } else {
            POSITIVE_MARK
        };
        write!(f, "{}{} ({})", mark, self.name, self.value.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        let stat: FunStat = "✚Stamina (3)".parse().unwrap();
        assert_eq!(stat, FunStat::new("Stamina", 3));
    }

    #[test]
    fn test_parse_negative() {
        let stat: FunStat = "  ━Dignity (12) ".parse().unwrap();
        assert_eq!(stat, FunStat::new("Dignity", -12));
    }

    #[test]
    fn test_display_matches_sheet_format() {
        assert_eq!(FunStat::new("Dignity", -12).to_string(), "━Dignity (12)");
        assert_eq!(FunStat::new("Stamina", 0).to_string(), "✚Stamina (0)");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<FunStat>(), Err(FunStatError::Empty));
        assert!(matches!(
            "✚Stamina".parse::<FunStat>(),
            Err(FunStatError::MissingValue(_))
        ));
        assert!(matches!(
            "✚Stamina (lots)".parse::<FunStat>(),
            Err(FunStatError::InvalidValue(_))
        ));
    }
}
