use crate::interpreter::error::RuntimeErrorKind;
use crate::Integer;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    GreaterThan,
    LessThan,
    EqualEqual,
    BangEqual,
    GreaterThanEqual,
    LessThanEqual,
}

impl Comparator {
    pub fn compare(&self, lhs: Integer, rhs: Integer) -> bool {
        match self {
            Self::GreaterThan => lhs > rhs,
            Self::LessThan => lhs < rhs,
            Self::EqualEqual => lhs == rhs,
            Self::BangEqual => lhs != rhs,
            Self::GreaterThanEqual => lhs >= rhs,
            Self::LessThanEqual => lhs <= rhs,
        }
    }
}

impl FromStr for Comparator {
    type Err = RuntimeErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">" => Ok(Self::GreaterThan),
            "<" => Ok(Self::LessThan),
            "==" => Ok(Self::EqualEqual),
            "!=" => Ok(Self::BangEqual),
            ">=" => Ok(Self::GreaterThanEqual),
            "<=" => Ok(Self::LessThanEqual),
            other => Err(RuntimeErrorKind::InvalidOperator(other.into())),
        }
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::GreaterThanEqual => ">=",
            Self::LessThanEqual => "<=",
        };
        write!(f, "{symbol}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_operators() {
        assert_eq!(" >= ".parse::<Comparator>(), Ok(Comparator::GreaterThanEqual));
        assert_eq!(
            "=<".parse::<Comparator>(),
            Err(RuntimeErrorKind::InvalidOperator("=<".into()))
        );
        assert_eq!(
            "".parse::<Comparator>(),
            Err(RuntimeErrorKind::InvalidOperator("".into()))
        );
    }

    #[test]
    fn compares_at_the_boundary() {
        assert!(Comparator::GreaterThanEqual.compare(5, 5));
        assert!(Comparator::LessThanEqual.compare(5, 5));
        assert!(!Comparator::GreaterThan.compare(5, 5));
        assert!(!Comparator::BangEqual.compare(5, 5));
    }
}
