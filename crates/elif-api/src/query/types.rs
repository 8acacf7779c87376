//! Query Builder Types - operator table and predicate vocabulary

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Comparison operators accepted by predicate-building calls
///
/// Each operator maps one-to-one to the short token used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateOperator {
    NotEqual,
    LessThan,
    LessThanOrEqual,
    Equal,
    GreaterThanOrEqual,
    GreaterThan,
    Like,
}

impl PredicateOperator {
    pub const ALL: [PredicateOperator; 7] = [
        PredicateOperator::NotEqual,
        PredicateOperator::LessThan,
        PredicateOperator::LessThanOrEqual,
        PredicateOperator::Equal,
        PredicateOperator::GreaterThanOrEqual,
        PredicateOperator::GreaterThan,
        PredicateOperator::Like,
    ];

    /// Wire token, e.g. `eq`
    pub fn token(self) -> &'static str {
        match self {
            PredicateOperator::NotEqual => "ne",
            PredicateOperator::LessThan => "lt",
            PredicateOperator::LessThanOrEqual => "le",
            PredicateOperator::Equal => "eq",
            PredicateOperator::GreaterThanOrEqual => "ge",
            PredicateOperator::GreaterThan => "gt",
            PredicateOperator::Like => "like",
        }
    }

    /// Symbol accepted by `where_condition`, e.g. `<=`
    pub fn symbol(self) -> &'static str {
        match self {
            PredicateOperator::NotEqual => "<>",
            PredicateOperator::LessThan => "<",
            PredicateOperator::LessThanOrEqual => "<=",
            PredicateOperator::Equal => "=",
            PredicateOperator::GreaterThanOrEqual => ">=",
            PredicateOperator::GreaterThan => ">",
            PredicateOperator::Like => "like",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| {
            let candidate = op.symbol();
            candidate == symbol || (*op == PredicateOperator::Like && candidate.eq_ignore_ascii_case(symbol))
        })
    }
}

impl fmt::Display for PredicateOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for PredicateOperator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| ModelError::UnknownOperator(s.to_string()))
    }
}

/// Date components addressable by the `where_date` family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Date,
    Day,
    Month,
    Time,
    Year,
}

impl DatePart {
    pub fn prefix(self) -> &'static str {
        match self {
            DatePart::Date => "date",
            DatePart::Day => "day",
            DatePart::Month => "month",
            DatePart::Time => "time",
            DatePart::Year => "year",
        }
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Boolean connective of a predicate
///
/// Accepted by the `add_*` methods but not part of the encoded parameter;
/// the remote resource combines predicates on its own terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boolean {
    #[default]
    And,
    Or,
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boolean::And => write!(f, "and"),
            Boolean::Or => write!(f, "or"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_table() {
        let tokens: Vec<_> = PredicateOperator::ALL.iter().map(|op| op.token()).collect();
        assert_eq!(tokens, ["ne", "lt", "le", "eq", "ge", "gt", "like"]);

        for op in PredicateOperator::ALL {
            assert_eq!(op.symbol().parse::<PredicateOperator>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        assert_eq!(
            "!=".parse::<PredicateOperator>(),
            Err(ModelError::UnknownOperator("!=".to_string()))
        );
        assert!(PredicateOperator::from_symbol("between").is_none());
        assert_eq!(PredicateOperator::from_symbol("LIKE"), Some(PredicateOperator::Like));
    }
}
