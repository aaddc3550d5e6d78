//! Leaf nodes: literals and field references.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Accepted layouts for the text of a `TIMESTAMP '...'` literal.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Layout of the text of a `DATE '...'` literal.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date or timestamp literal (`DATE '2024-01-31'`,
/// `TIMESTAMP '2024-01-31 10:15:00'`).
///
/// A date-only literal and a midnight timestamp hold the same instant but
/// are different literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateLiteral {
    value: NaiveDateTime,
    date_only: bool,
}

impl DateLiteral {
    /// A `DATE` literal.
    #[must_use]
    pub fn date(date: NaiveDate) -> Self {
        Self {
            value: date.and_time(NaiveTime::MIN),
            date_only: true,
        }
    }

    /// A `TIMESTAMP` literal.
    #[must_use]
    pub const fn timestamp(value: NaiveDateTime) -> Self {
        Self {
            value,
            date_only: false,
        }
    }

    /// Parses the quoted text of a `DATE` literal.
    ///
    /// # Errors
    ///
    /// Returns the chrono error when `text` is not `YYYY-MM-DD`.
    pub fn parse_date(text: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(text, DATE_FORMAT).map(Self::date)
    }

    /// Parses the quoted text of a `TIMESTAMP` literal.
    ///
    /// # Errors
    ///
    /// Returns the chrono error when `text` matches none of the accepted
    /// layouts (space or `T` between date and time).
    pub fn parse_timestamp(text: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMATS[0])
            .or_else(|_| NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMATS[1]))
            .map(Self::timestamp)
    }

    /// The instant this literal denotes (midnight for date-only literals).
    #[must_use]
    pub const fn value(&self) -> NaiveDateTime {
        self.value
    }

    /// True for `DATE` literals, false for `TIMESTAMP` literals.
    #[must_use]
    pub const fn is_date_only(&self) -> bool {
        self.date_only
    }
}

impl fmt::Display for DateLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.date_only {
            write!(f, "DATE '{}'", self.value.format(DATE_FORMAT))
        } else {
            write!(f, "TIMESTAMP '{}'", self.value.format(TIMESTAMP_FORMATS[0]))
        }
    }
}

/// A literal value.
///
/// Equality is value equality within one kind: `Integer(5)` and
/// `Double(5.0)` are different literals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    /// String literal.
    String(String),
    /// Integer literal.
    Integer(i64),
    /// Floating-point literal.
    Double(f64),
    /// Date or timestamp literal.
    Date(DateLiteral),
}

impl Literal {
    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Creates an integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Integer(value)
    }

    /// Creates a floating-point literal.
    #[must_use]
    pub const fn double(value: f64) -> Self {
        Self::Double(value)
    }

    /// Creates a date literal.
    #[must_use]
    pub const fn date(value: DateLiteral) -> Self {
        Self::Date(value)
    }

    /// Returns the negated literal for numeric kinds, `None` otherwise or
    /// on overflow.
    #[must_use]
    pub fn negated(&self) -> Option<Self> {
        match self {
            Self::Integer(n) => n.checked_neg().map(Self::Integer),
            Self::Double(d) => Some(Self::Double(-d)),
            Self::String(_) | Self::Date(_) => None,
        }
    }

    /// True for integer and floating-point literals.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Double(_))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => {
                write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "''"))
            }
            Self::Integer(n) => write!(f, "{n}"),
            // Debug keeps a decimal point or exponent, so the text lexes
            // back as a floating-point literal.
            Self::Double(d) => write!(f, "{d:?}"),
            Self::Date(d) => write!(f, "{d}"),
        }
    }
}

/// A reference to a document field such as `dc:title` or `ecm:primaryType`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference {
    /// The field name, including any schema prefix or list path.
    pub name: String,
}

impl Reference {
    /// Creates a new reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_double_differ() {
        assert_ne!(Literal::integer(5), Literal::double(5.0));
        assert_eq!(Literal::double(10.2), Literal::double(10.2));
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::string("it's").to_string(), "'it''s'");
        assert_eq!(Literal::string("a\\b").to_string(), "'a\\\\b'");
        assert_eq!(Literal::integer(-3).to_string(), "-3");
        assert_eq!(Literal::double(5.0).to_string(), "5.0");
        assert_eq!(Literal::double(10.2).to_string(), "10.2");
    }

    #[test]
    fn test_negated() {
        assert_eq!(Literal::integer(5).negated(), Some(Literal::integer(-5)));
        assert_eq!(Literal::double(1.5).negated(), Some(Literal::double(-1.5)));
        assert_eq!(Literal::integer(i64::MIN).negated(), None);
        assert_eq!(Literal::string("a").negated(), None);
    }

    #[test]
    fn test_date_literal_parse() {
        let date = DateLiteral::parse_date("2024-01-31").unwrap();
        assert!(date.is_date_only());
        assert_eq!(date.to_string(), "DATE '2024-01-31'");

        let ts = DateLiteral::parse_timestamp("2024-01-31T10:15:00").unwrap();
        assert!(!ts.is_date_only());
        assert_eq!(ts.to_string(), "TIMESTAMP '2024-01-31 10:15:00'");
        assert_eq!(ts, DateLiteral::parse_timestamp("2024-01-31 10:15:00").unwrap());

        assert!(DateLiteral::parse_date("31/01/2024").is_err());
        assert!(DateLiteral::parse_timestamp("2024-01-31").is_err());
    }

    #[test]
    fn test_date_only_differs_from_midnight_timestamp() {
        let date = DateLiteral::parse_date("2024-01-31").unwrap();
        let ts = DateLiteral::parse_timestamp("2024-01-31 00:00:00").unwrap();
        assert_eq!(date.value(), ts.value());
        assert_ne!(date, ts);
    }

    #[test]
    fn test_reference_equality() {
        assert_eq!(Reference::new("dc:title"), Reference::new("dc:title"));
        assert_ne!(Reference::new("dc:title"), Reference::new("title"));
    }
}
