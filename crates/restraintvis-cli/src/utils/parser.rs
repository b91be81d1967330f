use restraintvis::core::models::scene::RepresentationKind;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Invalid {expected} value for {key}: '{value}'")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("{0}")]
    Representation(String),
}

/// Splits `KEY=VALUE` at the first `=`. Keys are trimmed; values are kept as
/// given so templates may contain leading spaces.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    pair.split_once('=')
        .map(|(k, v)| (k.trim(), v))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| ParseError::InvalidKeyValue(pair.to_string()))
}

/// Parses `value` for configuration `key`, naming `expected` in the error.
pub fn parse_value<T: FromStr>(
    key: &str,
    value: &str,
    expected: &'static str,
) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    })
}

pub fn parse_representation(value: &str) -> Result<RepresentationKind, ParseError> {
    value
        .parse()
        .map_err(|e: restraintvis::core::models::scene::ParseRepresentationError| {
            ParseError::Representation(e.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_splits_on_first_equals() {
        assert_eq!(
            parse_key_value("macromolecule.color=A=red,B=blue"),
            Ok(("macromolecule.color", "A=red,B=blue"))
        );
        assert_eq!(parse_key_value(" title =x"), Ok(("title", "x")));
    }

    #[test]
    fn key_value_requires_key_and_separator() {
        assert!(matches!(
            parse_key_value("restraint.radius"),
            Err(ParseError::InvalidKeyValue(_))
        ));
        assert!(parse_key_value("=1").is_err());
    }

    #[test]
    fn parse_value_reports_key_and_type() {
        assert_eq!(parse_value::<f64>("restraint.radius", " 0.25", "float"), Ok(0.25));
        let err = parse_value::<usize>("restraint.label-precision", "two", "integer").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid integer value for restraint.label-precision: 'two'"
        );
    }

    #[test]
    fn representation_accepts_dashed_names() {
        assert_eq!(
            parse_representation("ball-and-stick"),
            Ok(RepresentationKind::BallAndStick)
        );
        assert!(matches!(
            parse_representation("ribbon"),
            Err(ParseError::Representation(_))
        ));
    }
}
