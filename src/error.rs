use std::fmt;

/// The main error type for HOCON parsing and resolution.
///
/// Positional variants carry the line and column of the offending token;
/// errors raised outside of a scanning context report `0:0`.
#[derive(Debug, Clone, PartialEq)]
pub enum HoconError {
    LeadingPeriod {
        line: usize,
        column: usize,
    },
    TrailingPeriod {
        line: usize,
        column: usize,
    },
    AdjacentPeriods {
        line: usize,
        column: usize,
    },
    LeadingComma {
        line: usize,
        column: usize,
    },
    AdjacentCommas {
        line: usize,
        column: usize,
    },
    MissingComma {
        line: usize,
        column: usize,
    },
    InvalidSubstitution {
        message: String,
        line: usize,
        column: usize,
    },
    InvalidObject {
        message: String,
        line: usize,
        column: usize,
    },
    InvalidArray {
        message: String,
        line: usize,
        column: usize,
    },
    /// Raised when a forbidden character is used as an unquoted key.
    InvalidKey {
        key: String,
        line: usize,
        column: usize,
    },
    InvalidValue {
        message: String,
        line: usize,
        column: usize,
    },
    /// Raised when a concatenation mixes objects with non-object values.
    InvalidConcatenation,
    UnclosedMultiLineString,
    /// Wraps the I/O error of a resource that could not be opened.
    CouldNotParseResource {
        cause: String,
    },
    /// Raised when a non-optional substitution has no value in the tree
    /// or the environment.
    CouldNotResolveSubstitution {
        path: String,
    },
}

impl HoconError {
    pub(crate) fn leading_period(line: usize, column: usize) -> Self {
        HoconError::LeadingPeriod { line, column }
    }

    pub(crate) fn trailing_period(line: usize, column: usize) -> Self {
        HoconError::TrailingPeriod { line, column }
    }

    pub(crate) fn adjacent_periods(line: usize, column: usize) -> Self {
        HoconError::AdjacentPeriods { line, column }
    }

    pub(crate) fn leading_comma(line: usize, column: usize) -> Self {
        HoconError::LeadingComma { line, column }
    }

    pub(crate) fn adjacent_commas(line: usize, column: usize) -> Self {
        HoconError::AdjacentCommas { line, column }
    }

    pub(crate) fn missing_comma(line: usize, column: usize) -> Self {
        HoconError::MissingComma { line, column }
    }

    pub(crate) fn invalid_substitution(message: impl Into<String>, line: usize, column: usize) -> Self {
        HoconError::InvalidSubstitution { message: message.into(), line, column }
    }

    pub(crate) fn invalid_object(message: impl Into<String>, line: usize, column: usize) -> Self {
        HoconError::InvalidObject { message: message.into(), line, column }
    }

    pub(crate) fn invalid_array(message: impl Into<String>, line: usize, column: usize) -> Self {
        HoconError::InvalidArray { message: message.into(), line, column }
    }

    pub(crate) fn invalid_key(key: impl Into<String>, line: usize, column: usize) -> Self {
        HoconError::InvalidKey { key: key.into(), line, column }
    }

    pub(crate) fn invalid_value(message: impl Into<String>, line: usize, column: usize) -> Self {
        HoconError::InvalidValue { message: message.into(), line, column }
    }

    pub(crate) fn could_not_parse_resource(cause: &std::io::Error) -> Self {
        HoconError::CouldNotParseResource { cause: cause.to_string() }
    }

    pub(crate) fn could_not_resolve_substitution(path: impl Into<String>) -> Self {
        HoconError::CouldNotResolveSubstitution { path: path.into() }
    }
}

const EMPTY_ELEMENT_HINT: &str = r#"(use quoted "" empty string if you want an empty element)"#;

impl fmt::Display for HoconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoconError::LeadingPeriod { line, column } =>
                write!(f, "leading period '.' at: {}:{}, {}", line, column, EMPTY_ELEMENT_HINT),
            HoconError::TrailingPeriod { line, column } =>
                write!(f, "trailing period '.' at: {}:{}, {}", line, column, EMPTY_ELEMENT_HINT),
            HoconError::AdjacentPeriods { line, column } =>
                write!(f, "two adjacent periods '.' at: {}:{}, {}", line, column, EMPTY_ELEMENT_HINT),
            HoconError::LeadingComma { line, column } =>
                write!(f, "leading comma at: {}:{}, leading commas in arrays and objects are invalid", line, column),
            HoconError::AdjacentCommas { line, column } =>
                write!(f, "two adjacent commas at: {}:{}, adjacent commas in arrays and objects are invalid", line, column),
            HoconError::MissingComma { line, column } =>
                write!(f, "missing comma at: {}:{}, values should have comma or ASCII newline ('\\n') between them", line, column),
            HoconError::InvalidSubstitution { message, line, column } =>
                write!(f, "invalid substitution at: {}:{}, {}", line, column, message),
            HoconError::InvalidObject { message, line, column } =>
                write!(f, "invalid config object at: {}:{}, {}", line, column, message),
            HoconError::InvalidArray { message, line, column } =>
                write!(f, "invalid config array at: {}:{}, {}", line, column, message),
            HoconError::InvalidKey { key, line, column } =>
                write!(f, "invalid key at: {}:{}, {:?} is a forbidden character in keys", line, column, key),
            HoconError::InvalidValue { message, line, column } =>
                write!(f, "invalid value at: {}:{}, {}", line, column, message),
            HoconError::InvalidConcatenation =>
                write!(f, "invalid concatenation at: 0:0, object concatenations may only contain objects"),
            HoconError::UnclosedMultiLineString =>
                write!(f, "unclosed multi-line string at: 0:0, multi-line strings must be closed with three quotes"),
            HoconError::CouldNotParseResource { cause } =>
                write!(f, "could not parse resource: {}", cause),
            HoconError::CouldNotResolveSubstitution { path } =>
                write!(f, "could not resolve substitution: ${{{}}} to a value", path),
        }
    }
}

impl std::error::Error for HoconError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_error_format() {
        let err = HoconError::missing_comma(3, 14);
        assert_eq!(
            err.to_string(),
            "missing comma at: 3:14, values should have comma or ASCII newline ('\\n') between them"
        );
    }

    #[test]
    fn test_resolver_error_format() {
        let err = HoconError::could_not_resolve_substitution("a.b");
        assert_eq!(err.to_string(), "could not resolve substitution: ${a.b} to a value");
    }

    #[test]
    fn test_invalid_key_format() {
        let err = HoconError::invalid_key("$", 1, 2);
        assert_eq!(err.to_string(), "invalid key at: 1:2, \"$\" is a forbidden character in keys");
    }
}
