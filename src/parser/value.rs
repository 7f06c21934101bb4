use super::*;
use crate::value::{Substitution, Value};

pub(super) fn extract_value(parser: &mut Parser) -> Result<Value, HoconError> {
    if parser.token == Token::Punct('#') {
        parser.consume_comment()?;
    }

    match parser.token.clone() {
        Token::Int(number) => {
            let value_line = parser.line();
            parser.advance()?;

            if let Some(unit_nanos) = extract_duration_unit(parser, value_line) {
                parser.advance()?;
                let nanos = unit_nanos.saturating_mul(number.max(0) as u64);
                return Ok(Value::Duration(std::time::Duration::from_nanos(nanos)));
            }

            Ok(Value::Int(number))
        }
        Token::Float(number) => {
            let value_line = parser.line();
            parser.advance()?;

            if let Some(unit_nanos) = extract_duration_unit(parser, value_line) {
                parser.advance()?;
                let nanos = (number.max(0.0) * unit_nanos as f64) as u64;
                return Ok(Value::Duration(std::time::Duration::from_nanos(nanos)));
            }

            Ok(Value::Float(number))
        }
        Token::String(lexeme) => {
            if parser.is_multi_line_start(&lexeme) {
                return extract_multi_line_string(parser);
            }

            parser.advance()?;
            Ok(Value::String(strip_quotes(&lexeme)))
        }
        Token::Ident(ident) => {
            parser.advance()?;

            match ident.as_str() {
                "null" => Ok(Value::Null),
                "true" | "yes" | "on" => Ok(Value::Boolean(true)),
                "false" | "no" | "off" => Ok(Value::Boolean(false)),
                _ => Ok(Value::String(ident)),
            }
        }
        Token::Punct('{') => Ok(Value::Object(super::object::extract_object(parser)?)),
        Token::Punct('[') => Ok(Value::Array(extract_array(parser)?)),
        Token::Punct('$') if parser.lexer.peek_char() == Some('{') => {
            Ok(Value::Substitution(extract_substitution(parser)?))
        }
        Token::Punct(c) if !is_forbidden_char(c) => {
            parser.advance()?;
            Ok(Value::String(c.to_string()))
        }
        other => Err(HoconError::invalid_value(
            format!("unknown value: {:?}", other.text()),
            parser.line(),
            parser.column(),
        )),
    }
}

/// Nanoseconds per unit when the current token is a duration-unit word on
/// the same line as the numeric literal it follows. The caller has already
/// advanced past the literal and consumes the unit token on a match.
fn extract_duration_unit(parser: &mut Parser, value_line: usize) -> Option<u64> {
    if parser.line() != value_line {
        return None;
    }

    match &parser.token {
        Token::Ident(ident) => duration_unit_nanos(ident),
        _ => None,
    }
}

fn duration_unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" | "nano" | "nanos" | "nanosecond" | "nanoseconds" => Some(1),
        "us" | "micro" | "micros" | "microsecond" | "microseconds" => Some(1_000),
        "ms" | "milli" | "millis" | "millisecond" | "milliseconds" => Some(1_000_000),
        "s" | "second" | "seconds" => Some(1_000_000_000),
        "m" | "minute" | "minutes" => Some(60 * 1_000_000_000),
        "h" | "hour" | "hours" => Some(3_600 * 1_000_000_000),
        "d" | "day" | "days" => Some(24 * 3_600 * 1_000_000_000),
        _ => None,
    }
}

pub(super) fn extract_array(parser: &mut Parser) -> Result<Vec<Value>, HoconError> {
    if parser.token != Token::Punct('[') {
        return Err(HoconError::invalid_array(
            format!("{:?} is not an array start token", parser.token.text()),
            parser.line(),
            parser.column(),
        ));
    }

    parser.advance()?;

    if parser.token == Token::Punct(',') {
        return Err(HoconError::leading_comma(parser.line(), parser.column()));
    }

    let mut array = Vec::new();

    if parser.token == Token::Punct(']') {
        parser.advance()?;
        return Ok(array);
    }

    let mut brackets_balanced = false;

    while parser.token != Token::Eof {
        let last_row = parser.line();

        array.push(extract_value(parser)?);

        if parser.line() == last_row
            && parser.token != Token::Punct(',')
            && parser.token != Token::Punct(']')
            && parser.token != Token::Eof
        {
            return Err(HoconError::missing_comma(parser.line(), parser.column()));
        }

        if parser.token == Token::Punct(',') {
            parser.advance()?; // skip ','

            if parser.token == Token::Punct(',') {
                return Err(HoconError::adjacent_commas(parser.line(), parser.column()));
            }
        }

        if parser.token == Token::Punct(']') {
            brackets_balanced = true;
            parser.advance()?;
            break;
        }
    }

    if !brackets_balanced {
        return Err(HoconError::invalid_array(
            "brackets do not match",
            parser.line(),
            parser.column(),
        ));
    }

    Ok(array)
}

/// Extract `${path}` or `${?path}`. The path is the verbatim joined token
/// text up to the closing brace; dots join segments but may not lead,
/// trail or double up.
pub(super) fn extract_substitution(parser: &mut Parser) -> Result<Substitution, HoconError> {
    parser.advance()?; // skip '$'
    parser.advance()?; // skip '{'

    let mut optional = false;

    if parser.token == Token::Punct('?') {
        optional = true;
        parser.advance()?;
    }

    if parser.token == Token::Punct('}') {
        return Err(HoconError::invalid_substitution(
            "path expression cannot be empty",
            parser.line(),
            parser.column(),
        ));
    }

    if parser.token == Token::Punct('.') {
        return Err(HoconError::leading_period(parser.line(), parser.column()));
    }

    let mut path = String::new();
    let mut closed = false;

    while parser.token != Token::Eof {
        if parser.token == Token::Punct('#') {
            return Err(HoconError::invalid_substitution(
                "comments are not allowed inside substitutions",
                parser.line(),
                parser.column(),
            ));
        }

        path.push_str(&parser.token.text());
        let was_dot = parser.token == Token::Punct('.');

        parser.advance()?;

        if was_dot && parser.token == Token::Punct('.') {
            return Err(HoconError::adjacent_periods(parser.line(), parser.column()));
        }

        if parser.token == Token::Punct('}') {
            if was_dot {
                return Err(HoconError::trailing_period(
                    parser.line(),
                    parser.column().saturating_sub(1),
                ));
            }

            closed = true;
            parser.advance()?;
            break;
        }

        if let Token::Punct(c) = parser.token {
            if is_forbidden_char(c) {
                return Err(HoconError::invalid_key(c.to_string(), parser.line(), parser.column()));
            }
        }
    }

    if !closed {
        return Err(HoconError::invalid_substitution(
            "missing closing parenthesis",
            parser.line(),
            parser.column(),
        ));
    }

    Ok(Substitution::new(path, optional))
}

/// Read a `"""` string through raw character reads. The string closes on
/// the first run of three quotes not followed by another quote; any quotes
/// beyond three belong to the content.
pub(super) fn extract_multi_line_string(parser: &mut Parser) -> Result<Value, HoconError> {
    parser.lexer.read_char(); // third quote of the opening delimiter

    let mut content = String::new();
    let mut adjacent_quotes = 0;

    while let Some(c) = parser.lexer.read_char() {
        content.push(c);

        if c == '"' {
            adjacent_quotes += 1;
        } else {
            adjacent_quotes = 0;
        }

        if adjacent_quotes >= 3 && parser.lexer.peek_char() != Some('"') {
            break;
        }
    }

    if adjacent_quotes < 3 {
        return Err(HoconError::UnclosedMultiLineString);
    }

    content.truncate(content.len() - 3);
    parser.advance()?;

    Ok(Value::String(content))
}
