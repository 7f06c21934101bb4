use std::fs;
use std::io;
use std::path::PathBuf;

use super::value::extract_value;
use super::*;
use crate::value::{Object, Value};

pub(super) fn extract_object(parser: &mut Parser) -> Result<Object, HoconError> {
    extract_object_inner(parser, false)
}

/// Extract an object, either wrapped in `{ }` or with the braces omitted
/// (the implicit top-level object, and the tail of a path-expression key).
pub(super) fn extract_object_inner(
    parser: &mut Parser,
    is_sub_object: bool,
) -> Result<Object, HoconError> {
    let mut object = Object::new();
    let mut braces_balanced = true;

    if parser.token == Token::Punct('{') {
        braces_balanced = false;
        parser.advance()?;

        if parser.token == Token::Punct('}') {
            parser.advance()?;
            return Ok(object);
        }
    }

    let mut last_row = 0;

    while parser.token != Token::Eof {
        while parser.token == Token::Punct('#') {
            parser.consume_comment()?;
        }

        if matches!(&parser.token, Token::Ident(ident) if ident == "include") {
            parser.advance()?;
            let included = parse_included_resource(parser)?;
            object.merge(included);
            parser.advance()?;
        }

        if !braces_balanced && parser.token == Token::Punct('}') {
            braces_balanced = true;
            parser.advance()?;
            break;
        }

        if parser.token == Token::Eof {
            break;
        }

        let key = match &parser.token {
            Token::String(lexeme) => strip_quotes(lexeme),
            Token::Punct(c) => {
                if *c == '.' {
                    return Err(HoconError::leading_period(parser.line(), parser.column()));
                }
                if is_forbidden_char(*c) {
                    return Err(HoconError::invalid_key(c.to_string(), parser.line(), parser.column()));
                }
                c.to_string()
            }
            other => other.text(),
        };

        parser.advance()?;

        let separator = parser.token.clone();
        let plus_equals =
            separator == Token::Punct('+') && parser.lexer.peek_char() == Some('=');

        if separator == Token::Punct('.') || separator == Token::Punct('{') {
            if separator == Token::Punct('.') {
                parser.advance()?; // skip '.'

                if parser.token == Token::Punct('.') {
                    return Err(HoconError::adjacent_periods(parser.line(), parser.column()));
                }

                if parser.is_separator() {
                    return Err(HoconError::trailing_period(
                        parser.line(),
                        parser.column().saturating_sub(1),
                    ));
                }
            }

            last_row = parser.line();

            let mut extracted = extract_object_inner(parser, true)?;

            if matches!(object.get(&key), Some(Value::Object(_))) {
                if let Some(Value::Object(mut existing)) = object.take(&key) {
                    existing.merge(extracted);
                    extracted = existing;
                }
            }

            object.insert(key.clone(), Value::Object(extracted));
        }

        if separator == Token::Punct('=') || separator == Token::Punct(':') {
            parser.advance()?;
            last_row = parser.line();

            let value = extract_value(parser)?;
            let value = match object.take(&key) {
                Some(existing) => combine_values(existing, value),
                None => value,
            };

            object.insert(key.clone(), value);
        } else if plus_equals {
            parser.advance()?; // onto '='
            parser.advance()?; // past '='

            parse_plus_equals_value(parser, &mut object, &key)?;
        }

        if braces_balanced && is_sub_object {
            return Ok(object);
        }

        while parser.line() == last_row && parser.token != Token::Eof {
            if !check_and_concatenate(parser, &mut object, &key)? {
                break;
            }
        }

        while parser.token == Token::Punct('#') {
            parser.consume_comment()?;
        }

        if parser.line() == last_row
            && parser.token != Token::Punct(',')
            && parser.token != Token::Punct('}')
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

        if !braces_balanced && parser.token == Token::Punct('}') {
            braces_balanced = true;
            parser.advance()?;
            break;
        }
    }

    if !braces_balanced {
        return Err(HoconError::invalid_object(
            "braces do not match",
            parser.line(),
            parser.column(),
        ));
    }

    Ok(object)
}

/// How a value inserted at an occupied key combines with the existing one.
///
/// Object pairs deep-merge. A substitution next to an object or another
/// substitution forms a concatenation that the resolver reduces later. A
/// substitution following any other value becomes its alternative. In every
/// remaining case the new value simply overrides the old.
fn combine_values(existing: Value, incoming: Value) -> Value {
    match (existing, incoming) {
        (Value::Object(mut existing), Value::Object(incoming)) => {
            existing.merge(incoming);
            Value::Object(existing)
        }
        (existing @ Value::Substitution(_), incoming @ (Value::Substitution(_) | Value::Object(_)))
        | (existing @ Value::Object(_), incoming @ Value::Substitution(_)) => {
            Value::Concatenation(vec![existing, incoming])
        }
        (existing, Value::Substitution(substitution)) => Value::ValueWithAlternative {
            value: Box::new(existing),
            alternative: substitution,
        },
        (_, incoming) => incoming,
    }
}

/// `key += value` appends to the array at `key`, creating a one-element
/// array when the key is absent.
pub(super) fn parse_plus_equals_value(
    parser: &mut Parser,
    object: &mut Object,
    key: &str,
) -> Result<(), HoconError> {
    match object.take(key) {
        None => {
            let value = extract_value(parser)?;
            object.insert(key, Value::Array(vec![value]));
        }
        Some(Value::Array(mut values)) => {
            let value = extract_value(parser)?;
            values.push(value);
            object.insert(key, Value::Array(values));
        }
        Some(existing) => {
            return Err(HoconError::invalid_value(
                format!(
                    "value: {:?} of the key: {:?} is not an array",
                    existing.to_string(),
                    key
                ),
                parser.line(),
                parser.column(),
            ));
        }
    }

    Ok(())
}

/// Absorb the next same-line value into a concatenation at `key`, keeping
/// the whitespace run between the previous value and this one.
pub(super) fn check_and_concatenate(
    parser: &mut Parser,
    object: &mut Object,
    key: &str,
) -> Result<bool, HoconError> {
    let existing_concatenable = object.get(key).is_some_and(Value::is_concatenable);
    if !existing_concatenable || !parser.is_token_concatenable() {
        return Ok(false);
    }

    let whitespace = parser.lexer.whitespace().to_string();
    let value = extract_value(parser)?;

    let combined = match object.take(key) {
        Some(Value::Concatenation(mut values)) => {
            values.push(Value::String(whitespace));
            values.push(value);
            Value::Concatenation(values)
        }
        Some(previous) => {
            Value::Concatenation(vec![previous, Value::String(whitespace), value])
        }
        None => value,
    };

    object.insert(key, combined);
    Ok(true)
}

struct Include {
    path: String,
    required: bool,
}

/// Validate the include form after the `include` keyword:
/// `"path"`, `file("path")`, `classpath("path")`, each optionally wrapped
/// in `required(...)`. The inner path must be a quoted string.
fn validate_include_value(parser: &mut Parser) -> Result<Include, HoconError> {
    let mut required = false;

    if matches!(&parser.token, Token::Ident(ident) if ident == "required") {
        required = true;
        parser.advance()?;

        if parser.token != Token::Punct('(') {
            return Err(HoconError::invalid_value(
                "missing opening parenthesis",
                parser.line(),
                parser.column(),
            ));
        }

        parser.advance()?;
    }

    let mut token_text = parser.token.text();

    if matches!(&parser.token, Token::Ident(ident) if ident == "file" || ident == "classpath") {
        parser.advance()?;

        if parser.token != Token::Punct('(') {
            return Err(HoconError::invalid_value(
                "missing opening parenthesis",
                parser.line(),
                parser.column(),
            ));
        }

        parser.advance()?;
        let path = parser.token.text();
        parser.advance()?;

        if parser.token != Token::Punct(')') {
            return Err(HoconError::invalid_value(
                "missing closing parenthesis",
                parser.line(),
                parser.column(),
            ));
        }

        token_text = path;
    }

    if required {
        parser.advance()?;

        if parser.token != Token::Punct(')') {
            return Err(HoconError::invalid_value(
                "missing closing parenthesis",
                parser.line(),
                parser.column(),
            ));
        }
    }

    if token_text.len() < 2 || !token_text.starts_with('"') || !token_text.ends_with('"') {
        return Err(HoconError::invalid_value(
            "expected quoted string, optionally wrapped in 'file(...)' or 'classpath(...)'",
            parser.line(),
            parser.column(),
        ));
    }

    Ok(Include {
        path: token_text[1..token_text.len() - 1].to_string(),
        required,
    })
}

/// Open, parse and return the object of an included resource.
///
/// A missing file is an empty object unless the include was `required`.
/// The included file gets a parser of its own; nested includes resolve
/// relative to that file's directory.
pub(super) fn parse_included_resource(parser: &mut Parser) -> Result<Object, HoconError> {
    let include = validate_include_value(parser)?;
    let include_path = resolve_include_path(&include.path, parser.file_dir.as_deref());

    let content = match fs::read_to_string(&include_path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !include.required => {
            return Ok(Object::new());
        }
        Err(err) => return Err(HoconError::could_not_parse_resource(&err)),
    };

    let mut include_parser = Parser::with_file_dir(&content, include_path.parent());
    include_parser.advance()?;

    if include_parser.token == Token::Punct('[') {
        return Err(HoconError::invalid_value(
            "included file cannot contain an array as the root value",
            parser.line(),
            parser.column(),
        ));
    }

    extract_object(&mut include_parser)
}

/// Resolve an include path: `~/` expands to the home directory, absolute
/// paths stand alone, everything else is joined to the including file's
/// directory.
fn resolve_include_path(raw_path: &str, base_dir: Option<&std::path::Path>) -> PathBuf {
    if let Some(rest) = raw_path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    let path = PathBuf::from(raw_path);
    if path.is_relative() {
        if let Some(base) = base_dir {
            return base.join(path);
        }
    }

    path
}
