use super::scanner::{bump, peek_second, skip_layout};
use super::*;

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, HoconError> {
    skip_layout(lexer);

    lexer.token_line = lexer.line;
    lexer.token_column = lexer.column + 1;

    match lexer.peek {
        Some(c) if c.is_ascii_digit() => tokenize_number(lexer),
        Some(c) if c.is_alphabetic() || c == '_' || c == '-' => Ok(tokenize_identifier(lexer)),
        Some('"') => Ok(tokenize_string(lexer)),
        Some(c) => {
            bump(lexer);
            Ok(Token::Punct(c))
        }
        None => Ok(Token::Eof),
    }
}

fn tokenize_number(lexer: &mut Lexer) -> Result<Token, HoconError> {
    let mut text = String::new();
    let mut is_float = false;

    while let Some(c) = lexer.peek {
        if c.is_ascii_digit() {
            text.push(c);
            bump(lexer);
        } else if c == '.' && !is_float && peek_second(lexer).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            text.push(c);
            bump(lexer);
        } else if (c == 'e' || c == 'E')
            && peek_second(lexer).is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-')
        {
            is_float = true;
            text.push(c);
            bump(lexer);
            if let Some(sign @ ('+' | '-')) = lexer.peek {
                text.push(sign);
                bump(lexer);
            }
        } else {
            break;
        }
    }

    if is_float {
        text.parse::<f64>().map(Token::Float).map_err(|_| {
            HoconError::invalid_value(format!("invalid number: {:?}", text), lexer.token_line, lexer.token_column)
        })
    } else {
        text.parse::<i64>().map(Token::Int).map_err(|_| {
            HoconError::invalid_value(format!("invalid number: {:?}", text), lexer.token_line, lexer.token_column)
        })
    }
}

fn tokenize_identifier(lexer: &mut Lexer) -> Token {
    let mut ident = String::new();

    while let Some(c) = lexer.peek {
        if c.is_alphanumeric() || c == '_' || c == '-' {
            ident.push(c);
            bump(lexer);
        } else {
            break;
        }
    }

    Token::Ident(ident)
}

/// Scan a double-quoted string. The returned lexeme keeps the surrounding
/// quotes so the parser can tell quoted from unquoted text, with escape
/// sequences inside already expanded.
///
/// `""` immediately followed by another quote is returned as the empty
/// lexeme `""`; the parser detects the third quote through
/// [`Lexer::peek_char`] and switches to raw multi-line extraction.
fn tokenize_string(lexer: &mut Lexer) -> Token {
    bump(lexer); // opening quote

    if lexer.peek == Some('"') {
        bump(lexer);
        return Token::String("\"\"".into());
    }

    let mut content = String::new();
    let mut closed = false;

    while let Some(c) = bump(lexer) {
        match c {
            '"' => {
                closed = true;
                break;
            }
            '\\' => {
                let escaped = match bump(lexer) {
                    Some('n') => '\n',
                    Some('t') => '\t',
                    Some('r') => '\r',
                    Some(other) => other,
                    None => break,
                };
                content.push(escaped);
            }
            _ => content.push(c),
        }
    }

    let mut lexeme = String::with_capacity(content.len() + 2);
    lexeme.push('"');
    lexeme.push_str(&content);
    if closed {
        lexeme.push('"');
    }

    Token::String(lexeme)
}
